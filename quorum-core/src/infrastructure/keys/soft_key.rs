//! Software secp256k1 keys loaded from key files or derived from a mnemonic.

use crate::foundation::{
    address_from_xonly, Address, NetworkMode, QuorumError, Result, Signature, SigningDigest, SCHNORR_PUBKEY_SIZE, SECRET_KEY_SIZE,
};
use crate::infrastructure::keys::secret::SecretBytes;
use secp256k1::{schnorr, Keypair, Message, Secp256k1, SecretKey, XOnlyPublicKey};
use std::fs;
use std::path::{Path, PathBuf};
use zeroize::Zeroizing;

pub const KEY_FILE_EXTENSION: &str = "pk";
pub const ENCODED_KEY_PREFIX: &str = "PrivateKey-";
const MAX_TRAILING_NEWLINES: usize = 2;

#[derive(Clone)]
pub struct SoftKey {
    secret: SecretBytes,
    xonly: [u8; SCHNORR_PUBKEY_SIZE],
    address: Address,
}

impl std::fmt::Debug for SoftKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SoftKey").field("address", &self.address.to_string()).finish_non_exhaustive()
    }
}

impl SoftKey {
    pub fn from_secret_bytes(network: NetworkMode, bytes: &[u8]) -> Result<Self> {
        let secret = SecretKey::from_slice(bytes)
            .map_err(|err| QuorumError::CryptoError { operation: "parse_secp256k1_secret".to_string(), details: err.to_string() })?;
        let secp = Secp256k1::signing_only();
        let keypair = Keypair::from_secret_key(&secp, &secret);
        let (xonly, _) = keypair.x_only_public_key();
        let xonly = xonly.serialize();
        Ok(Self { secret: SecretBytes::from_slice(&secret.secret_bytes()), xonly, address: address_from_xonly(network.address_prefix(), &xonly) })
    }

    /// Loads a key file: 64 hex characters (optionally `0x` or `PrivateKey-` prefixed)
    /// followed by at most two newline bytes.
    pub fn load(network: NetworkMode, path: &Path) -> Result<Self> {
        let display = path.display().to_string();
        let contents = Zeroizing::new(
            fs::read(path).map_err(|err| QuorumError::invalid_key_file(display.clone(), format!("read failed: {err}")))?,
        );
        let secret = parse_key_file(&display, &contents)?;
        Self::from_secret_bytes(network, secret.expose_secret())
    }

    pub fn address(&self) -> &Address {
        &self.address
    }

    pub fn xonly_public_key(&self) -> &[u8; SCHNORR_PUBKEY_SIZE] {
        &self.xonly
    }

    pub fn sign_digest(&self, digest: &SigningDigest) -> Result<Signature> {
        let secret = SecretKey::from_slice(self.secret.expose_secret())?;
        let secp = Secp256k1::new();
        let keypair = Keypair::from_secret_key(&secp, &secret);
        let msg = Message::from_digest(*digest.as_hash());
        Ok(Signature::new(secp.sign_schnorr(&msg, &keypair).serialize()))
    }
}

/// `name` is used verbatim when it looks like a path, otherwise `<key_dir>/<name>.pk`.
pub fn resolve_key_path(key_dir: &Path, name: &str) -> PathBuf {
    let candidate = Path::new(name);
    if candidate.components().count() > 1 || candidate.extension().is_some_and(|ext| ext == KEY_FILE_EXTENSION) {
        return candidate.to_path_buf();
    }
    key_dir.join(format!("{name}.{KEY_FILE_EXTENSION}"))
}

pub fn parse_key_file(path: &str, contents: &[u8]) -> Result<SecretBytes> {
    let end = contents.iter().position(|b| *b < b'!').unwrap_or(contents.len());
    let (body, tail) = contents.split_at(end);
    if tail.iter().any(|b| *b != b'\n' && *b != b'\r') {
        return Err(QuorumError::invalid_key_file(path, "unexpected bytes after key"));
    }
    if tail.len() > MAX_TRAILING_NEWLINES {
        return Err(QuorumError::invalid_key_file(path, "too many trailing newlines"));
    }

    let body = body
        .strip_prefix(ENCODED_KEY_PREFIX.as_bytes())
        .or_else(|| body.strip_prefix(b"0x"))
        .unwrap_or(body);
    if body.len() != SECRET_KEY_SIZE * 2 {
        return Err(QuorumError::invalid_key_file(path, format!("expected {} hex characters, got {}", SECRET_KEY_SIZE * 2, body.len())));
    }
    let decoded = Zeroizing::new(hex::decode(body).map_err(|err| QuorumError::invalid_key_file(path, err.to_string()))?);
    Ok(SecretBytes::from_slice(&decoded))
}

pub fn verify_schnorr(xonly: &[u8; SCHNORR_PUBKEY_SIZE], digest: &SigningDigest, signature: &Signature) -> bool {
    let (Ok(pubkey), Ok(sig)) = (XOnlyPublicKey::from_slice(xonly), schnorr::Signature::from_slice(signature.as_bytes())) else {
        return false;
    };
    let secp = Secp256k1::verification_only();
    secp.verify_schnorr(&sig, &Message::from_digest(*digest.as_hash()), &pubkey).is_ok()
}
