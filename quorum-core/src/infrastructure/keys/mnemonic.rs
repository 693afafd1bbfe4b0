use crate::foundation::{NetworkMode, QuorumError, Result};
use crate::infrastructure::keys::secret::SecretBytes;
use crate::infrastructure::keys::soft_key::SoftKey;
use kaspa_bip32::{DerivationPath, ExtendedPrivateKey, Language, Mnemonic, SecretKey};
use std::str::FromStr;

pub const MNEMONIC_ENV: &str = "QUORUM_MNEMONIC";

/// BIP44 path for the mnemonic key: `m/44'/<coin_type>'/0'/0/<account>`.
pub fn derivation_path(network: NetworkMode, account: u32) -> String {
    format!("m/44'/{}'/0'/0/{}", network.coin_type(), account)
}

/// Reads the phrase from `QUORUM_MNEMONIC`. Unset or blank means no mnemonic source.
pub fn mnemonic_from_env() -> Option<SecretBytes> {
    let value = std::env::var(MNEMONIC_ENV).ok()?;
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return None;
    }
    Some(SecretBytes::from_slice(trimmed.as_bytes()))
}

#[derive(Clone, Debug)]
pub struct MnemonicKey {
    pub key: SoftKey,
    pub path: String,
}

pub fn derive_mnemonic_key(phrase: &SecretBytes, network: NetworkMode, account: u32) -> Result<MnemonicKey> {
    let phrase = std::str::from_utf8(phrase.expose_secret()).map_err(|err| QuorumError::InvalidMnemonic(format!("invalid UTF-8: {err}")))?;
    let mnemonic =
        Mnemonic::new(phrase.trim(), Language::English).map_err(|err| QuorumError::InvalidMnemonic(err.to_string()))?;
    let xprv = ExtendedPrivateKey::<SecretKey>::new(mnemonic.to_seed(""))
        .map_err(|err| QuorumError::InvalidMnemonic(format!("failed to derive master key: {err}")))?;

    let path_str = derivation_path(network, account);
    let path = DerivationPath::from_str(&path_str).map_err(|err| QuorumError::InvalidDerivationPath(err.to_string()))?;
    let derived = xprv.derive_path(&path).map_err(|err| QuorumError::InvalidDerivationPath(err.to_string()))?;
    let key = SoftKey::from_secret_bytes(network, &derived.private_key().secret_bytes())?;
    Ok(MnemonicKey { key, path: path_str })
}
