use crate::foundation::{Address, QuorumError, Result, Signature, SigningDigest};
use crate::infrastructure::keys::mnemonic::MnemonicKey;
use crate::infrastructure::keys::soft_key::SoftKey;
use crate::infrastructure::ledger::LedgerKeychain;
use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KeySourceKind {
    SoftKeyFile,
    Mnemonic,
    Ledger,
}

impl KeySourceKind {
    pub const fn is_software(&self) -> bool {
        !matches!(self, Self::Ledger)
    }
}

impl fmt::Display for KeySourceKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::SoftKeyFile => write!(f, "key-file"),
            Self::Mnemonic => write!(f, "mnemonic"),
            Self::Ledger => write!(f, "ledger"),
        }
    }
}

/// Where signatures come from for one signing session.
#[derive(Debug, Clone)]
pub enum KeySource {
    SoftKeyFile(SoftKey),
    MnemonicDerived(MnemonicKey),
    Ledger(LedgerKeychain),
}

impl KeySource {
    pub fn kind(&self) -> KeySourceKind {
        match self {
            Self::SoftKeyFile(_) => KeySourceKind::SoftKeyFile,
            Self::MnemonicDerived(_) => KeySourceKind::Mnemonic,
            Self::Ledger(_) => KeySourceKind::Ledger,
        }
    }

    /// Addresses this source can sign for. Ledger sources answer with one batched device query.
    pub async fn addresses(&self) -> Result<Vec<Address>> {
        match self {
            Self::SoftKeyFile(key) => Ok(vec![key.address().clone()]),
            Self::MnemonicDerived(derived) => Ok(vec![derived.key.address().clone()]),
            Self::Ledger(keychain) => keychain.addresses().await,
        }
    }

    pub async fn sign_with(&self, address: &Address, digest: &SigningDigest) -> Result<Signature> {
        match self {
            Self::SoftKeyFile(key) => sign_soft(key, address, digest),
            Self::MnemonicDerived(derived) => sign_soft(&derived.key, address, digest),
            Self::Ledger(keychain) => keychain.sign_with(address, digest).await,
        }
    }
}

fn sign_soft(key: &SoftKey, address: &Address, digest: &SigningDigest) -> Result<Signature> {
    if key.address() != address {
        return Err(QuorumError::KeyNotFound(address.to_string()));
    }
    key.sign_digest(digest)
}
