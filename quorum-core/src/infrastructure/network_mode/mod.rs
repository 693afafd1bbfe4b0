//! Network-dependent key-source rules.
//!
//! Mainnet carries real value, so software keys (key files and mnemonics) are refused
//! unless explicitly allowed, and the ledger is the default. Test networks accept any
//! source but require the operator to pick one.

use crate::foundation::{NetworkMode, QuorumError, Result};
use crate::infrastructure::keys::KeySourceKind;
use log::warn;

/// What the operator asked for on the command line and in the environment.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct KeySelection {
    pub key_file: bool,
    pub ledger: bool,
    pub mnemonic_env: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct KeySourcePolicy {
    pub network: NetworkMode,
    pub allow_insecure_keys_on_mainnet: bool,
}

impl KeySourcePolicy {
    pub fn new(network: NetworkMode, allow_insecure_keys_on_mainnet: bool) -> Self {
        Self { network, allow_insecure_keys_on_mainnet }
    }

    /// Picks the single key source for a session. Explicit flags take precedence over
    /// the mnemonic environment variable.
    pub fn resolve(&self, selection: KeySelection) -> Result<KeySourceKind> {
        let kind = match (selection.key_file, selection.ledger) {
            (true, true) => return Err(QuorumError::MutuallyExclusiveKeySource { selected: 2 }),
            (true, false) => KeySourceKind::SoftKeyFile,
            (false, true) => KeySourceKind::Ledger,
            (false, false) if selection.mnemonic_env => KeySourceKind::Mnemonic,
            (false, false) if self.network.is_production() => KeySourceKind::Ledger,
            (false, false) => return Err(QuorumError::MutuallyExclusiveKeySource { selected: 0 }),
        };
        self.check(kind)?;
        Ok(kind)
    }

    pub fn check(&self, kind: KeySourceKind) -> Result<()> {
        if !self.network.is_production() || !kind.is_software() {
            return Ok(());
        }
        if self.allow_insecure_keys_on_mainnet {
            warn!("software key source on mainnet allowed by keys.allow_insecure_keys_on_mainnet source={}", kind);
            return Ok(());
        }
        Err(QuorumError::SoftwareKeyForbidden { network: self.network.to_string() })
    }
}
