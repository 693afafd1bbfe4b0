//! Resolves the operator's key-source selection into a ready [`KeySource`].

use crate::domain::BalanceSource;
use crate::foundation::{Address, NetworkMode, QuorumError, Result};
use crate::infrastructure::config::AppConfig;
use crate::infrastructure::keys::{derive_mnemonic_key, resolve_key_path, KeySource, KeySourceKind, SecretBytes, SoftKey};
use crate::infrastructure::ledger::{LedgerDevice, LedgerKeychain};
use crate::infrastructure::network_mode::{KeySelection, KeySourcePolicy};
use log::info;
use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;

/// Everything the signing session needs to know about key selection, gathered from CLI
/// flags and configuration in one place.
#[derive(Debug, Clone)]
pub struct SigningConfig {
    pub network: NetworkMode,
    pub key_name: Option<String>,
    pub use_ledger: bool,
    /// Addresses the ledger must hold; non-empty implies `use_ledger`.
    pub ledger_addresses: Vec<Address>,
    /// Funds the ledger addresses must cover; 0 skips funded discovery.
    pub required_funds: u64,
    pub key_dir: PathBuf,
    pub mnemonic_account: u32,
    pub allow_insecure_keys_on_mainnet: bool,
    pub balance_timeout: Duration,
}

impl SigningConfig {
    pub fn new(network: NetworkMode, config: &AppConfig) -> Self {
        Self {
            network,
            key_name: None,
            use_ledger: false,
            ledger_addresses: Vec::new(),
            required_funds: 0,
            key_dir: config.keys.key_dir.clone(),
            mnemonic_account: config.keys.mnemonic_account,
            allow_insecure_keys_on_mainnet: config.keys.allow_insecure_keys_on_mainnet,
            balance_timeout: config.rpc.timeout(),
        }
    }

    pub fn selection(&self, mnemonic_env: bool) -> KeySelection {
        KeySelection {
            key_file: self.key_name.is_some(),
            ledger: self.use_ledger || !self.ledger_addresses.is_empty(),
            mnemonic_env,
        }
    }

    pub fn policy(&self) -> KeySourcePolicy {
        KeySourcePolicy::new(self.network, self.allow_insecure_keys_on_mainnet)
    }
}

/// Opens the ledger only once it is known to be needed.
pub trait LedgerConnector: Send + Sync {
    fn connect(&self) -> Result<Arc<dyn LedgerDevice>>;
}

impl LedgerConnector for Arc<dyn LedgerDevice> {
    fn connect(&self) -> Result<Arc<dyn LedgerDevice>> {
        Ok(Arc::clone(self))
    }
}

pub async fn open_key_source(
    config: &SigningConfig,
    mnemonic: Option<SecretBytes>,
    ledger: &dyn LedgerConnector,
    balances: &dyn BalanceSource,
) -> Result<KeySource> {
    let kind = config.policy().resolve(config.selection(mnemonic.is_some()))?;
    info!("key source selected kind={} network={}", kind, config.network);

    match kind {
        KeySourceKind::SoftKeyFile => {
            let name = config.key_name.as_deref().ok_or(QuorumError::MutuallyExclusiveKeySource { selected: 0 })?;
            let path = resolve_key_path(&config.key_dir, name);
            let key = SoftKey::load(config.network, &path)?;
            info!("loaded key file path={} address={}", path.display(), key.address());
            Ok(KeySource::SoftKeyFile(key))
        }
        KeySourceKind::Mnemonic => {
            let phrase = mnemonic.ok_or(QuorumError::MutuallyExclusiveKeySource { selected: 0 })?;
            let derived = derive_mnemonic_key(&phrase, config.network, config.mnemonic_account)?;
            info!("derived mnemonic key path={} address={}", derived.path, derived.key.address());
            Ok(KeySource::MnemonicDerived(derived))
        }
        KeySourceKind::Ledger => {
            let mut keychain = LedgerKeychain::new(ledger.connect()?);
            if !config.ledger_addresses.is_empty() {
                keychain.add_addresses(&config.ledger_addresses).await?.ensure_complete()?;
            }
            if config.required_funds > 0 {
                keychain.add_funded(balances, config.required_funds, config.balance_timeout).await?;
            }
            for (index, address) in keychain.indexed_addresses().await? {
                info!("ledger address index={} address={}", index, address);
            }
            info!("ledger keychain ready indices={:?}", keychain.indices().to_vec());
            Ok(KeySource::Ledger(keychain))
        }
    }
}
