use crate::foundation::DEFAULT_RPC_TIMEOUT_SECS;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use std::time::Duration;

pub const DEFAULT_NODE_RPC_URL: &str = "http://127.0.0.1:9650/ext/quorum";
pub const DEFAULT_LEDGER_BRIDGE_URL: &str = "http://127.0.0.1:9661";
/// Ledger calls wait on a human confirming on the device.
pub const DEFAULT_LEDGER_TIMEOUT_SECS: u64 = 120;
pub const DEFAULT_KEY_DIR: &str = "keys";

#[derive(Clone, Debug, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    pub rpc: RpcConfig,
    pub ledger: LedgerConfig,
    pub keys: KeysConfig,
    pub logging: LoggingConfig,
}

#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(default)]
pub struct RpcConfig {
    pub url: String,
    /// Bound on each node call, including every balance query during funded discovery.
    pub timeout_secs: u64,
}

impl Default for RpcConfig {
    fn default() -> Self {
        Self { url: DEFAULT_NODE_RPC_URL.to_string(), timeout_secs: DEFAULT_RPC_TIMEOUT_SECS }
    }
}

impl RpcConfig {
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }
}

#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(default)]
pub struct LedgerConfig {
    pub bridge_url: String,
    pub timeout_secs: u64,
}

impl Default for LedgerConfig {
    fn default() -> Self {
        Self { bridge_url: DEFAULT_LEDGER_BRIDGE_URL.to_string(), timeout_secs: DEFAULT_LEDGER_TIMEOUT_SECS }
    }
}

impl LedgerConfig {
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }
}

#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(default)]
pub struct KeysConfig {
    /// Directory holding `<name>.pk` key files. Relative paths resolve against the data dir.
    pub key_dir: PathBuf,
    /// Address index of the mnemonic key: `m/44'/<coin>'/0'/0/<account>`.
    pub mnemonic_account: u32,
    pub allow_insecure_keys_on_mainnet: bool,
}

impl Default for KeysConfig {
    fn default() -> Self {
        Self { key_dir: PathBuf::from(DEFAULT_KEY_DIR), mnemonic_account: 0, allow_insecure_keys_on_mainnet: false }
    }
}

#[derive(Clone, Debug, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    /// Level or comma-separated `target=level` filters, e.g. `info,quorum_core=debug`.
    pub filters: Option<String>,
    pub log_dir: Option<PathBuf>,
}
