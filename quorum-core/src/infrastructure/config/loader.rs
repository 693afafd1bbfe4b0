//! Configuration loader using Figment for layered config management.
//!
//! Precedence (lowest to highest):
//! 1. Compiled defaults
//! 2. TOML config file
//! 3. Environment variables (`QUORUM_` prefix, `__` for nesting)

use crate::foundation::{QuorumError, Result};
use crate::infrastructure::config::types::AppConfig;
use figment::providers::{Env, Format, Serialized, Toml};
use figment::Figment;
use log::{debug, info};
use std::path::Path;

/// Example: `QUORUM_RPC__TIMEOUT_SECS=30` -> `rpc.timeout_secs`.
pub const ENV_PREFIX: &str = "QUORUM_";

/// Variables under the prefix that are not configuration keys.
const NON_CONFIG_ENV_KEYS: &[&str] = &["MNEMONIC", "CONFIG_PATH", "DATA_DIR"];

pub fn load_config_from_file(path: &Path, data_dir: &Path) -> Result<AppConfig> {
    info!("loading configuration path={} data_dir={}", path.display(), data_dir.display());
    let mut figment = Figment::new().merge(Serialized::defaults(AppConfig::default()));
    if path.exists() {
        figment = figment.merge(Toml::file(path));
    } else {
        debug!("configuration file missing; using defaults and env only path={}", path.display());
    }
    figment = figment.merge(Env::prefixed(ENV_PREFIX).ignore(NON_CONFIG_ENV_KEYS).split("__"));

    let mut config: AppConfig = figment.extract().map_err(|e| QuorumError::ConfigError(format!("config extraction failed: {e}")))?;
    if config.keys.key_dir.is_relative() {
        config.keys.key_dir = data_dir.join(&config.keys.key_dir);
    }
    debug!(
        "configuration loaded rpc_url={} ledger_bridge_url={} key_dir={}",
        redact_url(&config.rpc.url),
        redact_url(&config.ledger.bridge_url),
        config.keys.key_dir.display()
    );
    Ok(config)
}

fn redact_url(url: &str) -> String {
    let Some(scheme_end) = url.find("://") else {
        return url.to_string();
    };
    let (scheme, rest) = url.split_at(scheme_end + 3);
    let Some(at) = rest.find('@') else {
        return url.to_string();
    };
    format!("{scheme}<redacted>@{}", &rest[at + 1..])
}
