mod loader;
mod types;
pub mod validation;

pub use loader::{load_config_from_file, ENV_PREFIX};
pub use types::*;

use crate::foundation::{QuorumError, Result};
use std::path::{Path, PathBuf};

pub const CONFIG_FILE_NAME: &str = "quorum.toml";
pub const CONFIG_PATH_ENV: &str = "QUORUM_CONFIG_PATH";
pub const DATA_DIR_ENV: &str = "QUORUM_DATA_DIR";

pub fn resolve_data_dir() -> Result<PathBuf> {
    if let Ok(data_dir) = std::env::var(DATA_DIR_ENV) {
        let trimmed = data_dir.trim();
        if !trimmed.is_empty() {
            return Ok(PathBuf::from(trimmed));
        }
    }
    let cwd = std::env::current_dir().map_err(|err| QuorumError::storage("env::current_dir", err))?;
    Ok(cwd.join(".quorum"))
}

/// `explicit` (the `--config` flag) wins over `QUORUM_CONFIG_PATH`, which wins over
/// `<data_dir>/quorum.toml`.
pub fn resolve_config_path(explicit: Option<&Path>, data_dir: &Path) -> PathBuf {
    if let Some(path) = explicit {
        return path.to_path_buf();
    }
    if let Ok(value) = std::env::var(CONFIG_PATH_ENV) {
        let trimmed = value.trim();
        if !trimmed.is_empty() {
            return PathBuf::from(trimmed);
        }
    }
    data_dir.join(CONFIG_FILE_NAME)
}

pub fn load_app_config(explicit: Option<&Path>) -> Result<AppConfig> {
    let data_dir = resolve_data_dir()?;
    let config_path = resolve_config_path(explicit, &data_dir);
    let config = load_config_from_file(&config_path, &data_dir)?;
    config.validate().map_err(|errors| QuorumError::ConfigError(format!("validation failed: {}", errors.join("; "))))?;
    Ok(config)
}
