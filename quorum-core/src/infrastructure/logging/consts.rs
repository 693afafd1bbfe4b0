pub const LOG_FILE_NAME: &str = "quorum.log";
/// Warn and error records only.
pub const ERR_LOG_FILE_NAME: &str = "quorum_err.log";

/// Format: `timestamp [LEVEL] message [module]`
pub const LOG_LINE_PATTERN_COLORED: &str = "{d(%Y-%m-%d %H:%M:%S%.3f)} [{h({l:5})}] {m} [{M}]{n}";
pub const LOG_LINE_PATTERN: &str = "{d(%Y-%m-%d %H:%M:%S%.3f)} [{l:5}] {m} [{M}]{n}";

/// Rotate at 10 MB.
pub const LOG_FILE_MAX_SIZE: u64 = 10_000_000;
pub const LOG_FILE_MAX_ROLLS: u32 = 3;

/// Crates logged at the requested level; everything else is off unless named.
pub const WHITELISTED_CRATES: &[&str] = &["quorum_core", "quorum_cli"];
