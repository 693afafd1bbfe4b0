use crate::foundation::types::TxId;
use secp256k1::Error as SecpError;
use std::fmt;
use std::io;
use thiserror::Error;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCode {
    MutuallyExclusiveKeySource,
    SoftwareKeyForbidden,
    UnsupportedNetwork,
    ConfigError,
    InvalidMnemonic,
    InvalidKeyFile,
    InvalidDerivationPath,
    InsufficientLedgerFunds,
    LedgerAddressesNotFound,
    NoAuthKeysInWallet,
    KeyNotFound,
    NotFullySigned,
    AlreadyCommitted,
    SlotAlreadySigned,
    SlotOutOfRange,
    SlotCountMismatch,
    AuthIndexOutOfRange,
    DuplicateAuthIndex,
    ThresholdNotMet,
    InvalidControlKeySet,
    UnsupportedTxVersion,
    DeviceError,
    NodeRpcError,
    RpcTimeout,
    StorageError,
    SerializationError,
    EncodingError,
    CryptoError,
    InvalidAddress,
}

/// Coarse grouping used by the CLI to pick exit codes and by logs.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCategory {
    Configuration,
    Discovery,
    Authorization,
    State,
    Transport,
    Storage,
}

impl fmt::Display for ErrorCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Configuration => write!(f, "configuration"),
            Self::Discovery => write!(f, "discovery"),
            Self::Authorization => write!(f, "authorization"),
            Self::State => write!(f, "state"),
            Self::Transport => write!(f, "transport"),
            Self::Storage => write!(f, "storage"),
        }
    }
}

#[derive(Debug, Error)]
pub enum QuorumError {
    // === Configuration Errors ===
    #[error("exactly one key source must be selected (--key, --ledger/--ledger-addrs or QUORUM_MNEMONIC), got {selected}")]
    MutuallyExclusiveKeySource { selected: usize },

    #[error("software key sources are not allowed on {network}; use a ledger device")]
    SoftwareKeyForbidden { network: String },

    #[error("unsupported network: {0}")]
    UnsupportedNetwork(String),

    #[error("configuration error: {0}")]
    ConfigError(String),

    #[error("invalid mnemonic: {0}")]
    InvalidMnemonic(String),

    #[error("invalid key file {path}: {details}")]
    InvalidKeyFile { path: String, details: String },

    #[error("invalid derivation path: {0}")]
    InvalidDerivationPath(String),

    // === Discovery Errors ===
    #[error("not enough funds on ledger: required {required}, found {found} in the first {scanned} indices")]
    InsufficientLedgerFunds { required: u64, found: u64, scanned: u32 },

    #[error("ledger addresses not found in the first {scanned} indices: {}", join_addresses(.missing))]
    LedgerAddressesNotFound { missing: Vec<String>, scanned: u32 },

    // === Authorization Errors ===
    #[error("wallet does not contain any of the remaining auth keys: {}", join_addresses(.remaining))]
    NoAuthKeysInWallet { remaining: Vec<String> },

    #[error("key not found: {0}")]
    KeyNotFound(String),

    // === State Errors ===
    #[error("transaction is not fully signed ({signed} of {required}); remaining: {}", join_addresses(.remaining))]
    NotFullySigned { remaining: Vec<String>, signed: usize, required: usize },

    #[error("transaction {tx_id} was already committed")]
    AlreadyCommitted { tx_id: TxId },

    #[error("signature slot {slot} is already signed")]
    SlotAlreadySigned { slot: usize },

    #[error("signature slot {slot} out of range (slots: {len})")]
    SlotOutOfRange { slot: usize, len: usize },

    #[error("transaction has {signatures} signature slots but {auth_indices} auth indices")]
    SlotCountMismatch { signatures: usize, auth_indices: usize },

    #[error("auth index {index} exceeds number of control keys {control_keys}")]
    AuthIndexOutOfRange { index: u32, control_keys: usize },

    #[error("auth index {index} appears more than once")]
    DuplicateAuthIndex { index: u32 },

    #[error("threshold not met: required {required}, slots {slots}")]
    ThresholdNotMet { required: u32, slots: usize },

    #[error("invalid control key set: {0}")]
    InvalidControlKeySet(String),

    #[error("unsupported transaction file version {found} (expected {expected})")]
    UnsupportedTxVersion { found: u16, expected: u16 },

    // === Transport Errors ===
    #[error("ledger device error during {operation}: {details}")]
    DeviceError { operation: String, details: String },

    #[error("node RPC error: {0}")]
    NodeRpcError(String),

    #[error("RPC {operation} timed out after {timeout_secs}s")]
    RpcTimeout { operation: String, timeout_secs: u64 },

    // === Storage / Encoding Errors ===
    #[error("storage error during {operation}: {details}")]
    StorageError { operation: String, details: String },

    #[error("{format} serialization error: {details}")]
    SerializationError { format: String, details: String },

    #[error("encoding error: {0}")]
    EncodingError(String),

    #[error("crypto error during {operation}: {details}")]
    CryptoError { operation: String, details: String },

    #[error("invalid address: {0}")]
    InvalidAddress(String),
}

pub type Result<T> = std::result::Result<T, QuorumError>;

fn join_addresses(addresses: &[String]) -> String {
    addresses.join(", ")
}

impl QuorumError {
    pub fn code(&self) -> ErrorCode {
        match self {
            QuorumError::MutuallyExclusiveKeySource { .. } => ErrorCode::MutuallyExclusiveKeySource,
            QuorumError::SoftwareKeyForbidden { .. } => ErrorCode::SoftwareKeyForbidden,
            QuorumError::UnsupportedNetwork(_) => ErrorCode::UnsupportedNetwork,
            QuorumError::ConfigError(_) => ErrorCode::ConfigError,
            QuorumError::InvalidMnemonic(_) => ErrorCode::InvalidMnemonic,
            QuorumError::InvalidKeyFile { .. } => ErrorCode::InvalidKeyFile,
            QuorumError::InvalidDerivationPath(_) => ErrorCode::InvalidDerivationPath,
            QuorumError::InsufficientLedgerFunds { .. } => ErrorCode::InsufficientLedgerFunds,
            QuorumError::LedgerAddressesNotFound { .. } => ErrorCode::LedgerAddressesNotFound,
            QuorumError::NoAuthKeysInWallet { .. } => ErrorCode::NoAuthKeysInWallet,
            QuorumError::KeyNotFound(_) => ErrorCode::KeyNotFound,
            QuorumError::NotFullySigned { .. } => ErrorCode::NotFullySigned,
            QuorumError::AlreadyCommitted { .. } => ErrorCode::AlreadyCommitted,
            QuorumError::SlotAlreadySigned { .. } => ErrorCode::SlotAlreadySigned,
            QuorumError::SlotOutOfRange { .. } => ErrorCode::SlotOutOfRange,
            QuorumError::SlotCountMismatch { .. } => ErrorCode::SlotCountMismatch,
            QuorumError::AuthIndexOutOfRange { .. } => ErrorCode::AuthIndexOutOfRange,
            QuorumError::DuplicateAuthIndex { .. } => ErrorCode::DuplicateAuthIndex,
            QuorumError::ThresholdNotMet { .. } => ErrorCode::ThresholdNotMet,
            QuorumError::InvalidControlKeySet(_) => ErrorCode::InvalidControlKeySet,
            QuorumError::UnsupportedTxVersion { .. } => ErrorCode::UnsupportedTxVersion,
            QuorumError::DeviceError { .. } => ErrorCode::DeviceError,
            QuorumError::NodeRpcError(_) => ErrorCode::NodeRpcError,
            QuorumError::RpcTimeout { .. } => ErrorCode::RpcTimeout,
            QuorumError::StorageError { .. } => ErrorCode::StorageError,
            QuorumError::SerializationError { .. } => ErrorCode::SerializationError,
            QuorumError::EncodingError(_) => ErrorCode::EncodingError,
            QuorumError::CryptoError { .. } => ErrorCode::CryptoError,
            QuorumError::InvalidAddress(_) => ErrorCode::InvalidAddress,
        }
    }

    pub fn category(&self) -> ErrorCategory {
        match self.code() {
            ErrorCode::MutuallyExclusiveKeySource
            | ErrorCode::SoftwareKeyForbidden
            | ErrorCode::UnsupportedNetwork
            | ErrorCode::ConfigError
            | ErrorCode::InvalidMnemonic
            | ErrorCode::InvalidKeyFile
            | ErrorCode::InvalidDerivationPath => ErrorCategory::Configuration,
            ErrorCode::InsufficientLedgerFunds | ErrorCode::LedgerAddressesNotFound => ErrorCategory::Discovery,
            ErrorCode::NoAuthKeysInWallet | ErrorCode::KeyNotFound => ErrorCategory::Authorization,
            ErrorCode::NotFullySigned
            | ErrorCode::AlreadyCommitted
            | ErrorCode::SlotAlreadySigned
            | ErrorCode::SlotOutOfRange
            | ErrorCode::SlotCountMismatch
            | ErrorCode::AuthIndexOutOfRange
            | ErrorCode::DuplicateAuthIndex
            | ErrorCode::ThresholdNotMet
            | ErrorCode::InvalidControlKeySet
            | ErrorCode::UnsupportedTxVersion => ErrorCategory::State,
            ErrorCode::DeviceError | ErrorCode::NodeRpcError | ErrorCode::RpcTimeout => ErrorCategory::Transport,
            ErrorCode::StorageError
            | ErrorCode::SerializationError
            | ErrorCode::EncodingError
            | ErrorCode::CryptoError
            | ErrorCode::InvalidAddress => ErrorCategory::Storage,
        }
    }

    pub fn device(operation: impl Into<String>, details: impl fmt::Display) -> Self {
        QuorumError::DeviceError { operation: operation.into(), details: details.to_string() }
    }

    pub fn storage(operation: impl Into<String>, details: impl fmt::Display) -> Self {
        QuorumError::StorageError { operation: operation.into(), details: details.to_string() }
    }

    pub fn invalid_key_file(path: impl Into<String>, details: impl Into<String>) -> Self {
        QuorumError::InvalidKeyFile { path: path.into(), details: details.into() }
    }
}

impl From<hex::FromHexError> for QuorumError {
    fn from(err: hex::FromHexError) -> Self {
        QuorumError::EncodingError(format!("hex decode error: {}", err))
    }
}

impl From<io::Error> for QuorumError {
    fn from(err: io::Error) -> Self {
        QuorumError::StorageError { operation: "io".to_string(), details: err.to_string() }
    }
}

impl From<serde_json::Error> for QuorumError {
    fn from(err: serde_json::Error) -> Self {
        QuorumError::SerializationError { format: "json".to_string(), details: err.to_string() }
    }
}

impl From<kaspa_addresses::AddressError> for QuorumError {
    fn from(err: kaspa_addresses::AddressError) -> Self {
        QuorumError::InvalidAddress(err.to_string())
    }
}

impl From<SecpError> for QuorumError {
    fn from(err: SecpError) -> Self {
        QuorumError::CryptoError { operation: "secp256k1".to_string(), details: err.to_string() }
    }
}

impl From<reqwest::Error> for QuorumError {
    fn from(err: reqwest::Error) -> Self {
        QuorumError::NodeRpcError(err.to_string())
    }
}
