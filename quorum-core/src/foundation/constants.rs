//! System-wide constants for quorum signing.

/// Number of ledger address-indices searched when resolving target addresses.
pub const ADDRESS_SEARCH_BOUND: u32 = 1000;

/// Number of ledger address-indices searched when looking for funded addresses.
///
/// Each index costs a device round-trip plus a balance RPC, so this is kept small.
pub const FUNDED_SEARCH_BOUND: u32 = 100;

/// Schnorr signature size in bytes (64 bytes).
pub const SCHNORR_SIGNATURE_SIZE: usize = 64;

/// Schnorr public key size in bytes (32 bytes, x-only).
pub const SCHNORR_PUBKEY_SIZE: usize = 32;

/// Current transaction file format version.
pub const TX_FILE_VERSION: u16 = 1;

/// Domain separation tag mixed into every signing digest.
pub const SIGNING_DOMAIN_TAG: &[u8] = b"quorum/admin-tx/v1";

/// Default timeout for a single network RPC call (seconds).
pub const DEFAULT_RPC_TIMEOUT_SECS: u64 = 10;

/// Private key size in bytes (secp256k1).
pub const SECRET_KEY_SIZE: usize = 32;
