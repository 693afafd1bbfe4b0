//! Key sources: software key files, mnemonic-derived keys and ledger devices.

pub mod key_source;
pub mod mnemonic;
pub mod secret;
pub mod soft_key;

pub use key_source::{KeySource, KeySourceKind};
pub use mnemonic::{derive_mnemonic_key, mnemonic_from_env, MnemonicKey, MNEMONIC_ENV};
pub use secret::SecretBytes;
pub use soft_key::{resolve_key_path, SoftKey};
