//! Application layer: signing and commit workflows over domain logic and infrastructure I/O.

pub mod commit;
pub mod keychain;
pub mod signing;

pub use commit::{CommitCoordinator, CommitStatus};
pub use keychain::{open_key_source, LedgerConnector, SigningConfig};
pub use signing::{fetch_control_keys, SignOutcome, SignReport, SigningCoordinator};
