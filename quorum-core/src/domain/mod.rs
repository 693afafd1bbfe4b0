//! Domain layer: pure signing and discovery logic, no I/O of its own.

pub mod authorization;
pub mod discovery;
pub mod transaction;

pub use authorization::{AuthorizationSet, ControlKeySet};
pub use discovery::{
    resolve_funded_indices, resolve_indices, scan_device, AddressDiscovery, AddressIndexSource, BalanceSource, FundedDiscovery,
    IndexScan, LedgerIndices, ScanVisitor,
};
pub use transaction::{Transaction, TxState};
