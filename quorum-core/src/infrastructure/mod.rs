//! Infrastructure layer: I/O and external integrations.

pub mod config;
pub mod keys;
pub mod ledger;
pub mod logging;
pub mod network_mode;
pub mod rpc;
pub mod storage;
