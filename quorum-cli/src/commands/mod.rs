pub mod commit;
pub mod sign;

use quorum_core::domain::Transaction;
use quorum_core::foundation::{Address, Result};
use quorum_core::infrastructure::config::AppConfig;
use quorum_core::infrastructure::rpc::JsonRpcNetwork;
use quorum_core::infrastructure::storage::{FileTransactionStore, PartialSignatureStore};
use std::path::Path;
use std::sync::Arc;

pub(crate) fn open_transaction(path: &Path) -> Result<(Arc<FileTransactionStore>, Transaction)> {
    let store = Arc::new(FileTransactionStore::new(path));
    let transaction = store.load()?;
    Ok((store, transaction))
}

pub(crate) fn connect_network(config: &AppConfig) -> Result<Arc<JsonRpcNetwork>> {
    Ok(Arc::new(JsonRpcNetwork::new(&config.rpc.url, config.rpc.timeout())?))
}

pub(crate) fn print_remaining(chain: &str, remaining: &[Address]) {
    println!("Remaining signers for {chain}:");
    for address in remaining {
        println!("  - {address}");
    }
}
