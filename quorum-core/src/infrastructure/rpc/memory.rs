use crate::domain::{ControlKeySet, Transaction};
use crate::foundation::{Address, QuorumError, Result, TxId};
use crate::infrastructure::rpc::NetworkRpc;
use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Mutex;
use std::time::Duration;

/// In-process network used by tests and dry runs.
pub struct MemoryNetwork {
    balances: Mutex<HashMap<String, u64>>,
    owners: Mutex<HashMap<String, ControlKeySet>>,
    committed: Mutex<Vec<TxId>>,
    submit_calls: AtomicUsize,
    balance_delay: Option<Duration>,
}

impl MemoryNetwork {
    pub fn new() -> Self {
        Self {
            balances: Mutex::new(HashMap::new()),
            owners: Mutex::new(HashMap::new()),
            committed: Mutex::new(Vec::new()),
            submit_calls: AtomicUsize::new(0),
            balance_delay: None,
        }
    }

    /// Every balance query sleeps for `delay` before answering.
    pub fn with_balance_delay(mut self, delay: Duration) -> Self {
        self.balance_delay = Some(delay);
        self
    }

    pub fn set_balance(&self, address: &Address, amount: u64) {
        if let Ok(mut balances) = self.balances.lock() {
            balances.insert(address.to_string(), amount);
        }
    }

    pub fn set_owners(&self, owner_id: impl Into<String>, control_keys: ControlKeySet) {
        if let Ok(mut owners) = self.owners.lock() {
            owners.insert(owner_id.into(), control_keys);
        }
    }

    pub fn committed(&self) -> Vec<TxId> {
        self.committed.lock().map(|ids| ids.clone()).unwrap_or_default()
    }

    pub fn submit_calls(&self) -> usize {
        self.submit_calls.load(Ordering::SeqCst)
    }
}

impl Default for MemoryNetwork {
    fn default() -> Self {
        Self::new()
    }
}

fn poisoned(operation: &str) -> QuorumError {
    QuorumError::storage(format!("memory_network {operation} lock"), "poisoned")
}

#[async_trait]
impl NetworkRpc for MemoryNetwork {
    async fn get_balance(&self, address: &Address) -> Result<u64> {
        if let Some(delay) = self.balance_delay {
            tokio::time::sleep(delay).await;
        }
        let balances = self.balances.lock().map_err(|_| poisoned("balances"))?;
        Ok(balances.get(&address.to_string()).copied().unwrap_or(0))
    }

    async fn get_owners(&self, owner_id: &str) -> Result<ControlKeySet> {
        let owners = self.owners.lock().map_err(|_| poisoned("owners"))?;
        owners.get(owner_id).cloned().ok_or_else(|| QuorumError::NodeRpcError(format!("unknown owner id {owner_id}")))
    }

    async fn submit(&self, transaction: &Transaction) -> Result<TxId> {
        self.submit_calls.fetch_add(1, Ordering::SeqCst);
        if transaction.signed_count() != transaction.slot_count() {
            return Err(QuorumError::NodeRpcError("transaction is missing signatures".to_string()));
        }
        let tx_id = transaction.tx_id();
        let mut committed = self.committed.lock().map_err(|_| poisoned("committed"))?;
        if committed.contains(&tx_id) {
            return Err(QuorumError::AlreadyCommitted { tx_id });
        }
        committed.push(tx_id);
        Ok(tx_id)
    }
}
