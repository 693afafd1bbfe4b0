use crate::domain::Transaction;
use crate::foundation::{QuorumError, Result};
use crate::infrastructure::storage::PartialSignatureStore;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Mutex, MutexGuard};

/// In-memory store that counts writes, for tests.
pub struct MemoryTransactionStore {
    inner: Mutex<Option<Transaction>>,
    saves: AtomicUsize,
}

impl MemoryTransactionStore {
    pub fn new() -> Self {
        Self { inner: Mutex::new(None), saves: AtomicUsize::new(0) }
    }

    pub fn with_transaction(transaction: Transaction) -> Self {
        Self { inner: Mutex::new(Some(transaction)), saves: AtomicUsize::new(0) }
    }

    pub fn save_count(&self) -> usize {
        self.saves.load(Ordering::SeqCst)
    }

    fn lock_inner(&self) -> Result<MutexGuard<'_, Option<Transaction>>> {
        self.inner.lock().map_err(|_| QuorumError::storage("memory tx store lock", "poisoned"))
    }
}

impl Default for MemoryTransactionStore {
    fn default() -> Self {
        Self::new()
    }
}

impl PartialSignatureStore for MemoryTransactionStore {
    fn load(&self) -> Result<Transaction> {
        self.lock_inner()?.clone().ok_or_else(|| QuorumError::storage("memory tx store load", "empty"))
    }

    fn save(&self, transaction: &Transaction) -> Result<()> {
        *self.lock_inner()? = Some(transaction.clone());
        self.saves.fetch_add(1, Ordering::SeqCst);
        Ok(())
    }
}
