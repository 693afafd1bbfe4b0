use crate::domain::Transaction;
use crate::foundation::{QuorumError, Result};
use crate::infrastructure::storage::PartialSignatureStore;
use log::debug;
use std::fs;
use std::path::{Path, PathBuf};

/// Pretty JSON followed by a newline. Re-encoding a decoded file yields the same bytes.
pub fn encode_transaction(transaction: &Transaction) -> Result<Vec<u8>> {
    let mut bytes = serde_json::to_vec_pretty(transaction)?;
    bytes.push(b'\n');
    Ok(bytes)
}

pub fn decode_transaction(bytes: &[u8]) -> Result<Transaction> {
    let transaction: Transaction = serde_json::from_slice(bytes)?;
    transaction.ensure_supported_version()?;
    Ok(transaction)
}

/// Transaction file on disk, handed between signers.
#[derive(Debug, Clone)]
pub struct FileTransactionStore {
    path: PathBuf,
}

impl FileTransactionStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Writes a new transaction file. Refuses to replace an existing file unless `force`.
    pub fn create(path: impl Into<PathBuf>, transaction: &Transaction, force: bool) -> Result<Self> {
        let store = Self::new(path);
        if store.path.exists() && !force {
            return Err(QuorumError::storage(
                "create_tx_file",
                format!("{} already exists; pass force to overwrite", store.path.display()),
            ));
        }
        store.save(transaction)?;
        Ok(store)
    }

    fn temp_path(&self) -> PathBuf {
        let mut name = self.path.file_name().map(|n| n.to_os_string()).unwrap_or_default();
        name.push(".tmp");
        self.path.with_file_name(name)
    }
}

impl PartialSignatureStore for FileTransactionStore {
    fn load(&self) -> Result<Transaction> {
        let bytes = fs::read(&self.path).map_err(|err| QuorumError::storage("read_tx_file", format!("{}: {}", self.path.display(), err)))?;
        decode_transaction(&bytes)
    }

    fn save(&self, transaction: &Transaction) -> Result<()> {
        let bytes = encode_transaction(transaction)?;
        let temp_path = self.temp_path();
        fs::write(&temp_path, &bytes).map_err(|err| QuorumError::storage("write_tx_file", format!("{}: {}", temp_path.display(), err)))?;
        fs::rename(&temp_path, &self.path)
            .map_err(|err| QuorumError::storage("rename_tx_file", format!("{}: {}", self.path.display(), err)))?;
        debug!("transaction file saved path={} bytes={}", self.path.display(), bytes.len());
        Ok(())
    }
}
