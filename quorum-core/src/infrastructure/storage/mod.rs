pub mod file;
pub mod memory;
pub mod traits;

pub use file::{decode_transaction, encode_transaction, FileTransactionStore};
pub use memory::MemoryTransactionStore;
pub use traits::PartialSignatureStore;
