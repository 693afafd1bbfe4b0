use crate::domain::Transaction;
use crate::foundation::Result;

/// Durable home of a partially signed transaction between signing sessions.
///
/// `save` replaces the stored transaction as a whole; a failed save leaves the previous
/// state intact.
pub trait PartialSignatureStore: Send + Sync {
    fn load(&self) -> Result<Transaction>;
    fn save(&self, transaction: &Transaction) -> Result<()>;
}
