use crate::domain::{BalanceSource, ControlKeySet, Transaction};
use crate::foundation::{Address, Result, TxId};
use async_trait::async_trait;

pub mod json_rpc;
pub mod memory;
pub mod network;

pub use memory::MemoryNetwork;
pub use network::JsonRpcNetwork;

/// Chain node operations needed to sign and commit administrative transactions.
#[async_trait]
pub trait NetworkRpc: Send + Sync {
    async fn get_balance(&self, address: &Address) -> Result<u64>;

    /// Current control keys and threshold of the administered resource.
    async fn get_owners(&self, owner_id: &str) -> Result<ControlKeySet>;

    /// Submits a fully signed transaction. A transaction the network has already accepted
    /// fails with `QuorumError::AlreadyCommitted`.
    async fn submit(&self, transaction: &Transaction) -> Result<TxId>;
}

/// Exposes a [`NetworkRpc`] as the balance oracle of funded-index discovery.
pub struct RpcBalances<'a>(pub &'a dyn NetworkRpc);

#[async_trait]
impl BalanceSource for RpcBalances<'_> {
    async fn balance_of(&self, address: &Address) -> Result<u64> {
        self.0.get_balance(address).await
    }
}
