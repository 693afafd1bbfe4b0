use crate::domain::{AuthorizationSet, ControlKeySet, Transaction, TxState};
use crate::foundation::{QuorumError, Result, TxId};
use crate::infrastructure::rpc::NetworkRpc;
use log::{info, warn};
use std::sync::Arc;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CommitStatus {
    Committed(TxId),
    /// The network had already accepted this transaction.
    AlreadyCommitted(TxId),
}

impl CommitStatus {
    pub fn tx_id(&self) -> TxId {
        match self {
            Self::Committed(id) | Self::AlreadyCommitted(id) => *id,
        }
    }

    pub fn state(&self) -> TxState {
        TxState::Committed
    }
}

pub struct CommitCoordinator {
    network: Arc<dyn NetworkRpc>,
}

impl CommitCoordinator {
    pub fn new(network: Arc<dyn NetworkRpc>) -> Self {
        Self { network }
    }

    /// Submits a fully signed transaction. Never contacts the network while signers remain.
    pub async fn commit(&self, transaction: &Transaction, control_keys: &ControlKeySet) -> Result<TxId> {
        transaction.ensure_supported_version()?;
        let auth = AuthorizationSet::new(control_keys, transaction)?;
        if !auth.is_fully_signed() {
            return Err(QuorumError::NotFullySigned {
                remaining: auth.remaining_signer_strings(),
                signed: auth.signed_count(),
                required: auth.required_count(),
            });
        }

        let tx_id = self.network.submit(transaction).await?;
        info!("transaction committed tx_id={} owner_id={}", tx_id, transaction.owner_id());
        Ok(tx_id)
    }

    /// Like [`CommitCoordinator::commit`] but reports an already-accepted transaction as
    /// success.
    pub async fn commit_status(&self, transaction: &Transaction, control_keys: &ControlKeySet) -> Result<CommitStatus> {
        match self.commit(transaction, control_keys).await {
            Ok(tx_id) => Ok(CommitStatus::Committed(tx_id)),
            Err(QuorumError::AlreadyCommitted { tx_id }) => {
                warn!("transaction was already committed tx_id={}", tx_id);
                Ok(CommitStatus::AlreadyCommitted(tx_id))
            }
            Err(err) => Err(err),
        }
    }
}
