use crate::domain::{ControlKeySet, Transaction};
use crate::foundation::{parse_address, Address, QuorumError, Result, TxId};
use crate::infrastructure::rpc::json_rpc::{CallError, JsonRpcClient};
use crate::infrastructure::rpc::NetworkRpc;
use async_trait::async_trait;
use log::{debug, info};
use serde::Deserialize;
use serde_json::json;
use std::time::Duration;

/// Remote error code the node uses for a transaction it has already accepted.
pub const ALREADY_COMMITTED_CODE: i64 = -32010;

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct OwnersResponse {
    addresses: Vec<String>,
    threshold: u32,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct IssueTxResponse {
    tx_id: String,
}

/// JSON-RPC client for the chain node (`quorum.getBalance`, `quorum.getOwners`, `quorum.issueTx`).
pub struct JsonRpcNetwork {
    client: JsonRpcClient,
}

impl JsonRpcNetwork {
    pub fn new(url: &str, timeout: Duration) -> Result<Self> {
        let client = JsonRpcClient::new(url, timeout).map_err(|err| QuorumError::NodeRpcError(err.to_string()))?;
        Ok(Self { client })
    }
}

fn node_error(method: &str, err: CallError) -> QuorumError {
    QuorumError::NodeRpcError(format!("{method}: {err}"))
}

fn is_already_committed(err: &CallError) -> bool {
    match err {
        CallError::Remote(remote) => remote.code == ALREADY_COMMITTED_CODE || remote.message.to_lowercase().contains("already"),
        _ => false,
    }
}

#[async_trait]
impl NetworkRpc for JsonRpcNetwork {
    async fn get_balance(&self, address: &Address) -> Result<u64> {
        let balance: u64 = self
            .client
            .call("quorum.getBalance", json!({ "address": address.to_string() }))
            .await
            .map_err(|err| node_error("quorum.getBalance", err))?;
        debug!("balance fetched address={} balance={}", address, balance);
        Ok(balance)
    }

    async fn get_owners(&self, owner_id: &str) -> Result<ControlKeySet> {
        let response: OwnersResponse = self
            .client
            .call("quorum.getOwners", json!({ "ownerId": owner_id }))
            .await
            .map_err(|err| node_error("quorum.getOwners", err))?;
        let addresses = response.addresses.iter().map(|addr| parse_address(addr)).collect::<Result<Vec<_>>>()?;
        ControlKeySet::new(addresses, response.threshold)
    }

    async fn submit(&self, transaction: &Transaction) -> Result<TxId> {
        let local_id = transaction.tx_id();
        match self.client.call::<IssueTxResponse>("quorum.issueTx", json!({ "tx": transaction })).await {
            Ok(response) => {
                let tx_id: TxId = response.tx_id.parse()?;
                info!("transaction issued tx_id={} url={}", tx_id, self.client.url());
                Ok(tx_id)
            }
            Err(err) if is_already_committed(&err) => Err(QuorumError::AlreadyCommitted { tx_id: local_id }),
            Err(err) => Err(node_error("quorum.issueTx", err)),
        }
    }
}
