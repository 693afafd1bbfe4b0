use crate::foundation::{parse_address, Address, NetworkMode, QuorumError, Result, Signature, SigningDigest};
use crate::infrastructure::ledger::LedgerDevice;
use crate::infrastructure::rpc::json_rpc::JsonRpcClient;
use async_trait::async_trait;
use log::debug;
use serde_json::json;
use std::time::Duration;

/// Ledger reached through a local device bridge speaking JSON-RPC
/// (`ledger.getAddresses`, `ledger.sign`).
pub struct BridgeLedgerDevice {
    client: JsonRpcClient,
    network: NetworkMode,
}

impl BridgeLedgerDevice {
    pub fn new(url: &str, timeout: Duration, network: NetworkMode) -> Result<Self> {
        let client = JsonRpcClient::new(url, timeout).map_err(|err| QuorumError::device("connect", err))?;
        Ok(Self { client, network })
    }
}

#[async_trait]
impl LedgerDevice for BridgeLedgerDevice {
    async fn get_addresses(&self, indices: &[u32]) -> Result<Vec<Address>> {
        let rendered: Vec<String> = self
            .client
            .call("ledger.getAddresses", json!({ "indices": indices, "network": self.network }))
            .await
            .map_err(|err| QuorumError::device("get_addresses", err))?;
        debug!("ledger bridge returned addresses count={}", rendered.len());
        let addresses = rendered.iter().map(|addr| parse_address(addr)).collect::<Result<Vec<_>>>()?;
        if let Some(foreign) = addresses.iter().find(|addr| addr.prefix != self.network.address_prefix()) {
            return Err(QuorumError::device("get_addresses", format!("address {foreign} does not belong to {}", self.network)));
        }
        Ok(addresses)
    }

    async fn sign(&self, index: u32, digest: &SigningDigest) -> Result<Signature> {
        let signature: String = self
            .client
            .call("ledger.sign", json!({ "index": index, "digest": digest.to_string(), "network": self.network }))
            .await
            .map_err(|err| QuorumError::device("sign", err))?;
        signature.parse::<Signature>().map_err(|err| QuorumError::device("sign", err))
    }
}
