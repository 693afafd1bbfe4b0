use crate::domain::{resolve_funded_indices, resolve_indices, AddressDiscovery, BalanceSource, FundedDiscovery, LedgerIndices};
use crate::foundation::{Address, QuorumError, Result, Signature, SigningDigest};
use crate::infrastructure::ledger::{DeviceAddresses, LedgerDevice};
use log::{debug, info};
use std::sync::Arc;
use std::time::Duration;

/// Ledger-backed key source: a device plus the indices in use this session.
#[derive(Clone)]
pub struct LedgerKeychain {
    device: Arc<dyn LedgerDevice>,
    indices: LedgerIndices,
}

impl std::fmt::Debug for LedgerKeychain {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("LedgerKeychain").field("indices", &self.indices).finish_non_exhaustive()
    }
}

impl LedgerKeychain {
    pub fn new(device: Arc<dyn LedgerDevice>) -> Self {
        Self { device, indices: LedgerIndices::with_change_index() }
    }

    pub fn indices(&self) -> &LedgerIndices {
        &self.indices
    }

    /// Addresses of every known index, fetched in a single device query.
    pub async fn addresses(&self) -> Result<Vec<Address>> {
        let indices = self.indices.to_vec();
        let addresses = self.device.get_addresses(&indices).await?;
        if addresses.len() != indices.len() {
            return Err(QuorumError::device(
                "get_addresses",
                format!("requested {} addresses, device returned {}", indices.len(), addresses.len()),
            ));
        }
        Ok(addresses)
    }

    /// Every known index paired with its device address, in index order.
    pub async fn indexed_addresses(&self) -> Result<Vec<(u32, Address)>> {
        let addresses = self.addresses().await?;
        Ok(self.indices.iter().zip(addresses).collect())
    }

    /// Locates `targets` on the device and adds the found indices.
    pub async fn add_addresses(&mut self, targets: &[Address]) -> Result<AddressDiscovery> {
        let discovery = resolve_indices(&DeviceAddresses(self.device.as_ref()), targets).await?;
        self.indices.merge(discovery.indices());
        debug!("ledger indices after address discovery indices={:?}", self.indices.to_vec());
        Ok(discovery)
    }

    /// Adds funded indices until their balances cover `required`.
    pub async fn add_funded(&mut self, balances: &dyn BalanceSource, required: u64, timeout: Duration) -> Result<FundedDiscovery> {
        let funded = resolve_funded_indices(&DeviceAddresses(self.device.as_ref()), balances, required, timeout).await?;
        self.indices.merge(funded.indices.iter().copied());
        debug!("ledger indices after funded discovery indices={:?}", self.indices.to_vec());
        Ok(funded)
    }

    pub async fn sign_with(&self, address: &Address, digest: &SigningDigest) -> Result<Signature> {
        let index = self
            .indexed_addresses()
            .await?
            .into_iter()
            .find_map(|(index, candidate)| (&candidate == address).then_some(index))
            .ok_or_else(|| QuorumError::KeyNotFound(address.to_string()))?;
        info!("requesting ledger signature index={} address={}", index, address);
        self.device.sign(index, digest).await
    }
}
