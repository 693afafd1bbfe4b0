//! Hardware ledger access.
//!
//! The device is reached through [`LedgerDevice`]; [`LedgerKeychain`] tracks which
//! derivation indices the current session uses and resolves addresses to indices.

use crate::domain::AddressIndexSource;
use crate::foundation::{Address, Result, Signature, SigningDigest};
use async_trait::async_trait;

pub mod bridge;
pub mod keychain;

pub use bridge::BridgeLedgerDevice;
pub use keychain::LedgerKeychain;

/// One physical ledger device. Calls are issued sequentially; implementations must not
/// assume concurrent access.
#[async_trait]
pub trait LedgerDevice: Send + Sync {
    /// Addresses at `indices`, in the same order.
    async fn get_addresses(&self, indices: &[u32]) -> Result<Vec<Address>>;

    /// Schnorr signature over `digest` with the key at `index`. The device may require
    /// user confirmation.
    async fn sign(&self, index: u32, digest: &SigningDigest) -> Result<Signature>;
}

/// Exposes a [`LedgerDevice`] to the discovery scan.
pub struct DeviceAddresses<'a>(pub &'a dyn LedgerDevice);

#[async_trait]
impl AddressIndexSource for DeviceAddresses<'_> {
    async fn addresses_at(&self, indices: &[u32]) -> Result<Vec<Address>> {
        self.0.get_addresses(indices).await
    }
}
