//! Mapping ledger derivation indices to chain addresses.
//!
//! A hardware device cannot be asked "which index owns address X", so both lookups walk
//! the index space from 0 upwards, one device query at a time. [`IndexScan`] is the shared
//! lazy walk; [`resolve_indices`] and [`resolve_funded_indices`] are [`ScanVisitor`]s over it.

use crate::foundation::{Address, QuorumError, Result, ADDRESS_SEARCH_BOUND, FUNDED_SEARCH_BOUND};
use async_trait::async_trait;
use log::{debug, info};
use std::collections::BTreeSet;
use std::ops::ControlFlow;
use std::time::Duration;

/// Anything that can render the address at a derivation index (a ledger device).
#[async_trait]
pub trait AddressIndexSource: Send + Sync {
    async fn addresses_at(&self, indices: &[u32]) -> Result<Vec<Address>>;
}

/// Balance lookup used by funded-index discovery.
#[async_trait]
pub trait BalanceSource: Send + Sync {
    async fn balance_of(&self, address: &Address) -> Result<u64>;
}

/// Sorted, de-duplicated set of ledger indices in use. Only grows.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct LedgerIndices(BTreeSet<u32>);

impl LedgerIndices {
    /// Fresh set holding index 0, where the device's change address lives.
    pub fn with_change_index() -> Self {
        Self(BTreeSet::from([0]))
    }

    pub fn merge<I: IntoIterator<Item = u32>>(&mut self, indices: I) {
        self.0.extend(indices);
    }

    pub fn contains(&self, index: u32) -> bool {
        self.0.contains(&index)
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn to_vec(&self) -> Vec<u32> {
        self.0.iter().copied().collect()
    }

    pub fn iter(&self) -> impl Iterator<Item = u32> + '_ {
        self.0.iter().copied()
    }
}

impl FromIterator<u32> for LedgerIndices {
    fn from_iter<I: IntoIterator<Item = u32>>(iter: I) -> Self {
        Self(iter.into_iter().collect())
    }
}

/// Lazy walk over `0..bound`, yielding `(index, address)` with one device query per step.
pub struct IndexScan<'a> {
    source: &'a dyn AddressIndexSource,
    next: u32,
    bound: u32,
}

impl<'a> IndexScan<'a> {
    pub fn new(source: &'a dyn AddressIndexSource, bound: u32) -> Self {
        Self { source, next: 0, bound }
    }

    pub async fn next(&mut self) -> Result<Option<(u32, Address)>> {
        if self.next >= self.bound {
            return Ok(None);
        }
        let index = self.next;
        let address = self
            .source
            .addresses_at(&[index])
            .await?
            .into_iter()
            .next()
            .ok_or_else(|| QuorumError::device("get_addresses", format!("no address returned for index {index}")))?;
        self.next += 1;
        Ok(Some((index, address)))
    }

    /// Number of indices queried so far.
    pub fn scanned(&self) -> u32 {
        self.next
    }
}

#[async_trait]
pub trait ScanVisitor: Send {
    async fn visit(&mut self, index: u32, address: &Address) -> Result<ControlFlow<()>>;
}

/// Drives `visitor` over the scan until it breaks or `bound` is reached. Returns the number
/// of indices queried.
pub async fn scan_device(source: &dyn AddressIndexSource, bound: u32, visitor: &mut dyn ScanVisitor) -> Result<u32> {
    let mut scan = IndexScan::new(source, bound);
    while let Some((index, address)) = scan.next().await? {
        if visitor.visit(index, &address).await?.is_break() {
            break;
        }
    }
    Ok(scan.scanned())
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct AddressDiscovery {
    /// Matched targets with their index, in the order the targets were given.
    pub found: Vec<(Address, u32)>,
    pub missing: Vec<Address>,
    pub scanned: u32,
}

impl AddressDiscovery {
    pub fn indices(&self) -> impl Iterator<Item = u32> + '_ {
        self.found.iter().map(|(_, index)| *index)
    }

    pub fn is_complete(&self) -> bool {
        self.missing.is_empty()
    }

    pub fn ensure_complete(self) -> Result<Self> {
        if self.is_complete() {
            return Ok(self);
        }
        Err(QuorumError::LedgerAddressesNotFound {
            missing: self.missing.iter().map(ToString::to_string).collect(),
            scanned: self.scanned,
        })
    }
}

struct TargetMatcher<'t> {
    targets: &'t [Address],
    hits: Vec<Option<u32>>,
    remaining: usize,
}

#[async_trait]
impl ScanVisitor for TargetMatcher<'_> {
    async fn visit(&mut self, index: u32, address: &Address) -> Result<ControlFlow<()>> {
        // Repeated targets all resolve to the same index.
        for (target, hit) in self.targets.iter().zip(self.hits.iter_mut()) {
            if hit.is_none() && target == address {
                *hit = Some(index);
                self.remaining -= 1;
                debug!("ledger address matched index={} address={}", index, address);
            }
        }
        if self.remaining == 0 {
            return Ok(ControlFlow::Break(()));
        }
        Ok(ControlFlow::Continue(()))
    }
}

/// Finds the device index of every target address within [`ADDRESS_SEARCH_BOUND`].
///
/// Targets not found are reported in `missing`; use [`AddressDiscovery::ensure_complete`]
/// when every target is required.
pub async fn resolve_indices(source: &dyn AddressIndexSource, targets: &[Address]) -> Result<AddressDiscovery> {
    resolve_indices_within(source, targets, ADDRESS_SEARCH_BOUND).await
}

pub async fn resolve_indices_within(source: &dyn AddressIndexSource, targets: &[Address], bound: u32) -> Result<AddressDiscovery> {
    let mut matcher = TargetMatcher { targets, hits: vec![None; targets.len()], remaining: targets.len() };
    let scanned = if targets.is_empty() { 0 } else { scan_device(source, bound, &mut matcher).await? };

    let mut found = Vec::new();
    let mut missing = Vec::new();
    for (target, hit) in targets.iter().zip(matcher.hits) {
        match hit {
            Some(index) => found.push((target.clone(), index)),
            None => missing.push(target.clone()),
        }
    }
    info!("ledger address discovery done found={} missing={} scanned={}", found.len(), missing.len(), scanned);
    Ok(AddressDiscovery { found, missing, scanned })
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct FundedDiscovery {
    pub indices: Vec<u32>,
    pub total: u64,
    pub scanned: u32,
}

struct FundedCollector<'b> {
    balances: &'b dyn BalanceSource,
    required: u64,
    timeout: Duration,
    indices: Vec<u32>,
    total: u64,
}

#[async_trait]
impl ScanVisitor for FundedCollector<'_> {
    async fn visit(&mut self, index: u32, address: &Address) -> Result<ControlFlow<()>> {
        let balance = tokio::time::timeout(self.timeout, self.balances.balance_of(address))
            .await
            .map_err(|_| QuorumError::RpcTimeout { operation: "get_balance".to_string(), timeout_secs: self.timeout.as_secs() })??;
        if balance > 0 {
            self.indices.push(index);
            self.total = self.total.saturating_add(balance);
            debug!("funded ledger index index={} balance={} total={}", index, balance, self.total);
        }
        if self.total >= self.required {
            return Ok(ControlFlow::Break(()));
        }
        Ok(ControlFlow::Continue(()))
    }
}

/// Collects funded device indices until their balances cover `required`, searching
/// [`FUNDED_SEARCH_BOUND`] indices. Each balance query is bounded by `timeout`.
pub async fn resolve_funded_indices(
    source: &dyn AddressIndexSource,
    balances: &dyn BalanceSource,
    required: u64,
    timeout: Duration,
) -> Result<FundedDiscovery> {
    resolve_funded_indices_within(source, balances, required, timeout, FUNDED_SEARCH_BOUND).await
}

pub async fn resolve_funded_indices_within(
    source: &dyn AddressIndexSource,
    balances: &dyn BalanceSource,
    required: u64,
    timeout: Duration,
    bound: u32,
) -> Result<FundedDiscovery> {
    if required == 0 {
        return Ok(FundedDiscovery { indices: Vec::new(), total: 0, scanned: 0 });
    }
    let mut collector = FundedCollector { balances, required, timeout, indices: Vec::new(), total: 0 };
    let scanned = scan_device(source, bound, &mut collector).await?;
    if collector.total < required {
        return Err(QuorumError::InsufficientLedgerFunds { required, found: collector.total, scanned });
    }
    info!(
        "ledger funded discovery done indices={:?} total={} required={} scanned={}",
        collector.indices, collector.total, required, scanned
    );
    Ok(FundedDiscovery { indices: collector.indices, total: collector.total, scanned })
}
