//! Ledger keychain index bookkeeping and address resolution.

use crate::fixtures::{address, ledger_address, ScriptedLedger, SEED_A};
use quorum_core::domain::BalanceSource;
use quorum_core::foundation::{Address, QuorumError, Result, SigningDigest};
use quorum_core::infrastructure::keys::soft_key::verify_schnorr;
use quorum_core::infrastructure::ledger::{LedgerDevice, LedgerKeychain};
use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::Arc;
use std::time::Duration;

fn keychain(device: &Arc<ScriptedLedger>) -> LedgerKeychain {
    LedgerKeychain::new(Arc::clone(device) as Arc<dyn LedgerDevice>)
}

struct FixedBalances(HashMap<String, u64>);

#[async_trait]
impl BalanceSource for FixedBalances {
    async fn balance_of(&self, address: &Address) -> Result<u64> {
        Ok(self.0.get(&address.to_string()).copied().unwrap_or(0))
    }
}

#[tokio::test]
async fn keychain_always_includes_change_index() {
    let device = Arc::new(ScriptedLedger::new());
    let keychain = keychain(&device);
    assert_eq!(keychain.indices().to_vec(), vec![0]);
    assert_eq!(keychain.addresses().await.unwrap(), vec![ledger_address(0)]);
}

#[tokio::test]
async fn addresses_are_fetched_in_one_device_query() {
    let device = Arc::new(ScriptedLedger::new());
    let mut keychain = keychain(&device);
    keychain.add_addresses(&[ledger_address(6), ledger_address(3)]).await.unwrap().ensure_complete().unwrap();
    let before = device.address_queries();

    let addresses = keychain.addresses().await.unwrap();
    assert_eq!(device.address_queries(), before + 1);
    assert_eq!(addresses, vec![ledger_address(0), ledger_address(3), ledger_address(6)]);
}

#[tokio::test]
async fn add_addresses_merges_found_indices() {
    let device = Arc::new(ScriptedLedger::new());
    let mut keychain = keychain(&device);
    let discovery = keychain.add_addresses(&[ledger_address(4)]).await.unwrap();
    assert_eq!(discovery.found, vec![(ledger_address(4), 4)]);
    assert_eq!(discovery.scanned, 5);

    keychain.add_addresses(&[ledger_address(2), ledger_address(4)]).await.unwrap();
    assert_eq!(keychain.indices().to_vec(), vec![0, 2, 4]);
}

#[tokio::test]
async fn unknown_address_is_reported_missing() {
    let device = Arc::new(ScriptedLedger::new());
    let mut keychain = keychain(&device);
    let stranger = address(SEED_A);
    let discovery = keychain.add_addresses(&[ledger_address(1), stranger.clone()]).await.unwrap();
    assert_eq!(discovery.missing, vec![stranger.clone()]);
    assert_eq!(keychain.indices().to_vec(), vec![0, 1]);

    match discovery.ensure_complete() {
        Err(QuorumError::LedgerAddressesNotFound { missing, .. }) => assert_eq!(missing, vec![stranger.to_string()]),
        other => panic!("expected LedgerAddressesNotFound, got {other:?}"),
    }
}

#[tokio::test]
async fn add_funded_stops_once_required_is_covered() {
    let device = Arc::new(ScriptedLedger::new());
    let mut keychain = keychain(&device);
    let balances = FixedBalances(HashMap::from([
        (ledger_address(2).to_string(), 40),
        (ledger_address(5).to_string(), 70),
        (ledger_address(9).to_string(), 500),
    ]));

    let funded = keychain.add_funded(&balances, 100, Duration::from_secs(5)).await.unwrap();
    assert_eq!(funded.indices, vec![2, 5]);
    assert_eq!(funded.total, 110);
    assert_eq!(funded.scanned, 6);
    assert_eq!(keychain.indices().to_vec(), vec![0, 2, 5]);
}

#[tokio::test]
async fn sign_with_uses_matching_index() {
    let device = Arc::new(ScriptedLedger::new());
    let mut keychain = keychain(&device);
    keychain.add_addresses(&[ledger_address(7)]).await.unwrap();

    let digest = SigningDigest::new([9u8; 32]);
    let signature = keychain.sign_with(&ledger_address(7), &digest).await.unwrap();
    assert_eq!(device.signed_indices(), vec![7]);
    let key = crate::fixtures::ledger_key(7);
    assert!(verify_schnorr(key.xonly_public_key(), &digest, &signature));
}

#[tokio::test]
async fn sign_with_unknown_address_is_key_not_found() {
    let device = Arc::new(ScriptedLedger::new());
    let keychain = keychain(&device);
    let err = keychain.sign_with(&ledger_address(3), &SigningDigest::new([1u8; 32])).await.unwrap_err();
    assert!(matches!(err, QuorumError::KeyNotFound(_)));
    assert!(device.signed_indices().is_empty());
}

#[tokio::test]
async fn indexed_addresses_pair_each_index_with_its_address() {
    let device = Arc::new(ScriptedLedger::new());
    let mut keychain = keychain(&device);
    keychain.add_addresses(&[ledger_address(8), ledger_address(2)]).await.unwrap();
    let before = device.address_queries();

    let listed = keychain.indexed_addresses().await.unwrap();
    assert_eq!(listed, vec![(0, ledger_address(0)), (2, ledger_address(2)), (8, ledger_address(8))]);
    assert_eq!(device.address_queries(), before + 1);
}

#[tokio::test]
async fn repeated_ledger_address_is_found_once() {
    let device = Arc::new(ScriptedLedger::new());
    let mut keychain = keychain(&device);
    let discovery = keychain.add_addresses(&[ledger_address(3), ledger_address(3)]).await.unwrap().ensure_complete().unwrap();
    assert_eq!(discovery.scanned, 4);
    assert_eq!(keychain.indices().to_vec(), vec![0, 3]);
}
