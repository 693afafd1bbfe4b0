//! Ledger-backed signer contributing to a shared transaction.

use crate::fixtures::{address, control_keys, ledger_address, soft_source, test_config, unsigned_tx, ScriptedLedger, SEED_A, TEST_NETWORK};
use quorum_core::application::{open_key_source, SigningConfig, SigningCoordinator};
use quorum_core::foundation::QuorumError;
use quorum_core::infrastructure::ledger::LedgerDevice;
use quorum_core::infrastructure::rpc::{MemoryNetwork, RpcBalances};
use quorum_core::infrastructure::storage::{MemoryTransactionStore, PartialSignatureStore};
use std::sync::Arc;

#[tokio::test]
async fn ledger_signs_discovered_slots() {
    let keys = control_keys(vec![address(SEED_A), ledger_address(0), ledger_address(12)], 3);
    let device = Arc::new(ScriptedLedger::new());
    let connector: Arc<dyn LedgerDevice> = device.clone();
    let network = MemoryNetwork::new();
    let mut config = SigningConfig::new(TEST_NETWORK, &test_config());
    config.ledger_addresses = vec![ledger_address(12)];

    let source = open_key_source(&config, None, &connector, &RpcBalances(&network)).await.unwrap();
    let store = Arc::new(MemoryTransactionStore::with_transaction(unsigned_tx(3)));
    let signer = SigningCoordinator::new(store.clone());

    let outcome = signer.sign(store.load().unwrap(), &keys, &source).await.unwrap();
    assert_eq!(outcome.report.signed_this_pass, vec![ledger_address(0), ledger_address(12)]);
    assert_eq!(outcome.report.remaining, vec![address(SEED_A)]);
    assert_eq!(device.signed_indices(), vec![0, 12]);

    let outcome = signer.sign(store.load().unwrap(), &keys, &soft_source(SEED_A)).await.unwrap();
    assert!(outcome.report.is_fully_signed());
}

#[tokio::test]
async fn device_rejection_leaves_transaction_unsigned() {
    let keys = control_keys(vec![ledger_address(0), ledger_address(1)], 2);
    let connector: Arc<dyn LedgerDevice> = Arc::new(ScriptedLedger::refusing());
    let network = MemoryNetwork::new();
    let mut config = SigningConfig::new(TEST_NETWORK, &test_config());
    config.ledger_addresses = vec![ledger_address(1)];

    let source = open_key_source(&config, None, &connector, &RpcBalances(&network)).await.unwrap();
    let store = Arc::new(MemoryTransactionStore::with_transaction(unsigned_tx(2)));
    let signer = SigningCoordinator::new(store.clone());

    let err = signer.sign(store.load().unwrap(), &keys, &source).await.unwrap_err();
    assert!(matches!(err, QuorumError::DeviceError { .. }));
    assert_eq!(store.save_count(), 0);
    assert_eq!(store.load().unwrap().signed_count(), 0);
}
