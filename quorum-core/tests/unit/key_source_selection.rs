//! Opening a key source from the operator's selection.

use crate::fixtures::{ledger_address, soft_key, test_config, write_key_file, ScriptedLedger, TEST_NETWORK};
use quorum_core::application::{open_key_source, SigningConfig};
use quorum_core::foundation::{NetworkMode, QuorumError};
use quorum_core::infrastructure::keys::{KeySourceKind, SecretBytes};
use quorum_core::infrastructure::ledger::LedgerDevice;
use quorum_core::infrastructure::rpc::{MemoryNetwork, RpcBalances};
use std::sync::Arc;

const PHRASE: &str = "abandon abandon abandon abandon abandon abandon abandon abandon abandon abandon abandon about";

fn device() -> Arc<dyn LedgerDevice> {
    Arc::new(ScriptedLedger::new())
}

fn signing_config(network: NetworkMode) -> SigningConfig {
    SigningConfig::new(network, &test_config())
}

fn phrase() -> Option<SecretBytes> {
    Some(SecretBytes::from_slice(PHRASE.as_bytes()))
}

#[tokio::test]
async fn key_file_and_ledger_together_are_rejected() {
    let mut config = signing_config(TEST_NETWORK);
    config.key_name = Some("ops".to_string());
    config.use_ledger = true;
    let network = MemoryNetwork::new();
    let err = open_key_source(&config, None, &device(), &RpcBalances(&network)).await.unwrap_err();
    assert!(matches!(err, QuorumError::MutuallyExclusiveKeySource { selected: 2 }));
}

#[tokio::test]
async fn testnet_without_any_source_is_rejected() {
    let config = signing_config(TEST_NETWORK);
    let network = MemoryNetwork::new();
    let err = open_key_source(&config, None, &device(), &RpcBalances(&network)).await.unwrap_err();
    assert!(matches!(err, QuorumError::MutuallyExclusiveKeySource { selected: 0 }));
}

#[tokio::test]
async fn key_file_is_loaded_from_key_dir() {
    let dir = tempfile::tempdir().unwrap();
    let key = soft_key(0x44);
    write_key_file(dir.path(), "ops", 0x44);

    let mut config = signing_config(TEST_NETWORK);
    config.key_dir = dir.path().to_path_buf();
    config.key_name = Some("ops".to_string());
    let network = MemoryNetwork::new();
    let source = open_key_source(&config, None, &device(), &RpcBalances(&network)).await.unwrap();
    assert_eq!(source.kind(), KeySourceKind::SoftKeyFile);
    assert_eq!(source.addresses().await.unwrap(), vec![key.address().clone()]);
}

#[tokio::test]
async fn mnemonic_is_used_when_no_flag_is_given() {
    let config = signing_config(TEST_NETWORK);
    let network = MemoryNetwork::new();
    let source = open_key_source(&config, phrase(), &device(), &RpcBalances(&network)).await.unwrap();
    assert_eq!(source.kind(), KeySourceKind::Mnemonic);
}

#[tokio::test]
async fn mainnet_refuses_software_keys_unless_allowed() {
    let network = MemoryNetwork::new();
    let config = signing_config(NetworkMode::Mainnet);
    let err = open_key_source(&config, phrase(), &device(), &RpcBalances(&network)).await.unwrap_err();
    assert!(matches!(err, QuorumError::SoftwareKeyForbidden { .. }));

    let mut allowed = signing_config(NetworkMode::Mainnet);
    allowed.allow_insecure_keys_on_mainnet = true;
    let source = open_key_source(&allowed, phrase(), &device(), &RpcBalances(&network)).await.unwrap();
    assert_eq!(source.kind(), KeySourceKind::Mnemonic);
}

#[tokio::test]
async fn mainnet_defaults_to_ledger() {
    let network = MemoryNetwork::new();
    let config = signing_config(NetworkMode::Mainnet);
    let source = open_key_source(&config, None, &device(), &RpcBalances(&network)).await.unwrap();
    assert_eq!(source.kind(), KeySourceKind::Ledger);
}

#[tokio::test]
async fn ledger_addresses_imply_ledger_and_extend_indices() {
    let network = MemoryNetwork::new();
    let mut config = signing_config(TEST_NETWORK);
    config.ledger_addresses = vec![ledger_address(3)];
    let source = open_key_source(&config, None, &device(), &RpcBalances(&network)).await.unwrap();
    assert_eq!(source.kind(), KeySourceKind::Ledger);
    assert_eq!(source.addresses().await.unwrap(), vec![ledger_address(0), ledger_address(3)]);
}

#[tokio::test]
async fn required_funds_adds_funded_indices() {
    let network = MemoryNetwork::new();
    network.set_balance(&ledger_address(2), 1_000);
    let mut config = signing_config(TEST_NETWORK);
    config.use_ledger = true;
    config.required_funds = 500;
    let source = open_key_source(&config, None, &device(), &RpcBalances(&network)).await.unwrap();
    assert_eq!(source.addresses().await.unwrap(), vec![ledger_address(0), ledger_address(2)]);
}
