#![allow(dead_code)]

use crate::fixtures::constants::{SEED_A, SEED_B, SEED_C, TEST_NETWORK, TEST_OWNER_ID, TEST_PAYLOAD};
use quorum_core::domain::{ControlKeySet, Transaction};
use quorum_core::foundation::Address;
use quorum_core::infrastructure::config::AppConfig;
use quorum_core::infrastructure::keys::{KeySource, SoftKey};
use quorum_core::infrastructure::rpc::MemoryNetwork;
use std::path::{Path, PathBuf};
use std::sync::Arc;

pub fn soft_key(seed: u8) -> SoftKey {
    SoftKey::from_secret_bytes(TEST_NETWORK, &[seed; 32]).expect("fixture key")
}

pub fn soft_source(seed: u8) -> KeySource {
    KeySource::SoftKeyFile(soft_key(seed))
}

pub fn address(seed: u8) -> Address {
    soft_key(seed).address().clone()
}

/// A, B, C with threshold 3: every control key must sign.
pub fn control_keys_abc() -> ControlKeySet {
    ControlKeySet::new(vec![address(SEED_A), address(SEED_B), address(SEED_C)], 3).expect("control keys")
}

pub fn control_keys(addresses: Vec<Address>, threshold: u32) -> ControlKeySet {
    ControlKeySet::new(addresses, threshold).expect("control keys")
}

pub fn unsigned_tx(slots: usize) -> Transaction {
    Transaction::for_full_control_set(TEST_NETWORK, TEST_OWNER_ID, TEST_PAYLOAD.to_vec(), slots)
}

pub fn network_with_owners(control_keys: &ControlKeySet) -> Arc<MemoryNetwork> {
    let network = MemoryNetwork::new();
    network.set_owners(TEST_OWNER_ID, control_keys.clone());
    Arc::new(network)
}

pub fn test_config() -> AppConfig {
    AppConfig::default()
}

/// Writes the key for `seed` as `<dir>/<name>.pk` in the hex key-file format.
pub fn write_key_file(dir: &Path, name: &str, seed: u8) -> PathBuf {
    let path = dir.join(format!("{name}.pk"));
    std::fs::write(&path, format!("{}\n", format!("{seed:02x}").repeat(32))).expect("write key file");
    path
}
