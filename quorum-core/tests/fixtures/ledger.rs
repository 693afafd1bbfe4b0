#![allow(dead_code)]

use crate::fixtures::constants::TEST_NETWORK;
use async_trait::async_trait;
use quorum_core::foundation::{Address, QuorumError, Result, Signature, SigningDigest};
use quorum_core::infrastructure::keys::SoftKey;
use quorum_core::infrastructure::ledger::LedgerDevice;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Mutex;

/// Key the scripted device holds at `index`.
pub fn ledger_key(index: u32) -> SoftKey {
    let mut secret = [0u8; 32];
    secret[0] = 0x10;
    secret[28..].copy_from_slice(&(index + 1).to_be_bytes());
    SoftKey::from_secret_bytes(TEST_NETWORK, &secret).expect("ledger fixture key")
}

pub fn ledger_address(index: u32) -> Address {
    ledger_key(index).address().clone()
}

/// Deterministic stand-in for a hardware device that records every call.
#[derive(Default)]
pub struct ScriptedLedger {
    address_queries: AtomicUsize,
    signed: Mutex<Vec<u32>>,
    refuse_signing: bool,
}

impl ScriptedLedger {
    pub fn new() -> Self {
        Self::default()
    }

    /// Rejects every signing request, like a user declining on the device.
    pub fn refusing() -> Self {
        Self { refuse_signing: true, ..Self::default() }
    }

    pub fn address_queries(&self) -> usize {
        self.address_queries.load(Ordering::SeqCst)
    }

    pub fn signed_indices(&self) -> Vec<u32> {
        self.signed.lock().unwrap().clone()
    }
}

#[async_trait]
impl LedgerDevice for ScriptedLedger {
    async fn get_addresses(&self, indices: &[u32]) -> Result<Vec<Address>> {
        self.address_queries.fetch_add(1, Ordering::SeqCst);
        Ok(indices.iter().map(|index| ledger_address(*index)).collect())
    }

    async fn sign(&self, index: u32, digest: &SigningDigest) -> Result<Signature> {
        if self.refuse_signing {
            return Err(QuorumError::device("sign", "rejected on device"));
        }
        self.signed.lock().unwrap().push(index);
        ledger_key(index).sign_digest(digest)
    }
}
