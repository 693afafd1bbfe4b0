use crate::foundation::util::encoding::serde_hex;
use crate::foundation::{NetworkMode, QuorumError, Result, Signature, SigningDigest, TxId, SIGNING_DOMAIN_TAG, TX_FILE_VERSION};
use blake3::Hasher;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Lifecycle of an administrative transaction.
///
/// `Committed` is never derived from slot contents; it is only observed at the network
/// boundary (successful submit or an already-committed report).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TxState {
    Unsigned,
    PartiallySigned,
    FullySigned,
    Committed,
}

impl fmt::Display for TxState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Unsigned => write!(f, "unsigned"),
            Self::PartiallySigned => write!(f, "partially-signed"),
            Self::FullySigned => write!(f, "fully-signed"),
            Self::Committed => write!(f, "committed"),
        }
    }
}

/// Chain-administration transaction with one signature slot per authorized signer.
///
/// Slot `i` belongs to control key `auth_indices[i]`. Slots are filled append-only via
/// [`Transaction::apply_signature`]; there is no API to clear or replace a signature.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Transaction {
    version: u16,
    network: NetworkMode,
    owner_id: String,
    #[serde(with = "serde_hex")]
    payload: Vec<u8>,
    auth_indices: Vec<u32>,
    signatures: Vec<Option<Signature>>,
}

impl Transaction {
    pub fn new(network: NetworkMode, owner_id: impl Into<String>, payload: Vec<u8>, auth_indices: Vec<u32>) -> Self {
        let signatures = vec![None; auth_indices.len()];
        Self { version: TX_FILE_VERSION, network, owner_id: owner_id.into(), payload, auth_indices, signatures }
    }

    /// Transaction requiring a signature from every one of `control_keys` keys, in order.
    pub fn for_full_control_set(network: NetworkMode, owner_id: impl Into<String>, payload: Vec<u8>, control_keys: usize) -> Self {
        let auth_indices = (0..control_keys as u32).collect();
        Self::new(network, owner_id, payload, auth_indices)
    }

    pub fn version(&self) -> u16 {
        self.version
    }

    pub fn network(&self) -> NetworkMode {
        self.network
    }

    pub fn owner_id(&self) -> &str {
        &self.owner_id
    }

    pub fn payload(&self) -> &[u8] {
        &self.payload
    }

    pub fn auth_indices(&self) -> &[u32] {
        &self.auth_indices
    }

    pub fn signatures(&self) -> &[Option<Signature>] {
        &self.signatures
    }

    pub fn slot_count(&self) -> usize {
        self.signatures.len()
    }

    pub fn is_slot_signed(&self, slot: usize) -> bool {
        matches!(self.signatures.get(slot), Some(Some(_)))
    }

    pub fn signed_count(&self) -> usize {
        self.signatures.iter().filter(|sig| sig.is_some()).count()
    }

    pub fn ensure_supported_version(&self) -> Result<()> {
        if self.version != TX_FILE_VERSION {
            return Err(QuorumError::UnsupportedTxVersion { found: self.version, expected: TX_FILE_VERSION });
        }
        Ok(())
    }

    /// Digest every signer signs. Covers everything except the signature slots.
    pub fn signing_digest(&self) -> SigningDigest {
        let mut hasher = Hasher::new();
        hasher.update(SIGNING_DOMAIN_TAG);
        hasher.update(&self.version.to_le_bytes());
        hasher.update(self.network.to_string().as_bytes());
        hasher.update(&(self.owner_id.len() as u32).to_le_bytes());
        hasher.update(self.owner_id.as_bytes());
        hasher.update(&(self.payload.len() as u64).to_le_bytes());
        hasher.update(&self.payload);
        hasher.update(&(self.auth_indices.len() as u32).to_le_bytes());
        for index in &self.auth_indices {
            hasher.update(&index.to_le_bytes());
        }
        SigningDigest::new(*hasher.finalize().as_bytes())
    }

    /// Identifier of the transaction as submitted: signing digest plus every filled slot.
    pub fn tx_id(&self) -> TxId {
        let mut hasher = Hasher::new();
        hasher.update(self.signing_digest().as_hash());
        for (slot, signature) in self.signatures.iter().enumerate() {
            if let Some(signature) = signature {
                hasher.update(&(slot as u32).to_le_bytes());
                hasher.update(signature.as_bytes());
            }
        }
        TxId::new(*hasher.finalize().as_bytes())
    }

    pub fn apply_signature(&mut self, slot: usize, signature: Signature) -> Result<()> {
        let len = self.signatures.len();
        match self.signatures.get_mut(slot) {
            None => Err(QuorumError::SlotOutOfRange { slot, len }),
            Some(Some(_)) => Err(QuorumError::SlotAlreadySigned { slot }),
            Some(entry) => {
                *entry = Some(signature);
                Ok(())
            }
        }
    }
}
