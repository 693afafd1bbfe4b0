use crate::domain::transaction::{Transaction, TxState};
use crate::foundation::{format_addresses, Address, QuorumError, Result};

/// Ordered control keys of an administered resource plus the signature threshold.
///
/// The threshold is fixed at construction; there is no way to change it afterwards.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ControlKeySet {
    addresses: Vec<Address>,
    threshold: u32,
}

impl ControlKeySet {
    pub fn new(addresses: Vec<Address>, threshold: u32) -> Result<Self> {
        if addresses.is_empty() {
            return Err(QuorumError::InvalidControlKeySet("no control keys".to_string()));
        }
        if threshold == 0 || threshold as usize > addresses.len() {
            return Err(QuorumError::InvalidControlKeySet(format!(
                "threshold {} must be between 1 and {}",
                threshold,
                addresses.len()
            )));
        }
        for (idx, address) in addresses.iter().enumerate() {
            if addresses[..idx].contains(address) {
                return Err(QuorumError::InvalidControlKeySet(format!("duplicate control key {}", address)));
            }
        }
        Ok(Self { addresses, threshold })
    }

    pub fn addresses(&self) -> &[Address] {
        &self.addresses
    }

    pub fn threshold(&self) -> u32 {
        self.threshold
    }

    pub fn len(&self) -> usize {
        self.addresses.len()
    }

    pub fn is_empty(&self) -> bool {
        self.addresses.is_empty()
    }
}

/// View binding a transaction's signature slots to the control keys they belong to.
///
/// All queries are pure functions of the transaction's current slot state, so repeated
/// calls (or calls after a reload from disk) return identical answers.
#[derive(Clone, Copy, Debug)]
pub struct AuthorizationSet<'a> {
    control_keys: &'a ControlKeySet,
    transaction: &'a Transaction,
}

impl<'a> AuthorizationSet<'a> {
    pub fn new(control_keys: &'a ControlKeySet, transaction: &'a Transaction) -> Result<Self> {
        let auth_indices = transaction.auth_indices();
        if transaction.slot_count() != auth_indices.len() {
            return Err(QuorumError::SlotCountMismatch { signatures: transaction.slot_count(), auth_indices: auth_indices.len() });
        }
        for (pos, index) in auth_indices.iter().enumerate() {
            if *index as usize >= control_keys.len() {
                return Err(QuorumError::AuthIndexOutOfRange { index: *index, control_keys: control_keys.len() });
            }
            if auth_indices[..pos].contains(index) {
                return Err(QuorumError::DuplicateAuthIndex { index: *index });
            }
        }
        if auth_indices.len() < control_keys.threshold() as usize {
            return Err(QuorumError::ThresholdNotMet { required: control_keys.threshold(), slots: auth_indices.len() });
        }
        Ok(Self { control_keys, transaction })
    }

    pub fn transaction(&self) -> &'a Transaction {
        self.transaction
    }

    pub fn control_keys(&self) -> &'a ControlKeySet {
        self.control_keys
    }

    fn slot_address(&self, slot: usize) -> &'a Address {
        // Indices were bounds-checked in `new`.
        &self.control_keys.addresses[self.transaction.auth_indices()[slot] as usize]
    }

    /// Addresses that must sign, one per slot, in slot order.
    pub fn required_signers(&self) -> Vec<Address> {
        (0..self.transaction.slot_count()).map(|slot| self.slot_address(slot).clone()).collect()
    }

    /// Unsigned slots with their addresses, in slot order.
    pub fn remaining_slots(&self) -> Vec<(usize, Address)> {
        (0..self.transaction.slot_count())
            .filter(|slot| !self.transaction.is_slot_signed(*slot))
            .map(|slot| (slot, self.slot_address(slot).clone()))
            .collect()
    }

    pub fn remaining_signers(&self) -> Vec<Address> {
        self.remaining_slots().into_iter().map(|(_, address)| address).collect()
    }

    /// Remaining signers rendered for error reports.
    pub fn remaining_signer_strings(&self) -> Vec<String> {
        format_addresses(&self.remaining_signers())
    }

    pub fn signed_count(&self) -> usize {
        self.transaction.signed_count()
    }

    pub fn required_count(&self) -> usize {
        self.transaction.slot_count()
    }

    pub fn is_fully_signed(&self) -> bool {
        self.signed_count() == self.required_count()
    }

    pub fn state(&self) -> TxState {
        match self.signed_count() {
            0 => TxState::Unsigned,
            n if n == self.required_count() => TxState::FullySigned,
            _ => TxState::PartiallySigned,
        }
    }

    pub fn slot_of(&self, address: &Address) -> Option<usize> {
        (0..self.transaction.slot_count()).find(|slot| self.slot_address(*slot) == address)
    }
}
