use crate::domain::{AuthorizationSet, ControlKeySet, Transaction};
use crate::foundation::{Address, QuorumError, Result};
use crate::infrastructure::keys::KeySource;
use crate::infrastructure::rpc::NetworkRpc;
use crate::infrastructure::storage::PartialSignatureStore;
use log::{debug, info};
use std::future::Future;
use std::sync::Arc;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SignReport {
    pub required: Vec<Address>,
    /// Signers still missing after this pass, in slot order.
    pub remaining: Vec<Address>,
    pub signed_this_pass: Vec<Address>,
    pub signed_count: usize,
}

impl SignReport {
    fn from_authorization(auth: &AuthorizationSet<'_>, signed_this_pass: Vec<Address>) -> Self {
        Self { required: auth.required_signers(), remaining: auth.remaining_signers(), signed_this_pass, signed_count: auth.signed_count() }
    }

    pub fn is_fully_signed(&self) -> bool {
        self.remaining.is_empty()
    }

    pub fn required_count(&self) -> usize {
        self.required.len()
    }
}

#[derive(Debug, Clone)]
pub struct SignOutcome {
    pub transaction: Transaction,
    pub report: SignReport,
}

/// Control keys of the resource a transaction administers, checked against its network.
pub async fn fetch_control_keys(network: &dyn NetworkRpc, transaction: &Transaction) -> Result<ControlKeySet> {
    let control_keys = network.get_owners(transaction.owner_id()).await?;
    let prefix = transaction.network().address_prefix();
    if let Some(foreign) = control_keys.addresses().iter().find(|addr| addr.prefix != prefix) {
        return Err(QuorumError::InvalidControlKeySet(format!("control key {} is not a {} address", foreign, transaction.network())));
    }
    Ok(control_keys)
}

/// Adds every signature the key source can contribute, then persists the transaction.
pub struct SigningCoordinator {
    store: Arc<dyn PartialSignatureStore>,
}

impl SigningCoordinator {
    pub fn new(store: Arc<dyn PartialSignatureStore>) -> Self {
        Self { store }
    }

    /// Signs the transaction's remaining slots owned by `key_source`.
    ///
    /// A fully signed transaction is returned untouched and nothing is written. Signatures
    /// are collected for every owned slot before any slot is filled, so a failing key
    /// source leaves both the transaction and the store unchanged.
    pub async fn sign(&self, transaction: Transaction, control_keys: &ControlKeySet, key_source: &KeySource) -> Result<SignOutcome> {
        match self.pending(transaction, control_keys)? {
            Pending::Done(outcome) => Ok(outcome),
            Pending::Unsigned { transaction, remaining } => self.sign_remaining(transaction, control_keys, remaining, key_source).await,
        }
    }

    /// Like [`SigningCoordinator::sign`], but only calls `open_source` once there is
    /// something left to sign. A fully signed transaction never touches a key source.
    pub async fn sign_opening<F, Fut>(&self, transaction: Transaction, control_keys: &ControlKeySet, open_source: F) -> Result<SignOutcome>
    where
        F: FnOnce() -> Fut,
        Fut: Future<Output = Result<KeySource>>,
    {
        match self.pending(transaction, control_keys)? {
            Pending::Done(outcome) => Ok(outcome),
            Pending::Unsigned { transaction, remaining } => {
                let key_source = open_source().await?;
                self.sign_remaining(transaction, control_keys, remaining, &key_source).await
            }
        }
    }

    fn pending(&self, transaction: Transaction, control_keys: &ControlKeySet) -> Result<Pending> {
        transaction.ensure_supported_version()?;
        let auth = AuthorizationSet::new(control_keys, &transaction)?;
        let remaining = auth.remaining_slots();
        if remaining.is_empty() {
            info!("transaction already fully signed owner_id={} signatures={}", transaction.owner_id(), auth.signed_count());
            let report = SignReport::from_authorization(&auth, Vec::new());
            return Ok(Pending::Done(SignOutcome { transaction, report }));
        }
        Ok(Pending::Unsigned { transaction, remaining })
    }

    async fn sign_remaining(
        &self,
        mut transaction: Transaction,
        control_keys: &ControlKeySet,
        remaining: Vec<(usize, Address)>,
        key_source: &KeySource,
    ) -> Result<SignOutcome> {
        let digest = transaction.signing_digest();
        let owned = key_source.addresses().await?;
        let targets: Vec<(usize, Address)> = remaining.iter().filter(|(_, addr)| owned.contains(addr)).cloned().collect();
        if targets.is_empty() {
            return Err(QuorumError::NoAuthKeysInWallet { remaining: remaining.iter().map(|(_, addr)| addr.to_string()).collect() });
        }
        debug!("signing slots source={} slots={:?}", key_source.kind(), targets.iter().map(|(slot, _)| *slot).collect::<Vec<_>>());

        let mut signatures = Vec::with_capacity(targets.len());
        for (slot, address) in &targets {
            let signature = key_source.sign_with(address, &digest).await?;
            signatures.push((*slot, signature));
        }
        for (slot, signature) in signatures {
            transaction.apply_signature(slot, signature)?;
        }

        self.store.save(&transaction)?;

        let signed_this_pass = targets.into_iter().map(|(_, addr)| addr).collect();
        let auth = AuthorizationSet::new(control_keys, &transaction)?;
        let report = SignReport::from_authorization(&auth, signed_this_pass);
        info!(
            "signing pass done owner_id={} signed={} required={} remaining={}",
            transaction.owner_id(),
            report.signed_count,
            report.required_count(),
            report.remaining.len()
        );
        Ok(SignOutcome { transaction, report })
    }
}

enum Pending {
    Done(SignOutcome),
    Unsigned { transaction: Transaction, remaining: Vec<(usize, Address)> },
}
