//! Three control keys, three signers taking turns on the same transaction.

use crate::fixtures::{control_keys_abc, network_with_owners, soft_source, unsigned_tx, address, SEED_A, SEED_B, SEED_C};
use quorum_core::application::{CommitCoordinator, CommitStatus, SigningCoordinator};
use quorum_core::domain::{AuthorizationSet, TxState};
use quorum_core::foundation::QuorumError;
use quorum_core::infrastructure::keys::soft_key::verify_schnorr;
use quorum_core::infrastructure::keys::KeySource;
use quorum_core::infrastructure::storage::{MemoryTransactionStore, PartialSignatureStore};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

#[tokio::test]
async fn signers_take_turns_until_commit() {
    let keys = control_keys_abc();
    let network = network_with_owners(&keys);
    let store = Arc::new(MemoryTransactionStore::with_transaction(unsigned_tx(3)));
    let signer = SigningCoordinator::new(store.clone());
    let committer = CommitCoordinator::new(network.clone());

    let outcome = signer.sign(store.load().unwrap(), &keys, &soft_source(SEED_A)).await.unwrap();
    assert_eq!(outcome.report.signed_this_pass, vec![address(SEED_A)]);
    assert_eq!(outcome.report.remaining, vec![address(SEED_B), address(SEED_C)]);

    let outcome = signer.sign(store.load().unwrap(), &keys, &soft_source(SEED_C)).await.unwrap();
    assert_eq!(outcome.report.remaining, vec![address(SEED_B)]);
    assert_eq!(outcome.report.signed_count, 2);

    let partial = store.load().unwrap();
    match committer.commit(&partial, &keys).await {
        Err(QuorumError::NotFullySigned { remaining, signed, required }) => {
            assert_eq!(remaining, vec![address(SEED_B).to_string()]);
            assert_eq!((signed, required), (2, 3));
        }
        other => panic!("expected NotFullySigned, got {other:?}"),
    }
    assert_eq!(network.submit_calls(), 0);

    let outcome = signer.sign(store.load().unwrap(), &keys, &soft_source(SEED_B)).await.unwrap();
    assert!(outcome.report.is_fully_signed());
    assert_eq!(store.save_count(), 3);

    let signed = store.load().unwrap();
    let digest = signed.signing_digest();
    for (slot, seed) in [SEED_A, SEED_B, SEED_C].into_iter().enumerate() {
        let key = crate::fixtures::soft_key(seed);
        let signature = signed.signatures()[slot].as_ref().expect("slot signed");
        assert!(verify_schnorr(key.xonly_public_key(), &digest, signature));
    }

    let tx_id = committer.commit(&signed, &keys).await.unwrap();
    assert_eq!(tx_id, signed.tx_id());
    assert_eq!(network.committed(), vec![tx_id]);

    let status = committer.commit_status(&signed, &keys).await.unwrap();
    assert_eq!(status, CommitStatus::AlreadyCommitted(tx_id));
    assert_eq!(status.state(), TxState::Committed);
}

#[tokio::test]
async fn signing_a_fully_signed_transaction_is_a_no_op() {
    let keys = control_keys_abc();
    let mut tx = unsigned_tx(3);
    let digest = tx.signing_digest();
    for (slot, seed) in [SEED_A, SEED_B, SEED_C].into_iter().enumerate() {
        let signature = crate::fixtures::soft_key(seed).sign_digest(&digest).unwrap();
        tx.apply_signature(slot, signature).unwrap();
    }
    let store = Arc::new(MemoryTransactionStore::new());
    let signer = SigningCoordinator::new(store.clone());

    let outcome = signer.sign(tx.clone(), &keys, &soft_source(SEED_A)).await.unwrap();
    assert!(outcome.report.signed_this_pass.is_empty());
    assert!(outcome.report.is_fully_signed());
    assert_eq!(outcome.transaction, tx);
    assert_eq!(store.save_count(), 0);
}

#[tokio::test]
async fn wallet_without_required_key_persists_nothing() {
    let keys = control_keys_abc();
    let store = Arc::new(MemoryTransactionStore::with_transaction(unsigned_tx(3)));
    let signer = SigningCoordinator::new(store.clone());

    let err = signer.sign(store.load().unwrap(), &keys, &soft_source(0x55)).await.unwrap_err();
    match err {
        QuorumError::NoAuthKeysInWallet { remaining } => {
            assert_eq!(remaining, vec![address(SEED_A).to_string(), address(SEED_B).to_string(), address(SEED_C).to_string()]);
        }
        other => panic!("expected NoAuthKeysInWallet, got {other:?}"),
    }
    assert_eq!(store.save_count(), 0);
    assert_eq!(store.load().unwrap().signed_count(), 0);
}

#[tokio::test]
async fn signer_whose_slot_is_filled_has_nothing_to_sign() {
    let keys = control_keys_abc();
    let store = Arc::new(MemoryTransactionStore::with_transaction(unsigned_tx(3)));
    let signer = SigningCoordinator::new(store.clone());
    signer.sign(store.load().unwrap(), &keys, &soft_source(SEED_A)).await.unwrap();

    let err = signer.sign(store.load().unwrap(), &keys, &soft_source(SEED_A)).await.unwrap_err();
    assert!(matches!(err, QuorumError::NoAuthKeysInWallet { .. }));
    assert_eq!(store.save_count(), 1);

    let tx = store.load().unwrap();
    let auth = AuthorizationSet::new(&keys, &tx).unwrap();
    assert_eq!(auth.state(), TxState::PartiallySigned);
}

#[tokio::test]
async fn fully_signed_transaction_never_opens_key_source() {
    let keys = control_keys_abc();
    let mut tx = unsigned_tx(3);
    let digest = tx.signing_digest();
    for (slot, seed) in [SEED_A, SEED_B, SEED_C].into_iter().enumerate() {
        tx.apply_signature(slot, crate::fixtures::soft_key(seed).sign_digest(&digest).unwrap()).unwrap();
    }
    let store = Arc::new(MemoryTransactionStore::with_transaction(tx.clone()));
    let signer = SigningCoordinator::new(store.clone());

    let opened_flag = AtomicBool::new(false);
    let opened = &opened_flag;
    let outcome = signer
        .sign_opening(tx.clone(), &keys, move || async move {
            opened.store(true, Ordering::SeqCst);
            Err::<KeySource, _>(QuorumError::MutuallyExclusiveKeySource { selected: 0 })
        })
        .await
        .unwrap();
    assert!(!opened_flag.load(Ordering::SeqCst));
    assert!(outcome.report.is_fully_signed());
    assert_eq!(outcome.transaction, tx);
    assert_eq!(store.save_count(), 0);
}

#[tokio::test]
async fn key_source_is_opened_when_slots_remain() {
    let keys = control_keys_abc();
    let store = Arc::new(MemoryTransactionStore::with_transaction(unsigned_tx(3)));
    let signer = SigningCoordinator::new(store.clone());

    let err = signer
        .sign_opening(store.load().unwrap(), &keys, || async { Err::<KeySource, _>(QuorumError::MutuallyExclusiveKeySource { selected: 0 }) })
        .await
        .unwrap_err();
    assert!(matches!(err, QuorumError::MutuallyExclusiveKeySource { selected: 0 }));
    assert_eq!(store.save_count(), 0);

    let outcome = signer.sign_opening(store.load().unwrap(), &keys, || async { Ok(soft_source(SEED_B)) }).await.unwrap();
    assert_eq!(outcome.report.signed_this_pass, vec![address(SEED_B)]);
    assert_eq!(store.save_count(), 1);
}
