//! Commit against the in-memory network, including partial thresholds.

use crate::fixtures::{address, control_keys, network_with_owners, soft_key, unsigned_tx, SEED_A, SEED_B, SEED_C, TEST_NETWORK, TEST_OWNER_ID, TEST_PAYLOAD};
use quorum_core::application::{fetch_control_keys, CommitCoordinator, CommitStatus};
use quorum_core::domain::{ControlKeySet, Transaction};
use quorum_core::foundation::{address_from_xonly, NetworkMode, QuorumError};

fn sign_slots(mut tx: Transaction, seeds: &[u8]) -> Transaction {
    let digest = tx.signing_digest();
    for (slot, seed) in seeds.iter().enumerate() {
        tx.apply_signature(slot, soft_key(*seed).sign_digest(&digest).unwrap()).unwrap();
    }
    tx
}

#[tokio::test]
async fn two_of_three_commits_with_selected_slots() {
    let keys = control_keys(vec![address(SEED_A), address(SEED_B), address(SEED_C)], 2);
    let network = network_with_owners(&keys);
    let tx = Transaction::new(TEST_NETWORK, TEST_OWNER_ID, TEST_PAYLOAD.to_vec(), vec![2, 0]);
    let tx = sign_slots(tx, &[SEED_C, SEED_A]);

    let committer = CommitCoordinator::new(network.clone());
    let status = committer.commit_status(&tx, &keys).await.unwrap();
    assert_eq!(status, CommitStatus::Committed(tx.tx_id()));
    assert_eq!(network.submit_calls(), 1);
}

#[tokio::test]
async fn resubmitting_reports_already_committed() {
    let keys = control_keys(vec![address(SEED_A)], 1);
    let network = network_with_owners(&keys);
    let tx = sign_slots(unsigned_tx(1), &[SEED_A]);
    let committer = CommitCoordinator::new(network.clone());

    committer.commit(&tx, &keys).await.unwrap();
    let err = committer.commit(&tx, &keys).await.unwrap_err();
    assert!(matches!(err, QuorumError::AlreadyCommitted { .. }));
    assert_eq!(network.committed().len(), 1);
}

#[tokio::test]
async fn unsigned_transaction_is_never_submitted() {
    let keys = control_keys(vec![address(SEED_A), address(SEED_B)], 2);
    let network = network_with_owners(&keys);
    let committer = CommitCoordinator::new(network.clone());

    let err = committer.commit(&unsigned_tx(2), &keys).await.unwrap_err();
    assert!(matches!(err, QuorumError::NotFullySigned { signed: 0, required: 2, .. }));
    assert_eq!(network.submit_calls(), 0);
}

#[tokio::test]
async fn control_keys_must_match_transaction_network() {
    let foreign = address_from_xonly(NetworkMode::Mainnet.address_prefix(), soft_key(SEED_A).xonly_public_key());
    let keys = ControlKeySet::new(vec![foreign], 1).unwrap();
    let network = network_with_owners(&keys);
    let err = fetch_control_keys(network.as_ref(), &unsigned_tx(1)).await.unwrap_err();
    assert!(matches!(err, QuorumError::InvalidControlKeySet(_)));
}
