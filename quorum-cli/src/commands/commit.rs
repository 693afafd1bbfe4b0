use crate::cli::CommitArgs;
use crate::commands::{connect_network, open_transaction, print_remaining};
use quorum_core::application::{fetch_control_keys, CommitCoordinator, CommitStatus};
use quorum_core::domain::AuthorizationSet;
use quorum_core::foundation::Result;
use quorum_core::infrastructure::config::AppConfig;

pub async fn run(config: &AppConfig, args: CommitArgs) -> Result<()> {
    let (_, transaction) = open_transaction(&args.input_tx_filepath)?;
    let network = connect_network(config)?;
    let control_keys = fetch_control_keys(network.as_ref(), &transaction).await?;

    let auth = AuthorizationSet::new(&control_keys, &transaction)?;
    if !auth.is_fully_signed() {
        println!("{} of {} required signatures have been signed.", auth.signed_count(), auth.required_count());
        print_remaining(&args.chain, &auth.remaining_signers());
        println!("Transaction file: {}", args.input_tx_filepath.display());
        return Ok(());
    }

    let coordinator = CommitCoordinator::new(network);
    match coordinator.commit_status(&transaction, &control_keys).await? {
        CommitStatus::Committed(tx_id) => println!("Transaction successful, transaction ID: {tx_id}"),
        CommitStatus::AlreadyCommitted(tx_id) => println!("Transaction {tx_id} for {} was already committed", args.chain),
    }
    Ok(())
}
