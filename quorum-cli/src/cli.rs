use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(name = "quorum")]
#[command(about = "Collect threshold signatures for chain-administration transactions", long_about = None)]
pub struct Cli {
    /// Path to configuration file (overrides QUORUM_CONFIG_PATH)
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,

    /// Log filters, e.g. "debug" or "info,quorum_core=trace"
    #[arg(short, long, global = true)]
    pub log_level: Option<String>,

    /// Directory for quorum.log and quorum_err.log
    #[arg(long, global = true)]
    pub log_dir: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Add this wallet's signatures to a multisig transaction
    Sign(SignArgs),
    /// Submit a fully signed transaction
    Commit(CommitArgs),
}

#[derive(Args, Debug)]
pub struct SignArgs {
    /// Chain label used in messages
    pub chain: String,

    /// Path to the transaction file for signing
    #[arg(long = "input-tx-filepath")]
    pub input_tx_filepath: PathBuf,

    /// Key file name in the key directory, or a path [testnet/devnet only]
    #[arg(short = 'k', long)]
    pub key: Option<String>,

    /// Sign with a ledger device (always used on mainnet)
    #[arg(short = 'g', long)]
    pub ledger: bool,

    /// Ledger addresses to use; implies --ledger
    #[arg(long = "ledger-addrs", value_delimiter = ',')]
    pub ledger_addrs: Vec<String>,

    /// Amount the ledger addresses must hold; searches funded ledger addresses when > 0
    #[arg(long, default_value_t = 0)]
    pub required_funds: u64,
}

#[derive(Args, Debug)]
pub struct CommitArgs {
    /// Chain label used in messages
    pub chain: String,

    /// Path to the transaction signed by all signers
    #[arg(long = "input-tx-filepath")]
    pub input_tx_filepath: PathBuf,
}
