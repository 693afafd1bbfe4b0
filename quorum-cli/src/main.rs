mod cli;
mod commands;

use crate::cli::{Cli, Command};
use clap::Parser;
use log::{error, info};
use quorum_core::foundation::{ErrorCategory, QuorumError};
use quorum_core::infrastructure::config::load_app_config;
use quorum_core::infrastructure::logging::init_logger;
use std::process::ExitCode;

const DEFAULT_LOG_FILTERS: &str = "info";

fn exit_code(err: &QuorumError) -> ExitCode {
    let code = match err.category() {
        ErrorCategory::Configuration => 2,
        ErrorCategory::Discovery => 3,
        ErrorCategory::Authorization => 4,
        ErrorCategory::State => 5,
        ErrorCategory::Transport => 6,
        ErrorCategory::Storage => 7,
    };
    ExitCode::from(code)
}

async fn run(cli: Cli) -> Result<(), QuorumError> {
    let config = load_app_config(cli.config.as_deref())?;
    let filters = cli.log_level.clone().or_else(|| config.logging.filters.clone()).unwrap_or_else(|| DEFAULT_LOG_FILTERS.to_string());
    let log_dir = cli.log_dir.clone().or_else(|| config.logging.log_dir.clone());
    init_logger(log_dir.as_deref(), &filters)?;
    info!("quorum starting version={} filters={}", env!("CARGO_PKG_VERSION"), filters);

    match cli.command {
        Command::Sign(args) => commands::sign::run(&config, args).await,
        Command::Commit(args) => commands::commit::run(&config, args).await,
    }
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    let runtime = match tokio::runtime::Builder::new_current_thread().enable_all().build() {
        Ok(runtime) => runtime,
        Err(err) => {
            eprintln!("error: failed to start runtime: {err}");
            return ExitCode::FAILURE;
        }
    };

    match runtime.block_on(run(cli)) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            error!("command failed code={:?} error={}", err.code(), err);
            eprintln!("error: {err}");
            exit_code(&err)
        }
    }
}
