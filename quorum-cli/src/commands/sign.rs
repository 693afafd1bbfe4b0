use crate::cli::SignArgs;
use crate::commands::{connect_network, open_transaction, print_remaining};
use quorum_core::application::{fetch_control_keys, open_key_source, LedgerConnector, SigningConfig, SigningCoordinator};
use quorum_core::foundation::{parse_address, NetworkMode, QuorumError, Result};
use quorum_core::infrastructure::config::AppConfig;
use quorum_core::infrastructure::keys::mnemonic_from_env;
use quorum_core::infrastructure::ledger::{BridgeLedgerDevice, LedgerDevice};
use quorum_core::infrastructure::rpc::RpcBalances;
use std::sync::Arc;
use std::time::Duration;

struct BridgeConnector {
    url: String,
    timeout: Duration,
    network: NetworkMode,
}

impl LedgerConnector for BridgeConnector {
    fn connect(&self) -> Result<Arc<dyn LedgerDevice>> {
        Ok(Arc::new(BridgeLedgerDevice::new(&self.url, self.timeout, self.network)?))
    }
}

pub async fn run(config: &AppConfig, args: SignArgs) -> Result<()> {
    let (store, transaction) = open_transaction(&args.input_tx_filepath)?;
    let network_mode = transaction.network();
    let network = connect_network(config)?;

    let control_keys = fetch_control_keys(network.as_ref(), &transaction).await?;

    let mut signing = SigningConfig::new(network_mode, config);
    signing.key_name = args.key.clone();
    signing.use_ledger = args.ledger;
    signing.ledger_addresses = args.ledger_addrs.iter().map(|addr| parse_address(addr)).collect::<Result<Vec<_>>>()?;
    signing.required_funds = args.required_funds;

    let connector =
        BridgeConnector { url: config.ledger.bridge_url.clone(), timeout: config.ledger.timeout(), network: network_mode };
    let balances = RpcBalances(network.as_ref());

    let coordinator = SigningCoordinator::new(store);
    let (signing, connector, balances) = (&signing, &connector, &balances);
    let open_source = move || open_key_source(signing, mnemonic_from_env(), connector, balances);
    let outcome = match coordinator.sign_opening(transaction, &control_keys, open_source).await {
        Ok(outcome) => outcome,
        Err(QuorumError::NoAuthKeysInWallet { remaining }) => {
            println!("There are no required auth keys for {} present in the wallet", args.chain);
            println!("Expected one of:");
            for address in &remaining {
                println!("  {address}");
            }
            return Err(QuorumError::NoAuthKeysInWallet { remaining });
        }
        Err(err) => return Err(err),
    };

    let report = &outcome.report;
    if report.signed_this_pass.is_empty() {
        println!("Transaction for {} is ready to commit", args.chain);
    } else {
        println!("{} of {} required signatures have been signed.", report.signed_count, report.required_count());
    }
    if report.is_fully_signed() {
        println!("Run: quorum commit {} --input-tx-filepath {}", args.chain, args.input_tx_filepath.display());
    } else {
        print_remaining(&args.chain, &report.remaining);
    }
    Ok(())
}
