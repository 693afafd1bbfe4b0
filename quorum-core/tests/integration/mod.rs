mod commit_flow;
mod ledger_signing;
mod signing_flow;
