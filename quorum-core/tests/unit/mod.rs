mod key_source_selection;
mod ledger_keychain;
