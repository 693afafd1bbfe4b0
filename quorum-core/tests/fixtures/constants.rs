#![allow(dead_code)]

use quorum_core::foundation::NetworkMode;

pub const TEST_NETWORK: NetworkMode = NetworkMode::Testnet;
pub const TEST_OWNER_ID: &str = "subnet-7";
pub const TEST_CHAIN: &str = "chain-a";
pub const TEST_PAYLOAD: &[u8] = b"add-validator:node-42";

pub const SEED_A: u8 = 0xa1;
pub const SEED_B: u8 = 0xb2;
pub const SEED_C: u8 = 0xc3;
