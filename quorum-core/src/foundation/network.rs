use crate::foundation::QuorumError;
use kaspa_addresses::Prefix;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Target chain network. Determines address prefix, BIP44 coin type and key-source policy.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum NetworkMode {
    /// Production network (hardware keys only).
    Mainnet,
    Testnet,
    Devnet,
}

impl NetworkMode {
    pub const fn is_production(&self) -> bool {
        matches!(self, Self::Mainnet)
    }

    pub const fn address_prefix(&self) -> Prefix {
        match self {
            Self::Mainnet => Prefix::Mainnet,
            Self::Testnet => Prefix::Testnet,
            Self::Devnet => Prefix::Devnet,
        }
    }

    /// BIP44 coin type.
    pub const fn coin_type(&self) -> u32 {
        match self {
            Self::Mainnet => 111110,
            Self::Testnet | Self::Devnet => 111111,
        }
    }
}

impl Default for NetworkMode {
    fn default() -> Self {
        Self::Mainnet
    }
}

impl fmt::Display for NetworkMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Mainnet => write!(f, "mainnet"),
            Self::Testnet => write!(f, "testnet"),
            Self::Devnet => write!(f, "devnet"),
        }
    }
}

impl FromStr for NetworkMode {
    type Err = QuorumError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "mainnet" => Ok(Self::Mainnet),
            "testnet" => Ok(Self::Testnet),
            "devnet" => Ok(Self::Devnet),
            other => Err(QuorumError::UnsupportedNetwork(format!("'{other}'; expected: mainnet, testnet, devnet"))),
        }
    }
}
