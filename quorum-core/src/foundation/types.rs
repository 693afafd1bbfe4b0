use crate::foundation::util::encoding::{decode_hex, parse_hex_32bytes};
use crate::foundation::{QuorumError, SCHNORR_PUBKEY_SIZE, SCHNORR_SIGNATURE_SIZE};
use kaspa_addresses::{Prefix, Version};
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;
use std::ops::Deref;
use std::str::FromStr;

pub type Hash32 = [u8; 32];

/// Chain address of a control key or key-source key.
///
/// Addresses are built from the x-only secp256k1 public key (`Version::PubKey`) and carry the
/// network prefix, so a testnet address never compares equal to a mainnet one.
pub type Address = kaspa_addresses::Address;

pub fn address_from_xonly(prefix: Prefix, xonly: &[u8; SCHNORR_PUBKEY_SIZE]) -> Address {
    Address::new(prefix, Version::PubKey, xonly)
}

pub fn parse_address(value: &str) -> Result<Address, QuorumError> {
    let trimmed = value.trim();
    Address::try_from(trimmed).map_err(|err| QuorumError::InvalidAddress(format!("{trimmed}: {err}")))
}

pub fn format_addresses(addresses: &[Address]) -> Vec<String> {
    addresses.iter().map(ToString::to_string).collect()
}

macro_rules! define_hash_type {
    ($name:ident) => {
        #[derive(Clone, Copy, Debug, Default, Eq, Hash, PartialEq, PartialOrd, Ord)]
        pub struct $name(Hash32);

        impl $name {
            pub const fn new(value: Hash32) -> Self {
                Self(value)
            }

            pub fn as_hash(&self) -> &Hash32 {
                &self.0
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                for byte in self.0 {
                    write!(f, "{:02x}", byte)?;
                }
                Ok(())
            }
        }

        impl FromStr for $name {
            type Err = QuorumError;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                Ok(Self::from(parse_hex_32bytes(s)?))
            }
        }

        impl Serialize for $name {
            fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
            where
                S: Serializer,
            {
                serializer.serialize_str(&self.to_string())
            }
        }

        impl<'de> Deserialize<'de> for $name {
            fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
            where
                D: Deserializer<'de>,
            {
                let s = String::deserialize(deserializer)?;
                s.parse().map_err(serde::de::Error::custom)
            }
        }

        impl AsRef<[u8]> for $name {
            fn as_ref(&self) -> &[u8] {
                &self.0
            }
        }

        impl Deref for $name {
            type Target = Hash32;
            fn deref(&self) -> &Self::Target {
                &self.0
            }
        }

        impl From<Hash32> for $name {
            fn from(value: Hash32) -> Self {
                Self(value)
            }
        }
    };
}

define_hash_type!(TxId);
define_hash_type!(SigningDigest);

/// 64-byte Schnorr signature filling one authorization slot.
#[derive(Clone, Copy, PartialEq, Eq, Hash)]
pub struct Signature([u8; SCHNORR_SIGNATURE_SIZE]);

impl Signature {
    pub const fn new(bytes: [u8; SCHNORR_SIGNATURE_SIZE]) -> Self {
        Self(bytes)
    }

    pub fn from_slice(bytes: &[u8]) -> Result<Self, QuorumError> {
        let array: [u8; SCHNORR_SIGNATURE_SIZE] = bytes.try_into().map_err(|_| {
            QuorumError::EncodingError(format!("signature must be {} bytes, got {}", SCHNORR_SIGNATURE_SIZE, bytes.len()))
        })?;
        Ok(Self(array))
    }

    pub fn as_bytes(&self) -> &[u8; SCHNORR_SIGNATURE_SIZE] {
        &self.0
    }
}

impl fmt::Debug for Signature {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Signature({})", self)
    }
}

impl fmt::Display for Signature {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&hex::encode(self.0))
    }
}

impl FromStr for Signature {
    type Err = QuorumError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::from_slice(&decode_hex(s)?)
    }
}

impl Serialize for Signature {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_str(&self.to_string())
    }
}

impl<'de> Deserialize<'de> for Signature {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        s.parse().map_err(serde::de::Error::custom)
    }
}
