//! Hash Utilities
//! Keccak-256 and the 32-byte hash value used throughout the tree

use serde::{Deserialize, Deserializer, Serialize, Serializer};
use sha3::{Digest, Keccak256};
use std::fmt;
use std::str::FromStr;

/// Hash a byte slice using Keccak-256
pub fn keccak256(data: &[u8]) -> [u8; 32] {
    let mut hasher = Keccak256::new();
    hasher.update(data);
    hasher.finalize().into()
}

/// Hash two 32-byte values concatenated, in the order given
pub fn keccak256_concat(left: &[u8; 32], right: &[u8; 32]) -> [u8; 32] {
    Keccak256::new()
        .chain_update(left)
        .chain_update(right)
        .finalize()
        .into()
}

/// A 32-byte Keccak-256 output.
///
/// Ordering is unsigned lexicographic over the bytes, which is the order the
/// pair hasher sorts by.
#[derive(Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Default)]
pub struct HashValue([u8; 32]);

impl HashValue {
    pub const fn new(bytes: [u8; 32]) -> Self {
        Self(bytes)
    }

    /// Keccak-256 of arbitrary data
    pub fn digest(data: &[u8]) -> Self {
        Self(keccak256(data))
    }

    pub fn as_bytes(&self) -> &[u8; 32] {
        &self.0
    }

    pub fn to_bytes(self) -> [u8; 32] {
        self.0
    }

    /// Lowercase hex without prefix
    pub fn to_hex(&self) -> String {
        hex::encode(self.0)
    }

    /// Lowercase hex with `0x` prefix, as a Solidity `bytes32` literal
    pub fn to_prefixed_hex(&self) -> String {
        format!("0x{}", hex::encode(self.0))
    }
}

impl From<[u8; 32]> for HashValue {
    fn from(bytes: [u8; 32]) -> Self {
        Self(bytes)
    }
}

impl From<HashValue> for [u8; 32] {
    fn from(value: HashValue) -> Self {
        value.0
    }
}

impl AsRef<[u8]> for HashValue {
    fn as_ref(&self) -> &[u8] {
        &self.0
    }
}

impl FromStr for HashValue {
    type Err = hex::FromHexError;

    /// Accepts 64 hex chars with or without a `0x` prefix
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let cleaned = s.trim();
        let cleaned = cleaned.strip_prefix("0x").unwrap_or(cleaned);
        let mut bytes = [0u8; 32];
        hex::decode_to_slice(cleaned, &mut bytes)?;
        Ok(Self(bytes))
    }
}

impl fmt::Display for HashValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "0x{}", hex::encode(self.0))
    }
}

impl fmt::Debug for HashValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "HashValue(0x{})", hex::encode(self.0))
    }
}

impl Serialize for HashValue {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.to_prefixed_hex())
    }
}

impl<'de> Deserialize<'de> for HashValue {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let s = String::deserialize(deserializer)?;
        s.parse().map_err(serde::de::Error::custom)
    }
}
