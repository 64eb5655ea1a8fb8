//! Address Snapshot
//! The committed address set, passed explicitly to every service call.
//!
//! Snapshots can be read from a JSON object keyed by address (values are
//! ignored, key order is kept), a JSON array of address strings, or plain text
//! with one address per line.

use crate::error::{MerkleError, MerkleResult};
use crate::merkle::CanonicalAddress;
use crate::utils::HashValue;
use serde_json::Value;
use sha3::{Digest, Keccak256};
use std::collections::HashSet;
use std::fs;
use std::path::Path;

/// Ordered, duplicate-free set of canonical addresses
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct AddressSet {
    addresses: Vec<CanonicalAddress>,
}

impl AddressSet {
    /// Canonicalizes every address, keeping input order.
    /// Two spellings of one address count as a duplicate.
    pub fn new<I, S>(addresses: I) -> MerkleResult<Self>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut seen = HashSet::new();
        let mut canonical = Vec::new();
        for address in addresses {
            let parsed = CanonicalAddress::parse(address.as_ref())?;
            if !seen.insert(*parsed.as_bytes()) {
                return Err(MerkleError::DuplicateAddress(parsed.to_string()));
            }
            canonical.push(parsed);
        }
        Ok(Self {
            addresses: canonical,
        })
    }

    pub fn addresses(&self) -> &[CanonicalAddress] {
        &self.addresses
    }

    pub fn len(&self) -> usize {
        self.addresses.len()
    }

    pub fn is_empty(&self) -> bool {
        self.addresses.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &CanonicalAddress> {
        self.addresses.iter()
    }

    /// Keccak-256 over the raw addresses in order. Identifies a set version.
    pub fn fingerprint(&self) -> HashValue {
        let mut hasher = Keccak256::new();
        for address in &self.addresses {
            hasher.update(address.as_bytes());
        }
        HashValue::new(hasher.finalize().into())
    }

    /// Parses a JSON snapshot: an object keyed by address or an array of strings
    pub fn from_json_str(content: &str) -> MerkleResult<Self> {
        let value: Value = serde_json::from_str(content)
            .map_err(|e| MerkleError::Snapshot(format!("invalid JSON: {e}")))?;

        match value {
            Value::Object(map) => Self::new(map.keys()),
            Value::Array(items) => {
                let strings = items
                    .iter()
                    .enumerate()
                    .map(|(i, item)| {
                        item.as_str().ok_or_else(|| {
                            MerkleError::Snapshot(format!("entry {i} is not a string: {item}"))
                        })
                    })
                    .collect::<MerkleResult<Vec<_>>>()?;
                Self::new(strings)
            }
            other => Err(MerkleError::Snapshot(format!(
                "expected a JSON object or array, got {}",
                json_kind(&other)
            ))),
        }
    }

    /// One address per line; blank lines and `#` comments are skipped
    pub fn from_lines(content: &str) -> MerkleResult<Self> {
        Self::new(
            content
                .lines()
                .map(str::trim)
                .filter(|line| !line.is_empty() && !line.starts_with('#')),
        )
    }

    /// Reads a snapshot file, choosing the format from its first character
    pub fn load(path: impl AsRef<Path>) -> MerkleResult<Self> {
        let path = path.as_ref();
        let content = fs::read_to_string(path)?;
        let trimmed = content.trim_start();
        let set = if trimmed.starts_with('{') || trimmed.starts_with('[') {
            Self::from_json_str(&content)?
        } else {
            Self::from_lines(&content)?
        };
        if set.is_empty() {
            log::warn!("snapshot {} contains no addresses", path.display());
        }
        log::info!(
            "loaded {} addresses from {} (fingerprint {})",
            set.len(),
            path.display(),
            set.fingerprint()
        );
        Ok(set)
    }
}

fn json_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}
