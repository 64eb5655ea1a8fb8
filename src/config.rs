//! Commitment configuration
//!
//! Both protocol constants default to the behavior of a sorted-pairs tree with
//! string leaves. Change them only to match a verifier that recomputes roots
//! differently.

use crate::error::{MerkleError, MerkleResult};
use crate::merkle::{LeafEncoding, OddNodeRule};
use serde::{Deserialize, Serialize};
use std::env;
use std::path::PathBuf;
use std::str::FromStr;

pub const ENV_LEAF_ENCODING: &str = "MERKLE_LEAF_ENCODING";
pub const ENV_ODD_NODE_RULE: &str = "MERKLE_ODD_NODE_RULE";
pub const ENV_SNAPSHOT_PATH: &str = "MERKLE_SNAPSHOT_PATH";

#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct MerkleConfig {
    pub leaf_encoding: LeafEncoding,
    pub odd_node_rule: OddNodeRule,
    pub snapshot_path: Option<PathBuf>,
}

impl MerkleConfig {
    /// Reads overrides from the environment. Unset variables keep their default.
    pub fn from_env() -> MerkleResult<Self> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    fn from_lookup<F>(lookup: F) -> MerkleResult<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut config = Self::default();
        if let Some(value) = lookup(ENV_LEAF_ENCODING) {
            config.leaf_encoding = parse_var(ENV_LEAF_ENCODING, &value)?;
        }
        if let Some(value) = lookup(ENV_ODD_NODE_RULE) {
            config.odd_node_rule = parse_var(ENV_ODD_NODE_RULE, &value)?;
        }
        if let Some(value) = lookup(ENV_SNAPSHOT_PATH) {
            if !value.trim().is_empty() {
                config.snapshot_path = Some(PathBuf::from(value));
            }
        }
        Ok(config)
    }

    pub fn with_leaf_encoding(mut self, encoding: LeafEncoding) -> Self {
        self.leaf_encoding = encoding;
        self
    }

    pub fn with_odd_node_rule(mut self, rule: OddNodeRule) -> Self {
        self.odd_node_rule = rule;
        self
    }

    pub fn with_snapshot_path(mut self, path: impl Into<PathBuf>) -> Self {
        self.snapshot_path = Some(path.into());
        self
    }
}

fn parse_var<T>(key: &str, value: &str) -> MerkleResult<T>
where
    T: FromStr<Err = MerkleError>,
{
    value.parse().map_err(|e| match e {
        MerkleError::Config(msg) => MerkleError::Config(format!("{key}: {msg}")),
        other => other,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup_from(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key| map.get(key).cloned()
    }

    #[test]
    fn test_defaults() {
        let config = MerkleConfig::from_lookup(lookup_from(&[])).unwrap();
        assert_eq!(config, MerkleConfig::default());
        assert_eq!(config.leaf_encoding, LeafEncoding::ChecksumString);
        assert_eq!(config.odd_node_rule, OddNodeRule::Promote);
        assert!(config.snapshot_path.is_none());
    }

    #[test]
    fn test_overrides() {
        let config = MerkleConfig::from_lookup(lookup_from(&[
            (ENV_LEAF_ENCODING, "address-bytes"),
            (ENV_ODD_NODE_RULE, "duplicate"),
            (ENV_SNAPSHOT_PATH, "/data/owners.json"),
        ]))
        .unwrap();
        assert_eq!(config.leaf_encoding, LeafEncoding::AddressBytes);
        assert_eq!(config.odd_node_rule, OddNodeRule::Duplicate);
        assert_eq!(config.snapshot_path, Some(PathBuf::from("/data/owners.json")));
    }

    #[test]
    fn test_bad_value_is_config_error() {
        let result = MerkleConfig::from_lookup(lookup_from(&[(ENV_ODD_NODE_RULE, "pad")]));
        match result {
            Err(MerkleError::Config(msg)) => assert!(msg.starts_with(ENV_ODD_NODE_RULE)),
            other => panic!("expected config error, got {other:?}"),
        }
    }

    #[test]
    fn test_builder_methods() {
        let config = MerkleConfig::default()
            .with_leaf_encoding(LeafEncoding::AddressBytes)
            .with_snapshot_path("owners.json");
        assert_eq!(config.leaf_encoding, LeafEncoding::AddressBytes);
        assert_eq!(config.odd_node_rule, OddNodeRule::Promote);
        assert_eq!(config.snapshot_path, Some(PathBuf::from("owners.json")));
    }

    #[test]
    fn test_serde_kebab_case() {
        let config = MerkleConfig::default().with_odd_node_rule(OddNodeRule::Duplicate);
        let json = serde_json::to_value(&config).unwrap();
        assert_eq!(json["leaf_encoding"], "checksum-string");
        assert_eq!(json["odd_node_rule"], "duplicate");
    }
}
