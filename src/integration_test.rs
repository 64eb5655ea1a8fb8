//! End-to-end: snapshot file -> root -> proof -> verifier replay

use crate::config::MerkleConfig;
use crate::error::MerkleError;
use crate::merkle::{verify_proof, LeafHasher, OddNodeRule, SortedKeccakHasher};
use crate::service::{ProofService, RootService};
use crate::snapshot::AddressSet;
use crate::utils::HashValue;

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    /// Deterministic well-formed addresses: keccak("owner-i")[12..]
    fn synthetic_addresses(n: usize) -> Vec<String> {
        (0..n)
            .map(|i| {
                let digest = HashValue::digest(format!("owner-{i}").as_bytes());
                format!("0x{}", hex::encode(&digest.as_bytes()[12..]))
            })
            .collect()
    }

    fn write_snapshot(addresses: &[String]) -> tempfile::NamedTempFile {
        let entries: serde_json::Map<String, serde_json::Value> = addresses
            .iter()
            .enumerate()
            .map(|(i, a)| (a.clone(), serde_json::json!({ "tokenIds": [i] })))
            .collect();
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(file, "{}", serde_json::Value::Object(entries)).unwrap();
        file
    }

    #[test]
    fn test_every_snapshot_member_can_claim() {
        let addresses = synthetic_addresses(37);
        let file = write_snapshot(&addresses);

        for rule in [OddNodeRule::Promote, OddNodeRule::Duplicate] {
            let config = MerkleConfig::default().with_odd_node_rule(rule);
            let set = AddressSet::load(file.path()).unwrap();
            let root = RootService::new(config.clone()).compute_root(&set).unwrap();
            let proofs = ProofService::new(config);
            let leaf_hasher = LeafHasher::default();

            for address in &addresses {
                let proof = proofs.compute_proof(&set, address).unwrap();
                let leaf = leaf_hasher.leaf(address).unwrap();
                assert_eq!(proof.leaf, leaf);
                assert!(verify_proof(&SortedKeccakHasher, &leaf, proof.siblings(), &root));
            }
        }
    }

    #[test]
    fn test_root_and_proof_from_separate_loads_agree() {
        let addresses = synthetic_addresses(10);
        let file = write_snapshot(&addresses);

        let root = RootService::default()
            .compute_root(&AddressSet::load(file.path()).unwrap())
            .unwrap();
        let proof = ProofService::default()
            .compute_proof(&AddressSet::load(file.path()).unwrap(), &addresses[7])
            .unwrap();

        let replayed: Vec<HashValue> = proof
            .to_hex_strings()
            .iter()
            .map(|s| s.parse().unwrap())
            .collect();
        assert!(verify_proof(&SortedKeccakHasher, &proof.leaf, &replayed, &root));
    }

    #[test]
    fn test_outsider_is_not_eligible() {
        let addresses = synthetic_addresses(8);
        let set = AddressSet::new(&addresses).unwrap();
        let outsider = &synthetic_addresses(9)[8];

        let err = ProofService::default().compute_proof(&set, outsider).unwrap_err();
        assert!(err.is_not_eligible());
        assert!(!err.is_internal());
    }

    #[test]
    fn test_replacing_any_address_changes_root() {
        let addresses = synthetic_addresses(9);
        let service = RootService::default();
        let root = service.compute_root(&AddressSet::new(&addresses).unwrap()).unwrap();
        let replacement = synthetic_addresses(10).pop().unwrap();

        for i in 0..addresses.len() {
            let mut changed = addresses.clone();
            changed[i] = replacement.clone();
            let other = service.compute_root(&AddressSet::new(&changed).unwrap()).unwrap();
            assert_ne!(other, root, "replacing address {i}");
        }
    }

    #[test]
    fn test_malformed_snapshot_entry_produces_nothing() {
        let mut addresses = synthetic_addresses(3);
        addresses.push("0x3bdde1e9fbaef2579dd63e2abbf0be445ab93f".to_string());
        let file = write_snapshot(&addresses);
        assert!(matches!(
            AddressSet::load(file.path()),
            Err(MerkleError::InvalidAddress { .. })
        ));
    }
}
