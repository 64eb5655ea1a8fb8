//! Merkle Proof Verification
//! Replays the climb an on-chain verifier performs: fold the leaf with each
//! sibling using the sorted-pair hash and compare against the root.

use crate::merkle::pair::PairHasher;
use crate::utils::HashValue;
use serde::{Deserialize, Serialize};

/// Inclusion proof for one leaf, ordered from the leaf level upward.
///
/// Only valid against the root of the tree it was taken from.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Proof {
    pub leaf: HashValue,
    pub leaf_index: usize,
    pub siblings: Vec<HashValue>,
}

impl Proof {
    pub fn new(leaf: HashValue, leaf_index: usize, siblings: Vec<HashValue>) -> Self {
        Self {
            leaf,
            leaf_index,
            siblings,
        }
    }

    pub fn siblings(&self) -> &[HashValue] {
        &self.siblings
    }

    pub fn len(&self) -> usize {
        self.siblings.len()
    }

    pub fn is_empty(&self) -> bool {
        self.siblings.is_empty()
    }

    /// `0x`-prefixed hex strings, in order, ready to pass as `bytes32[]`
    pub fn to_hex_strings(&self) -> Vec<String> {
        self.siblings.iter().map(HashValue::to_prefixed_hex).collect()
    }

    pub fn compute_root<H: PairHasher + ?Sized>(&self, hasher: &H) -> HashValue {
        compute_root(hasher, &self.leaf, &self.siblings)
    }

    pub fn verify<H: PairHasher + ?Sized>(&self, hasher: &H, root: &HashValue) -> bool {
        verify_proof(hasher, &self.leaf, &self.siblings, root)
    }
}

/// Folds `leaf` with each element of `siblings` in order
pub fn compute_root<H: PairHasher + ?Sized>(
    hasher: &H,
    leaf: &HashValue,
    siblings: &[HashValue],
) -> HashValue {
    siblings
        .iter()
        .fold(*leaf, |current, sibling| hasher.combine(&current, sibling))
}

/// Checks `(leaf, siblings)` against `root`
pub fn verify_proof<H: PairHasher + ?Sized>(
    hasher: &H,
    leaf: &HashValue,
    siblings: &[HashValue],
    root: &HashValue,
) -> bool {
    compute_root(hasher, leaf, siblings) == *root
}
