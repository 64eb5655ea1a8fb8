//! Merkle Tree Implementation
//! Binary tree over an ordered leaf sequence with sorted-pair hashing.
//! Level 0 holds the leaves, the last level holds the root.

use crate::error::{MerkleError, MerkleResult};
use crate::merkle::pair::{PairHasher, SortedKeccakHasher};
use crate::merkle::proof::Proof;
use crate::utils::HashValue;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// What happens to the last node of a level with an odd node count.
///
/// This has to agree with whatever recomputes the root on the verifier side.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum OddNodeRule {
    /// Carry the node up unchanged. It gets no sibling at that level, so the
    /// proof skips the level.
    #[default]
    Promote,
    /// Combine the node with itself. Its proof lists itself as the sibling.
    Duplicate,
}

impl FromStr for OddNodeRule {
    type Err = MerkleError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "promote" => Ok(Self::Promote),
            "duplicate" => Ok(Self::Duplicate),
            other => Err(MerkleError::Config(format!(
                "unknown odd node rule {other:?} (expected promote or duplicate)"
            ))),
        }
    }
}

impl fmt::Display for OddNodeRule {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Promote => f.write_str("promote"),
            Self::Duplicate => f.write_str("duplicate"),
        }
    }
}

/// Builds immutable [`MerkleTree`]s
#[derive(Debug, Clone, Default)]
pub struct MerkleTreeBuilder<H = SortedKeccakHasher> {
    hasher: H,
    odd_node_rule: OddNodeRule,
}

impl MerkleTreeBuilder<SortedKeccakHasher> {
    pub fn new() -> Self {
        Self::default()
    }
}

impl<H: PairHasher> MerkleTreeBuilder<H> {
    pub fn with_hasher(hasher: H) -> Self {
        Self {
            hasher,
            odd_node_rule: OddNodeRule::default(),
        }
    }

    pub fn odd_node_rule(mut self, rule: OddNodeRule) -> Self {
        self.odd_node_rule = rule;
        self
    }

    pub fn hasher(&self) -> &H {
        &self.hasher
    }

    /// Pairs adjacent nodes left to right until one node is left.
    /// Fails with `EmptyTree` when `leaves` is empty.
    pub fn build(&self, leaves: Vec<HashValue>) -> MerkleResult<MerkleTree> {
        if leaves.is_empty() {
            return Err(MerkleError::EmptyTree);
        }

        let mut levels = vec![leaves];
        loop {
            let current = &levels[levels.len() - 1];
            if current.len() == 1 {
                break;
            }

            let mut next = Vec::with_capacity((current.len() + 1) / 2);
            let mut pairs = current.chunks_exact(2);
            for pair in &mut pairs {
                next.push(self.hasher.combine(&pair[0], &pair[1]));
            }
            if let [last] = pairs.remainder() {
                next.push(match self.odd_node_rule {
                    OddNodeRule::Promote => *last,
                    OddNodeRule::Duplicate => self.hasher.combine(last, last),
                });
            }

            levels.push(next);
        }

        let root = levels[levels.len() - 1][0];
        Ok(MerkleTree {
            levels,
            root,
            odd_node_rule: self.odd_node_rule,
        })
    }
}

/// A fully built tree. Roots and proofs handed out are copies.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MerkleTree {
    levels: Vec<Vec<HashValue>>,
    root: HashValue,
    odd_node_rule: OddNodeRule,
}

impl MerkleTree {
    pub fn root(&self) -> HashValue {
        self.root
    }

    pub fn leaf_count(&self) -> usize {
        self.levels[0].len()
    }

    /// Number of levels above the leaves
    pub fn depth(&self) -> usize {
        self.levels.len() - 1
    }

    pub fn odd_node_rule(&self) -> OddNodeRule {
        self.odd_node_rule
    }

    pub fn leaf(&self, index: usize) -> Option<HashValue> {
        self.levels[0].get(index).copied()
    }

    pub fn leaves(&self) -> &[HashValue] {
        &self.levels[0]
    }

    pub fn levels(&self) -> &[Vec<HashValue>] {
        &self.levels
    }

    /// Sibling path from the leaf at `leaf_index` up to the root
    pub fn proof(&self, leaf_index: usize) -> MerkleResult<Proof> {
        let leaf = self.leaf(leaf_index).ok_or(MerkleError::LeafIndexOutOfBounds {
            index: leaf_index,
            leaf_count: self.leaf_count(),
        })?;

        let mut siblings = Vec::with_capacity(self.depth());
        let mut index = leaf_index;
        for level in &self.levels[..self.depth()] {
            let sibling_index = index ^ 1;
            if let Some(sibling) = level.get(sibling_index) {
                siblings.push(*sibling);
            } else if self.odd_node_rule == OddNodeRule::Duplicate {
                siblings.push(level[index]);
            }
            index /= 2;
        }

        Ok(Proof::new(leaf, leaf_index, siblings))
    }

    pub fn stats(&self) -> TreeStats {
        TreeStats {
            leaf_count: self.leaf_count(),
            depth: self.depth(),
            node_count: self.levels.iter().map(Vec::len).sum(),
            root: self.root,
            odd_node_rule: self.odd_node_rule,
        }
    }
}

/// Tree statistics
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TreeStats {
    pub leaf_count: usize,
    pub depth: usize,
    pub node_count: usize,
    pub root: HashValue,
    pub odd_node_rule: OddNodeRule,
}
