//! One built commitment: tree plus the index used to find leaves in it

use crate::config::MerkleConfig;
use crate::error::MerkleResult;
use crate::merkle::{
    AddressIndex, LeafHasher, MerkleTree, MerkleTreeBuilder, Proof, SortedKeccakHasher,
};
use crate::snapshot::AddressSet;
use crate::utils::HashValue;

/// Immutable once built. Share it behind an `Arc` for concurrent lookups.
#[derive(Debug, Clone)]
pub struct Commitment {
    tree: MerkleTree,
    index: AddressIndex,
    fingerprint: HashValue,
}

impl Commitment {
    /// Hashes the set in its given order and builds the tree.
    /// Fails with `EmptyTree` for an empty set.
    pub fn build(set: &AddressSet, config: &MerkleConfig) -> MerkleResult<Self> {
        let leaves = LeafHasher::new(config.leaf_encoding).hash_all(set.iter());
        let index = AddressIndex::build(set.addresses(), &leaves)?;
        let tree = MerkleTreeBuilder::new()
            .odd_node_rule(config.odd_node_rule)
            .build(leaves)?;

        Ok(Self {
            tree,
            index,
            fingerprint: set.fingerprint(),
        })
    }

    pub fn root(&self) -> HashValue {
        self.tree.root()
    }

    pub fn tree(&self) -> &MerkleTree {
        &self.tree
    }

    pub fn index(&self) -> &AddressIndex {
        &self.index
    }

    /// Fingerprint of the address set this was built from
    pub fn fingerprint(&self) -> HashValue {
        self.fingerprint
    }

    /// Proof for `address`, or `AddressNotFound` when it is not committed
    pub fn proof_for(&self, address: &str) -> MerkleResult<Proof> {
        let entry = self.index.lookup(address)?;
        self.tree.proof(entry.index)
    }

    /// Checks a proof against this commitment's root
    pub fn verify(&self, proof: &Proof) -> bool {
        proof.verify(&SortedKeccakHasher, &self.root())
    }
}
