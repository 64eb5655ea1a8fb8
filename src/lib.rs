//! Merkle commitment over a fixed set of Ethereum addresses.
//!
//! Leaves are keccak256 of each address's EIP-55 string, parents are keccak256
//! of the byte-sorted child pair. Proofs are `bytes32[]` sibling paths that an
//! on-chain verifier folds the same way to reach the stored root.

pub mod config;
pub mod error;
pub mod merkle;
pub mod service;
pub mod snapshot;
pub mod utils;

#[cfg(test)]
mod integration_test;

// Re-export main types for easy access
pub use config::MerkleConfig;
pub use error::{MerkleError, MerkleResult};
pub use merkle::{
    canonicalize_address, verify_proof, AddressIndex, CanonicalAddress, LeafEncoding, LeafHasher,
    MerkleTree, MerkleTreeBuilder, OddNodeRule, PairHasher, Proof, SortedKeccakHasher,
};
pub use service::{Commitment, CommitmentCache, ProofService, RootService};
pub use snapshot::AddressSet;
pub use utils::{keccak256, HashValue};
