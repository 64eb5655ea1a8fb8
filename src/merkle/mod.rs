//! Merkle Tree Module
//! Keccak-256 Merkle commitment over Ethereum addresses with sorted-pair hashing
pub mod address_index;
pub mod leaf;
pub mod pair;
pub mod proof;
pub mod tree;

// Re-export main types
pub use address_index::{AddressIndex, IndexedLeaf};
pub use leaf::{canonicalize_address, CanonicalAddress, LeafEncoding, LeafHasher};
pub use pair::{PairHasher, SortedKeccakHasher};
pub use proof::{compute_root, verify_proof, Proof};
pub use tree::{MerkleTree, MerkleTreeBuilder, OddNodeRule, TreeStats};
