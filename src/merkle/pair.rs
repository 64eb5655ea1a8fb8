//! Pair hashing
//! Parent = keccak256(min(a, b) || max(a, b)), so combine(a, b) == combine(b, a)

use crate::utils::{keccak256_concat, HashValue};

/// Combines two child hashes into their parent
pub trait PairHasher: Send + Sync {
    fn combine(&self, left: &HashValue, right: &HashValue) -> HashValue;
}

/// Keccak-256 over the byte-sorted pair
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SortedKeccakHasher;

impl PairHasher for SortedKeccakHasher {
    fn combine(&self, left: &HashValue, right: &HashValue) -> HashValue {
        let (first, second) = if left <= right { (left, right) } else { (right, left) };
        HashValue::new(keccak256_concat(first.as_bytes(), second.as_bytes()))
    }
}
