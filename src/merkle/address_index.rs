//! Address Index
//! Canonical address -> (leaf index, leaf hash), built alongside each tree

use crate::error::{MerkleError, MerkleResult};
use crate::merkle::leaf::CanonicalAddress;
use crate::utils::HashValue;
use std::collections::HashMap;

/// Position and hash of one committed address
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct IndexedLeaf {
    pub index: usize,
    pub leaf: HashValue,
}

#[derive(Debug, Clone, Default)]
pub struct AddressIndex {
    entries: HashMap<CanonicalAddress, IndexedLeaf>,
}

impl AddressIndex {
    /// Zips `addresses` with `leaves` position by position.
    /// The two slices must have the same length.
    pub fn build(addresses: &[CanonicalAddress], leaves: &[HashValue]) -> MerkleResult<Self> {
        if addresses.len() != leaves.len() {
            return Err(MerkleError::IndexMismatch {
                addresses: addresses.len(),
                leaves: leaves.len(),
            });
        }

        let entries = addresses
            .iter()
            .zip(leaves)
            .enumerate()
            .map(|(index, (address, leaf))| {
                (address.clone(), IndexedLeaf { index, leaf: *leaf })
            })
            .collect();

        Ok(Self { entries })
    }

    pub fn get(&self, address: &CanonicalAddress) -> Option<IndexedLeaf> {
        self.entries.get(address).copied()
    }

    /// Looks up an address given in any accepted spelling.
    ///
    /// A well-formed address outside the set yields `AddressNotFound`.
    pub fn lookup(&self, address: &str) -> MerkleResult<IndexedLeaf> {
        let canonical = CanonicalAddress::parse(address)?;
        self.get(&canonical)
            .ok_or_else(|| MerkleError::AddressNotFound(canonical.to_string()))
    }

    pub fn contains(&self, address: &CanonicalAddress) -> bool {
        self.entries.contains_key(address)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
