//! Commitment cache for long-lived callers.
//!
//! Holds at most one built commitment, keyed by address set fingerprint.
//! A different set builds a fresh commitment and swaps the reference; a built
//! commitment is never mutated, so readers need no lock beyond the swap.

use crate::config::MerkleConfig;
use crate::error::MerkleResult;
use crate::merkle::Proof;
use crate::service::commitment::Commitment;
use crate::snapshot::AddressSet;
use crate::utils::HashValue;
use parking_lot::RwLock;
use std::sync::Arc;

#[derive(Debug, Default)]
pub struct CommitmentCache {
    config: MerkleConfig,
    current: RwLock<Option<Arc<Commitment>>>,
}

impl CommitmentCache {
    pub fn new(config: MerkleConfig) -> Self {
        Self {
            config,
            current: RwLock::new(None),
        }
    }

    /// The cached commitment for `set`, building it first if the set changed
    pub fn get_or_build(&self, set: &AddressSet) -> MerkleResult<Arc<Commitment>> {
        let fingerprint = set.fingerprint();
        if let Some(cached) = self.lookup(fingerprint) {
            return Ok(cached);
        }

        // build without holding the lock
        let built = Arc::new(Commitment::build(set, &self.config)?);

        let mut current = self.current.write();
        if let Some(cached) = current.as_ref().filter(|c| c.fingerprint() == fingerprint) {
            return Ok(Arc::clone(cached));
        }
        log::info!(
            "caching commitment {} for {} addresses (root {})",
            fingerprint,
            set.len(),
            built.root()
        );
        *current = Some(Arc::clone(&built));
        Ok(built)
    }

    pub fn current(&self) -> Option<Arc<Commitment>> {
        self.current.read().clone()
    }

    pub fn root(&self, set: &AddressSet) -> MerkleResult<HashValue> {
        Ok(self.get_or_build(set)?.root())
    }

    pub fn proof(&self, set: &AddressSet, address: &str) -> MerkleResult<Proof> {
        self.get_or_build(set)?.proof_for(address)
    }

    pub fn clear(&self) {
        *self.current.write() = None;
    }

    fn lookup(&self, fingerprint: HashValue) -> Option<Arc<Commitment>> {
        self.current
            .read()
            .as_ref()
            .filter(|c| c.fingerprint() == fingerprint)
            .cloned()
    }
}
