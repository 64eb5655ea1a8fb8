//! RootService - computes the commitment root for an address set

use crate::config::MerkleConfig;
use crate::error::MerkleResult;
use crate::service::commitment::Commitment;
use crate::snapshot::AddressSet;
use crate::utils::HashValue;

#[derive(Debug, Clone, Default)]
pub struct RootService {
    config: MerkleConfig,
}

impl RootService {
    pub fn new(config: MerkleConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &MerkleConfig {
        &self.config
    }

    /// Same set in the same order always gives the same root
    pub fn compute_root(&self, set: &AddressSet) -> MerkleResult<HashValue> {
        let commitment = Commitment::build(set, &self.config)?;
        let stats = commitment.tree().stats();
        log::debug!(
            "built tree: {} leaves, depth {}, {} nodes, odd nodes {}",
            stats.leaf_count,
            stats.depth,
            stats.node_count,
            stats.odd_node_rule
        );
        log::info!("root for {} addresses: {}", set.len(), stats.root.to_hex());
        Ok(stats.root)
    }
}
