//! ProofService - builds the commitment and returns one address's proof

use crate::config::MerkleConfig;
use crate::error::MerkleResult;
use crate::merkle::Proof;
use crate::service::commitment::Commitment;
use crate::snapshot::AddressSet;

#[derive(Debug, Clone, Default)]
pub struct ProofService {
    config: MerkleConfig,
}

impl ProofService {
    pub fn new(config: MerkleConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &MerkleConfig {
        &self.config
    }

    /// Fails with `AddressNotFound` when `queried` is well-formed but not in `set`
    pub fn compute_proof(&self, set: &AddressSet, queried: &str) -> MerkleResult<Proof> {
        let commitment = Commitment::build(set, &self.config)?;
        match commitment.proof_for(queried) {
            Ok(proof) => {
                log::debug!(
                    "proof for {} (leaf {} at index {}): {:?}",
                    queried,
                    proof.leaf.to_hex(),
                    proof.leaf_index,
                    proof.to_hex_strings()
                );
                Ok(proof)
            }
            Err(e) => {
                if e.is_not_eligible() {
                    log::info!("{queried} is not in the committed set");
                }
                Err(e)
            }
        }
    }
}
