//! Error types for commitment construction and proof lookup

/// Errors raised while building a commitment over an address set
#[derive(Debug, thiserror::Error)]
pub enum MerkleError {
    #[error("Invalid address {input:?}: {reason}")]
    InvalidAddress { input: String, reason: String },

    #[error("Cannot build a Merkle tree with zero leaves")]
    EmptyTree,

    #[error("Address/leaf count mismatch: {addresses} addresses, {leaves} leaves")]
    IndexMismatch { addresses: usize, leaves: usize },

    #[error("Address not in committed set: {0}")]
    AddressNotFound(String),

    #[error("Duplicate address in set: {0}")]
    DuplicateAddress(String),

    #[error("Leaf index {index} is out of bounds for tree with {leaf_count} leaves")]
    LeafIndexOutOfBounds { index: usize, leaf_count: usize },

    #[error("Snapshot error: {0}")]
    Snapshot(String),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Configuration error: {0}")]
    Config(String),
}

impl MerkleError {
    pub(crate) fn invalid_address(input: &str, reason: impl Into<String>) -> Self {
        Self::InvalidAddress {
            input: input.to_string(),
            reason: reason.into(),
        }
    }

    /// True when the failure means "this address is not eligible" rather than a fault.
    pub fn is_not_eligible(&self) -> bool {
        matches!(self, Self::AddressNotFound(_))
    }

    /// True for invariant violations inside the crate (programming errors).
    pub fn is_internal(&self) -> bool {
        matches!(
            self,
            Self::IndexMismatch { .. } | Self::LeafIndexOutOfBounds { .. }
        )
    }
}

/// Result type for commitment operations
pub type MerkleResult<T> = Result<T, MerkleError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_not_eligible_is_distinct_from_internal() {
        let not_found = MerkleError::AddressNotFound("0xabc".to_string());
        assert!(not_found.is_not_eligible());
        assert!(!not_found.is_internal());

        let mismatch = MerkleError::IndexMismatch { addresses: 2, leaves: 1 };
        assert!(mismatch.is_internal());
        assert!(!mismatch.is_not_eligible());

        assert!(!MerkleError::EmptyTree.is_not_eligible());
        assert!(!MerkleError::EmptyTree.is_internal());
    }

    #[test]
    fn test_error_messages() {
        let err = MerkleError::invalid_address("0x12", "expected 40 hex chars, got 2");
        assert_eq!(
            err.to_string(),
            "Invalid address \"0x12\": expected 40 hex chars, got 2"
        );
        assert_eq!(
            MerkleError::IndexMismatch { addresses: 3, leaves: 2 }.to_string(),
            "Address/leaf count mismatch: 3 addresses, 2 leaves"
        );
    }
}
