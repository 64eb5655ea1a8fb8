//! Leaf hashing
//! Canonicalizes an Ethereum address to its EIP-55 form and hashes it into a leaf

use crate::error::{MerkleError, MerkleResult};
use crate::utils::HashValue;
use ethers::types::Address;
use ethers::utils::to_checksum;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// What bytes of a canonical address get fed to Keccak-256
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum LeafEncoding {
    /// UTF-8 bytes of the checksummed `0x...` string
    #[default]
    ChecksumString,
    /// The 20 raw address bytes
    AddressBytes,
}

impl FromStr for LeafEncoding {
    type Err = MerkleError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "checksum-string" | "string" => Ok(Self::ChecksumString),
            "address-bytes" | "bytes" => Ok(Self::AddressBytes),
            other => Err(MerkleError::Config(format!(
                "unknown leaf encoding {other:?} (expected checksum-string or address-bytes)"
            ))),
        }
    }
}

impl fmt::Display for LeafEncoding {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::ChecksumString => f.write_str("checksum-string"),
            Self::AddressBytes => f.write_str("address-bytes"),
        }
    }
}

/// A validated 20-byte address together with its EIP-55 spelling.
///
/// Equality and hashing go through the bytes, so two spellings of the same
/// address always compare equal.
#[derive(Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct CanonicalAddress {
    bytes: [u8; 20],
    checksummed: String,
}

impl CanonicalAddress {
    /// Parses a hex address, with or without `0x`.
    ///
    /// All-lowercase and all-uppercase input is accepted as-is. Mixed-case input
    /// must carry a valid EIP-55 checksum.
    pub fn parse(input: &str) -> MerkleResult<Self> {
        let body = input.strip_prefix("0x").unwrap_or(input);
        if body.len() != 40 {
            return Err(MerkleError::invalid_address(
                input,
                format!("expected 40 hex chars, got {}", body.len()),
            ));
        }

        let mut bytes = [0u8; 20];
        hex::decode_to_slice(body, &mut bytes)
            .map_err(|e| MerkleError::invalid_address(input, format!("invalid hex encoding: {e}")))?;

        let checksummed = to_checksum(&Address::from(bytes), None);

        let has_lower = body.bytes().any(|b| b.is_ascii_lowercase());
        let has_upper = body.bytes().any(|b| b.is_ascii_uppercase());
        if has_lower && has_upper && body != &checksummed[2..] {
            return Err(MerkleError::invalid_address(input, "bad EIP-55 checksum"));
        }

        Ok(Self { bytes, checksummed })
    }

    pub fn as_bytes(&self) -> &[u8; 20] {
        &self.bytes
    }

    /// The `0x`-prefixed EIP-55 string
    pub fn as_str(&self) -> &str {
        &self.checksummed
    }
}

impl FromStr for CanonicalAddress {
    type Err = MerkleError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl fmt::Display for CanonicalAddress {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.checksummed)
    }
}

impl fmt::Debug for CanonicalAddress {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "CanonicalAddress({})", self.checksummed)
    }
}

/// Normalizes an address string to its checksummed form
pub fn canonicalize_address(input: &str) -> MerkleResult<String> {
    CanonicalAddress::parse(input).map(|address| address.checksummed)
}

/// Turns addresses into leaves
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct LeafHasher {
    encoding: LeafEncoding,
}

impl LeafHasher {
    pub fn new(encoding: LeafEncoding) -> Self {
        Self { encoding }
    }

    pub fn encoding(&self) -> LeafEncoding {
        self.encoding
    }

    /// Canonicalizes `address` and hashes it. Fails with `InvalidAddress`
    /// without producing a leaf if the input is malformed.
    pub fn leaf(&self, address: &str) -> MerkleResult<HashValue> {
        let canonical = CanonicalAddress::parse(address)?;
        Ok(self.hash_canonical(&canonical))
    }

    pub fn hash_canonical(&self, address: &CanonicalAddress) -> HashValue {
        match self.encoding {
            LeafEncoding::ChecksumString => HashValue::digest(address.as_str().as_bytes()),
            LeafEncoding::AddressBytes => HashValue::digest(address.as_bytes()),
        }
    }

    /// Hashes every address in order
    pub fn hash_all<'a, I>(&self, addresses: I) -> Vec<HashValue>
    where
        I: IntoIterator<Item = &'a CanonicalAddress>,
    {
        addresses
            .into_iter()
            .map(|address| self.hash_canonical(address))
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const EIP55: &str = "0x5aAeb6053F3E94C9b9A09f33669435E7Ef1BeAed";

    #[test]
    fn test_canonicalize_lowercase() {
        let canonical = canonicalize_address("0x5aaeb6053f3e94c9b9a09f33669435e7ef1beaed").unwrap();
        assert_eq!(canonical, EIP55);
    }

    #[test]
    fn test_canonicalize_without_prefix_and_uppercase() {
        assert_eq!(
            canonicalize_address("5AAEB6053F3E94C9B9A09F33669435E7EF1BEAED").unwrap(),
            EIP55
        );
    }

    #[test]
    fn test_checksummed_input_is_stable() {
        assert_eq!(canonicalize_address(EIP55).unwrap(), EIP55);
    }

    #[test]
    fn test_bad_checksum_rejected() {
        // last letter case flipped
        let result = canonicalize_address("0x5aAeb6053F3E94C9b9A09f33669435E7Ef1BeAeD");
        assert!(matches!(result, Err(MerkleError::InvalidAddress { .. })));
    }

    #[test]
    fn test_wrong_length_rejected() {
        // 19 bytes
        let result = CanonicalAddress::parse("0x3bdde1e9fbaef2579dd63e2abbf0be445ab93f");
        assert!(matches!(result, Err(MerkleError::InvalidAddress { .. })));
        assert!(CanonicalAddress::parse("").is_err());
    }

    #[test]
    fn test_invalid_hex_rejected() {
        let result = CanonicalAddress::parse("0xzz5aaeb6053f3e94c9b9a09f33669435e7ef1bea");
        assert!(matches!(result, Err(MerkleError::InvalidAddress { .. })));
    }

    #[test]
    fn test_spellings_compare_equal() {
        let a = CanonicalAddress::parse(EIP55).unwrap();
        let b = CanonicalAddress::parse(&EIP55.to_lowercase()).unwrap();
        assert_eq!(a, b);
        assert_eq!(a.as_str(), b.as_str());
    }

    #[test]
    fn test_leaf_hashes_checksum_string() {
        let hasher = LeafHasher::default();
        let leaf = hasher.leaf(&EIP55.to_lowercase()).unwrap();
        assert_eq!(leaf, HashValue::digest(EIP55.as_bytes()));
        assert_eq!(
            leaf.to_hex(),
            "c9229baaa6272ce5f1d63d2fe45bb4e0315dd58fdda1dee5d30282377dc077fb"
        );
    }

    #[test]
    fn test_leaf_hashes_address_bytes() {
        let hasher = LeafHasher::new(LeafEncoding::AddressBytes);
        let leaf = hasher.leaf(EIP55).unwrap();
        assert_eq!(
            leaf.to_hex(),
            "793f88740e3ced5d3b007ab91feb3feb22d76afe4b9e849aa48d4d35f740fb4e"
        );
    }

    #[test]
    fn test_leaf_rejects_malformed_input() {
        let hasher = LeafHasher::default();
        assert!(matches!(
            hasher.leaf("0x1234"),
            Err(MerkleError::InvalidAddress { .. })
        ));
    }

    #[test]
    fn test_hasher_reports_encoding() {
        assert_eq!(LeafHasher::default().encoding(), LeafEncoding::ChecksumString);
        assert_eq!(
            LeafHasher::new(LeafEncoding::AddressBytes).encoding(),
            LeafEncoding::AddressBytes
        );
    }

    #[test]
    fn test_leaf_encoding_from_str() {
        assert_eq!("checksum-string".parse::<LeafEncoding>().unwrap(), LeafEncoding::ChecksumString);
        assert_eq!("ADDRESS-BYTES".parse::<LeafEncoding>().unwrap(), LeafEncoding::AddressBytes);
        assert!(matches!("raw".parse::<LeafEncoding>(), Err(MerkleError::Config(_))));
        assert_eq!(LeafEncoding::AddressBytes.to_string(), "address-bytes");
    }
}
