//! 256-bit hash type

use std::fmt;
use thiserror::Error;

/// Hash parsing error
#[derive(Debug, Error)]
pub enum HashError {
    /// Invalid hex string
    #[error("invalid hex string: {0}")]
    InvalidHex(String),
    /// Invalid length
    #[error("invalid hash length: expected {expected} bytes, got {got}")]
    InvalidLength {
        /// Expected byte count
        expected: usize,
        /// Actual byte count
        got: usize,
    },
}

/// 256-bit hash (32 bytes)
#[derive(Clone, Copy, PartialEq, Eq, Hash, Default, PartialOrd, Ord)]
pub struct H256([u8; 32]);

/// Alias for H256
pub type Hash = H256;

impl H256 {
    /// Size in bytes
    pub const LEN: usize = 32;

    /// Zero hash
    pub const ZERO: H256 = H256([0u8; 32]);

    /// Create from bytes
    pub const fn from_bytes(bytes: [u8; 32]) -> Self {
        H256(bytes)
    }

    /// Create from slice
    pub fn from_slice(slice: &[u8]) -> Result<Self, HashError> {
        if slice.len() != 32 {
            return Err(HashError::InvalidLength {
                expected: 32,
                got: slice.len(),
            });
        }
        let mut bytes = [0u8; 32];
        bytes.copy_from_slice(slice);
        Ok(H256(bytes))
    }

    /// Parse from hex string (with or without 0x prefix)
    pub fn from_hex(s: &str) -> Result<Self, HashError> {
        let s = s.strip_prefix("0x").unwrap_or(s);
        let bytes = hex::decode(s).map_err(|e| HashError::InvalidHex(e.to_string()))?;
        Self::from_slice(&bytes)
    }

    /// Get as bytes
    pub fn as_bytes(&self) -> &[u8; 32] {
        &self.0
    }

    /// Check if zero
    pub fn is_zero(&self) -> bool {
        self.0 == [0u8; 32]
    }

    /// Convert to hex string with 0x prefix
    pub fn to_hex(&self) -> String {
        format!("0x{}", hex::encode(self.0))
    }

    /// Lowercase hex without prefix, the form the remote service uses
    pub fn encode_hex(&self) -> String {
        hex::encode(self.0)
    }
}

impl fmt::Debug for H256 {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "H256({})", self.to_hex())
    }
}

impl fmt::Display for H256 {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.encode_hex())
    }
}

impl From<[u8; 32]> for H256 {
    fn from(bytes: [u8; 32]) -> Self {
        H256(bytes)
    }
}

impl AsRef<[u8]> for H256 {
    fn as_ref(&self) -> &[u8] {
        &self.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_h256_from_hex() {
        let hash = H256::from_hex(
            "0x0000000000000000000000000000000000000000000000000000000000000001",
        )
        .unwrap();
        assert!(!hash.is_zero());
        assert_eq!(hash.as_bytes()[31], 1);
    }

    #[test]
    fn test_h256_from_hex_without_prefix() {
        let with = H256::from_hex(
            "0x0f17cd7f43bdbeff73dfe8f5cb0c0045f2990884e5050841de887cf22ca35b50",
        )
        .unwrap();
        let without = H256::from_hex(
            "0f17cd7f43bdbeff73dfe8f5cb0c0045f2990884e5050841de887cf22ca35b50",
        )
        .unwrap();
        assert_eq!(with, without);
    }

    #[test]
    fn test_h256_display_has_no_prefix() {
        let s = "6c84ac119058e859a015221f87a4e187c393d0c6ee283959342eac95fad08c33";
        let hash = H256::from_hex(s).unwrap();
        assert_eq!(hash.to_string(), s);
        assert_eq!(hash.encode_hex(), s);
        assert_eq!(hash.to_hex(), format!("0x{}", s));
    }

    #[test]
    fn test_h256_from_hex_invalid_chars() {
        let result = H256::from_hex("zz");
        assert!(matches!(result, Err(HashError::InvalidHex(_))));
    }

    #[test]
    fn test_h256_from_hex_empty() {
        let result = H256::from_hex("");
        assert!(matches!(
            result,
            Err(HashError::InvalidLength { expected: 32, got: 0 })
        ));
    }

    #[test]
    fn test_h256_from_slice_too_long() {
        let result = H256::from_slice(&[0u8; 33]);
        assert!(matches!(
            result,
            Err(HashError::InvalidLength { expected: 32, got: 33 })
        ));
    }

    #[test]
    fn test_h256_zero_default() {
        assert_eq!(H256::default(), H256::ZERO);
        assert!(H256::ZERO.is_zero());
    }

    #[test]
    fn test_h256_debug() {
        let hash = H256::from_bytes([0xab; 32]);
        assert!(format!("{:?}", hash).starts_with("H256(0xabab"));
    }
}
