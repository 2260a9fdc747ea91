//! Ledger address type (20 bytes)
//!
//! The canonical human-readable form is bech32 with the `io` prefix.
//! A `0x`-prefixed 40-character hex string is accepted on input as well.

use std::fmt;
use std::str::FromStr;

use bech32::{FromBase32, ToBase32, Variant};
use thiserror::Error;

/// Human-readable part of bech32 encoded addresses
pub const ADDRESS_HRP: &str = "io";

/// Address parsing error
#[derive(Debug, Error)]
pub enum AddressError {
    /// Empty input
    #[error("empty address string")]
    Empty,
    /// Invalid hex string
    #[error("invalid hex string: {0}")]
    InvalidHex(String),
    /// Invalid bech32 string
    #[error("invalid bech32 string: {0}")]
    InvalidBech32(String),
    /// Bech32 string with a foreign prefix
    #[error("invalid address prefix: expected {ADDRESS_HRP}, got {0}")]
    InvalidPrefix(String),
    /// Invalid length
    #[error("invalid address length: expected 20 bytes, got {0}")]
    InvalidLength(usize),
}

/// 20-byte ledger address
#[derive(Clone, Copy, PartialEq, Eq, Hash, Default, PartialOrd, Ord)]
pub struct Address([u8; 20]);

impl Address {
    /// Size of address in bytes
    pub const LEN: usize = 20;

    /// Zero address
    pub const ZERO: Address = Address([0u8; 20]);

    /// Create address from bytes
    pub const fn from_bytes(bytes: [u8; 20]) -> Self {
        Address(bytes)
    }

    /// Create address from slice
    pub fn from_slice(slice: &[u8]) -> Result<Self, AddressError> {
        if slice.len() != 20 {
            return Err(AddressError::InvalidLength(slice.len()));
        }
        let mut bytes = [0u8; 20];
        bytes.copy_from_slice(slice);
        Ok(Address(bytes))
    }

    /// Parse address from hex string (with or without 0x prefix)
    pub fn from_hex(s: &str) -> Result<Self, AddressError> {
        let s = s.strip_prefix("0x").unwrap_or(s);
        let bytes = hex::decode(s).map_err(|e| AddressError::InvalidHex(e.to_string()))?;
        Self::from_slice(&bytes)
    }

    /// Parse address from its bech32 form (`io1...`)
    pub fn from_bech32(s: &str) -> Result<Self, AddressError> {
        if s.is_empty() {
            return Err(AddressError::Empty);
        }
        let (hrp, data, variant) =
            bech32::decode(s).map_err(|e| AddressError::InvalidBech32(e.to_string()))?;
        if hrp != ADDRESS_HRP {
            return Err(AddressError::InvalidPrefix(hrp));
        }
        if variant != Variant::Bech32 {
            return Err(AddressError::InvalidBech32("unexpected bech32m checksum".to_string()));
        }
        let bytes = Vec::<u8>::from_base32(&data)
            .map_err(|e| AddressError::InvalidBech32(e.to_string()))?;
        Self::from_slice(&bytes)
    }

    /// Get as byte slice
    pub fn as_bytes(&self) -> &[u8; 20] {
        &self.0
    }

    /// Check if this is the zero address
    pub fn is_zero(&self) -> bool {
        self.0 == [0u8; 20]
    }

    /// Convert to hex string with 0x prefix
    pub fn to_hex(&self) -> String {
        format!("0x{}", hex::encode(self.0))
    }

    /// Convert to the bech32 form
    pub fn to_bech32(&self) -> String {
        self.to_string()
    }
}

impl FromStr for Address {
    type Err = AddressError;

    /// Accepts `io1...` bech32 strings and `0x...` hex strings.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        if s.is_empty() {
            return Err(AddressError::Empty);
        }
        if s.starts_with("0x") || s.starts_with("0X") {
            return Self::from_hex(&s[2..]);
        }
        Self::from_bech32(s)
    }
}

impl fmt::Debug for Address {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Address({})", self)
    }
}

impl fmt::Display for Address {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        bech32::encode_to_fmt(f, ADDRESS_HRP, self.0.to_base32(), Variant::Bech32)
            .map_err(|_| fmt::Error)?
    }
}

impl From<[u8; 20]> for Address {
    fn from(bytes: [u8; 20]) -> Self {
        Address(bytes)
    }
}

impl AsRef<[u8]> for Address {
    fn as_ref(&self) -> &[u8] {
        &self.0
    }
}

#[cfg(feature = "serde")]
mod serde_impl {
    use super::*;
    use serde::{de, Deserialize, Deserializer, Serialize, Serializer};

    impl Serialize for Address {
        fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
            serializer.collect_str(self)
        }
    }

    impl<'de> Deserialize<'de> for Address {
        fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
            let s = String::deserialize(deserializer)?;
            s.parse().map_err(de::Error::custom)
        }
    }
}
