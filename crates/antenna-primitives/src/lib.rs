//! # antenna-primitives
//!
//! Primitive types shared by every antenna crate.
//!
//! - [`Address`]: 20-byte account/contract address with a bech32 (`io1...`)
//!   human-readable form
//! - [`H256`]: 32-byte digest, used for action hashes

#![warn(missing_docs)]
#![warn(clippy::all)]

mod address;
mod hash;
mod error;

pub use address::{Address, AddressError, ADDRESS_HRP};
pub use hash::{Hash, HashError, H256};
pub use error::PrimitiveError;

// Re-export primitive-types for U256
pub use primitive_types::U256;
