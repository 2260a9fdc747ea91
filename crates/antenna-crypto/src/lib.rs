//! # antenna-crypto
//!
//! Cryptographic primitives used to seal actions.
//!
//! - Keccak-256 hashing
//! - ECDSA signing/verification (secp256k1, RFC 6979, low-s)
//! - Public key recovery
//! - Address derivation

#![warn(missing_docs)]
#![warn(clippy::all)]

mod hash;
mod signature;
mod error;

pub use hash::{hash_message, keccak256};
pub use signature::{
    public_key_from_bytes, public_key_to_address, public_key_to_bytes, recover_public_key, sign,
    verify, PrivateKey, PublicKey, Signature, PUBLIC_KEY_LEN, SIGNATURE_LEN,
};
pub use error::CryptoError;
