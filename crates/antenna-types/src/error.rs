//! Action construction and decoding errors

use antenna_crypto::CryptoError;
use antenna_primitives::AddressError;
use thiserror::Error;

/// Errors raised while building, sealing or decoding actions
#[derive(Debug, Error)]
pub enum TypesError {
    /// A decimal amount was negative
    #[error("{0} must not be negative")]
    NegativeAmount(&'static str),

    /// A decimal amount could not be parsed
    #[error("invalid decimal amount for {field}: {value:?}")]
    InvalidAmount {
        /// Field being decoded
        field: &'static str,
        /// Raw string value
        value: String,
    },

    /// Transfer without a recipient
    #[error("recipient address must not be empty")]
    EmptyRecipient,

    /// Deployment without bytecode
    #[error("contract bytecode must not be empty")]
    EmptyBytecode,

    /// Staking action without a candidate name
    #[error("candidate name must not be empty")]
    EmptyCandidateName,

    /// Address field failed to parse
    #[error("invalid address: {0}")]
    InvalidAddress(#[from] AddressError),

    /// Wire action core carried no payload
    #[error("action core has no payload")]
    MissingPayload,

    /// Wire action had no core
    #[error("sealed action has no core")]
    MissingCore,

    /// Signature or key failure
    #[error(transparent)]
    Crypto(#[from] CryptoError),

    /// Protobuf decoding failed
    #[error("protobuf decode error: {0}")]
    Decode(#[from] prost::DecodeError),
}
