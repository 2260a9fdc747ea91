//! SDK error types

use std::fmt;

use antenna_primitives::H256;
use antenna_types::TypesError;
use thiserror::Error;

/// Coarse error category every [`SdkError`] falls into
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[repr(u8)]
pub enum ErrorCode {
    /// Caller-supplied data violates a precondition
    InvalidParam = 1,
    /// The remote call failed
    RpcError = 2,
    /// The remote service returned malformed data
    BadResponse = 3,
    /// A failure inside the SDK itself
    InternalError = 4,
}

impl fmt::Display for ErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            ErrorCode::InvalidParam => "invalid param",
            ErrorCode::RpcError => "rpc error",
            ErrorCode::BadResponse => "bad response",
            ErrorCode::InternalError => "internal error",
        };
        f.write_str(name)
    }
}

/// SDK error type
#[derive(Debug, Error)]
pub enum SdkError {
    /// Caller input rejected
    #[error("Invalid parameter: {0}")]
    InvalidParam(String),

    /// Invalid address format
    #[error("Invalid address: {0}")]
    InvalidAddress(String),

    /// Invalid private key
    #[error("Invalid private key: {0}")]
    InvalidPrivateKey(String),

    /// Action payload failed validation or decoding
    #[error("Invalid action: {0}")]
    Action(#[from] TypesError),

    /// ABI encoding error
    #[error("ABI encoding error: {0}")]
    AbiEncode(String),

    /// ABI decoding error
    #[error("ABI decoding error: {0}")]
    AbiDecode(String),

    /// Transport/network error
    #[error("Transport error: {0}")]
    Transport(String),

    /// RPC error from the remote service
    #[error("RPC error: {code} - {message}")]
    Rpc {
        /// Error code
        code: i64,
        /// Error message
        message: String,
    },

    /// A remote lookup needed to complete the action failed
    #[error("failed to resolve {step}: {source}")]
    Resolution {
        /// Which field was being resolved
        step: &'static str,
        /// Underlying failure
        #[source]
        source: Box<SdkError>,
    },

    /// The call was cancelled before it finished
    #[error("Call cancelled")]
    Cancelled,

    /// Response could not be interpreted
    #[error("Bad response: {0}")]
    BadResponse(String),

    /// Invalid hex string
    #[error("Invalid hex: {0}")]
    InvalidHex(String),

    /// Serialization error
    #[error("Serialization error: {0}")]
    Serialization(String),

    /// Signing failed
    #[error("Signing failed: {0}")]
    SigningFailed(String),

    /// The action was included but did not succeed
    #[error("execution failed: {hash} (status {status})")]
    ExecutionFailed {
        /// Action hash
        hash: H256,
        /// Receipt status code
        status: u64,
    },

    /// Configuration could not be loaded
    #[error("Configuration error: {0}")]
    Config(String),
}

impl SdkError {
    /// Category of this error
    pub fn code(&self) -> ErrorCode {
        match self {
            SdkError::InvalidParam(_)
            | SdkError::InvalidAddress(_)
            | SdkError::InvalidPrivateKey(_)
            | SdkError::AbiEncode(_)
            | SdkError::Config(_) => ErrorCode::InvalidParam,
            SdkError::Action(e) => match e {
                TypesError::Crypto(_) => ErrorCode::InternalError,
                TypesError::Decode(_)
                | TypesError::MissingCore
                | TypesError::MissingPayload
                | TypesError::InvalidAmount { .. } => ErrorCode::BadResponse,
                _ => ErrorCode::InvalidParam,
            },
            SdkError::Transport(_)
            | SdkError::Rpc { .. }
            | SdkError::Resolution { .. }
            | SdkError::Cancelled
            | SdkError::ExecutionFailed { .. } => ErrorCode::RpcError,
            SdkError::BadResponse(_)
            | SdkError::AbiDecode(_)
            | SdkError::InvalidHex(_)
            | SdkError::Serialization(_) => ErrorCode::BadResponse,
            SdkError::SigningFailed(_) => ErrorCode::InternalError,
        }
    }
}

impl SdkError {
    /// Attribute a failed lookup to the field it was resolving.
    ///
    /// Errors already in the RPC category are returned as they are.
    pub(crate) fn resolving(self, step: &'static str) -> Self {
        if self.code() == ErrorCode::RpcError {
            return self;
        }
        SdkError::Resolution {
            step,
            source: Box::new(self),
        }
    }
}

impl From<hex::FromHexError> for SdkError {
    fn from(e: hex::FromHexError) -> Self {
        SdkError::InvalidHex(e.to_string())
    }
}

impl From<serde_json::Error> for SdkError {
    fn from(e: serde_json::Error) -> Self {
        SdkError::Serialization(e.to_string())
    }
}

impl From<antenna_crypto::CryptoError> for SdkError {
    fn from(e: antenna_crypto::CryptoError) -> Self {
        SdkError::SigningFailed(e.to_string())
    }
}

impl From<antenna_primitives::AddressError> for SdkError {
    fn from(e: antenna_primitives::AddressError) -> Self {
        SdkError::InvalidAddress(e.to_string())
    }
}

impl From<antenna_primitives::PrimitiveError> for SdkError {
    fn from(e: antenna_primitives::PrimitiveError) -> Self {
        SdkError::InvalidAddress(e.to_string())
    }
}

impl From<prost::DecodeError> for SdkError {
    fn from(e: prost::DecodeError) -> Self {
        SdkError::BadResponse(e.to_string())
    }
}
