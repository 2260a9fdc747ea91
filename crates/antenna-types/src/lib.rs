//! # antenna-types
//!
//! Ledger action types.
//!
//! This crate provides:
//! - [`ActionCore`](action::ActionCore) - Unsigned action body with its one-of payload
//! - [`SealedAction`](sealed::SealedAction) - Body plus sender key and signature
//! - [`Receipt`](receipt::Receipt) - Execution outcome reported by the remote service
//! - [`proto`] - Protobuf wire messages defining the canonical encoding

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod action;
pub mod error;
pub mod proto;
pub mod receipt;
pub mod sealed;

pub use action::{
    ActionCore, ActionPayload, CandidateRegister, CandidateUpdate, ClaimReward, Deployment,
    Invocation, StakeAddDeposit, StakeChangeCandidate, StakeCreate, StakeReclaim, StakeRestake,
    StakeTransferOwnership, Transfer, PROTOCOL_VERSION,
};
pub use error::TypesError;
pub use receipt::{Log, Receipt, RECEIPT_STATUS_SUCCESS};
pub use sealed::SealedAction;
