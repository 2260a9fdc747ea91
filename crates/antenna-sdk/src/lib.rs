//! # antenna-sdk
//!
//! Rust SDK for building, signing and submitting ledger actions.
//!
//! ## Features
//!
//! - **AuthedClient** / **ReadOnlyClient**: clients over one shared [`ApiClient`]
//! - **Account**: key ownership and signing
//! - **Callers**: per-action builders that resolve nonce, gas limit and gas
//!   price, then sign and submit
//! - **ContractInterface**: JSON ABI method tables with address argument coercion
//! - **ABI**: Solidity ABI encoding and decoding
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use std::sync::Arc;
//! use antenna_sdk::{Account, AuthedClient, ReadOnlyClient};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     // Create a mock client for testing
//!     let read_only = ReadOnlyClient::new_mock();
//!
//!     let account = Arc::new(Account::new_random());
//!     println!("Address: {}", account.address());
//!
//!     let client = AuthedClient::new(read_only, account);
//!     let hash = client
//!         .transfer("io187wzp08vnhjjpkydnr97qlh8kh0dpkkytfam8j", 1_000_000_000_000_000_000u64)
//!         .set_payload(b"hello world!")
//!         .call()
//!         .await?;
//!     println!("Submitted: {}", hash);
//!
//!     Ok(())
//! }
//! ```
//!
//! ## Contract Interaction
//!
//! ```rust,no_run
//! use std::sync::Arc;
//! use antenna_sdk::{interface, Address, ReadOnlyClient};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let client = ReadOnlyClient::new_mock();
//!
//!     let token: Address = "io187wzp08vnhjjpkydnr97qlh8kh0dpkkytfam8j".parse()?;
//!     let contract = client.read_only_contract(token, Arc::new(interface::xrc20()));
//!
//!     // Address strings are converted for address parameters
//!     let result = contract
//!         .read("balanceOf", vec!["io187wzp08vnhjjpkydnr97qlh8kh0dpkkytfam8j".into()])
//!         .call()
//!         .await?;
//!     println!("Balance: {:?}", result.decode()?);
//!
//!     Ok(())
//! }
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod abi;
mod account;
mod api;
pub mod caller;
mod client;
mod coerce;
mod config;
mod contract;
mod error;
pub mod interface;
pub mod transport;
mod wait;

pub use account::{recover_message_signer, Account};
pub use api::{AccountMeta, ApiClient, LogFilter};
pub use caller::CallerState;
pub use client::{AuthedClient, ReadOnlyClient};
pub use coerce::{coerce_arguments, ArgValue};
pub use config::ClientConfig;
pub use contract::{CallResult, Contract, ReadContractCaller, ReadOnlyContract};
pub use error::{ErrorCode, SdkError};
pub use interface::ContractInterface;
pub use transport::MockTransport;

/// Re-export Transport trait for custom implementations
pub use transport::Transport;
pub use wait::wait_for_receipt;

#[cfg(feature = "http")]
pub use transport::HttpTransport;

// Re-export primitives for convenience
pub use antenna_crypto::Signature;
pub use antenna_primitives::{Address, H256, U256};
pub use antenna_types::{ActionCore, ActionPayload, Log, Receipt, SealedAction};
pub use num_bigint::{BigInt, BigUint};
