//! Solidity ABI encoding and decoding
//!
//! This module provides functionality for:
//! - Encoding function calls and constructor arguments
//! - Decoding function return values
//! - Computing function selectors
//!
//! # Example
//!
//! ```rust
//! use antenna_sdk::abi::{encode_params, decode, function_selector, Token, ParamType};
//! use antenna_primitives::{Address, U256};
//!
//! let selector = function_selector("transfer(address,uint256)");
//! let data = encode_params(
//!     &[ParamType::Address, ParamType::Uint(256)],
//!     &[Token::Address(Address::ZERO), Token::Uint(U256::from(1000))],
//! )
//! .unwrap();
//! assert_eq!(data.len(), 64);
//!
//! let return_data = [0u8; 32];
//! let balance = decode(&[ParamType::Uint(256)], &return_data).unwrap();
//! assert_eq!(balance, vec![Token::Uint(U256::zero())]);
//! ```

mod decode;
mod encode;
mod types;

pub use decode::decode;
pub use encode::{encode, encode_function_call, encode_params, function_selector, parse_type};
pub use types::{ParamType, Token, I256};
