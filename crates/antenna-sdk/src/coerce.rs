//! Argument coercion ahead of ABI encoding.
//!
//! Callers hand in [`ArgValue`]s. Parameters declared as `address`, `address[]`
//! or `address[N]` accept ledger address strings (`io1...` or `0x...`) as well
//! as [`Address`] values and are converted here. Every other parameter receives
//! its value unchanged and is left to the encoder to type-check.

use antenna_primitives::{Address, U256};

use crate::abi::{ParamType, Token};
use crate::SdkError;

/// A contract call argument
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ArgValue {
    /// Text: an address for address parameters, a string otherwise
    Str(String),
    /// Ledger address
    Address(Address),
    /// Ready-made ABI token
    Token(Token),
    /// Sequence of arguments
    List(Vec<ArgValue>),
}

impl ArgValue {
    /// Dynamic `bytes` argument
    pub fn bytes(data: impl Into<Vec<u8>>) -> Self {
        ArgValue::Token(Token::Bytes(data.into()))
    }

    fn into_token(self) -> Token {
        match self {
            ArgValue::Str(s) => Token::String(s),
            ArgValue::Address(a) => Token::Address(a),
            ArgValue::Token(t) => t,
            ArgValue::List(items) => {
                Token::Array(items.into_iter().map(ArgValue::into_token).collect())
            }
        }
    }
}

impl From<&str> for ArgValue {
    fn from(s: &str) -> Self {
        ArgValue::Str(s.to_string())
    }
}

impl From<String> for ArgValue {
    fn from(s: String) -> Self {
        ArgValue::Str(s)
    }
}

impl From<Address> for ArgValue {
    fn from(a: Address) -> Self {
        ArgValue::Address(a)
    }
}

impl From<Token> for ArgValue {
    fn from(t: Token) -> Self {
        ArgValue::Token(t)
    }
}

impl From<U256> for ArgValue {
    fn from(v: U256) -> Self {
        ArgValue::Token(Token::Uint(v))
    }
}

impl From<u64> for ArgValue {
    fn from(v: u64) -> Self {
        ArgValue::Token(Token::Uint(U256::from(v)))
    }
}

impl From<u128> for ArgValue {
    fn from(v: u128) -> Self {
        ArgValue::Token(Token::Uint(U256::from(v)))
    }
}

impl From<bool> for ArgValue {
    fn from(v: bool) -> Self {
        ArgValue::Token(Token::Bool(v))
    }
}

impl<T: Into<ArgValue>> From<Vec<T>> for ArgValue {
    fn from(items: Vec<T>) -> Self {
        ArgValue::List(items.into_iter().map(Into::into).collect())
    }
}

/// Convert `args` into tokens for parameters of the given types.
///
/// Fails with [`SdkError::InvalidParam`] on an arity mismatch, an unparsable
/// address, or a non-sequence value for an address array.
pub fn coerce_arguments(inputs: &[ParamType], args: Vec<ArgValue>) -> Result<Vec<Token>, SdkError> {
    if inputs.len() != args.len() {
        return Err(SdkError::InvalidParam(format!(
            "the number of arguments is not correct: expected {}, got {}",
            inputs.len(),
            args.len()
        )));
    }

    inputs
        .iter()
        .zip(args)
        .map(|(param_type, arg)| match param_type {
            ParamType::Address => coerce_address(arg).map(Token::Address),
            ParamType::Array(inner) if **inner == ParamType::Address => {
                coerce_address_list(arg).map(Token::Array)
            }
            ParamType::FixedArray(inner, _) if **inner == ParamType::Address => {
                coerce_address_list(arg).map(Token::FixedArray)
            }
            _ => Ok(arg.into_token()),
        })
        .collect()
}

fn coerce_address(arg: ArgValue) -> Result<Address, SdkError> {
    match arg {
        ArgValue::Str(s) => s.parse().map_err(|e| {
            SdkError::InvalidParam(format!("fail to convert {:?} to address: {}", s, e))
        }),
        ArgValue::Address(a) | ArgValue::Token(Token::Address(a)) => Ok(a),
        other => Err(SdkError::InvalidParam(format!(
            "expected an address, got {:?}",
            other
        ))),
    }
}

fn coerce_address_list(arg: ArgValue) -> Result<Vec<Token>, SdkError> {
    let items = match arg {
        ArgValue::List(items) => items,
        ArgValue::Token(Token::Array(tokens)) | ArgValue::Token(Token::FixedArray(tokens)) => {
            tokens.into_iter().map(ArgValue::Token).collect()
        }
        other => {
            return Err(SdkError::InvalidParam(format!(
                "expected a sequence of addresses, got {:?}",
                other
            )))
        }
    };
    items
        .into_iter()
        .map(|item| coerce_address(item).map(Token::Address))
        .collect()
}
