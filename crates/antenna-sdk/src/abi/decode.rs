//! ABI decoding

use antenna_primitives::{Address, U256};

use super::types::{ParamType, Token, I256};
use crate::SdkError;

/// Decode ABI-encoded data into tokens of the given types
pub fn decode(types: &[ParamType], data: &[u8]) -> Result<Vec<Token>, SdkError> {
    decode_params(types, data, 0)
}

/// Decode a head/tail block starting at `base`; dynamic offsets are relative to `base`
fn decode_params(types: &[ParamType], data: &[u8], base: usize) -> Result<Vec<Token>, SdkError> {
    let mut tokens = Vec::with_capacity(types.len());
    let mut head = base;

    for param_type in types {
        if param_type.is_dynamic() {
            let offset = read_usize(data, head)?;
            let start = base
                .checked_add(offset)
                .ok_or_else(|| SdkError::AbiDecode("Offset overflow".to_string()))?;
            tokens.push(decode_at(param_type, data, start)?);
            head += 32;
        } else {
            tokens.push(decode_at(param_type, data, head)?);
            head += param_type.head_length();
        }
    }

    Ok(tokens)
}

/// Decode one value whose encoding starts at `at`
fn decode_at(param_type: &ParamType, data: &[u8], at: usize) -> Result<Token, SdkError> {
    match param_type {
        ParamType::Address => {
            let w = read_word(data, at)?;
            let mut addr = [0u8; 20];
            addr.copy_from_slice(&w[12..]);
            Ok(Token::Address(Address::from_bytes(addr)))
        }
        ParamType::Uint(_) => Ok(Token::Uint(U256::from_big_endian(read_word(data, at)?))),
        ParamType::Int(_) => {
            let w = U256::from_big_endian(read_word(data, at)?);
            Ok(Token::Int(I256::from_twos_complement(w)))
        }
        ParamType::Bool => {
            let w = read_word(data, at)?;
            Ok(Token::Bool(w[31] != 0))
        }
        ParamType::FixedBytes(size) => {
            let w = read_word(data, at)?;
            let size = (*size).min(32);
            Ok(Token::FixedBytes(w[..size].to_vec()))
        }
        ParamType::Bytes => Ok(Token::Bytes(read_bytes(data, at)?.to_vec())),
        ParamType::String => {
            let bytes = read_bytes(data, at)?.to_vec();
            let s = String::from_utf8(bytes)
                .map_err(|e| SdkError::AbiDecode(format!("Invalid UTF-8: {}", e)))?;
            Ok(Token::String(s))
        }
        ParamType::Array(inner) => {
            let len = read_usize(data, at)?;
            // every element takes at least one word
            if len > data.len() / 32 {
                return Err(SdkError::AbiDecode(format!("Array length {} exceeds data", len)));
            }
            let types = vec![(**inner).clone(); len];
            Ok(Token::Array(decode_params(&types, data, at + 32)?))
        }
        ParamType::FixedArray(inner, size) => {
            let types = vec![(**inner).clone(); *size];
            Ok(Token::FixedArray(decode_params(&types, data, at)?))
        }
        ParamType::Tuple(types) => Ok(Token::Tuple(decode_params(types, data, at)?)),
    }
}

fn read_word(data: &[u8], at: usize) -> Result<&[u8], SdkError> {
    let end = at.checked_add(32).unwrap_or(usize::MAX);
    check_length(data, end)?;
    Ok(&data[at..end])
}

/// Word interpreted as an offset or length; must not exceed the data size
fn read_usize(data: &[u8], at: usize) -> Result<usize, SdkError> {
    let value = U256::from_big_endian(read_word(data, at)?);
    if value > U256::from(data.len()) {
        return Err(SdkError::AbiDecode(format!(
            "Offset or length {} exceeds data size {}",
            value,
            data.len()
        )));
    }
    Ok(value.as_usize())
}

fn read_bytes(data: &[u8], at: usize) -> Result<&[u8], SdkError> {
    let len = read_usize(data, at)?;
    let start = at + 32;
    check_length(data, start + len)?;
    Ok(&data[start..start + len])
}

fn check_length(data: &[u8], required: usize) -> Result<(), SdkError> {
    if data.len() < required {
        return Err(SdkError::AbiDecode(format!(
            "Insufficient data: need {} bytes, have {}",
            required,
            data.len()
        )));
    }
    Ok(())
}
