//! ABI encoding

use antenna_primitives::U256;

use super::types::{ParamType, Token};
use crate::SdkError;

/// Encode tokens, inferring each parameter type from its token
pub fn encode(tokens: &[Token]) -> Result<Vec<u8>, SdkError> {
    let types: Vec<ParamType> = tokens.iter().map(|t| t.type_of()).collect();
    encode_params(&types, tokens)
}

/// Encode tokens against declared parameter types.
///
/// Every token must match its declared type; integers must fit their bit size.
pub fn encode_params(types: &[ParamType], tokens: &[Token]) -> Result<Vec<u8>, SdkError> {
    if types.len() != tokens.len() {
        return Err(SdkError::AbiEncode(format!(
            "Expected {} values, got {}",
            types.len(),
            tokens.len()
        )));
    }

    let head_size: usize = types.iter().map(|t| t.head_length()).sum();
    let mut head = Vec::with_capacity(head_size);
    let mut tail = Vec::new();

    for (param_type, token) in types.iter().zip(tokens) {
        let encoded = encode_token(param_type, token)?;
        if param_type.is_dynamic() {
            head.extend(word(&U256::from(head_size + tail.len())));
            tail.extend(encoded);
        } else {
            head.extend(encoded);
        }
    }

    head.extend(tail);
    Ok(head)
}

/// Selector followed by the encoded arguments
pub fn encode_function_call(
    selector: [u8; 4],
    types: &[ParamType],
    tokens: &[Token],
) -> Result<Vec<u8>, SdkError> {
    let mut result = selector.to_vec();
    result.extend(encode_params(types, tokens)?);
    Ok(result)
}

fn encode_token(param_type: &ParamType, token: &Token) -> Result<Vec<u8>, SdkError> {
    match (param_type, token) {
        (ParamType::Address, Token::Address(addr)) => {
            let mut buf = [0u8; 32];
            buf[12..].copy_from_slice(addr.as_bytes());
            Ok(buf.to_vec())
        }
        (ParamType::Uint(bits), Token::Uint(value)) => {
            if *bits < 256 && value.bits() > *bits {
                return Err(SdkError::AbiEncode(format!(
                    "Value {} does not fit in uint{}",
                    value, bits
                )));
            }
            Ok(word(value))
        }
        (ParamType::Int(bits), Token::Int(value)) => {
            // magnitude limit is 2^(bits-1), reached only by the negative minimum
            let limit = U256::one() << bits.saturating_sub(1).min(255);
            let fits = if value.negative {
                value.abs <= limit
            } else {
                value.abs < limit
            };
            if *bits < 256 && !fits {
                return Err(SdkError::AbiEncode(format!("Value does not fit in int{}", bits)));
            }
            Ok(word(&value.to_twos_complement()))
        }
        (ParamType::Bool, Token::Bool(b)) => {
            let mut buf = [0u8; 32];
            buf[31] = u8::from(*b);
            Ok(buf.to_vec())
        }
        (ParamType::FixedBytes(size), Token::FixedBytes(data)) => {
            if data.len() != *size || *size > 32 {
                return Err(SdkError::AbiEncode(format!(
                    "Expected {} bytes for bytes{}, got {}",
                    size,
                    size,
                    data.len()
                )));
            }
            let mut buf = [0u8; 32];
            buf[..data.len()].copy_from_slice(data);
            Ok(buf.to_vec())
        }
        (ParamType::Bytes, Token::Bytes(data)) => Ok(encode_bytes(data)),
        (ParamType::String, Token::String(s)) => Ok(encode_bytes(s.as_bytes())),
        (ParamType::Array(inner), Token::Array(tokens)) => {
            let mut result = word(&U256::from(tokens.len()));
            let inner_types = vec![(**inner).clone(); tokens.len()];
            result.extend(encode_params(&inner_types, tokens)?);
            Ok(result)
        }
        (ParamType::FixedArray(inner, size), Token::FixedArray(tokens)) => {
            if tokens.len() != *size {
                return Err(SdkError::AbiEncode(format!(
                    "Expected {} elements for {}, got {}",
                    size,
                    param_type,
                    tokens.len()
                )));
            }
            encode_params(&vec![(**inner).clone(); *size], tokens)
        }
        (ParamType::Tuple(types), Token::Tuple(tokens)) => encode_params(types, tokens),
        _ => Err(SdkError::AbiEncode(format!(
            "Cannot encode {:?} as {}",
            token, param_type
        ))),
    }
}

fn word(value: &U256) -> Vec<u8> {
    let mut bytes = [0u8; 32];
    value.to_big_endian(&mut bytes);
    bytes.to_vec()
}

fn encode_bytes(data: &[u8]) -> Vec<u8> {
    let mut result = word(&U256::from(data.len()));
    let padded_len = data.len().div_ceil(32) * 32;
    let mut padded = vec![0u8; padded_len];
    padded[..data.len()].copy_from_slice(data);
    result.extend(padded);
    result
}

/// Compute function selector (first 4 bytes of keccak256(signature))
pub fn function_selector(signature: &str) -> [u8; 4] {
    let hash = antenna_crypto::keccak256(signature.as_bytes());
    let mut selector = [0u8; 4];
    selector.copy_from_slice(&hash.as_bytes()[..4]);
    selector
}

/// Parse a type string such as `uint256`, `address[]`, `bytes32[2]` or `(uint8,string)[]`
pub fn parse_type(s: &str) -> Result<ParamType, SdkError> {
    let s = s.trim();

    if let Some(prefix) = s.strip_suffix(']') {
        let open = prefix
            .rfind('[')
            .ok_or_else(|| SdkError::AbiEncode(format!("Unknown type: {}", s)))?;
        let inner = Box::new(parse_type(&prefix[..open])?);
        let size = &prefix[open + 1..];
        if size.is_empty() {
            return Ok(ParamType::Array(inner));
        }
        let size: usize = size
            .parse()
            .map_err(|_| SdkError::AbiEncode(format!("Invalid array size: {}", size)))?;
        return Ok(ParamType::FixedArray(inner, size));
    }

    if let Some(body) = s.strip_prefix('(').and_then(|b| b.strip_suffix(')')) {
        return split_tuple(body)?
            .into_iter()
            .map(parse_type)
            .collect::<Result<Vec<_>, _>>()
            .map(ParamType::Tuple);
    }

    match s {
        "address" => return Ok(ParamType::Address),
        "bool" => return Ok(ParamType::Bool),
        "string" => return Ok(ParamType::String),
        "bytes" => return Ok(ParamType::Bytes),
        _ => {}
    }

    if let Some(rest) = s.strip_prefix("uint") {
        return Ok(ParamType::Uint(int_bits(rest)?));
    }
    if let Some(rest) = s.strip_prefix("int") {
        return Ok(ParamType::Int(int_bits(rest)?));
    }
    if let Some(rest) = s.strip_prefix("bytes") {
        let size: usize = rest
            .parse()
            .map_err(|_| SdkError::AbiEncode(format!("Invalid bytes size: {}", rest)))?;
        if size == 0 || size > 32 {
            return Err(SdkError::AbiEncode(format!("Invalid bytes size: {}", size)));
        }
        return Ok(ParamType::FixedBytes(size));
    }

    Err(SdkError::AbiEncode(format!("Unknown type: {}", s)))
}

fn int_bits(rest: &str) -> Result<usize, SdkError> {
    if rest.is_empty() {
        return Ok(256);
    }
    let bits: usize = rest
        .parse()
        .map_err(|_| SdkError::AbiEncode(format!("Invalid integer size: {}", rest)))?;
    if bits == 0 || bits > 256 || bits % 8 != 0 {
        return Err(SdkError::AbiEncode(format!("Invalid integer size: {}", bits)));
    }
    Ok(bits)
}

/// Split a tuple body at top-level commas
fn split_tuple(body: &str) -> Result<Vec<&str>, SdkError> {
    if body.trim().is_empty() {
        return Ok(Vec::new());
    }
    let mut parts = Vec::new();
    let mut depth = 0usize;
    let mut start = 0;
    for (i, c) in body.char_indices() {
        match c {
            '(' => depth += 1,
            ')' => {
                depth = depth
                    .checked_sub(1)
                    .ok_or_else(|| SdkError::AbiEncode(format!("Unbalanced tuple: {}", body)))?;
            }
            ',' if depth == 0 => {
                parts.push(&body[start..i]);
                start = i + 1;
            }
            _ => {}
        }
    }
    if depth != 0 {
        return Err(SdkError::AbiEncode(format!("Unbalanced tuple: {}", body)));
    }
    parts.push(&body[start..]);
    Ok(parts)
}
