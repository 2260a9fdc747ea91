//! Keccak-256 hashing

use antenna_primitives::H256;
use sha3::{Digest, Keccak256};

/// Prefix prepended to free-form messages before hashing
const MESSAGE_PREFIX: &str = "\x16IoTeX Signed Message:\n";

/// Compute Keccak-256 hash of the input data
pub fn keccak256(data: &[u8]) -> H256 {
    let mut hasher = Keccak256::new();
    hasher.update(data);
    let result = hasher.finalize();
    H256::from_bytes(result.into())
}

/// Hash a free-form message with the ledger's signed-message prefix
pub fn hash_message(message: &[u8]) -> H256 {
    let mut data = format!("{}{}", MESSAGE_PREFIX, message.len()).into_bytes();
    data.extend_from_slice(message);
    keccak256(&data)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_keccak256_empty() {
        let hash = keccak256(&[]);
        assert_eq!(
            hash.to_hex(),
            "0xc5d2460186f7233c927e7db2dcc703c0e500b653ca82273b7bfad8045d85a470"
        );
    }

    #[test]
    fn test_keccak256_hello() {
        let hash = keccak256(b"hello");
        assert_eq!(
            hash.to_hex(),
            "0x1c8aff950685c2ed4bc3174f3472287b56d9517b9c948127319a09a7a36deac8"
        );
    }

    #[test]
    fn test_keccak256_ledger_text() {
        let hash = keccak256(b"IoTeX is the auto-scalable and privacy-centric blockchain.");
        assert_eq!(
            hash.encode_hex(),
            "aada23f93a5ed1829ebf1c0693988dc3d2d879f703c7d3f54dcc1b473b27d015"
        );
    }

    #[test]
    fn test_keccak256_function_selector() {
        // transfer(address,uint256)
        let hash = keccak256(b"transfer(address,uint256)");
        assert_eq!(&hash.as_bytes()[..4], &[0xa9, 0x05, 0x9c, 0xbb]);
    }

    #[test]
    fn test_keccak256_multi_block() {
        // 137 bytes spans two keccak blocks
        let data = [0xab; 137];
        let a = keccak256(&data);
        let b = keccak256(&data);
        assert_eq!(a, b);
        assert_ne!(a, keccak256(&data[..136]));
    }

    #[test]
    fn test_hash_message() {
        let hash = hash_message(b"hello");
        assert_eq!(
            hash.encode_hex(),
            "5077b388a631936d73d9c6c9a0bf6016843a8b594540d1d968f7ea40d1541c58"
        );
    }
}
