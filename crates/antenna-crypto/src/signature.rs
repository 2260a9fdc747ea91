//! secp256k1 signatures over 32-byte digests
//!
//! Signatures are deterministic (RFC 6979) and always carry a low `s`.
//! The wire form is 65 bytes: `r || s || v` where `v` is the recovery id (0 or 1).

use antenna_primitives::{Address, H256};
use k256::ecdsa::signature::hazmat::PrehashVerifier;
use k256::ecdsa::{RecoveryId, Signature as K256Signature, SigningKey, VerifyingKey};

use crate::{keccak256, CryptoError};

/// Serialized signature length
pub const SIGNATURE_LEN: usize = 65;

/// Uncompressed SEC1 public key length
pub const PUBLIC_KEY_LEN: usize = 65;

/// Recoverable ECDSA signature
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Signature {
    /// r component
    pub r: [u8; 32],
    /// s component (always in the lower half of the curve order)
    pub s: [u8; 32],
    /// recovery id, 0 or 1
    pub v: u8,
}

/// Public key
pub type PublicKey = VerifyingKey;

/// Private key
pub type PrivateKey = SigningKey;

impl Signature {
    /// Create signature from r, s, v components
    pub fn new(r: [u8; 32], s: [u8; 32], v: u8) -> Self {
        Signature { r, s, v }
    }

    /// Serialize as `r || s || v`
    pub fn to_bytes(&self) -> [u8; SIGNATURE_LEN] {
        let mut bytes = [0u8; SIGNATURE_LEN];
        bytes[..32].copy_from_slice(&self.r);
        bytes[32..64].copy_from_slice(&self.s);
        bytes[64] = self.v;
        bytes
    }

    /// Parse `r || s || v`; the slice must be exactly 65 bytes with `v` in {0, 1}
    pub fn from_slice(bytes: &[u8]) -> Result<Self, CryptoError> {
        if bytes.len() != SIGNATURE_LEN {
            return Err(CryptoError::InvalidSignature(format!(
                "expected {} bytes, got {}",
                SIGNATURE_LEN,
                bytes.len()
            )));
        }
        let v = bytes[64];
        if v > 1 {
            return Err(CryptoError::InvalidRecoveryId(v));
        }
        let mut r = [0u8; 32];
        let mut s = [0u8; 32];
        r.copy_from_slice(&bytes[..32]);
        s.copy_from_slice(&bytes[32..64]);
        Ok(Signature { r, s, v })
    }

    /// Lowercase hex of the 65-byte form
    pub fn to_hex(&self) -> String {
        hex::encode(self.to_bytes())
    }

    /// Whether `s` is in the lower half of the curve order
    pub fn is_low_s(&self) -> bool {
        match self.to_k256() {
            Ok(sig) => sig.normalize_s().is_none(),
            Err(_) => false,
        }
    }

    fn to_k256(&self) -> Result<K256Signature, CryptoError> {
        let r: k256::FieldBytes = self.r.into();
        let s: k256::FieldBytes = self.s.into();
        K256Signature::from_scalars(r, s).map_err(|e| CryptoError::InvalidSignature(e.to_string()))
    }
}

/// Sign a 32-byte digest
pub fn sign(digest: &H256, private_key: &PrivateKey) -> Result<Signature, CryptoError> {
    let (mut signature, mut recovery_id) = private_key
        .sign_prehash_recoverable(digest.as_bytes())
        .map_err(|e| CryptoError::SigningFailed(e.to_string()))?;

    // Flipping s mirrors R, so the y-parity bit flips with it
    if let Some(normalized) = signature.normalize_s() {
        signature = normalized;
        recovery_id = RecoveryId::from_byte(recovery_id.to_byte() ^ 1)
            .ok_or_else(|| CryptoError::SigningFailed("recovery id out of range".to_string()))?;
    }

    let (r, s) = signature.split_bytes();
    Ok(Signature {
        r: r.into(),
        s: s.into(),
        v: recovery_id.to_byte(),
    })
}

/// Verify a signature against a digest and public key.
///
/// High-s signatures are rejected.
pub fn verify(
    digest: &H256,
    signature: &Signature,
    public_key: &PublicKey,
) -> Result<bool, CryptoError> {
    let sig = signature.to_k256()?;
    if sig.normalize_s().is_some() {
        return Ok(false);
    }
    Ok(public_key.verify_prehash(digest.as_bytes(), &sig).is_ok())
}

/// Recover the signer's public key
pub fn recover_public_key(digest: &H256, signature: &Signature) -> Result<PublicKey, CryptoError> {
    let sig = signature.to_k256()?;
    let recovery_id = RecoveryId::from_byte(signature.v)
        .ok_or(CryptoError::InvalidRecoveryId(signature.v))?;
    VerifyingKey::recover_from_prehash(digest.as_bytes(), &sig, recovery_id)
        .map_err(|e| CryptoError::RecoveryFailed(e.to_string()))
}

/// Uncompressed SEC1 encoding (`0x04 || x || y`)
pub fn public_key_to_bytes(public_key: &PublicKey) -> [u8; PUBLIC_KEY_LEN] {
    let encoded = public_key.to_encoded_point(false);
    let mut out = [0u8; PUBLIC_KEY_LEN];
    out.copy_from_slice(encoded.as_bytes());
    out
}

/// Parse a SEC1 public key (compressed or uncompressed)
pub fn public_key_from_bytes(bytes: &[u8]) -> Result<PublicKey, CryptoError> {
    VerifyingKey::from_sec1_bytes(bytes).map_err(|e| CryptoError::InvalidPublicKey(e.to_string()))
}

/// Derive the account address: last 20 bytes of keccak256 over the 64-byte point
pub fn public_key_to_address(public_key: &PublicKey) -> Address {
    let bytes = public_key_to_bytes(public_key);
    let hash = keccak256(&bytes[1..]);
    let mut addr = [0u8; 20];
    addr.copy_from_slice(&hash.as_bytes()[12..]);
    Address::from_bytes(addr)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::hash_message;
    use rand::rngs::OsRng;

    const KEY: &str = "0806c458b262edd333a191e92f561aff338211ee3e18ab315a074a2d82aa343f";
    const PUB: &str = "044e18306ae9ef4ec9d07bf6e705442d4d1a75e6cdf750330ca2d880f2cc54607c9c33deb9eae9c06e06e04fe9ce3d43962cc67d5aa34fbeb71270d4bad3d648d9";
    const ADDR: &str = "io187wzp08vnhjjpkydnr97qlh8kh0dpkkytfam8j";
    const TEXT: &[u8] = b"IoTeX is the auto-scalable and privacy-centric blockchain.";
    const TEXT_SIG: &str = "482da72c8faa48ee1ac2cf9a5f9ecd42ee3258be5ddd8d6b496c7171dc7bfe8e75e5d16e7129c88d99a21a912e5c082fa1baab6ba87d2688ebd7d27bb1ab090701";

    fn known_key() -> SigningKey {
        let bytes = hex::decode(KEY).unwrap();
        SigningKey::from_slice(&bytes).unwrap()
    }

    #[test]
    fn test_known_key_material() {
        let key = known_key();
        let public = key.verifying_key();
        assert_eq!(hex::encode(public_key_to_bytes(public)), PUB);
        assert_eq!(public_key_to_address(public).to_string(), ADDR);
    }

    #[test]
    fn test_known_signature_vector() {
        let key = known_key();
        let sig = sign(&keccak256(TEXT), &key).unwrap();
        assert_eq!(sig.to_hex(), TEXT_SIG);
        assert!(sig.is_low_s());
    }

    #[test]
    fn test_recover_known_message_signature() {
        let sig_bytes = hex::decode(
            "f09c729cc8617aeda344defba6c0eb0eb3ee71732e26f22d1a9fac5beeaa86da3a368417e31779b44e3df4440dfec89a9ecb40567b60228efb67c79672288cef01",
        )
        .unwrap();
        let sig = Signature::from_slice(&sig_bytes).unwrap();
        let public = recover_public_key(&hash_message(b"hello"), &sig).unwrap();
        assert_eq!(public_key_to_address(&public).to_string(), ADDR);
    }

    #[test]
    fn test_sign_and_verify() {
        let private_key = SigningKey::random(&mut OsRng);
        let public_key = private_key.verifying_key();
        let digest = keccak256(b"test message");

        let signature = sign(&digest, &private_key).unwrap();
        assert!(signature.is_low_s());
        assert!(verify(&digest, &signature, public_key).unwrap());
        assert!(!verify(&keccak256(b"other"), &signature, public_key).unwrap());
    }

    #[test]
    fn test_recover_public_key() {
        let private_key = SigningKey::random(&mut OsRng);
        let digest = keccak256(b"test message");
        let signature = sign(&digest, &private_key).unwrap();
        let recovered = recover_public_key(&digest, &signature).unwrap();
        assert_eq!(private_key.verifying_key(), &recovered);
    }

    #[test]
    fn test_low_s_enforcement() {
        for _ in 0..10 {
            let private_key = SigningKey::random(&mut OsRng);
            let signature = sign(&keccak256(b"test"), &private_key).unwrap();
            assert!(signature.is_low_s());
            assert!(signature.v <= 1);
        }
    }

    #[test]
    fn test_reject_high_s_signature() {
        let private_key = known_key();
        let digest = keccak256(TEXT);
        let sig = sign(&digest, &private_key).unwrap();

        // s' = n - s lands in the upper half of the order
        const N: [u8; 32] = [
            0xFF, 0xFF, 0xFF, 0xFF, 0xFF, 0xFF, 0xFF, 0xFF, 0xFF, 0xFF, 0xFF, 0xFF, 0xFF, 0xFF,
            0xFF, 0xFE, 0xBA, 0xAE, 0xDC, 0xE6, 0xAF, 0x48, 0xA0, 0x3B, 0xBF, 0xD2, 0x5E, 0x8C,
            0xD0, 0x36, 0x41, 0x41,
        ];
        let mut s = [0u8; 32];
        let mut borrow = 0i16;
        for i in (0..32).rev() {
            let mut d = N[i] as i16 - sig.s[i] as i16 - borrow;
            borrow = if d < 0 { 1 } else { 0 };
            if d < 0 {
                d += 256;
            }
            s[i] = d as u8;
        }
        let bad = Signature::new(sig.r, s, sig.v ^ 1);

        assert!(!bad.is_low_s());
        assert!(!verify(&digest, &bad, private_key.verifying_key()).unwrap());
    }

    #[test]
    fn test_signature_bytes_roundtrip() {
        let sig = Signature::from_slice(&hex::decode(TEXT_SIG).unwrap()).unwrap();
        assert_eq!(sig.v, 1);
        assert_eq!(Signature::from_slice(&sig.to_bytes()).unwrap(), sig);
    }

    #[test]
    fn test_signature_from_slice_rejects_bad_input() {
        assert!(matches!(
            Signature::from_slice(&[0u8; 64]),
            Err(CryptoError::InvalidSignature(_))
        ));
        let mut bytes = [1u8; 65];
        bytes[64] = 27;
        assert!(matches!(
            Signature::from_slice(&bytes),
            Err(CryptoError::InvalidRecoveryId(27))
        ));
    }

    #[test]
    fn test_zero_signature_is_invalid() {
        let sig = Signature::new([0u8; 32], [0u8; 32], 0);
        assert!(recover_public_key(&H256::ZERO, &sig).is_err());
        assert!(!sig.is_low_s());
    }

    #[test]
    fn test_public_key_roundtrip() {
        let key = known_key();
        let bytes = public_key_to_bytes(key.verifying_key());
        let parsed = public_key_from_bytes(&bytes).unwrap();
        assert_eq!(&parsed, key.verifying_key());
        assert!(public_key_from_bytes(&[4u8; 10]).is_err());
    }
}
