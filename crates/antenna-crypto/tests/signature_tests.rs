//! Signature tests over freshly generated keys

use antenna_crypto::{
    hash_message, keccak256, public_key_from_bytes, public_key_to_address, public_key_to_bytes,
    recover_public_key, sign, verify, CryptoError, Signature,
};
use k256::ecdsa::SigningKey;

fn random_key() -> SigningKey {
    SigningKey::random(&mut rand::thread_rng())
}

// =============================================================================
// Random key round trips
// =============================================================================

mod random_keys {
    use super::*;

    #[test]
    fn signatures_are_low_s_and_recoverable() {
        for i in 0..32u8 {
            let key = random_key();
            let digest = keccak256(&[i; 40]);
            let sig = sign(&digest, &key).unwrap();
            assert!(sig.is_low_s());
            assert!(sig.v <= 1);

            let recovered = recover_public_key(&digest, &sig).unwrap();
            assert_eq!(recovered, *key.verifying_key());
            assert!(verify(&digest, &sig, &recovered).unwrap());
        }
    }

    #[test]
    fn address_matches_after_recovery() {
        let key = random_key();
        let digest = hash_message(b"antenna");
        let sig = sign(&digest, &key).unwrap();
        let recovered = recover_public_key(&digest, &sig).unwrap();
        assert_eq!(
            public_key_to_address(&recovered),
            public_key_to_address(key.verifying_key())
        );
    }

    #[test]
    fn other_key_does_not_verify() {
        let digest = keccak256(b"payload");
        let sig = sign(&digest, &random_key()).unwrap();
        assert!(!verify(&digest, &sig, random_key().verifying_key()).unwrap());
    }

    #[test]
    fn compressed_and_uncompressed_keys_agree() {
        let key = random_key();
        let compressed = key.verifying_key().to_encoded_point(true);
        let parsed = public_key_from_bytes(compressed.as_bytes()).unwrap();
        assert_eq!(
            public_key_to_bytes(&parsed),
            public_key_to_bytes(key.verifying_key())
        );
    }
}

// =============================================================================
// Malformed input
// =============================================================================

mod malformed {
    use super::*;

    #[test]
    fn bad_recovery_id() {
        let digest = keccak256(b"payload");
        let mut sig = sign(&digest, &random_key()).unwrap();
        sig.v = 4;
        assert!(matches!(
            recover_public_key(&digest, &sig),
            Err(CryptoError::InvalidRecoveryId(4))
        ));
    }

    #[test]
    fn garbage_public_key() {
        assert!(matches!(
            public_key_from_bytes(&[0x04; 65]),
            Err(CryptoError::InvalidPublicKey(_))
        ));
    }

    #[test]
    fn short_signature_slice() {
        assert!(Signature::from_slice(&[1u8; 64]).is_err());
    }
}
