//! Signing accounts

use antenna_crypto::{
    hash_message, public_key_to_address, public_key_to_bytes, recover_public_key, sign,
    PrivateKey, PublicKey, Signature, PUBLIC_KEY_LEN,
};
use antenna_primitives::{Address, H256};
use antenna_types::{ActionCore, SealedAction};
use k256::ecdsa::SigningKey;
use rand::rngs::OsRng;
use zeroize::Zeroize;

use crate::SdkError;

/// An address, its public key and the private key that signs for it.
///
/// Clone is intentionally not implemented to prevent accidental key duplication.
/// Share an account between callers through an `Arc`.
pub struct Account {
    private_key: PrivateKey,
    address: Address,
}

impl Account {
    /// Create a new random account
    pub fn new_random() -> Self {
        Self::from_signing_key(SigningKey::random(&mut OsRng))
    }

    fn from_signing_key(private_key: PrivateKey) -> Self {
        let address = public_key_to_address(private_key.verifying_key());
        Self {
            private_key,
            address,
        }
    }

    /// Create an account from a 32-byte private key
    pub fn from_private_key(key: &[u8; 32]) -> Result<Self, SdkError> {
        let private_key = SigningKey::from_slice(key)
            .map_err(|e| SdkError::InvalidPrivateKey(e.to_string()))?;
        Ok(Self::from_signing_key(private_key))
    }

    /// Create an account from a hex-encoded private key, with or without "0x"
    pub fn from_private_key_hex(hex: &str) -> Result<Self, SdkError> {
        let hex = hex.strip_prefix("0x").unwrap_or(hex);
        let mut bytes =
            hex::decode(hex).map_err(|e| SdkError::InvalidPrivateKey(e.to_string()))?;
        if bytes.len() != 32 {
            let len = bytes.len();
            bytes.zeroize();
            return Err(SdkError::InvalidPrivateKey(format!(
                "Expected 32 bytes, got {}",
                len
            )));
        }

        let mut key = [0u8; 32];
        key.copy_from_slice(&bytes);
        bytes.zeroize();

        let result = Self::from_private_key(&key);
        key.zeroize();
        result
    }

    /// The account's address
    pub fn address(&self) -> &Address {
        &self.address
    }

    /// The account's public key
    pub fn public_key(&self) -> &PublicKey {
        self.private_key.verifying_key()
    }

    /// Uncompressed public key bytes
    pub fn public_key_bytes(&self) -> [u8; PUBLIC_KEY_LEN] {
        public_key_to_bytes(self.public_key())
    }

    /// Sign a 32-byte digest
    pub fn sign_hash(&self, hash: &H256) -> Result<Signature, SdkError> {
        sign(hash, &self.private_key).map_err(|e| SdkError::SigningFailed(e.to_string()))
    }

    /// Sign a free-form message under the ledger's signed-message prefix
    pub fn sign_message(&self, message: &[u8]) -> Result<Signature, SdkError> {
        self.sign_hash(&hash_message(message))
    }

    /// Sign an action body
    pub fn seal(&self, core: ActionCore) -> Result<SealedAction, SdkError> {
        SealedAction::seal(core, &self.private_key)
            .map_err(|e| SdkError::SigningFailed(e.to_string()))
    }
}

impl std::fmt::Debug for Account {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Account")
            .field("address", &self.address)
            .finish_non_exhaustive()
    }
}

/// Address that signed `message` with [`Account::sign_message`]
pub fn recover_message_signer(message: &[u8], signature: &Signature) -> Result<Address, SdkError> {
    let public_key = recover_public_key(&hash_message(message), signature)?;
    Ok(public_key_to_address(&public_key))
}

#[cfg(test)]
mod tests {
    use super::*;

    const KEY: &str = "0806c458b262edd333a191e92f561aff338211ee3e18ab315a074a2d82aa343f";
    const ADDRESS: &str = "io187wzp08vnhjjpkydnr97qlh8kh0dpkkytfam8j";

    #[test]
    fn test_account_random() {
        let account = Account::new_random();
        assert_ne!(account.address(), &Address::ZERO);
    }

    #[test]
    fn test_account_from_hex() {
        let account = Account::from_private_key_hex(KEY).unwrap();
        assert_eq!(account.address().to_string(), ADDRESS);
        assert_eq!(
            hex::encode(account.public_key_bytes()),
            "044e18306ae9ef4ec9d07bf6e705442d4d1a75e6cdf750330ca2d880f2cc54607c9c33deb9eae9c06e06e04fe9ce3d43962cc67d5aa34fbeb71270d4bad3d648d9"
        );
    }

    #[test]
    fn test_account_from_hex_with_prefix() {
        let account = Account::from_private_key_hex(&format!("0x{}", KEY)).unwrap();
        assert_eq!(account.address().to_string(), ADDRESS);
    }

    #[test]
    fn test_account_invalid_hex_length() {
        let result = Account::from_private_key_hex("0x1234");
        assert!(matches!(result, Err(SdkError::InvalidPrivateKey(_))));
    }

    #[test]
    fn test_account_invalid_hex_chars() {
        let result = Account::from_private_key_hex("zz");
        assert!(matches!(result, Err(SdkError::InvalidPrivateKey(_))));
    }

    #[test]
    fn test_zero_key_rejected() {
        assert!(Account::from_private_key(&[0u8; 32]).is_err());
    }

    #[test]
    fn test_sign_message_known_vector() {
        let account = Account::from_private_key_hex(KEY).unwrap();
        let signature = account.sign_message(b"hello").unwrap();
        assert_eq!(
            signature.to_hex(),
            "f09c729cc8617aeda344defba6c0eb0eb3ee71732e26f22d1a9fac5beeaa86da3a368417e31779b44e3df4440dfec89a9ecb40567b60228efb67c79672288cef01"
        );
        let signer = recover_message_signer(b"hello", &signature).unwrap();
        assert_eq!(&signer, account.address());
    }

    #[test]
    fn test_account_determinism() {
        let key = [0x42u8; 32];
        let a = Account::from_private_key(&key).unwrap();
        let b = Account::from_private_key(&key).unwrap();
        assert_eq!(a.address(), b.address());
    }

    #[test]
    fn test_account_debug_hides_key() {
        let account = Account::from_private_key_hex(KEY).unwrap();
        let debug = format!("{:?}", account);
        assert!(debug.contains("Account"));
        assert!(debug.contains(ADDRESS));
        assert!(!debug.contains("private_key"));
        assert!(!debug.contains(KEY));
    }
}
