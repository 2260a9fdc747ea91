//! Signed actions

use antenna_crypto::{
    keccak256, public_key_from_bytes, public_key_to_address, public_key_to_bytes,
    recover_public_key, sign, verify, PrivateKey, Signature,
};
use antenna_primitives::{Address, H256};
use prost::Message;

use crate::{proto, ActionCore, TypesError};

/// An action body together with the sender's public key and signature.
///
/// The signature covers [`ActionCore::to_bytes`] only. A sealed action is never
/// mutated; rebuild it with [`SealedAction::from_parts`] to get something that
/// [`SealedAction::verify`] will then judge against the new body.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SealedAction {
    core: ActionCore,
    sender_pub_key: Vec<u8>,
    signature: Signature,
}

impl SealedAction {
    /// Sign `core` with `key`
    pub fn seal(core: ActionCore, key: &PrivateKey) -> Result<Self, TypesError> {
        let signature = sign(&core.hash(), key)?;
        Ok(Self {
            core,
            sender_pub_key: public_key_to_bytes(key.verifying_key()).to_vec(),
            signature,
        })
    }

    /// Assemble from already existing parts without checking them
    pub fn from_parts(core: ActionCore, sender_pub_key: Vec<u8>, signature: Signature) -> Self {
        Self {
            core,
            sender_pub_key,
            signature,
        }
    }

    /// Split back into body, key and signature
    pub fn into_parts(self) -> (ActionCore, Vec<u8>, Signature) {
        (self.core, self.sender_pub_key, self.signature)
    }

    /// The signed body
    pub fn core(&self) -> &ActionCore {
        &self.core
    }

    /// Sender public key bytes as carried on the wire
    pub fn sender_pub_key(&self) -> &[u8] {
        &self.sender_pub_key
    }

    /// The signature
    pub fn signature(&self) -> &Signature {
        &self.signature
    }

    /// Address derived from the embedded public key
    pub fn sender_address(&self) -> Result<Address, TypesError> {
        let key = public_key_from_bytes(&self.sender_pub_key)?;
        Ok(public_key_to_address(&key))
    }

    /// Check the signature against the embedded key over the re-encoded body.
    ///
    /// The key recovered from the signature must also equal the embedded key.
    pub fn verify(&self) -> bool {
        let Ok(key) = public_key_from_bytes(&self.sender_pub_key) else {
            return false;
        };
        let digest = self.core.hash();
        if !matches!(verify(&digest, &self.signature, &key), Ok(true)) {
            return false;
        }
        matches!(recover_public_key(&digest, &self.signature), Ok(recovered) if recovered == key)
    }

    /// Wire form
    pub fn to_proto(&self) -> proto::Action {
        proto::Action {
            core: Some(self.core.to_proto()),
            sender_pub_key: self.sender_pub_key.clone(),
            signature: self.signature.to_bytes().to_vec(),
            encoding: 0,
        }
    }

    /// Serialized sealed action
    pub fn to_bytes(&self) -> Vec<u8> {
        self.to_proto().encode_to_vec()
    }

    /// Decode a serialized sealed action; the signature is not checked
    pub fn from_bytes(bytes: &[u8]) -> Result<Self, TypesError> {
        let action = proto::Action::decode(bytes)?;
        let core = action.core.ok_or(TypesError::MissingCore)?.try_into()?;
        let signature = Signature::from_slice(&action.signature)?;
        Ok(Self {
            core,
            sender_pub_key: action.sender_pub_key,
            signature,
        })
    }

    /// Action hash as reported by the ledger: Keccak-256 of the serialized sealed action
    pub fn hash(&self) -> H256 {
        keccak256(&self.to_bytes())
    }
}
