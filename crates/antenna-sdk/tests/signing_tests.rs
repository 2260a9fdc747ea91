//! Signing tests for antenna-sdk
//!
//! Known-answer vectors for action sealing and message signing, checked
//! end to end through a client and a mock service.

use std::sync::Arc;

use antenna_crypto::verify;
use antenna_sdk::transport::methods;
use antenna_sdk::{
    recover_message_signer, Account, ActionPayload, AuthedClient, ClientConfig, MockTransport,
    ReadOnlyClient, SealedAction, H256,
};

const KEY: &str = "0806c458b262edd333a191e92f561aff338211ee3e18ab315a074a2d82aa343f";
const ADDRESS: &str = "io187wzp08vnhjjpkydnr97qlh8kh0dpkkytfam8j";
const CORE_HASH: &str = "0f17cd7f43bdbeff73dfe8f5cb0c0045f2990884e5050841de887cf22ca35b50";
const SIGNATURE: &str = "555cc8af4181bf85c044c3201462eeeb95374f78aa48c67b87510ee63d5e502372e53082f03e9a11c1e351de539cedf85d8dff87de9d003cb9f92243541541a000";
const SEALED_HASH: &str = "6c84ac119058e859a015221f87a4e187c393d0c6ee283959342eac95fad08c33";

fn client(transport: &MockTransport) -> AuthedClient {
    let account = Account::from_private_key_hex(KEY).unwrap();
    AuthedClient::new(
        ReadOnlyClient::with_transport(transport.clone(), ClientConfig::default()),
        Arc::new(account),
    )
}

fn sent_action(transport: &MockTransport) -> SealedAction {
    let call = transport
        .calls()
        .into_iter()
        .find(|c| c.method == methods::SEND_ACTION)
        .unwrap();
    let bytes = hex::decode(call.params[0].as_str().unwrap()).unwrap();
    SealedAction::from_bytes(&bytes).unwrap()
}

// ==================== Golden Vector ====================

#[tokio::test]
async fn test_transfer_golden_vector() {
    let transport = MockTransport::new();
    let client = client(&transport);

    let hash = client
        .transfer(ADDRESS, 456)
        .set_payload(b"hello world!")
        .set_nonce(123)
        .set_gas_limit(888)
        .set_gas_price(999u64)
        .call()
        .await
        .unwrap();

    assert_eq!(transport.methods_called(), vec![methods::SEND_ACTION]);

    let sealed = sent_action(&transport);
    assert_eq!(sealed.core().hash(), H256::from_hex(CORE_HASH).unwrap());
    assert_eq!(sealed.signature().to_hex(), SIGNATURE);
    assert_eq!(hash.encode_hex(), SEALED_HASH);
    assert_eq!(sealed.hash(), hash);
    assert!(sealed.verify());
    assert_eq!(sealed.sender_address().unwrap().to_string(), ADDRESS);
}

#[tokio::test]
async fn test_signature_covers_body_only() {
    let transport = MockTransport::new();
    let client = client(&transport);
    client
        .transfer(ADDRESS, 456)
        .set_payload(b"hello world!")
        .set_nonce(123)
        .set_gas_limit(888)
        .set_gas_price(999u64)
        .call()
        .await
        .unwrap();

    let sealed = sent_action(&transport);
    let public_key = client.account().public_key();
    assert!(verify(&sealed.core().hash(), sealed.signature(), public_key).unwrap());
    assert!(!verify(&sealed.hash(), sealed.signature(), public_key).unwrap());
}

#[tokio::test]
async fn test_payload_is_copied_into_transfer() {
    let transport = MockTransport::new();
    let client = client(&transport);
    let mut blob = b"hello world!".to_vec();
    let caller = client
        .transfer(ADDRESS, 1)
        .set_payload(&blob)
        .set_nonce(1)
        .set_gas_limit(1)
        .set_gas_price(1u64);
    blob[0] = b'j';
    caller.call().await.unwrap();

    match &sent_action(&transport).core().payload {
        ActionPayload::Transfer(t) => assert_eq!(t.payload.as_ref(), b"hello world!"),
        other => panic!("unexpected payload {:?}", other),
    }
}

// ==================== Message Signing ====================

#[test]
fn test_sign_message_vector() {
    let account = Account::from_private_key_hex(KEY).unwrap();
    let signature = account.sign_message(b"hello").unwrap();
    assert_eq!(
        signature.to_hex(),
        "f09c729cc8617aeda344defba6c0eb0eb3ee71732e26f22d1a9fac5beeaa86da3a368417e31779b44e3df4440dfec89a9ecb40567b60228efb67c79672288cef01"
    );
}

#[test]
fn test_recover_message_signer() {
    let account = Account::new_random();
    let signature = account.sign_message(b"antenna").unwrap();
    assert_eq!(
        &recover_message_signer(b"antenna", &signature).unwrap(),
        account.address()
    );
    assert_ne!(
        &recover_message_signer(b"other", &signature).unwrap(),
        account.address()
    );
}

#[test]
fn test_signatures_are_low_s() {
    let account = Account::new_random();
    for i in 0..32u8 {
        let signature = account.sign_hash(&H256::from_bytes([i; 32])).unwrap();
        assert!(signature.is_low_s());
        assert!(signature.v <= 1);
    }
}
