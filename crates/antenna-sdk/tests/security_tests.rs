//! Security tests for antenna-sdk
//!
//! Key material must not leak through Debug output or error messages.

use std::sync::Arc;

use antenna_sdk::{Account, AuthedClient, ReadOnlyClient, SdkError};

const KEY: &str = "0806c458b262edd333a191e92f561aff338211ee3e18ab315a074a2d82aa343f";

// ==================== Private Key Safety Tests ====================

#[test]
fn test_private_key_not_in_debug() {
    let account = Account::new_random();
    let debug_str = format!("{:?}", account);
    assert!(!debug_str.to_lowercase().contains("private"));
    assert!(debug_str.contains("address"));
}

#[test]
fn test_private_key_bytes_not_in_debug() {
    let account = Account::from_private_key_hex(KEY).unwrap();
    let debug_str = format!("{:?}", account);
    assert!(!debug_str.contains("0806c4"));
}

#[test]
fn test_client_and_callers_do_not_print_key() {
    let account = Arc::new(Account::from_private_key_hex(KEY).unwrap());
    let client = AuthedClient::new(ReadOnlyClient::new_mock(), account);
    let caller = client.transfer("io187wzp08vnhjjpkydnr97qlh8kh0dpkkytfam8j", 1);

    for debug_str in [format!("{:?}", client), format!("{:?}", caller)] {
        assert!(!debug_str.contains("0806c4"));
        assert!(!debug_str.to_lowercase().contains("private"));
    }
}

// ==================== Error Message Security Tests ====================

#[test]
fn test_invalid_key_error_no_leak() {
    let bad_key = "sensitive_secret_key_data";
    let err = Account::from_private_key_hex(bad_key).unwrap_err();
    let error_msg = err.to_string();
    assert!(!error_msg.contains("sensitive"));
    assert!(!error_msg.contains("secret"));
}

#[test]
fn test_short_key_error_no_leak() {
    let err = Account::from_private_key_hex(&KEY[..62]).unwrap_err();
    assert!(matches!(err, SdkError::InvalidPrivateKey(_)));
    assert!(!err.to_string().contains(&KEY[..16]));
    assert!(!format!("{:?}", err).contains(&KEY[..16]));
}

#[test]
fn test_out_of_range_key_rejected() {
    // the curve order itself is not a valid scalar
    let order = "fffffffffffffffffffffffffffffffebaaedce6af48a03bbfd25e8cd0364141";
    let err = Account::from_private_key_hex(order).unwrap_err();
    assert!(matches!(err, SdkError::InvalidPrivateKey(_)));
    assert!(!err.to_string().contains(order));
}

// ==================== Ownership Tests ====================

#[test]
fn test_account_shared_not_duplicated() {
    let account = Arc::new(Account::new_random());
    let client = AuthedClient::new(ReadOnlyClient::new_mock(), Arc::clone(&account));
    let _caller = client.staking().unstake(1);
    assert!(Arc::ptr_eq(client.account(), &account));
    // client, caller core and the local handle
    assert_eq!(Arc::strong_count(&account), 3);
}
