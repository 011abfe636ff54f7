//! Integration tests for extracting OpenStack credentials from secrets
//!
//! These tests verify that extraction accepts complete secrets verbatim and
//! rejects secrets with missing or empty mandatory keys.

use std::collections::BTreeMap;

use k8s_openapi::api::core::v1::Secret;
use k8s_openapi::ByteString;
use openstack_credentials::openstack::{
    AUTH_URL, DOMAIN_NAME, PASSWORD, TENANT_ID, TENANT_NAME, USER_NAME,
};
use openstack_credentials::{extract_credentials, Error};

const MANDATORY_KEYS: [&str; 5] = [DOMAIN_NAME, TENANT_NAME, TENANT_ID, USER_NAME, PASSWORD];

// ============================================================================
// Test Helpers
// ============================================================================

fn valid_data() -> BTreeMap<String, ByteString> {
    [
        (DOMAIN_NAME, "Default"),
        (TENANT_NAME, "shoot-project"),
        (TENANT_ID, "8f1c2d3e4a5b6c7d"),
        (USER_NAME, "gardener-technical-user"),
        (PASSWORD, "pa55-w0rd!"),
    ]
    .into_iter()
    .map(|(k, v)| (k.to_string(), ByteString(v.as_bytes().to_vec())))
    .collect()
}

fn secret_with(data: BTreeMap<String, ByteString>) -> Secret {
    Secret {
        data: Some(data),
        ..Default::default()
    }
}

// ============================================================================
// Successful Extraction Tests
// ============================================================================

#[test]
fn complete_secret_extracts_values_verbatim() {
    let creds = extract_credentials(&secret_with(valid_data())).unwrap();

    assert_eq!(creds.domain_name(), "Default");
    assert_eq!(creds.tenant_name(), "shoot-project");
    assert_eq!(creds.tenant_id(), "8f1c2d3e4a5b6c7d");
    assert_eq!(creds.username(), "gardener-technical-user");
    assert_eq!(creds.password(), "pa55-w0rd!");
}

#[test]
fn missing_auth_url_defaults_to_empty() {
    let creds = extract_credentials(&secret_with(valid_data())).unwrap();
    assert_eq!(creds.auth_url(), "");
}

#[test]
fn auth_url_is_taken_when_present() {
    let mut data = valid_data();
    data.insert(
        AUTH_URL.to_string(),
        ByteString(b"https://example.com/v3".to_vec()),
    );

    let creds = extract_credentials(&secret_with(data)).unwrap();
    assert_eq!(creds.auth_url(), "https://example.com/v3");
}

#[test]
fn empty_auth_url_is_accepted() {
    let mut data = valid_data();
    data.insert(AUTH_URL.to_string(), ByteString(Vec::new()));

    let creds = extract_credentials(&secret_with(data)).unwrap();
    assert_eq!(creds.auth_url(), "");
}

#[test]
fn non_utf8_auth_url_is_converted_lossily() {
    let mut data = valid_data();
    data.insert(AUTH_URL.to_string(), ByteString(vec![0x68, 0xff]));

    let creds = extract_credentials(&secret_with(data)).unwrap();
    assert_eq!(creds.auth_url(), "h\u{FFFD}");
}

#[test]
fn unrelated_keys_are_ignored() {
    let mut data = valid_data();
    data.insert("region".to_string(), ByteString(b"eu-de-1".to_vec()));

    assert!(extract_credentials(&secret_with(data)).is_ok());
}

// ============================================================================
// Failure Tests
// ============================================================================

#[test]
fn secret_without_data_fails() {
    let result = extract_credentials(&Secret::default());

    assert!(matches!(result, Err(Error::MissingData)));
    assert_eq!(
        result.unwrap_err().to_string(),
        "secret does not contain any data"
    );
}

#[test]
fn each_missing_mandatory_key_is_reported() {
    for key in MANDATORY_KEYS {
        let mut data = valid_data();
        data.remove(key);

        match extract_credentials(&secret_with(data)) {
            Err(Error::MissingKey(reported)) => assert_eq!(reported, key),
            other => panic!("expected missing key {}, got {:?}", key, other),
        }
    }
}

#[test]
fn each_empty_mandatory_value_is_reported() {
    for key in MANDATORY_KEYS {
        let mut data = valid_data();
        data.insert(key.to_string(), ByteString(Vec::new()));

        let err = extract_credentials(&secret_with(data)).unwrap_err();
        assert!(matches!(err, Error::EmptyValue(reported) if reported == key));
        assert_eq!(err.to_string(), format!("key {} may not be empty", key));
    }
}

#[test]
fn first_failing_key_wins() {
    let mut data = valid_data();
    data.remove(TENANT_ID);
    data.insert(PASSWORD.to_string(), ByteString(Vec::new()));

    assert!(matches!(
        extract_credentials(&secret_with(data)),
        Err(Error::MissingKey(TENANT_ID))
    ));
}

#[test]
fn missing_key_error_does_not_leak_secret_values() {
    let mut data = valid_data();
    data.remove(DOMAIN_NAME);

    let message = extract_credentials(&secret_with(data))
        .unwrap_err()
        .to_string();

    assert!(message.contains(DOMAIN_NAME));
    assert!(!message.contains("pa55-w0rd!"));
    assert!(!message.contains("gardener-technical-user"));
}

#[test]
fn non_utf8_mandatory_value_fails() {
    let mut data = valid_data();
    data.insert(USER_NAME.to_string(), ByteString(vec![0xc3, 0x28]));

    assert!(matches!(
        extract_credentials(&secret_with(data)),
        Err(Error::InvalidUtf8(USER_NAME))
    ));
}

#[test]
fn data_errors_are_classified() {
    let err = extract_credentials(&Secret::default()).unwrap_err();
    assert!(err.is_data_error());
    assert_eq!(err.kind(), "missing_data");
}
