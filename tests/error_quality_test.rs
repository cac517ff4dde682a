//! Error message quality tests
//!
//! Tests that verify errors surface enough context to act on.

use truenas_bridge::error::BridgeError;

#[test]
fn test_api_error_names_the_appliance() {
    // Given: An API-level failure
    let err = BridgeError::TrueNasApi("pool.query failed".to_string());

    // Then: The message carries the source and the reason
    let msg = format!("{}", err);
    assert!(msg.contains("TrueNAS API error"));
    assert!(msg.contains("pool.query failed"));
}

#[test]
fn test_auth_error_is_identifiable() {
    // Given: An authentication failure
    let err = BridgeError::Auth("credentials rejected".to_string());

    // Then: The message states authentication failed
    let msg = format!("{}", err);
    assert!(msg.contains("Authentication failed"));
    assert!(msg.contains("credentials rejected"));
}

#[test]
fn test_json_error_converts_via_from() {
    // Given: A serde_json failure
    let json_err = serde_json::from_str::<serde_json::Value>("{not json").unwrap_err();

    // When: Converting through the From impl
    let err: BridgeError = json_err.into();

    // Then: The variant and prefix survive
    assert!(matches!(err, BridgeError::Json(_)));
    assert!(format!("{}", err).contains("JSON error"));
}

#[test]
fn test_io_error_converts_via_from() {
    // Given: An IO failure
    let io_err = std::io::Error::new(std::io::ErrorKind::ConnectionRefused, "refused");

    // When: Converting through the From impl
    let err: BridgeError = io_err.into();

    // Then: The variant and message survive
    assert!(matches!(err, BridgeError::Io(_)));
    assert!(format!("{}", err).contains("refused"));
}
