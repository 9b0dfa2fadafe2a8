//! Unit tests for domain error types

use crate::errors::{DomainError, SessionError, StoreError, TokenError};
use gate_shared::errors::codes;

#[test]
fn test_codes_follow_wire_table() {
    assert_eq!(DomainError::from(SessionError::NoToken).code(), 50000);
    assert_eq!(DomainError::from(TokenError::InvalidToken).code(), 50008);
    assert_eq!(
        DomainError::from(SessionError::SessionInvalidated {
            reason: "blacklisted".to_string()
        })
        .code(),
        50010
    );
    assert_eq!(DomainError::from(SessionError::SessionExpired).code(), 50014);
}

#[test]
fn test_store_failures_are_server_faults() {
    let timeout = DomainError::from(StoreError::Timeout { millis: 500 });
    assert_eq!(timeout.code(), codes::STORE_UNAVAILABLE);
    assert!(timeout.is_server_fault());

    let denied = DomainError::from(SessionError::SessionExpired);
    assert!(!denied.is_server_fault());
}

#[test]
fn test_error_messages() {
    let error = SessionError::AlreadyLoggedIn {
        username: "admin".to_string(),
    };
    assert_eq!(error.to_string(), "admin is already logged in");

    let error = DomainError::from(StoreError::Timeout { millis: 250 });
    assert_eq!(error.to_string(), "Store operation timed out after 250ms");
}
