//! Unit tests for token service

use chrono::{Duration, Utc};

use crate::domain::entities::identity::Identity;
use crate::errors::{DomainError, SessionError, TokenError};
use crate::services::token::{TokenService, TokenServiceConfig};

fn service() -> TokenService {
    TokenService::new(TokenServiceConfig {
        jwt_secret: "test-secret".to_string(),
        subject: "jwt-gateway".to_string(),
        expiry: Duration::minutes(30),
        hold_window: Duration::days(2),
    })
}

fn admin() -> Identity {
    Identity::new("1", "admin")
}

#[test]
fn test_issue_round_trip() {
    let service = service();
    let issued = service.issue(&admin()).unwrap();

    let session = service.session_claims(&issued.token).unwrap();
    assert_eq!(session.identity, admin());
    assert!(!session.group.is_empty());
    assert_eq!(session, issued.claims);
}

#[test]
fn test_issue_sets_time_boundaries() {
    let service = service();
    let now = Utc::now();
    let issued = service.issue_at(&admin(), now).unwrap();
    let claims = service.decode(&issued.token).unwrap().into_claims();

    assert_eq!(claims.sub, "jwt-gateway");
    assert_eq!(claims.created, Some(now.timestamp_millis()));
    assert_eq!(claims.hold_time, Some((now + Duration::days(2)).timestamp_millis()));
    assert_eq!(claims.exp, (now + Duration::minutes(30)).timestamp());
    assert!(claims.created.unwrap() / 1000 < claims.exp);
}

#[test]
fn test_each_issue_gets_a_fresh_group() {
    let service = service();
    let first = service.issue(&admin()).unwrap();
    let second = service.issue(&admin()).unwrap();

    assert_ne!(first.claims.group, second.claims.group);
}

#[test]
fn test_renew_preserves_hold_boundary() {
    let service = service();
    let original = service.issue_at(&admin(), Utc::now() - Duration::hours(1)).unwrap();

    let renewed = service.renew(&original.token).unwrap();
    assert_eq!(renewed.claims.hold_until, original.claims.hold_until);
    assert_ne!(renewed.claims.group, original.claims.group);
    assert_eq!(renewed.claims.identity, original.claims.identity);

    let again = service.renew(&renewed.token).unwrap();
    assert_eq!(again.claims.hold_until, original.claims.hold_until);
}

#[test]
fn test_renew_accepts_hard_expired_token() {
    let service = service();
    let stale = service.issue_at(&admin(), Utc::now() - Duration::hours(1)).unwrap();
    assert!(service.decode(&stale.token).unwrap().is_expired());

    let renewed = service.renew(&stale.token).unwrap();
    assert!(!service.decode(&renewed.token).unwrap().is_expired());
}

#[test]
fn test_renew_past_hold_is_session_expired() {
    let service = service();
    let stale = service.issue_at(&admin(), Utc::now() - Duration::days(3)).unwrap();

    assert_eq!(
        service.renew(&stale.token),
        Err(DomainError::Session(SessionError::SessionExpired))
    );
}

#[test]
fn test_renew_rejects_forged_token() {
    let issued = service().issue(&admin()).unwrap();
    let other = TokenService::new(TokenServiceConfig {
        jwt_secret: "other".to_string(),
        ..TokenServiceConfig::default()
    });

    assert_eq!(
        other.renew(&issued.token),
        Err(DomainError::Token(TokenError::InvalidToken))
    );
}

#[test]
fn test_predicates() {
    let service = service();
    let now = Utc::now();

    let fresh = service.decode(&service.issue_at(&admin(), now).unwrap().token).unwrap();
    assert!(service.is_within_hold_window(fresh.claims()));
    assert!(!service.is_hard_expired(fresh.claims()));
    assert!(!service.is_renewable(fresh.claims()));

    let stale = service
        .decode(&service.issue_at(&admin(), now - Duration::hours(1)).unwrap().token)
        .unwrap();
    assert!(service.is_hard_expired(stale.claims()));
    assert!(service.is_renewable(stale.claims()));

    let past_hold = service
        .decode(&service.issue_at(&admin(), now - Duration::days(3)).unwrap().token)
        .unwrap();
    assert!(!service.is_within_hold_window(past_hold.claims()));
    assert!(!service.is_renewable(past_hold.claims()));
}

#[test]
fn test_hold_boundary_equal_to_now_is_outside() {
    let service = service();
    let now = Utc::now();
    let issued = service.issue_at(&admin(), now - Duration::days(2)).unwrap();
    let claims = service.decode(&issued.token).unwrap().into_claims();

    assert_eq!(claims.hold_time, Some(now.timestamp_millis()));
    assert!(!claims.is_within_hold_at(now));
    assert!(!TokenService::is_renewable_at(&claims, now));
}

#[test]
fn test_accessors() {
    let service = service();
    let issued = service.issue(&admin()).unwrap();

    assert_eq!(service.identity_id(&issued.token), Some("1".to_string()));
    assert_eq!(service.identity_name(&issued.token), Some("admin".to_string()));
    assert_eq!(service.invalidation_group(&issued.token), Some(issued.claims.group.clone()));
    assert_eq!(service.hold_until(&issued.token), Some(issued.claims.hold_until));

    assert_eq!(service.identity_id("garbage"), None);
    assert_eq!(service.hold_until("garbage"), None);
}
