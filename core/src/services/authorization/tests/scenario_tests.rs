//! End-to-end session scenarios through the authorization filter

use chrono::{Duration, Utc};

use crate::repositories::SessionStore;
use crate::services::authorization::{AuthDecision, AuthRequest, RejectionKind};

use super::{admin, Harness, PROTECTED};

#[tokio::test]
async fn test_second_login_invalidates_first_token() {
    let h = Harness::new();

    let t1 = h.sessions.login(&admin()).await.unwrap();
    let decision = h.filter.authorize(AuthRequest::new(PROTECTED, Some(&t1.token))).await;
    assert_eq!(decision, AuthDecision::Forward);

    let t2 = h.sessions.login(&admin()).await.unwrap();

    let decision = h.filter.authorize(AuthRequest::new(PROTECTED, Some(&t1.token))).await;
    assert_eq!(
        decision.rejection().map(|r| r.kind),
        Some(RejectionKind::SessionInvalidated)
    );

    let decision = h.filter.authorize(AuthRequest::new(PROTECTED, Some(&t2.token))).await;
    assert_eq!(decision, AuthDecision::Forward);
}

#[tokio::test]
async fn test_logout_blacklists_token() {
    let h = Harness::new();
    let t1 = h.sessions.login(&admin()).await.unwrap();

    h.sessions.logout(&t1.token).await.unwrap();

    let blacklist_key = format!("jwt:blacklist:{}", t1.claims.group);
    assert!(h.store.exists(&blacklist_key).await.unwrap());

    let decision = h.filter.authorize(AuthRequest::new(PROTECTED, Some(&t1.token))).await;
    let rejection = decision.rejection().unwrap();
    assert_eq!(rejection.kind, RejectionKind::SessionInvalidated);
    assert_eq!(rejection.code(), 50010);
}

#[tokio::test]
async fn test_past_hold_is_expired_regardless_of_signature_expiry() {
    let h = Harness::new();
    let now = Utc::now();

    // Hard-expired as well as past hold
    let stale = h
        .tokens
        .issue_at(&admin(), now - Duration::days(2) - Duration::seconds(1))
        .unwrap();
    h.registry.record_login(&stale).await.unwrap();

    let decision = h.filter.authorize(AuthRequest::new(PROTECTED, Some(&stale.token))).await;
    let rejection = decision.rejection().unwrap();
    assert_eq!(rejection.kind, RejectionKind::SessionExpired);
    assert_eq!(rejection.code(), 50014);
}

#[tokio::test]
async fn test_past_hold_with_unexpired_signature_is_expired() {
    let h = Harness::new();
    let issued = h.sessions.login(&admin()).await.unwrap();
    let after_hold = issued.claims.hold_until + Duration::seconds(1);

    let decision = h
        .filter
        .authorize_at(AuthRequest::new(PROTECTED, Some(&issued.token)), after_hold)
        .await;
    assert_eq!(
        decision.rejection().map(|r| r.kind),
        Some(RejectionKind::SessionExpired)
    );
}

#[tokio::test]
async fn test_bypass_path_without_token() {
    let h = Harness::new();

    for path in ["/jwt-client/login", "/health"] {
        let decision = h.filter.authorize(AuthRequest::new(path, None)).await;
        assert_eq!(decision, AuthDecision::Forward);
    }
}

#[tokio::test]
async fn test_hard_expired_token_is_refreshed_in_flight() {
    let h = Harness::new();
    let stale = h.tokens.issue_at(&admin(), Utc::now() - Duration::hours(1)).unwrap();
    h.registry.record_login(&stale).await.unwrap();

    let decision = h.filter.authorize(AuthRequest::new(PROTECTED, Some(&stale.token))).await;
    let refreshed = match decision {
        AuthDecision::ForwardRefreshed { token } => token,
        other => panic!("expected a refreshed token, got {:?}", other),
    };

    assert_ne!(refreshed, stale.token);
    assert!(h.registry.is_active_token("1", &refreshed).await.unwrap());
    assert!(!h.registry.is_blacklisted(&stale.claims.group).await.unwrap());

    let renewed = h.tokens.session_claims(&refreshed).unwrap();
    assert_eq!(renewed.hold_until, stale.claims.hold_until);
    assert!(!h.tokens.decode(&refreshed).unwrap().is_expired());

    // The refreshed token now passes unchanged
    let decision = h.filter.authorize(AuthRequest::new(PROTECTED, Some(&refreshed))).await;
    assert_eq!(decision, AuthDecision::Forward);
}

#[tokio::test]
async fn test_relogin_from_superseded_token() {
    let h = Harness::new();
    let t1 = h.sessions.login(&admin()).await.unwrap();
    h.sessions.login(&admin()).await.unwrap();

    let decision = h
        .filter
        .authorize(AuthRequest::new("/jwt-client/relogin", Some(&t1.token)))
        .await;
    assert!(decision.is_forwarded());

    let t3 = h.sessions.relogin(&admin(), &t1.token).await.unwrap();

    let decision = h.filter.authorize(AuthRequest::new(PROTECTED, Some(&t3.token))).await;
    assert_eq!(decision, AuthDecision::Forward);
    let decision = h.filter.authorize(AuthRequest::new(PROTECTED, Some(&t1.token))).await;
    assert_eq!(
        decision.rejection().map(|r| r.kind),
        Some(RejectionKind::SessionInvalidated)
    );
}

#[tokio::test]
async fn test_explicit_refresh_invalidates_old_token() {
    let h = Harness::new();
    let t1 = h.sessions.login(&admin()).await.unwrap();

    let t2 = h.sessions.refresh(&t1.token).await.unwrap();

    let decision = h.filter.authorize(AuthRequest::new(PROTECTED, Some(&t2.token))).await;
    assert_eq!(decision, AuthDecision::Forward);
    let decision = h.filter.authorize(AuthRequest::new(PROTECTED, Some(&t1.token))).await;
    assert_eq!(
        decision.rejection().map(|r| r.kind),
        Some(RejectionKind::SessionInvalidated)
    );
}
