//! Integration tests for the Redis session store
//!
//! These tests require a running Redis instance to execute.
//! Run with: cargo test -p gate_infra --test redis_integration -- --ignored

use std::sync::Arc;
use std::time::Duration;

use gate_core::{
    AuthDecision, AuthRequest, AuthorizationFilter, Identity, SessionRegistry, SessionService,
    SessionServiceConfig, SessionStore, TokenService, TokenServiceConfig,
};
use gate_infra::cache::{CacheConfig, RedisClient, RedisSessionStore};
use gate_shared::config::GatewayConfig;

fn redis_config() -> CacheConfig {
    CacheConfig::new(std::env::var("REDIS_URL").unwrap_or_else(|_| "redis://localhost:6379".to_string()))
}

async fn store() -> RedisSessionStore {
    let _ = tracing_subscriber::fmt().with_test_writer().try_init();
    RedisSessionStore::new(RedisClient::new(redis_config()).await.unwrap())
}

/// Key prefix unique to one test run
fn prefix(test: &str) -> String {
    format!("test:{}:{}", test, std::process::id())
}

#[tokio::test]
#[ignore] // Requires Redis server
async fn test_redis_connection() {
    let store = store().await;
    assert!(store.ping().await.is_ok());
}

#[tokio::test]
#[ignore] // Requires Redis server
async fn test_millisecond_expiry() {
    let store = store().await;
    let key = format!("{}:expiry", prefix("expiry"));

    store
        .set_with_expiry(&key, "will_expire", Duration::from_millis(300))
        .await
        .unwrap();
    assert!(store.exists(&key).await.unwrap());

    let ttl = store.client().ttl_millis(&key).await.unwrap().unwrap();
    assert!(ttl <= 300);

    tokio::time::sleep(Duration::from_millis(500)).await;
    assert!(!store.exists(&key).await.unwrap());
}

#[tokio::test]
#[ignore] // Requires Redis server
async fn test_hash_and_expire() {
    let store = store().await;
    let hash = format!("{}:token", prefix("hash"));
    let key = format!("{}:session", prefix("hash"));

    store.hash_set(&hash, "1", "t1").await.unwrap();
    assert_eq!(store.hash_get(&hash, "1").await.unwrap(), Some("t1".to_string()));
    assert!(store.hash_delete(&hash, "1").await.unwrap());
    assert_eq!(store.hash_get(&hash, "1").await.unwrap(), None);

    store.set_with_expiry(&key, "admin", Duration::from_secs(5)).await.unwrap();
    assert!(store.expire(&key, Duration::from_secs(60)).await.unwrap());
    assert!(store.client().ttl_millis(&key).await.unwrap().unwrap() > 5_000);
    assert!(store.delete(&key).await.unwrap());
    assert!(!store.expire(&key, Duration::from_secs(60)).await.unwrap());
}

#[tokio::test]
#[ignore] // Requires Redis server
async fn test_single_session_through_redis() {
    let store: Arc<dyn SessionStore> = Arc::new(store().await);
    let run = prefix("session");
    let config = GatewayConfig {
        username_key_format: format!("{}:username:{{}}", run),
        blacklist_key_format: format!("{}:blacklist:{{}}", run),
        token_hash_key: format!("{}:token", run),
        ..GatewayConfig::default()
    };

    let tokens = Arc::new(TokenService::new(TokenServiceConfig::default()));
    let registry = Arc::new(SessionRegistry::new(store.clone(), config));
    let sessions = SessionService::new(tokens.clone(), registry.clone(), SessionServiceConfig::default());
    let filter = AuthorizationFilter::new(tokens, registry);
    let identity = Identity::new("1", "admin");

    let t1 = sessions.login(&identity).await.unwrap();
    let t2 = sessions.login(&identity).await.unwrap();

    let decision = filter.authorize(AuthRequest::new("/jwt-client/getInfo", Some(&t1.token))).await;
    assert!(!decision.is_forwarded());
    let decision = filter.authorize(AuthRequest::new("/jwt-client/getInfo", Some(&t2.token))).await;
    assert_eq!(decision, AuthDecision::Forward);

    sessions.logout(&t2.token).await.unwrap();
    let decision = filter.authorize(AuthRequest::new("/jwt-client/getInfo", Some(&t2.token))).await;
    assert!(!decision.is_forwarded());
}
