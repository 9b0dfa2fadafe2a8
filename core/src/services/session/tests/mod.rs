
use std::sync::Arc;

use chrono::Duration;
use gate_shared::config::GatewayConfig;

use crate::repositories::InMemorySessionStore;
use crate::services::session::SessionRegistry;
use crate::services::token::{TokenService, TokenServiceConfig};

pub(super) fn token_service() -> Arc<TokenService> {
    Arc::new(TokenService::new(TokenServiceConfig {
        jwt_secret: "test-secret".to_string(),
        subject: "jwt-gateway".to_string(),
        expiry: Duration::minutes(30),
        hold_window: Duration::days(2),
    }))
}

pub(super) fn registry() -> (Arc<InMemorySessionStore>, Arc<SessionRegistry<Arc<InMemorySessionStore>>>) {
    let store = Arc::new(InMemorySessionStore::new());
    let registry = Arc::new(SessionRegistry::new(store.clone(), GatewayConfig::default()));
    (store, registry)
}
