mod scenario_tests;

use std::sync::Arc;

use chrono::Duration;
use gate_shared::config::GatewayConfig;

use crate::domain::entities::identity::Identity;
use crate::repositories::InMemorySessionStore;
use crate::services::authorization::AuthorizationFilter;
use crate::services::session::{SessionRegistry, SessionService, SessionServiceConfig};
use crate::services::token::{TokenService, TokenServiceConfig};

pub(super) const PROTECTED: &str = "/jwt-client/getInfo";

type Store = Arc<InMemorySessionStore>;

pub(super) struct Harness {
    pub store: Store,
    pub tokens: Arc<TokenService>,
    pub registry: Arc<SessionRegistry<Store>>,
    pub filter: AuthorizationFilter<Store>,
    pub sessions: SessionService<Store>,
}

impl Harness {
    pub fn new() -> Self {
        let store = Arc::new(InMemorySessionStore::new());
        let tokens = Arc::new(TokenService::new(TokenServiceConfig {
            jwt_secret: "test-secret".to_string(),
            subject: "jwt-gateway".to_string(),
            expiry: Duration::minutes(30),
            hold_window: Duration::days(2),
        }));
        let registry = Arc::new(SessionRegistry::new(store.clone(), GatewayConfig::default()));

        Self {
            filter: AuthorizationFilter::new(tokens.clone(), registry.clone()),
            sessions: SessionService::new(
                tokens.clone(),
                registry.clone(),
                SessionServiceConfig::default(),
            ),
            store,
            tokens,
            registry,
        }
    }
}

pub(super) fn admin() -> Identity {
    Identity::new("1", "admin")
}
