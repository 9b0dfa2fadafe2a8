//! Application state and factory
//!
//! This module wires the core services over a session store and provides
//! the factory for creating the Actix-web application.

use std::sync::Arc;

use actix_web::{
    body::MessageBody,
    dev::{ServiceFactory, ServiceRequest, ServiceResponse},
    http::header::HeaderName,
    web, App, Error, HttpResponse,
};
use anyhow::Context;
use gate_core::{
    AuthorizationFilter, CredentialVerifier, SessionRegistry, SessionService, SessionServiceConfig,
    SessionStore, StaticCredentials, TokenService, TokenServiceConfig,
};
use gate_shared::config::AppConfig;
use gate_shared::errors::ErrorBody;
use tracing_actix_web::TracingLogger;

use crate::middleware::SessionGuard;
use crate::routes::account::{
    info::get_info, login::login, logout::logout, refresh::refresh, relogin::relogin, AppState,
};
use crate::routes::health::health_check;

/// Session store handle shared by every worker
pub type SharedStore = Arc<dyn SessionStore>;

/// Everything an app instance needs, built once and cloned into each worker
#[derive(Clone)]
pub struct Gateway {
    state: web::Data<AppState>,
    guard: SessionGuard,
}

impl Gateway {
    /// Wire the gateway with the account configured in `config.login`
    pub fn new(config: &AppConfig, store: SharedStore) -> anyhow::Result<Self> {
        let credentials = Arc::new(StaticCredentials::from_config(&config.login));
        Self::with_credentials(config, store, credentials)
    }

    /// Wire the gateway with a custom credential verifier
    pub fn with_credentials(
        config: &AppConfig,
        store: SharedStore,
        credentials: Arc<dyn CredentialVerifier>,
    ) -> anyhow::Result<Self> {
        let token_header = HeaderName::from_bytes(config.gateway.token_header.as_bytes())
            .with_context(|| format!("invalid token header name '{}'", config.gateway.token_header))?;

        let tokens = Arc::new(TokenService::new(
            TokenServiceConfig::try_from(&config.jwt).context("invalid JWT lifetimes")?,
        ));
        let registry = Arc::new(SessionRegistry::new(store.clone(), config.gateway.clone()));
        let sessions = Arc::new(SessionService::new(
            Arc::clone(&tokens),
            Arc::clone(&registry),
            SessionServiceConfig::from(&config.login),
        ));
        let filter = Arc::new(AuthorizationFilter::new(tokens, registry));

        Ok(Self {
            state: web::Data::new(AppState {
                sessions,
                credentials,
                store,
                token_header: token_header.clone(),
            }),
            guard: SessionGuard::new(filter, token_header),
        })
    }

    /// Create and configure the application
    pub fn create_app(
        &self,
    ) -> App<
        impl ServiceFactory<
            ServiceRequest,
            Config = (),
            Response = ServiceResponse<impl MessageBody>,
            Error = Error,
            InitError = (),
        >,
    > {
        App::new()
            .app_data(self.state.clone())
            // Registration order: the guard runs inside the request span
            .wrap(self.guard.clone())
            .wrap(TracingLogger::default())
            .route("/health", web::get().to(health_check))
            .service(
                web::scope("/jwt-client")
                    .route("/login", web::post().to(login))
                    .route("/relogin", web::post().to(relogin))
                    .route("/logout", web::get().to(logout))
                    .route("/token/refresh", web::get().to(refresh))
                    .route("/getInfo", web::get().to(get_info)),
            )
            .default_service(web::route().to(not_found))
    }
}

/// Default 404 handler
async fn not_found() -> HttpResponse {
    HttpResponse::NotFound().json(ErrorBody::new(404, "The requested resource was not found"))
}

#[cfg(test)]
mod tests {
    use super::*;
    use gate_core::InMemorySessionStore;

    fn store() -> SharedStore {
        Arc::new(InMemorySessionStore::new())
    }

    #[test]
    fn test_gateway_builds_with_defaults() {
        assert!(Gateway::new(&AppConfig::default(), store()).is_ok());
    }

    #[test]
    fn test_invalid_lifetimes_fail_at_startup() {
        let mut config = AppConfig::default();
        config.jwt.hold_seconds = 10_000_000_000_000;
        assert!(Gateway::new(&config, store()).is_err());

        let mut config = AppConfig::default();
        config.jwt.expire_seconds = -5;
        assert!(Gateway::new(&config, store()).is_err());
    }

    #[test]
    fn test_invalid_header_name_fails_at_startup() {
        let mut config = AppConfig::default();
        config.gateway.token_header = "bad header".to_string();
        assert!(Gateway::new(&config, store()).is_err());
    }
}
