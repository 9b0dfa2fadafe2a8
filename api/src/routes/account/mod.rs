//! Account route handlers
//!
//! This module contains the endpoints sitting behind the session guard:
//! - Login and relogin with username/password
//! - Logout
//! - Explicit token refresh
//! - Identity lookup for the current token

pub mod info;
pub mod login;
pub mod logout;
pub mod refresh;
pub mod relogin;

use std::sync::Arc;

use actix_web::{http::header::HeaderName, HttpRequest};
use gate_core::{bearer_token, CredentialVerifier, DomainError, IssuedToken, SessionError, SessionService};

use crate::app::SharedStore;
use crate::dto::TokenResponse;

/// Application state shared by the account routes
pub struct AppState {
    pub sessions: Arc<SessionService<SharedStore>>,
    pub credentials: Arc<dyn CredentialVerifier>,
    pub store: SharedStore,
    /// Header carrying the bearer token, rewritten by the guard on refresh
    pub token_header: HeaderName,
}

impl AppState {
    /// Token presented with the request
    pub fn presented_token(&self, req: &HttpRequest) -> Result<String, DomainError> {
        req.headers()
            .get(&self.token_header)
            .and_then(|value| value.to_str().ok())
            .and_then(bearer_token)
            .map(str::to_owned)
            .ok_or_else(|| SessionError::NoToken.into())
    }
}

impl From<&IssuedToken> for TokenResponse {
    fn from(issued: &IssuedToken) -> Self {
        Self {
            token: issued.token.clone(),
            hold_until: issued.claims.hold_until.timestamp_millis(),
        }
    }
}
