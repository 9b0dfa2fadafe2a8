//! Credential verification used by the login routes

use async_trait::async_trait;
use constant_time_eq::constant_time_eq;
use gate_shared::config::LoginConfig;

use crate::domain::entities::identity::Identity;
use crate::errors::SessionError;

/// Resolves a username/password pair to an identity
#[async_trait]
pub trait CredentialVerifier: Send + Sync {
    async fn verify(&self, username: &str, password: &str) -> Result<Identity, SessionError>;
}

/// A single account configured at startup
#[derive(Debug, Clone)]
pub struct StaticCredentials {
    identity: Identity,
    password: String,
}

impl StaticCredentials {
    pub fn new(identity: Identity, password: impl Into<String>) -> Self {
        Self {
            identity,
            password: password.into(),
        }
    }

    pub fn from_config(config: &LoginConfig) -> Self {
        Self::new(
            Identity::new(config.id.as_str(), config.username.as_str()),
            config.password.as_str(),
        )
    }
}

#[async_trait]
impl CredentialVerifier for StaticCredentials {
    async fn verify(&self, username: &str, password: &str) -> Result<Identity, SessionError> {
        let name_matches = constant_time_eq(username.as_bytes(), self.identity.name.as_bytes());
        let password_matches = constant_time_eq(password.as_bytes(), self.password.as_bytes());

        if name_matches && password_matches {
            Ok(self.identity.clone())
        } else {
            tracing::info!(username = %username, "Rejected login credentials");
            Err(SessionError::InvalidCredentials)
        }
    }
}
