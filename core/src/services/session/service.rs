//! Account operations: login, relogin, logout and refresh

use std::sync::Arc;

use gate_shared::config::LoginConfig;

use crate::domain::entities::identity::Identity;
use crate::domain::entities::token::IssuedToken;
use crate::errors::{DomainResult, SessionError};
use crate::repositories::SessionStore;
use crate::services::token::TokenService;

use super::registry::SessionRegistry;

/// Configuration for the session service
#[derive(Debug, Clone, Default)]
pub struct SessionServiceConfig {
    /// Refuse `login` while the identity already has a session record
    pub reject_if_active: bool,
}

impl From<&LoginConfig> for SessionServiceConfig {
    fn from(config: &LoginConfig) -> Self {
        Self {
            reject_if_active: config.reject_if_active,
        }
    }
}

/// Session lifecycle operations invoked by the account routes
pub struct SessionService<S> {
    tokens: Arc<TokenService>,
    registry: Arc<SessionRegistry<S>>,
    config: SessionServiceConfig,
}

impl<S: SessionStore> SessionService<S> {
    pub fn new(
        tokens: Arc<TokenService>,
        registry: Arc<SessionRegistry<S>>,
        config: SessionServiceConfig,
    ) -> Self {
        Self {
            tokens,
            registry,
            config,
        }
    }

    /// Issue a first token for an authenticated identity
    ///
    /// Any session the identity already holds elsewhere is superseded,
    /// unless `reject_if_active` is set.
    pub async fn login(&self, identity: &Identity) -> DomainResult<IssuedToken> {
        if self.config.reject_if_active && self.registry.is_logged_in(&identity.id).await? {
            return Err(SessionError::AlreadyLoggedIn {
                username: identity.name.clone(),
            }
            .into());
        }

        let issued = self.tokens.issue(identity)?;
        self.registry.record_login(&issued).await?;
        Ok(issued)
    }

    /// Replace the identity's session, blacklisting the token presented
    ///
    /// The presented token is only blacklisted when it belongs to the
    /// authenticated identity.
    pub async fn relogin(&self, identity: &Identity, presented: &str) -> DomainResult<IssuedToken> {
        let claims = self.tokens.session_claims(presented)?;

        if claims.identity.id == identity.id {
            let previous = IssuedToken {
                token: presented.to_string(),
                claims,
            };
            self.registry.blacklist(&previous).await?;
        } else {
            tracing::warn!(
                identity_id = %identity.id,
                presented_id = %claims.identity.id,
                "Relogin with another identity's token, not blacklisting it"
            );
        }

        self.registry.record_logout(&identity.id, None).await?;
        let issued = self.tokens.issue(identity)?;
        self.registry.record_login(&issued).await?;
        Ok(issued)
    }

    /// End the session the token belongs to
    pub async fn logout(&self, token: &str) -> DomainResult<Identity> {
        let claims = self.tokens.session_claims(token)?;
        let identity = claims.identity.clone();
        let current = IssuedToken {
            token: token.to_string(),
            claims,
        };

        self.registry.record_logout(&identity.id, Some(&current)).await?;
        Ok(identity)
    }

    /// Explicit refresh: renew, blacklist the old group, extend the session
    ///
    /// Only the identity's active token may be refreshed.
    pub async fn refresh(&self, token: &str) -> DomainResult<IssuedToken> {
        let claims = self.tokens.session_claims(token)?;
        if !self.registry.is_active_token(&claims.identity.id, token).await? {
            return Err(SessionError::SessionInvalidated {
                reason: "session information mismatch".to_string(),
            }
            .into());
        }

        let renewed = self.tokens.renew(token)?;
        let previous = IssuedToken {
            token: token.to_string(),
            claims,
        };

        self.registry.blacklist(&previous).await?;
        self.registry
            .replace_active_token(&renewed.claims.identity.id, &renewed.token)
            .await?;
        self.registry.extend_session(&renewed).await?;

        tracing::info!(
            identity_id = %renewed.claims.identity.id,
            group = %renewed.claims.group,
            "Refreshed token"
        );
        Ok(renewed)
    }

    /// Identity carried by a verified token
    pub fn identity_of(&self, token: &str) -> DomainResult<Identity> {
        Ok(self.tokens.session_claims(token)?.identity)
    }
}
