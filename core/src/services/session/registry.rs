//! Distributed session bookkeeping
//!
//! Three independent record types live in the shared store:
//! - session record `username_key_format(id)` = display name, TTL to the hold boundary
//! - active-token map `token_hash_key`, field id = the only accepted token
//! - blacklist entry `blacklist_key_format(group)` = superseded token, TTL to its hold boundary
//!
//! Writes are sequential and not atomic across keys. Every key's TTL derives
//! from the same hold boundary, so partial application is bounded by one
//! round trip.

use std::time::Duration;

use chrono::Utc;
use gate_shared::config::GatewayConfig;

use crate::domain::entities::token::IssuedToken;
use crate::errors::StoreError;
use crate::repositories::SessionStore;

/// Session registry over a [`SessionStore`]
#[derive(Debug)]
pub struct SessionRegistry<S> {
    store: S,
    config: GatewayConfig,
}

impl<S: SessionStore> SessionRegistry<S> {
    pub fn new(store: S, config: GatewayConfig) -> Self {
        Self { store, config }
    }

    pub fn config(&self) -> &GatewayConfig {
        &self.config
    }

    /// Record `issued` as the one live session for its identity
    ///
    /// Last writer wins: a concurrent login for the same identity may
    /// overwrite this one, and the loser's token then fails
    /// [`is_active_token`](Self::is_active_token).
    pub async fn record_login(&self, issued: &IssuedToken) -> Result<(), StoreError> {
        let identity = &issued.claims.identity;
        let session_key = self.config.session_key(&identity.id);
        let ttl = remaining_hold(issued);

        self.store
            .set_with_expiry(&session_key, &identity.name, ttl)
            .await
            .map_err(log_failure("set_with_expiry", &session_key))?;
        self.replace_active_token(&identity.id, &issued.token).await?;

        tracing::info!(
            identity_id = %identity.id,
            group = %issued.claims.group,
            "Recorded login"
        );
        Ok(())
    }

    /// Remove the identity's session record and active token
    ///
    /// When the current token is known its group is blacklisted as well.
    pub async fn record_logout(
        &self,
        identity_id: &str,
        current: Option<&IssuedToken>,
    ) -> Result<(), StoreError> {
        let session_key = self.config.session_key(identity_id);

        self.store
            .delete(&session_key)
            .await
            .map_err(log_failure("delete", &session_key))?;
        self.store
            .hash_delete(&self.config.token_hash_key, identity_id)
            .await
            .map_err(log_failure("hash_delete", &self.config.token_hash_key))?;

        if let Some(token) = current {
            self.blacklist(token).await?;
        }

        tracing::info!(identity_id = %identity_id, "Recorded logout");
        Ok(())
    }

    /// Blacklist a superseded token's group until its hold boundary
    ///
    /// Returns `false` without writing when the hold window has already
    /// closed.
    pub async fn blacklist(&self, token: &IssuedToken) -> Result<bool, StoreError> {
        let ttl = remaining_hold(token);
        if ttl.is_zero() {
            tracing::debug!(group = %token.claims.group, "Hold window closed, not blacklisting");
            return Ok(false);
        }

        let key = self.config.blacklist_key(&token.claims.group);
        self.store
            .set_with_expiry(&key, &token.token, ttl)
            .await
            .map_err(log_failure("set_with_expiry", &key))?;

        tracing::debug!(group = %token.claims.group, ttl_ms = ttl.as_millis() as u64, "Blacklisted group");
        Ok(true)
    }

    pub async fn is_blacklisted(&self, group: &str) -> Result<bool, StoreError> {
        let key = self.config.blacklist_key(group);
        self.store
            .exists(&key)
            .await
            .map_err(log_failure("exists", &key))
    }

    /// Whether `token` is the one the active-token map holds for the identity
    pub async fn is_active_token(&self, identity_id: &str, token: &str) -> Result<bool, StoreError> {
        let active = self
            .store
            .hash_get(&self.config.token_hash_key, identity_id)
            .await
            .map_err(log_failure("hash_get", &self.config.token_hash_key))?;

        Ok(active.as_deref() == Some(token))
    }

    pub async fn replace_active_token(&self, identity_id: &str, token: &str) -> Result<(), StoreError> {
        self.store
            .hash_set(&self.config.token_hash_key, identity_id, token)
            .await
            .map_err(log_failure("hash_set", &self.config.token_hash_key))
    }

    /// Reset the session record TTL to the token's hold boundary
    pub async fn extend_session(&self, issued: &IssuedToken) -> Result<bool, StoreError> {
        let key = self.config.session_key(&issued.claims.identity.id);
        self.store
            .expire(&key, remaining_hold(issued))
            .await
            .map_err(log_failure("expire", &key))
    }

    /// Whether a session record exists for the identity
    pub async fn is_logged_in(&self, identity_id: &str) -> Result<bool, StoreError> {
        let key = self.config.session_key(identity_id);
        self.store
            .exists(&key)
            .await
            .map_err(log_failure("exists", &key))
    }
}

fn remaining_hold(token: &IssuedToken) -> Duration {
    token.claims.remaining_hold(Utc::now()).unwrap_or(Duration::ZERO)
}

fn log_failure<'a>(operation: &'static str, key: &'a str) -> impl FnOnce(StoreError) -> StoreError + 'a {
    move |error| {
        tracing::error!(operation, key = %key, error = %error, "Session store call failed");
        error
    }
}
