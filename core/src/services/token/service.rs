//! Main token service implementation

use chrono::{DateTime, Utc};
use uuid::Uuid;

use crate::domain::entities::identity::Identity;
use crate::domain::entities::token::{Claims, DecodedToken, IssuedToken, SessionClaims};
use crate::errors::{DomainError, SessionError, TokenError};

use super::codec::TokenCodec;
use super::config::TokenServiceConfig;

/// Issues, renews and inspects session tokens
#[derive(Debug, Clone)]
pub struct TokenService {
    codec: TokenCodec,
    config: TokenServiceConfig,
}

impl TokenService {
    /// Creates a new token service instance
    pub fn new(config: TokenServiceConfig) -> Self {
        Self {
            codec: TokenCodec::new(&config.jwt_secret),
            config,
        }
    }

    pub fn config(&self) -> &TokenServiceConfig {
        &self.config
    }

    /// Issues a first token for an identity
    ///
    /// The hold window starts now; the invalidation group is fresh.
    pub fn issue(&self, identity: &Identity) -> Result<IssuedToken, DomainError> {
        self.issue_at(identity, Utc::now())
    }

    /// Issues a token as if the current time were `now`
    pub fn issue_at(&self, identity: &Identity, now: DateTime<Utc>) -> Result<IssuedToken, DomainError> {
        let claims = Claims::new(
            self.config.subject.as_str(),
            identity,
            now,
            offset(now, self.config.hold_window)?,
            offset(now, self.config.expiry)?,
            new_group(),
        );
        self.sign(claims)
    }

    /// Renews a token, keeping its original hold boundary
    ///
    /// Hard-expired tokens are accepted. Fails with `SessionExpired` once the
    /// hold window has closed, and `InvalidToken` when the token cannot be
    /// verified or lacks required claims.
    pub fn renew(&self, token: &str) -> Result<IssuedToken, DomainError> {
        self.renew_at(token, Utc::now())
    }

    /// Renews a token as if the current time were `now`
    pub fn renew_at(&self, token: &str, now: DateTime<Utc>) -> Result<IssuedToken, DomainError> {
        let previous = self.codec.decode(token)?.into_claims();
        let session = previous.session().ok_or(TokenError::InvalidToken)?;

        if !previous.is_within_hold_at(now) {
            return Err(SessionError::SessionExpired.into());
        }

        let claims = Claims {
            sub: self.config.subject.clone(),
            created: Some(now.timestamp_millis()),
            group: Some(new_group()),
            exp: offset(now, self.config.expiry)?.timestamp(),
            ..previous
        };

        tracing::debug!(
            identity_id = %session.identity.id,
            previous_group = %session.group,
            "Renewing token"
        );
        self.sign(claims)
    }

    /// Verifies a token; hard-expired tokens remain readable
    pub fn decode(&self, token: &str) -> Result<DecodedToken, TokenError> {
        self.codec.decode(token)
    }

    /// Verifies a token and validates the claims the filter depends on
    pub fn session_claims(&self, token: &str) -> Result<SessionClaims, TokenError> {
        self.codec
            .decode(token)?
            .claims()
            .session()
            .ok_or(TokenError::InvalidToken)
    }

    /// `true` while the current time is strictly before the hold boundary
    pub fn is_within_hold_window(&self, claims: &Claims) -> bool {
        claims.is_within_hold_at(Utc::now())
    }

    /// `true` once `exp` has passed
    pub fn is_hard_expired(&self, claims: &Claims) -> bool {
        claims.is_expired_at(Utc::now())
    }

    /// Whether the filter should renew the token on the way through
    pub fn is_renewable(&self, claims: &Claims) -> bool {
        Self::is_renewable_at(claims, Utc::now())
    }

    /// Hard-expired but still inside the hold window
    pub fn is_renewable_at(claims: &Claims, now: DateTime<Utc>) -> bool {
        claims.is_expired_at(now) && claims.is_within_hold_at(now)
    }

    pub fn identity_id(&self, token: &str) -> Option<String> {
        self.session_claims(token).ok().map(|s| s.identity.id)
    }

    pub fn identity_name(&self, token: &str) -> Option<String> {
        self.session_claims(token).ok().map(|s| s.identity.name)
    }

    pub fn invalidation_group(&self, token: &str) -> Option<String> {
        self.session_claims(token).ok().map(|s| s.group)
    }

    pub fn hold_until(&self, token: &str) -> Option<DateTime<Utc>> {
        self.session_claims(token).ok().map(|s| s.hold_until)
    }

    fn sign(&self, claims: Claims) -> Result<IssuedToken, DomainError> {
        let session = claims.session().ok_or_else(|| DomainError::Internal {
            message: "issued claims are incomplete".to_string(),
        })?;
        let token = self.codec.encode(&claims)?;

        Ok(IssuedToken {
            token,
            claims: session,
        })
    }
}

/// `now + lifetime`, failing instead of overflowing the calendar
fn offset(now: DateTime<Utc>, lifetime: chrono::Duration) -> Result<DateTime<Utc>, TokenError> {
    now.checked_add_signed(lifetime)
        .ok_or_else(|| TokenError::EncodingFailure {
            message: format!("token lifetime of {}s overflows the calendar", lifetime.num_seconds()),
        })
}

fn new_group() -> String {
    Uuid::new_v4().to_string()
}
