//! Configuration for the token service

use chrono::Duration;
use gate_shared::config::JwtConfig;

use crate::errors::TokenError;

/// Longest accepted expiry or hold window: 100 years
pub const MAX_LIFETIME_SECONDS: i64 = 100 * 365 * 24 * 60 * 60;

/// Configuration for the token service
#[derive(Debug, Clone)]
pub struct TokenServiceConfig {
    /// JWT signing secret
    pub jwt_secret: String,
    /// Fixed `sub` claim
    pub subject: String,
    /// Hard expiration of each issued token
    pub expiry: Duration,
    /// Hold window measured from first issuance
    pub hold_window: Duration,
}

impl Default for TokenServiceConfig {
    fn default() -> Self {
        let jwt = JwtConfig::default();
        Self {
            jwt_secret: jwt.secret,
            subject: jwt.subject,
            expiry: Duration::seconds(jwt.expire_seconds),
            hold_window: Duration::seconds(jwt.hold_seconds),
        }
    }
}

impl TryFrom<&JwtConfig> for TokenServiceConfig {
    type Error = TokenError;

    /// Fails when either lifetime is not positive or exceeds
    /// [`MAX_LIFETIME_SECONDS`]
    fn try_from(config: &JwtConfig) -> Result<Self, Self::Error> {
        Ok(Self {
            jwt_secret: config.secret.clone(),
            subject: config.subject.clone(),
            expiry: lifetime("JWT_EXPIRE_SECONDS", config.expire_seconds)?,
            hold_window: lifetime("JWT_HOLD_SECONDS", config.hold_seconds)?,
        })
    }
}

fn lifetime(name: &str, seconds: i64) -> Result<Duration, TokenError> {
    if seconds <= 0 || seconds > MAX_LIFETIME_SECONDS {
        return Err(TokenError::InvalidConfig {
            message: format!(
                "{} must be between 1 and {}, got {}",
                name, MAX_LIFETIME_SECONDS, seconds
            ),
        });
    }

    Duration::try_seconds(seconds).ok_or_else(|| TokenError::InvalidConfig {
        message: format!("{} is out of range: {}", name, seconds),
    })
}
