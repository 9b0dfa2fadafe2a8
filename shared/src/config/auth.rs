//! Token signing and login account configuration

use serde::{Deserialize, Serialize};

use super::{string_or, var_or};

const DEFAULT_SECRET: &str = "development-secret-please-change-in-production";

/// JWT signing and lifetime configuration
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct JwtConfig {
    /// Shared HMAC secret used to sign and verify every token
    pub secret: String,

    /// Fixed `sub` claim carried by all tokens
    pub subject: String,

    /// Hard expiration of a token's signature, in seconds
    pub expire_seconds: i64,

    /// Length of the hold window (sliding refresh bound), in seconds
    pub hold_seconds: i64,
}

impl Default for JwtConfig {
    fn default() -> Self {
        Self {
            secret: String::from(DEFAULT_SECRET),
            subject: String::from("jwt-gateway"),
            expire_seconds: 1800,    // 30 minutes
            hold_seconds: 172_800,   // 2 days
        }
    }
}

impl JwtConfig {
    /// Create a new JWT configuration with secret
    pub fn new(secret: impl Into<String>) -> Self {
        Self {
            secret: secret.into(),
            ..Default::default()
        }
    }

    /// Set the hard expiration in seconds
    pub fn with_expire_seconds(mut self, seconds: i64) -> Self {
        self.expire_seconds = seconds;
        self
    }

    /// Set the hold window in seconds
    pub fn with_hold_seconds(mut self, seconds: i64) -> Self {
        self.hold_seconds = seconds;
        self
    }

    /// Check if using default secret (security warning)
    pub fn is_using_default_secret(&self) -> bool {
        self.secret == DEFAULT_SECRET
    }

    /// Create from a variable lookup
    pub fn from_vars<F>(lookup: &F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let defaults = Self::default();
        Self {
            secret: string_or(lookup, "JWT_SECRET", &defaults.secret),
            subject: string_or(lookup, "JWT_SUBJECT", &defaults.subject),
            expire_seconds: var_or(lookup, "JWT_EXPIRE_SECONDS", defaults.expire_seconds),
            hold_seconds: var_or(lookup, "JWT_HOLD_SECONDS", defaults.hold_seconds),
        }
    }
}

/// The single account accepted by the bundled login routes
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct LoginConfig {
    /// Identity id assigned to the account
    pub id: String,

    /// Account username
    pub username: String,

    /// Account password
    pub password: String,

    /// Refuse a fresh login while a session record for the account exists
    #[serde(default)]
    pub reject_if_active: bool,
}

impl Default for LoginConfig {
    fn default() -> Self {
        Self {
            id: String::from("1"),
            username: String::from("admin"),
            password: String::from("admin"),
            reject_if_active: false,
        }
    }
}

impl LoginConfig {
    /// Create from a variable lookup
    pub fn from_vars<F>(lookup: &F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let defaults = Self::default();
        Self {
            id: string_or(lookup, "LOGIN_ID", &defaults.id),
            username: string_or(lookup, "LOGIN_USERNAME", &defaults.username),
            password: string_or(lookup, "LOGIN_PASSWORD", &defaults.password),
            reject_if_active: var_or(lookup, "LOGIN_REJECT_IF_ACTIVE", defaults.reject_if_active),
        }
    }
}
