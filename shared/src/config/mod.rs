//! Configuration module with gateway-specific sub-modules
//!
//! This module organizes configuration into logical areas:
//! - `auth` - token signing, lifetimes and the demo login account
//! - `cache` - session store backend and Redis connection settings
//! - `environment` - environment detection and logging configuration
//! - `gateway` - filter path lists, bearer header and store key formats
//! - `server` - HTTP server binding
//!
//! Every struct can be built from any variable lookup through `from_vars`,
//! `from_env` is the same thing backed by the process environment.

pub mod auth;
pub mod cache;
pub mod environment;
pub mod gateway;
pub mod server;

use serde::{Deserialize, Serialize};
use std::str::FromStr;

pub use auth::{JwtConfig, LoginConfig};
pub use cache::{CacheBackend, CacheConfig};
pub use environment::{Environment, LogFormat, LoggingConfig};
pub use gateway::GatewayConfig;
pub use server::ServerConfig;

/// Complete application configuration combining all sub-configurations
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct AppConfig {
    /// Environment configuration
    pub environment: Environment,

    /// Server configuration
    pub server: ServerConfig,

    /// Token signing configuration
    pub jwt: JwtConfig,

    /// Authorization filter configuration
    pub gateway: GatewayConfig,

    /// Session store configuration
    pub cache: CacheConfig,

    /// Demo login account
    pub login: LoginConfig,

    /// Logging configuration
    #[serde(default)]
    pub logging: LoggingConfig,
}

impl Default for AppConfig {
    fn default() -> Self {
        let env = Environment::default();
        Self {
            environment: env,
            server: ServerConfig::default(),
            jwt: JwtConfig::default(),
            gateway: GatewayConfig::default(),
            cache: CacheConfig::default(),
            login: LoginConfig::default(),
            logging: LoggingConfig::for_environment(env),
        }
    }
}

impl AppConfig {
    /// Load configuration from the process environment
    pub fn from_env() -> Self {
        Self::from_vars(|key| std::env::var(key).ok())
    }

    /// Load configuration from an arbitrary variable lookup
    pub fn from_vars<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let environment = Environment::from_vars(&lookup);
        Self {
            environment,
            server: ServerConfig::from_vars(&lookup),
            jwt: JwtConfig::from_vars(&lookup),
            gateway: GatewayConfig::from_vars(&lookup),
            cache: CacheConfig::from_vars(&lookup),
            login: LoginConfig::from_vars(&lookup),
            logging: LoggingConfig::from_vars(environment, &lookup),
        }
    }
}

/// Parse a variable, falling back to `default` when it is unset or malformed
pub(crate) fn var_or<T, F>(lookup: &F, key: &str, default: T) -> T
where
    T: FromStr,
    F: Fn(&str) -> Option<String>,
{
    lookup(key)
        .and_then(|value| value.trim().parse().ok())
        .unwrap_or(default)
}

/// Read a string variable, falling back to `default` when it is unset
pub(crate) fn string_or<F>(lookup: &F, key: &str, default: &str) -> String
where
    F: Fn(&str) -> Option<String>,
{
    lookup(key).unwrap_or_else(|| default.to_string())
}

/// Read a comma separated list, falling back to `default` when it is unset
pub(crate) fn list_or<F>(lookup: &F, key: &str, default: &[&str]) -> Vec<String>
where
    F: Fn(&str) -> Option<String>,
{
    match lookup(key) {
        Some(raw) => raw
            .split(',')
            .map(str::trim)
            .filter(|item| !item.is_empty())
            .map(String::from)
            .collect(),
        None => default.iter().map(|item| item.to_string()).collect(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup_from(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let vars: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key| vars.get(key).cloned()
    }

    #[test]
    fn test_defaults_when_nothing_is_set() {
        let config = AppConfig::from_vars(|_| None);
        assert_eq!(config.environment, Environment::Development);
        assert_eq!(config.jwt.expire_seconds, 1800);
        assert_eq!(config.jwt.hold_seconds, 172_800);
        assert_eq!(config.gateway.token_header, "Authorization");
        assert_eq!(config.cache.backend, CacheBackend::Redis);
    }

    #[test]
    fn test_overrides_from_lookup() {
        let config = AppConfig::from_vars(lookup_from(&[
            ("ENVIRONMENT", "production"),
            ("JWT_SECRET", "s3cret"),
            ("JWT_HOLD_SECONDS", "60"),
            ("AUTH_SKIP_URIS", "/a, /b ,,"),
            ("CACHE_BACKEND", "memory"),
            ("SERVER_PORT", "9000"),
        ]));

        assert_eq!(config.environment, Environment::Production);
        assert_eq!(config.jwt.secret, "s3cret");
        assert_eq!(config.jwt.hold_seconds, 60);
        assert_eq!(config.gateway.skip_uris, vec!["/a", "/b"]);
        assert_eq!(config.cache.backend, CacheBackend::Memory);
        assert_eq!(config.server.port, 9000);
        assert_eq!(config.logging.format, LogFormat::Json);
    }

    #[test]
    fn test_malformed_numbers_fall_back() {
        let config = AppConfig::from_vars(lookup_from(&[("JWT_EXPIRE_SECONDS", "soon")]));
        assert_eq!(config.jwt.expire_seconds, 1800);
    }
}
