//! Session store configuration module

use serde::{Deserialize, Serialize};
use std::str::FromStr;

use super::{string_or, var_or};

/// Which session store implementation backs the gateway
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum CacheBackend {
    /// Shared Redis instance (required when running more than one gateway)
    Redis,
    /// Process-local store, single instance only
    Memory,
}

impl FromStr for CacheBackend {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "redis" => Ok(CacheBackend::Redis),
            "memory" | "mem" => Ok(CacheBackend::Memory),
            _ => Err(format!("Invalid cache backend: {}", s)),
        }
    }
}

/// Redis cache configuration
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct CacheConfig {
    /// Store implementation
    pub backend: CacheBackend,

    /// Redis connection URL
    pub url: String,

    /// Upper bound for a single store round trip, in milliseconds
    pub response_timeout_ms: u64,

    /// Maximum attempts for a retriable store operation
    pub max_retries: u32,

    /// Base delay between retries in milliseconds (doubles per attempt)
    pub retry_delay_ms: u64,
}

impl Default for CacheConfig {
    fn default() -> Self {
        Self {
            backend: CacheBackend::Redis,
            url: String::from("redis://localhost:6379"),
            response_timeout_ms: 500,
            max_retries: 3,
            retry_delay_ms: 50,
        }
    }
}

impl CacheConfig {
    /// Create a new cache configuration with URL
    pub fn new(url: impl Into<String>) -> Self {
        Self {
            url: url.into(),
            ..Default::default()
        }
    }

    /// Create from a variable lookup
    pub fn from_vars<F>(lookup: &F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let defaults = Self::default();
        Self {
            backend: var_or(lookup, "CACHE_BACKEND", defaults.backend),
            url: string_or(lookup, "REDIS_URL", &defaults.url),
            response_timeout_ms: var_or(
                lookup,
                "REDIS_RESPONSE_TIMEOUT_MS",
                defaults.response_timeout_ms,
            ),
            max_retries: var_or(lookup, "REDIS_MAX_RETRIES", defaults.max_retries),
            retry_delay_ms: var_or(lookup, "REDIS_RETRY_DELAY_MS", defaults.retry_delay_ms),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cache_config_default() {
        let config = CacheConfig::default();
        assert_eq!(config.url, "redis://localhost:6379");
        assert_eq!(config.backend, CacheBackend::Redis);
        assert_eq!(config.response_timeout_ms, 500);
    }

    #[test]
    fn test_backend_parsing() {
        assert_eq!("Redis".parse::<CacheBackend>(), Ok(CacheBackend::Redis));
        assert_eq!("mem".parse::<CacheBackend>(), Ok(CacheBackend::Memory));
        assert!("etcd".parse::<CacheBackend>().is_err());
    }
}
