//! # Infrastructure Layer
//!
//! Concrete session store backends for the JWT gateway.
//!
//! ## Architecture
//!
//! - **Cache**: Redis client and the Redis-backed `SessionStore`
//! - [`connect_session_store`] picks the backend named in `CacheConfig`

use std::sync::Arc;

use gate_core::errors::StoreError;
use gate_core::repositories::{InMemorySessionStore, SessionStore};
use gate_shared::config::CacheBackend;

/// Cache module - Redis client and session store
pub mod cache;

/// Configuration module for infrastructure services
pub mod config {
    //! Re-exports of the shared configuration consumed here
    pub use gate_shared::config::{CacheBackend, CacheConfig};
}

use cache::{RedisClient, RedisSessionStore};

/// Build the session store selected by `config.backend`
pub async fn connect_session_store(
    config: &config::CacheConfig,
) -> Result<Arc<dyn SessionStore>, InfrastructureError> {
    match config.backend {
        CacheBackend::Redis => {
            let client = RedisClient::new(config.clone()).await?;
            tracing::info!("Using Redis session store");
            Ok(Arc::new(RedisSessionStore::new(client)))
        }
        CacheBackend::Memory => {
            tracing::warn!("Using in-memory session store; sessions are not shared between instances");
            Ok(Arc::new(InMemorySessionStore::new()))
        }
    }
}

/// Infrastructure-specific error types
#[derive(Debug, thiserror::Error)]
pub enum InfrastructureError {
    /// Redis cache error
    #[error("Cache error: {0}")]
    Cache(#[from] redis::RedisError),

    /// A store round trip exceeded the configured response timeout
    #[error("Cache operation timed out after {millis}ms")]
    Timeout { millis: u64 },

    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(String),
}

impl From<InfrastructureError> for StoreError {
    fn from(error: InfrastructureError) -> Self {
        match error {
            InfrastructureError::Timeout { millis } => StoreError::Timeout { millis },
            other => StoreError::Unavailable {
                message: other.to_string(),
            },
        }
    }
}
