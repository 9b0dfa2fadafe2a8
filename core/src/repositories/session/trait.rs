//! Session store trait: the narrow key-value surface the gateway needs from
//! its shared, TTL-based store.

use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;

use crate::errors::StoreError;

/// Key-value store shared by every gateway instance
///
/// Every call is a network round trip in production and must be bounded by a
/// timeout; a timeout surfaces as [`StoreError::Timeout`], never as a missing
/// key. Writes are last-writer-wins per key.
#[async_trait]
pub trait SessionStore: Send + Sync {
    /// Set a string value that expires after `ttl`
    ///
    /// A zero `ttl` removes the key.
    async fn set_with_expiry(&self, key: &str, value: &str, ttl: Duration) -> Result<(), StoreError>;

    /// Get a string value
    async fn get(&self, key: &str) -> Result<Option<String>, StoreError>;

    /// Delete a key of any type, returning whether it existed
    async fn delete(&self, key: &str) -> Result<bool, StoreError>;

    /// Check whether a key exists
    async fn exists(&self, key: &str) -> Result<bool, StoreError>;

    /// Set one field of a hash
    async fn hash_set(&self, key: &str, field: &str, value: &str) -> Result<(), StoreError>;

    /// Get one field of a hash
    async fn hash_get(&self, key: &str, field: &str) -> Result<Option<String>, StoreError>;

    /// Delete one field of a hash, returning whether it existed
    async fn hash_delete(&self, key: &str, field: &str) -> Result<bool, StoreError>;

    /// Reset the TTL of an existing key, returning whether the key existed
    async fn expire(&self, key: &str, ttl: Duration) -> Result<bool, StoreError>;

    /// Round trip used by health checks
    async fn ping(&self) -> Result<(), StoreError>;
}

#[async_trait]
impl<T> SessionStore for Arc<T>
where
    T: SessionStore + ?Sized,
{
    async fn set_with_expiry(&self, key: &str, value: &str, ttl: Duration) -> Result<(), StoreError> {
        (**self).set_with_expiry(key, value, ttl).await
    }

    async fn get(&self, key: &str) -> Result<Option<String>, StoreError> {
        (**self).get(key).await
    }

    async fn delete(&self, key: &str) -> Result<bool, StoreError> {
        (**self).delete(key).await
    }

    async fn exists(&self, key: &str) -> Result<bool, StoreError> {
        (**self).exists(key).await
    }

    async fn hash_set(&self, key: &str, field: &str, value: &str) -> Result<(), StoreError> {
        (**self).hash_set(key, field, value).await
    }

    async fn hash_get(&self, key: &str, field: &str) -> Result<Option<String>, StoreError> {
        (**self).hash_get(key, field).await
    }

    async fn hash_delete(&self, key: &str, field: &str) -> Result<bool, StoreError> {
        (**self).hash_delete(key, field).await
    }

    async fn expire(&self, key: &str, ttl: Duration) -> Result<bool, StoreError> {
        (**self).expire(key, ttl).await
    }

    async fn ping(&self) -> Result<(), StoreError> {
        (**self).ping().await
    }
}
