//! `SessionStore` backed by Redis

use std::time::Duration;

use async_trait::async_trait;
use gate_core::errors::StoreError;
use gate_core::repositories::SessionStore;

use super::redis_client::RedisClient;

/// Shared session store for multi-instance deployments
#[derive(Clone)]
pub struct RedisSessionStore {
    client: RedisClient,
}

impl RedisSessionStore {
    pub fn new(client: RedisClient) -> Self {
        Self { client }
    }

    pub fn client(&self) -> &RedisClient {
        &self.client
    }
}

#[async_trait]
impl SessionStore for RedisSessionStore {
    async fn set_with_expiry(&self, key: &str, value: &str, ttl: Duration) -> Result<(), StoreError> {
        Ok(self.client.set_with_expiry(key, value, ttl).await?)
    }

    async fn get(&self, key: &str) -> Result<Option<String>, StoreError> {
        Ok(self.client.get(key).await?)
    }

    async fn delete(&self, key: &str) -> Result<bool, StoreError> {
        Ok(self.client.delete(key).await?)
    }

    async fn exists(&self, key: &str) -> Result<bool, StoreError> {
        Ok(self.client.exists(key).await?)
    }

    async fn hash_set(&self, key: &str, field: &str, value: &str) -> Result<(), StoreError> {
        Ok(self.client.hash_set(key, field, value).await?)
    }

    async fn hash_get(&self, key: &str, field: &str) -> Result<Option<String>, StoreError> {
        Ok(self.client.hash_get(key, field).await?)
    }

    async fn hash_delete(&self, key: &str, field: &str) -> Result<bool, StoreError> {
        Ok(self.client.hash_delete(key, field).await?)
    }

    async fn expire(&self, key: &str, ttl: Duration) -> Result<bool, StoreError> {
        Ok(self.client.expire(key, ttl).await?)
    }

    async fn ping(&self) -> Result<(), StoreError> {
        if self.client.health_check().await? {
            Ok(())
        } else {
            Err(StoreError::Unavailable {
                message: "unexpected PING response".to_string(),
            })
        }
    }
}
