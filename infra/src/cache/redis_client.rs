//! Redis cache client implementation
//!
//! Multiplexed async connection with retry on transient errors and a bounded
//! per-attempt response timeout. Covers the commands the session store
//! needs: strings with millisecond TTLs, hash fields, key expiry and PING.

use redis::{aio::MultiplexedConnection, AsyncCommands, Client, RedisError, RedisResult};
use std::future::Future;
use std::pin::Pin;
use std::time::Duration;
use tokio::time::{sleep, timeout};
use tracing::{debug, error, info, warn};

use crate::config::CacheConfig;
use crate::InfrastructureError;

type RedisFuture<T> = Pin<Box<dyn Future<Output = RedisResult<T>> + Send>>;

/// Redis cache client with retry logic and response timeouts
#[derive(Clone)]
pub struct RedisClient {
    /// Redis multiplexed connection for async operations
    connection: MultiplexedConnection,
    /// Maximum number of attempts for retriable operations
    max_retries: u32,
    /// Base delay between retries (exponential backoff)
    retry_delay_ms: u64,
    /// Upper bound for one round trip
    response_timeout: Duration,
}

impl RedisClient {
    /// Create a new Redis client
    ///
    /// # Example
    /// ```no_run
    /// use gate_infra::cache::{CacheConfig, RedisClient};
    ///
    /// async fn create_client() -> Result<RedisClient, Box<dyn std::error::Error>> {
    ///     let client = RedisClient::new(CacheConfig::new("redis://localhost:6379")).await?;
    ///     Ok(client)
    /// }
    /// ```
    pub async fn new(config: CacheConfig) -> Result<Self, InfrastructureError> {
        info!(url = %mask_url(&config.url), "Creating Redis client");

        // Parse Redis URL and create client
        let client = Client::open(config.url.as_str()).map_err(|e| {
            error!("Failed to parse Redis URL: {}", e);
            InfrastructureError::Config(format!("Invalid Redis URL: {}", e))
        })?;

        let response_timeout = Duration::from_millis(config.response_timeout_ms.max(1));
        let connection = Self::create_connection_with_retry(
            client,
            config.max_retries.max(1),
            config.retry_delay_ms,
            response_timeout,
        )
        .await?;

        info!("Redis client created successfully");

        Ok(Self {
            connection,
            max_retries: config.max_retries.max(1),
            retry_delay_ms: config.retry_delay_ms,
            response_timeout,
        })
    }

    /// Create multiplexed connection with retry logic
    async fn create_connection_with_retry(
        client: Client,
        max_retries: u32,
        retry_delay_ms: u64,
        response_timeout: Duration,
    ) -> Result<MultiplexedConnection, InfrastructureError> {
        let mut attempts = 0;
        let mut delay = retry_delay_ms;

        loop {
            attempts += 1;
            debug!("Attempting to connect to Redis (attempt {})", attempts);

            match timeout(response_timeout, client.get_multiplexed_async_connection()).await {
                Ok(Ok(connection)) => {
                    info!("Successfully connected to Redis");
                    return Ok(connection);
                }
                Ok(Err(e)) if attempts < max_retries => {
                    warn!(
                        "Failed to connect to Redis (attempt {}/{}): {}. Retrying in {}ms...",
                        attempts, max_retries, e, delay
                    );
                    sleep(Duration::from_millis(delay)).await;
                    // Exponential backoff with cap at 5 seconds
                    delay = (delay * 2).min(5000);
                }
                Ok(Err(e)) => {
                    error!("Failed to connect to Redis after {} attempts: {}", attempts, e);
                    return Err(InfrastructureError::Cache(e));
                }
                Err(_) => {
                    error!("Timed out connecting to Redis");
                    return Err(InfrastructureError::Timeout {
                        millis: millis(response_timeout),
                    });
                }
            }
        }
    }

    /// Set a string value with a millisecond TTL (`SET key value PX ttl`)
    ///
    /// A zero TTL deletes the key instead, since Redis rejects `PX 0`.
    pub async fn set_with_expiry(
        &self,
        key: &str,
        value: &str,
        ttl: Duration,
    ) -> Result<(), InfrastructureError> {
        if ttl.is_zero() {
            self.delete(key).await?;
            return Ok(());
        }

        let ttl_ms = millis(ttl).max(1);
        debug!("Setting key '{}' with expiry {}ms", key, ttl_ms);

        self.execute_with_retry("set_with_expiry", key, |mut conn| {
            let key = key.to_string();
            let value = value.to_string();

            Box::pin(async move {
                redis::cmd("SET")
                    .arg(key)
                    .arg(value)
                    .arg("PX")
                    .arg(ttl_ms)
                    .query_async::<_, ()>(&mut conn)
                    .await
            })
        })
        .await
    }

    /// Get a string value
    pub async fn get(&self, key: &str) -> Result<Option<String>, InfrastructureError> {
        self.execute_with_retry("get", key, |mut conn| {
            let key = key.to_string();
            Box::pin(async move { conn.get::<_, Option<String>>(key).await })
        })
        .await
    }

    /// Delete a key, returning whether it existed
    pub async fn delete(&self, key: &str) -> Result<bool, InfrastructureError> {
        let deleted = self
            .execute_with_retry("delete", key, |mut conn| {
                let key = key.to_string();
                Box::pin(async move { conn.del::<_, u32>(key).await })
            })
            .await?;

        Ok(deleted > 0)
    }

    /// Check if a key exists
    pub async fn exists(&self, key: &str) -> Result<bool, InfrastructureError> {
        self.execute_with_retry("exists", key, |mut conn| {
            let key = key.to_string();
            Box::pin(async move { conn.exists::<_, bool>(key).await })
        })
        .await
    }

    /// Set a hash field
    pub async fn hash_set(&self, key: &str, field: &str, value: &str) -> Result<(), InfrastructureError> {
        self.execute_with_retry("hash_set", key, |mut conn| {
            let key = key.to_string();
            let field = field.to_string();
            let value = value.to_string();
            Box::pin(async move { conn.hset::<_, _, _, ()>(key, field, value).await })
        })
        .await
    }

    /// Get a hash field
    pub async fn hash_get(&self, key: &str, field: &str) -> Result<Option<String>, InfrastructureError> {
        self.execute_with_retry("hash_get", key, |mut conn| {
            let key = key.to_string();
            let field = field.to_string();
            Box::pin(async move { conn.hget::<_, _, Option<String>>(key, field).await })
        })
        .await
    }

    /// Delete a hash field, returning whether it existed
    pub async fn hash_delete(&self, key: &str, field: &str) -> Result<bool, InfrastructureError> {
        let removed = self
            .execute_with_retry("hash_delete", key, |mut conn| {
                let key = key.to_string();
                let field = field.to_string();
                Box::pin(async move { conn.hdel::<_, _, u32>(key, field).await })
            })
            .await?;

        Ok(removed > 0)
    }

    /// Reset a key's TTL (`PEXPIRE`), returning whether the key existed
    pub async fn expire(&self, key: &str, ttl: Duration) -> Result<bool, InfrastructureError> {
        if ttl.is_zero() {
            return self.delete(key).await;
        }

        let ttl_ms = millis(ttl).max(1);
        self.execute_with_retry("expire", key, |mut conn| {
            let key = key.to_string();
            Box::pin(async move {
                redis::cmd("PEXPIRE")
                    .arg(key)
                    .arg(ttl_ms)
                    .query_async::<_, bool>(&mut conn)
                    .await
            })
        })
        .await
    }

    /// Remaining TTL of a key in milliseconds, `None` if absent or persistent
    pub async fn ttl_millis(&self, key: &str) -> Result<Option<u64>, InfrastructureError> {
        let ttl = self
            .execute_with_retry("ttl", key, |mut conn| {
                let key = key.to_string();
                Box::pin(async move { redis::cmd("PTTL").arg(key).query_async::<_, i64>(&mut conn).await })
            })
            .await?;

        Ok(u64::try_from(ttl).ok())
    }

    /// Check if the Redis connection is healthy
    pub async fn health_check(&self) -> Result<bool, InfrastructureError> {
        let response = self
            .execute_with_retry("ping", "", |mut conn| {
                Box::pin(async move { redis::cmd("PING").query_async::<_, String>(&mut conn).await })
            })
            .await?;

        if response == "PONG" {
            debug!("Redis health check passed");
            Ok(true)
        } else {
            warn!("Redis health check returned unexpected response: {}", response);
            Ok(false)
        }
    }

    /// Execute a Redis operation with retry and a per-attempt timeout
    ///
    /// Retriable errors back off exponentially; a timeout ends the call
    /// immediately.
    async fn execute_with_retry<F, T>(
        &self,
        operation_name: &'static str,
        key: &str,
        operation: F,
    ) -> Result<T, InfrastructureError>
    where
        F: Fn(MultiplexedConnection) -> RedisFuture<T>,
    {
        let mut attempts = 0;
        let mut delay = self.retry_delay_ms;

        loop {
            attempts += 1;
            let conn = self.connection.clone();

            match timeout(self.response_timeout, operation(conn)).await {
                Ok(Ok(result)) => return Ok(result),
                Ok(Err(e)) if attempts < self.max_retries && is_retriable_error(&e) => {
                    warn!(
                        operation = operation_name,
                        key = %key,
                        "Redis operation failed (attempt {}/{}): {}. Retrying in {}ms...",
                        attempts, self.max_retries, e, delay
                    );
                    sleep(Duration::from_millis(delay)).await;
                    // Exponential backoff with cap at 5 seconds
                    delay = (delay * 2).min(5000);
                }
                Ok(Err(e)) => {
                    error!(
                        operation = operation_name,
                        key = %key,
                        "Redis operation failed after {} attempts: {}",
                        attempts, e
                    );
                    return Err(InfrastructureError::Cache(e));
                }
                Err(_) => {
                    error!(
                        operation = operation_name,
                        key = %key,
                        "Redis operation timed out after {}ms",
                        millis(self.response_timeout)
                    );
                    return Err(InfrastructureError::Timeout {
                        millis: millis(self.response_timeout),
                    });
                }
            }
        }
    }
}

fn millis(duration: Duration) -> u64 {
    u64::try_from(duration.as_millis()).unwrap_or(u64::MAX)
}

/// Check if a Redis error is retriable
pub(crate) fn is_retriable_error(error: &RedisError) -> bool {
    matches!(
        error.kind(),
        redis::ErrorKind::IoError
            | redis::ErrorKind::ClientError
            | redis::ErrorKind::BusyLoadingError
            | redis::ErrorKind::TryAgain
    )
}

/// Mask sensitive parts of Redis URL for logging
pub(crate) fn mask_url(url: &str) -> String {
    if let Some(at_pos) = url.find('@') {
        if let Some(proto_end) = url.find("://") {
            let proto = &url[..proto_end + 3];
            let host_part = &url[at_pos..];
            return format!("{}****{}", proto, host_part);
        }
    }
    url.to_string()
}
