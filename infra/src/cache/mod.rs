//! Cache module for Redis-based session storage
//!
//! Redis client with retry logic and response timeouts, and the
//! `SessionStore` implementation built on it.

pub mod redis_client;
pub mod redis_session_store;

#[cfg(test)]
mod tests;

pub use redis_client::RedisClient;
pub use redis_session_store::RedisSessionStore;

// Re-export commonly used types
pub use gate_shared::config::CacheConfig;
