//! Shared configuration and wire types for the JWT gateway
//!
//! This crate provides functionality used across all gateway modules:
//! - Configuration types loaded from the environment
//! - The `{code, message}` error body and its stable code table

pub mod config;
pub mod errors;

// Re-export commonly used items at crate root
pub use config::{
    AppConfig, CacheBackend, CacheConfig, Environment, GatewayConfig, JwtConfig, LogFormat,
    LoggingConfig, LoginConfig, ServerConfig,
};
pub use errors::{codes, ApiResponse, ErrorBody};
