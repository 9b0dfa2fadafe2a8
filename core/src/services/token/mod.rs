//! Token lifecycle authority
//!
//! This module handles all token-related operations including:
//! - HS512 encoding and decoding of session tokens
//! - Issuance with a fresh invalidation group
//! - Renewal that preserves the hold boundary
//! - Predicates and accessors used by the authorization filter

mod codec;
mod config;
mod service;

#[cfg(test)]
mod tests;

pub use codec::TokenCodec;
pub use config::{TokenServiceConfig, MAX_LIFETIME_SECONDS};
pub use service::TokenService;
