//! Error types for token handling, session state and the shared store
//!
//! The stable wire codes these map to live in `gate_shared::errors::codes`.

use thiserror::Error;

/// Token-related errors
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum TokenError {
    /// Malformed structure, bad signature, or missing required claims
    #[error("Invalid token")]
    InvalidToken,

    /// Claims could not be serialized or signed; a configuration fault
    #[error("Token encoding failed: {message}")]
    EncodingFailure { message: String },

    /// Token lifetimes rejected when the service is built
    #[error("Invalid token configuration: {message}")]
    InvalidConfig { message: String },
}

/// Session state errors
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum SessionError {
    #[error("No token")]
    NoToken,

    /// Blacklisted, or no longer the active token for its identity
    #[error("Session invalidated: {reason}")]
    SessionInvalidated { reason: String },

    /// Past the hold window; the identity must authenticate again
    #[error("Session expired")]
    SessionExpired,

    #[error("{username} is already logged in")]
    AlreadyLoggedIn { username: String },

    #[error("Invalid username or password")]
    InvalidCredentials,
}

/// Shared store failures
///
/// Never interpreted as "not logged in": callers surface these as a
/// server-side fault.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum StoreError {
    #[error("Store unavailable: {message}")]
    Unavailable { message: String },

    #[error("Store operation timed out after {millis}ms")]
    Timeout { millis: u64 },
}
