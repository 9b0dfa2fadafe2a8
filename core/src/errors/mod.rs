//! Domain-specific error types and error handling.

mod types;

#[cfg(test)]
mod tests;

pub use types::{SessionError, StoreError, TokenError};

use gate_shared::errors::codes;
use thiserror::Error;

/// Core domain errors
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum DomainError {
    #[error("Internal error: {message}")]
    Internal { message: String },

    #[error(transparent)]
    Token(#[from] TokenError),

    #[error(transparent)]
    Session(#[from] SessionError),

    #[error(transparent)]
    Store(#[from] StoreError),
}

impl DomainError {
    /// Stable numeric code carried in the `{code, message}` response body
    pub fn code(&self) -> i32 {
        match self {
            DomainError::Token(TokenError::InvalidToken) => codes::INVALID_TOKEN,
            DomainError::Token(TokenError::EncodingFailure { .. })
            | DomainError::Token(TokenError::InvalidConfig { .. }) => codes::INTERNAL_ERROR,
            DomainError::Session(SessionError::NoToken) => codes::NO_TOKEN,
            DomainError::Session(SessionError::SessionInvalidated { .. }) => {
                codes::SESSION_INVALIDATED
            }
            DomainError::Session(SessionError::SessionExpired) => codes::SESSION_EXPIRED,
            DomainError::Session(SessionError::AlreadyLoggedIn { .. }) => codes::ALREADY_LOGGED_IN,
            DomainError::Session(SessionError::InvalidCredentials) => codes::INVALID_CREDENTIALS,
            DomainError::Store(_) => codes::STORE_UNAVAILABLE,
            DomainError::Internal { .. } => codes::INTERNAL_ERROR,
        }
    }

    /// Whether the failure is on the server side rather than an access denial
    pub fn is_server_fault(&self) -> bool {
        matches!(
            self,
            DomainError::Store(_)
                | DomainError::Internal { .. }
                | DomainError::Token(TokenError::EncodingFailure { .. })
                | DomainError::Token(TokenError::InvalidConfig { .. })
        )
    }
}

pub type DomainResult<T> = Result<T, DomainError>;
