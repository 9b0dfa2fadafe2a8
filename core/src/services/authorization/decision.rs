//! Filter inputs and outcomes

use gate_shared::errors::{codes, ErrorBody};

use crate::errors::{DomainError, SessionError, TokenError};

/// What the filter needs to know about an inbound request
#[derive(Debug, Clone, Copy)]
pub struct AuthRequest<'a> {
    pub path: &'a str,
    /// Bearer token with any `Bearer ` prefix already removed
    pub token: Option<&'a str>,
}

impl<'a> AuthRequest<'a> {
    pub fn new(path: &'a str, token: Option<&'a str>) -> Self {
        Self { path, token }
    }
}

/// Final outcome for one request
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AuthDecision {
    /// Forward unchanged
    Forward,
    /// Forward with the bearer header replaced by `token`
    ForwardRefreshed { token: String },
    Reject(Rejection),
}

impl AuthDecision {
    pub fn is_forwarded(&self) -> bool {
        !matches!(self, AuthDecision::Reject(_))
    }

    pub fn rejection(&self) -> Option<&Rejection> {
        match self {
            AuthDecision::Reject(rejection) => Some(rejection),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RejectionKind {
    NoToken,
    InvalidToken,
    SessionInvalidated,
    SessionExpired,
    /// The shared store failed or timed out; a server fault, not a denial
    StoreUnavailable,
    Internal,
}

/// A rejected request with its client-facing message
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Rejection {
    pub kind: RejectionKind,
    pub message: String,
}

impl Rejection {
    pub fn new(kind: RejectionKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            message: message.into(),
        }
    }

    pub fn code(&self) -> i32 {
        match self.kind {
            RejectionKind::NoToken => codes::NO_TOKEN,
            RejectionKind::InvalidToken => codes::INVALID_TOKEN,
            RejectionKind::SessionInvalidated => codes::SESSION_INVALIDATED,
            RejectionKind::SessionExpired => codes::SESSION_EXPIRED,
            RejectionKind::StoreUnavailable => codes::STORE_UNAVAILABLE,
            RejectionKind::Internal => codes::INTERNAL_ERROR,
        }
    }

    pub fn is_server_fault(&self) -> bool {
        matches!(self.kind, RejectionKind::StoreUnavailable | RejectionKind::Internal)
    }

    pub fn body(&self) -> ErrorBody {
        ErrorBody::new(self.code(), self.message.as_str())
    }
}

impl From<DomainError> for Rejection {
    fn from(error: DomainError) -> Self {
        match error {
            DomainError::Session(SessionError::NoToken) => {
                Rejection::new(RejectionKind::NoToken, "missing token")
            }
            DomainError::Token(TokenError::InvalidToken) => {
                Rejection::new(RejectionKind::InvalidToken, "invalid token")
            }
            DomainError::Session(SessionError::SessionInvalidated { reason }) => {
                Rejection::new(RejectionKind::SessionInvalidated, reason)
            }
            DomainError::Session(SessionError::SessionExpired) => {
                Rejection::new(RejectionKind::SessionExpired, "token expired")
            }
            DomainError::Store(_) => {
                Rejection::new(RejectionKind::StoreUnavailable, "session store unavailable")
            }
            other => {
                tracing::error!(error = %other, "Unexpected error in authorization filter");
                Rejection::new(RejectionKind::Internal, "internal error")
            }
        }
    }
}
