//! Mapping from domain failures to HTTP responses
//!
//! Every failure body has the shape `{"code": int, "message": string}`.
//! Access denials are 401, a lost session store is 503, and anything else
//! on the server side is 500.

use actix_web::{http::StatusCode, HttpResponse};
use gate_core::{DomainError, Rejection, RejectionKind, SessionError};
use gate_shared::errors::ErrorBody;

/// HTTP status for a rejection raised by the session guard
pub fn rejection_status(kind: RejectionKind) -> StatusCode {
    match kind {
        RejectionKind::NoToken
        | RejectionKind::InvalidToken
        | RejectionKind::SessionInvalidated
        | RejectionKind::SessionExpired => StatusCode::UNAUTHORIZED,
        RejectionKind::StoreUnavailable => StatusCode::SERVICE_UNAVAILABLE,
        RejectionKind::Internal => StatusCode::INTERNAL_SERVER_ERROR,
    }
}

/// Response for a request the session guard refused
pub fn rejection_response(rejection: &Rejection) -> HttpResponse {
    HttpResponse::build(rejection_status(rejection.kind)).json(rejection.body())
}

/// Response for a failed account operation
pub fn handle_domain_error(error: &DomainError) -> HttpResponse {
    let status = match error {
        DomainError::Session(SessionError::AlreadyLoggedIn { .. }) => StatusCode::CONFLICT,
        DomainError::Store(_) => StatusCode::SERVICE_UNAVAILABLE,
        _ if error.is_server_fault() => StatusCode::INTERNAL_SERVER_ERROR,
        _ => StatusCode::UNAUTHORIZED,
    };

    let message = if error.is_server_fault() {
        tracing::error!(error = %error, "Account operation failed");
        match error {
            DomainError::Store(_) => "session store unavailable".to_string(),
            _ => "internal error".to_string(),
        }
    } else {
        tracing::info!(error = %error, "Account operation refused");
        error.to_string()
    };

    HttpResponse::build(status).json(ErrorBody::new(error.code(), message))
}

#[cfg(test)]
mod tests {
    use super::*;
    use gate_core::{StoreError, TokenError};

    #[test]
    fn test_rejection_status() {
        assert_eq!(rejection_status(RejectionKind::NoToken), StatusCode::UNAUTHORIZED);
        assert_eq!(
            rejection_status(RejectionKind::SessionExpired),
            StatusCode::UNAUTHORIZED
        );
        assert_eq!(
            rejection_status(RejectionKind::StoreUnavailable),
            StatusCode::SERVICE_UNAVAILABLE
        );
        assert_eq!(
            rejection_status(RejectionKind::Internal),
            StatusCode::INTERNAL_SERVER_ERROR
        );
    }

    #[test]
    fn test_domain_error_statuses() {
        let cases = [
            (DomainError::Token(TokenError::InvalidToken), StatusCode::UNAUTHORIZED),
            (
                DomainError::Session(SessionError::InvalidCredentials),
                StatusCode::UNAUTHORIZED,
            ),
            (
                DomainError::Session(SessionError::AlreadyLoggedIn {
                    username: "admin".to_string(),
                }),
                StatusCode::CONFLICT,
            ),
            (
                DomainError::Store(StoreError::Timeout { millis: 500 }),
                StatusCode::SERVICE_UNAVAILABLE,
            ),
            (
                DomainError::Token(TokenError::EncodingFailure {
                    message: "bad key".to_string(),
                }),
                StatusCode::INTERNAL_SERVER_ERROR,
            ),
        ];

        for (error, status) in cases {
            assert_eq!(handle_domain_error(&error).status(), status, "{}", error);
        }
    }
}
