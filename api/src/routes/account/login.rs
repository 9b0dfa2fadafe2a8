use actix_web::{web, HttpResponse};
use gate_core::{CredentialVerifier, DomainError};
use gate_shared::errors::ApiResponse;

use crate::dto::{LoginRequest, TokenResponse};
use crate::handlers::error::handle_domain_error;

use super::AppState;

/// Handler for POST /jwt-client/login
///
/// Verifies the credentials and issues a token. Any session the account
/// holds elsewhere is superseded.
///
/// # Request Body
///
/// ```json
/// {
///     "username": "admin",
///     "password": "admin"
/// }
/// ```
///
/// # Response
///
/// ## Success (200 OK)
/// ```json
/// {
///     "code": 20000,
///     "message": "login succeeded",
///     "data": { "token": "eyJ...", "hold_until": 1700000000000 }
/// }
/// ```
///
/// ## Errors
/// - 401 Unauthorized: Invalid username or password
/// - 409 Conflict: Account already logged in (when rejecting active sessions)
/// - 503 Service Unavailable: Session store unreachable
pub async fn login(state: web::Data<AppState>, body: web::Json<LoginRequest>) -> HttpResponse {
    let identity = match state.credentials.verify(&body.username, &body.password).await {
        Ok(identity) => identity,
        Err(error) => return handle_domain_error(&DomainError::from(error)),
    };

    match state.sessions.login(&identity).await {
        Ok(issued) => {
            tracing::info!(identity_id = %identity.id, "Login succeeded");
            HttpResponse::Ok().json(ApiResponse::ok("login succeeded", TokenResponse::from(&issued)))
        }
        Err(error) => handle_domain_error(&error),
    }
}
