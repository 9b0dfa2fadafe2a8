use actix_web::{web, HttpRequest, HttpResponse};
use gate_core::{CredentialVerifier, DomainError};
use gate_shared::errors::ApiResponse;

use crate::dto::{LoginRequest, TokenResponse};
use crate::handlers::error::handle_domain_error;

use super::AppState;

/// Handler for POST /jwt-client/relogin
///
/// Takes back a session from a superseded token. The guard lets any
/// well-formed token through here; the credentials decide.
pub async fn relogin(
    req: HttpRequest,
    state: web::Data<AppState>,
    body: web::Json<LoginRequest>,
) -> HttpResponse {
    let presented = match state.presented_token(&req) {
        Ok(token) => token,
        Err(error) => return handle_domain_error(&error),
    };

    let identity = match state.credentials.verify(&body.username, &body.password).await {
        Ok(identity) => identity,
        Err(error) => return handle_domain_error(&DomainError::from(error)),
    };

    match state.sessions.relogin(&identity, &presented).await {
        Ok(issued) => {
            HttpResponse::Ok().json(ApiResponse::ok("relogin succeeded", TokenResponse::from(&issued)))
        }
        Err(error) => handle_domain_error(&error),
    }
}
