use actix_web::{web, HttpRequest, HttpResponse};
use gate_shared::errors::ApiResponse;

use crate::dto::TokenResponse;
use crate::handlers::error::handle_domain_error;

use super::AppState;

/// Handler for GET /jwt-client/token/refresh
///
/// Renews the active token. The old token is blacklisted and the session
/// record lives on until the unchanged hold boundary.
pub async fn refresh(req: HttpRequest, state: web::Data<AppState>) -> HttpResponse {
    let token = match state.presented_token(&req) {
        Ok(token) => token,
        Err(error) => return handle_domain_error(&error),
    };

    match state.sessions.refresh(&token).await {
        Ok(renewed) => {
            HttpResponse::Ok().json(ApiResponse::ok("token refreshed", TokenResponse::from(&renewed)))
        }
        Err(error) => handle_domain_error(&error),
    }
}
