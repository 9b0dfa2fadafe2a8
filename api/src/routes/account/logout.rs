use actix_web::{web, HttpRequest, HttpResponse};
use gate_shared::errors::ApiResponse;

use crate::handlers::error::handle_domain_error;

use super::AppState;

/// Handler for GET /jwt-client/logout
///
/// Ends the session the token belongs to and blacklists the token.
///
/// # Response
///
/// ## Success (200 OK)
/// ```json
/// {
///     "code": 20000,
///     "message": "admin logged out"
/// }
/// ```
pub async fn logout(req: HttpRequest, state: web::Data<AppState>) -> HttpResponse {
    let token = match state.presented_token(&req) {
        Ok(token) => token,
        Err(error) => return handle_domain_error(&error),
    };

    match state.sessions.logout(&token).await {
        Ok(identity) => {
            HttpResponse::Ok().json(ApiResponse::<()>::message(format!("{} logged out", identity.name)))
        }
        Err(error) => handle_domain_error(&error),
    }
}
