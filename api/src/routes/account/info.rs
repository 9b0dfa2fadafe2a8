use actix_web::{web, HttpRequest, HttpResponse};
use gate_shared::errors::ApiResponse;

use crate::dto::InfoResponse;
use crate::handlers::error::handle_domain_error;

use super::AppState;

/// Handler for GET /jwt-client/getInfo
///
/// Reads the identity from the forwarded token, which is the renewed one
/// when the guard refreshed it in flight.
pub async fn get_info(req: HttpRequest, state: web::Data<AppState>) -> HttpResponse {
    let identity = match state
        .presented_token(&req)
        .and_then(|token| state.sessions.identity_of(&token))
    {
        Ok(identity) => identity,
        Err(error) => return handle_domain_error(&error),
    };

    HttpResponse::Ok().json(ApiResponse::ok(
        "ok",
        InfoResponse {
            id: identity.id,
            username: identity.name,
        },
    ))
}
