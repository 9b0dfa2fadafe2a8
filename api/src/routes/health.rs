use actix_web::{web, HttpResponse};
use gate_core::SessionStore;

use crate::dto::HealthResponse;

use super::account::AppState;

/// Handler for GET /health
///
/// 200 while the session store answers, 503 otherwise.
pub async fn health_check(state: web::Data<AppState>) -> HttpResponse {
    let reachable = match state.store.ping().await {
        Ok(()) => true,
        Err(error) => {
            tracing::warn!(error = %error, "Health check found the session store unreachable");
            false
        }
    };

    let body = HealthResponse {
        status: if reachable { "healthy" } else { "degraded" }.to_string(),
        service: env!("CARGO_PKG_NAME").to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
        store: if reachable { "up" } else { "down" }.to_string(),
        timestamp: chrono::Utc::now().to_rfc3339(),
    };

    if reachable {
        HttpResponse::Ok().json(body)
    } else {
        HttpResponse::ServiceUnavailable().json(body)
    }
}
