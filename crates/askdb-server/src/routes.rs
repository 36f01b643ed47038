//! HTTP route configuration.

use crate::handlers;
use actix_web::{web, HttpResponse};
use serde_json::json;

/// Wire up the service routes:
/// - POST /human_query - answer a natural-language question
/// - GET /healthcheck - liveness probe
pub fn configure_routes(cfg: &mut web::ServiceConfig) {
    cfg.app_data(handlers::json_error_handler())
        .service(handlers::human_query)
        .route("/healthcheck", web::get().to(healthcheck_handler));
}

async fn healthcheck_handler() -> HttpResponse {
    HttpResponse::Ok().json(json!({
        "status": "healthy",
        "version": env!("CARGO_PKG_VERSION"),
    }))
}
