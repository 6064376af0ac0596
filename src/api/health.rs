use actix_web::{http::StatusCode, web, HttpResponse};
use serde::{Deserialize, Serialize};

use crate::utils::pretty_json;
use crate::services::UserService;

#[derive(Serialize, Deserialize, utoipa::ToSchema)]
pub struct HealthResponse {
    pub status: String,
    pub service: String,
    pub version: String,
    pub timestamp: i64,
    pub store: String,
}

#[utoipa::path(
    get,
    path = "/health",
    tag = "Health",
    responses(
        (status = 200, description = "Service and store are healthy", body = HealthResponse),
        (status = 503, description = "Store is unreachable", body = HealthResponse)
    )
)]
pub async fn health_check(service: web::Data<UserService>) -> HttpResponse {
    let (status, health) = match service.ping().await {
        Ok(()) => (StatusCode::OK, "healthy"),
        Err(e) => {
            log::warn!("⚠️ Health check failed: {}", e);
            (StatusCode::SERVICE_UNAVAILABLE, "unhealthy")
        }
    };

    pretty_json(
        status,
        &HealthResponse {
            status: health.to_string(),
            service: "user-service".to_string(),
            version: env!("CARGO_PKG_VERSION").to_string(),
            timestamp: chrono::Utc::now().timestamp(),
            store: service.backend_name().to_string(),
        },
    )
}
