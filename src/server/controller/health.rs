//! Welcome and liveness endpoints.

use axum::{response::IntoResponse, Json};

use crate::model::api::{HealthDto, MessageDto};

/// OpenAPI tag for liveness routes
pub static HEALTH_TAG: &str = "health";

/// Welcome message
#[utoipa::path(
    get,
    path = "/",
    tag = HEALTH_TAG,
    responses((status = 200, description = "The service is running", body = MessageDto)),
)]
pub async fn root() -> impl IntoResponse {
    Json(MessageDto {
        message: "Welcome to forkcache".to_string(),
    })
}

/// Liveness check
///
/// Answers without touching the database or GitHub.
#[utoipa::path(
    get,
    path = "/health",
    tag = HEALTH_TAG,
    responses((status = 200, description = "The service is running", body = HealthDto)),
)]
pub async fn health_check() -> impl IntoResponse {
    Json(HealthDto {
        status: "ok".to_string(),
    })
}
