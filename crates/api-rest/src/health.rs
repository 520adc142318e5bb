//! Liveness probe.

use axum::response::Json;
use chrono::Utc;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// Health check payload.
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct HealthRes {
    pub status: String,
    pub timestamp: String,
    pub service: String,
    pub version: String,
}

#[utoipa::path(
    get,
    path = "/health",
    responses(
        (status = 200, description = "Servicio funcionando correctamente.", body = HealthRes)
    ),
    tag = "health"
)]
/// Health check endpoint, used for monitoring and load balancer probes.
#[axum::debug_handler]
pub async fn health() -> Json<HealthRes> {
    Json(HealthRes {
        status: "ok".into(),
        timestamp: Utc::now().to_rfc3339(),
        service: clinica_core::constants::SERVICE_NAME.into(),
        version: env!("CARGO_PKG_VERSION").into(),
    })
}
