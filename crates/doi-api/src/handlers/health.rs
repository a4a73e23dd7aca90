//! Health check handlers
//!
//! Liveness and readiness endpoints.

use axum::{extract::State, http::StatusCode, Json};
use doi_service::dto::{HealthResponse, ReadinessResponse};

use crate::state::AppState;

/// Liveness check
///
/// GET /health
pub async fn health_check() -> Json<HealthResponse> {
    Json(HealthResponse::healthy())
}

/// Readiness check with database connectivity
///
/// GET /health/ready
pub async fn readiness_check(State(state): State<AppState>) -> (StatusCode, Json<ReadinessResponse>) {
    let db_healthy = state.pool().acquire().await.is_ok();

    let response = ReadinessResponse::ready(db_healthy);
    let status = if response.is_ready() {
        StatusCode::OK
    } else {
        StatusCode::SERVICE_UNAVAILABLE
    };

    (status, Json(response))
}
