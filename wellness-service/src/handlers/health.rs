//! Liveness, health, readiness, and metrics endpoints.

use crate::services::render_metrics;
use crate::startup::AppState;
use axum::{extract::State, http::StatusCode, response::IntoResponse, Json};
use serde_json::json;

/// GET /: plain-text liveness probe.
pub async fn liveness() -> &'static str {
    "Wellness Backend Running"
}

/// GET /health: health report including store status.
pub async fn health_check(State(state): State<AppState>) -> impl IntoResponse {
    match state.store.health_check().await {
        Ok(_) => (
            StatusCode::OK,
            Json(json!({
                "status": "ok",
                "service": "wellness-service",
                "version": env!("CARGO_PKG_VERSION")
            })),
        ),
        Err(e) => (
            StatusCode::SERVICE_UNAVAILABLE,
            Json(json!({
                "status": "unhealthy",
                "service": "wellness-service",
                "error": e.to_string()
            })),
        ),
    }
}

/// GET /ready: readiness gate over the store and the completion provider.
pub async fn readiness_check(State(state): State<AppState>) -> impl IntoResponse {
    match (
        state.store.health_check().await,
        state.provider.health_check().await,
    ) {
        (Ok(_), Ok(_)) => StatusCode::OK,
        _ => StatusCode::SERVICE_UNAVAILABLE,
    }
}

/// GET /metrics: Prometheus text exposition.
pub async fn metrics_endpoint() -> impl IntoResponse {
    (
        StatusCode::OK,
        [("content-type", "text/plain; charset=utf-8")],
        render_metrics(),
    )
}
