use crate::startup::AppState;
use axum::{extract::State, http::StatusCode, response::IntoResponse, Json};
use serde_json::{json, Value};
use service_core::error::AppError;

/// Liveness probe. Always answers while the process can serve HTTP.
pub async fn health_check() -> impl IntoResponse {
    Json(json!({
        "status": "ok",
        "service": "health-relay",
        "version": env!("CARGO_PKG_VERSION")
    }))
}

/// Readiness probe: ready once the completion provider is configured.
pub async fn readiness_check(State(state): State<AppState>) -> Result<Json<Value>, AppError> {
    state.completion_provider.health_check().await.map_err(|e| {
        tracing::warn!(error = %e, "Completion provider not ready");
        AppError::ServiceUnavailable
    })?;

    Ok(Json(json!({ "status": "ready" })))
}

/// Prometheus metrics endpoint.
pub async fn metrics_endpoint() -> impl IntoResponse {
    (
        StatusCode::OK,
        [("content-type", "text/plain; version=0.0.4")],
        crate::services::get_metrics(),
    )
}
