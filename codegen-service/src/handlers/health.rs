//! Liveness and readiness probes.

use crate::error::AppError;
use crate::AppState;
use axum::{extract::State, http::StatusCode, response::IntoResponse, Json};
use serde_json::json;

/// Health check endpoint for Docker/K8s liveness probes.
///
/// The service itself has no state to check; a reachable process is a
/// healthy process.
pub async fn health_check() -> Json<serde_json::Value> {
    Json(json!({
        "status": "ok",
        "service": "codegen-service",
        "version": env!("CARGO_PKG_VERSION")
    }))
}

/// Readiness check endpoint for K8s readiness probes.
///
/// Ready means the inference runtime answers; until Ollama is up there is no
/// point routing traffic here.
pub async fn readiness_check(State(state): State<AppState>) -> impl IntoResponse {
    match state.text_provider.health_check().await {
        Ok(_) => StatusCode::OK.into_response(),
        Err(e) => {
            tracing::warn!(error = %e, "Inference runtime not ready");
            AppError::ServiceUnavailable.into_response()
        }
    }
}
