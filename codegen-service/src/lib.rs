pub mod config;
pub mod dtos;
pub mod error;
pub mod handlers;
pub mod observability;
pub mod services;
pub mod startup;

use axum::{
    routing::{get, post},
    Router,
};
use std::sync::Arc;
use tower_http::{
    cors::{Any, CorsLayer},
    trace::TraceLayer,
};

use crate::config::CodegenConfig;
use crate::services::providers::TextProvider;

/// Shared application state.
#[derive(Clone)]
pub struct AppState {
    pub config: CodegenConfig,
    pub text_provider: Arc<dyn TextProvider>,
}

pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route("/generate", post(handlers::generate::generate))
        .route("/health", get(handlers::health::health_check))
        .route("/ready", get(handlers::health::readiness_check))
        .with_state(state)
        // Add tracing layer
        .layer(TraceLayer::new_for_http())
        // Add CORS layer. The front-end is served from an arbitrary dev
        // origin, so the policy is deliberately wide open.
        .layer(
            CorsLayer::new()
                .allow_origin(Any)
                .allow_methods(Any)
                .allow_headers(Any),
        )
}
