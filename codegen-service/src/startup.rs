//! Application startup and lifecycle management.

use crate::config::CodegenConfig;
use crate::error::AppError;
use crate::services::providers::ollama::{OllamaConfig, OllamaTextProvider};
use crate::services::providers::TextProvider;
use crate::{build_router, AppState};
use std::net::SocketAddr;
use std::sync::Arc;
use tokio::net::TcpListener;
use tokio::signal;

/// Application container for managing server lifecycle.
pub struct Application {
    port: u16,
    listener: TcpListener,
    state: AppState,
}

impl Application {
    /// Build the application with the given configuration.
    pub async fn build(config: CodegenConfig) -> Result<Self, AppError> {
        let ollama_config = OllamaConfig {
            base_url: config.ollama.base_url.clone(),
            model: config.models.code_model.clone(),
            request_timeout_secs: config.ollama.request_timeout_secs,
        };
        let text_provider: Arc<dyn TextProvider> = Arc::new(OllamaTextProvider::new(ollama_config));

        tracing::info!(
            model = %config.models.code_model,
            endpoint = %config.ollama.base_url,
            "Initialized Ollama text provider"
        );

        let state = AppState {
            config: config.clone(),
            text_provider,
        };

        Self::with_state(state).await
    }

    /// Build the application around an already constructed state.
    ///
    /// Tests use this to swap in a mock provider.
    pub async fn with_state(state: AppState) -> Result<Self, AppError> {
        // Bind listener (port 0 = random port for testing)
        let addr = SocketAddr::from(([0, 0, 0, 0], state.config.common.port));
        let listener = TcpListener::bind(addr).await.map_err(|e| {
            tracing::error!("Failed to bind listener to {}: {}", addr, e);
            AppError::from(e)
        })?;
        let port = listener.local_addr()?.port();

        tracing::info!("Codegen service listening on port {}", port);

        Ok(Self {
            port,
            listener,
            state,
        })
    }

    /// Get the port the server is listening on.
    pub fn port(&self) -> u16 {
        self.port
    }

    /// Run the application until stopped.
    pub async fn run_until_stopped(self) -> std::io::Result<()> {
        let router = build_router(self.state);

        axum::serve(self.listener, router)
            .with_graceful_shutdown(shutdown_signal())
            .await
    }
}

async fn shutdown_signal() {
    let ctrl_c = async {
        signal::ctrl_c()
            .await
            .expect("Failed to install Ctrl+C handler");
    };

    #[cfg(unix)]
    let terminate = async {
        signal::unix::signal(signal::unix::SignalKind::terminate())
            .expect("Failed to install SIGTERM handler")
            .recv()
            .await;
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }

    tracing::info!("Shutdown signal received");
}
