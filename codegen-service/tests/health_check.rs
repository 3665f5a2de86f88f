//! Integration tests against a spawned server.
//!
//! These use the mock provider, so no Ollama instance is required.
//! Run with: cargo test -p codegen-service --test health_check

use codegen_service::config::{CodegenConfig, HttpConfig, ModelSettings, OllamaSettings};
use codegen_service::services::providers::mock::MockTextProvider;
use codegen_service::services::providers::TextProvider;
use codegen_service::startup::Application;
use codegen_service::AppState;
use reqwest::Client;
use std::sync::Arc;
use std::time::Duration;

fn test_config() -> CodegenConfig {
    CodegenConfig {
        common: HttpConfig { port: 0 }, // Random port
        ollama: OllamaSettings {
            base_url: "http://localhost:11434".to_string(),
            request_timeout_secs: 300,
        },
        models: ModelSettings {
            code_model: "qwen2.5-coder:7b".to_string(),
        },
    }
}

/// Spawn the application on a random port and return the port number.
async fn spawn_app(provider: Arc<dyn TextProvider>) -> u16 {
    let state = AppState {
        config: test_config(),
        text_provider: provider,
    };

    let app = Application::with_state(state)
        .await
        .expect("Failed to build application");
    let port = app.port();

    // Spawn the server in the background
    tokio::spawn(async move {
        let _ = app.run_until_stopped().await;
    });

    // Wait for server to start
    tokio::time::sleep(Duration::from_millis(100)).await;

    port
}

#[tokio::test]
async fn health_check_returns_ok() {
    let port = spawn_app(Arc::new(MockTextProvider::replying("code"))).await;
    let client = Client::new();

    let response = client
        .get(format!("http://localhost:{}/health", port))
        .timeout(Duration::from_secs(5))
        .send()
        .await
        .expect("Failed to send request");

    assert!(response.status().is_success());

    let body: serde_json::Value = response.json().await.expect("Failed to parse JSON");
    assert_eq!(body["status"], "ok");
    assert_eq!(body["service"], "codegen-service");
}

#[tokio::test]
async fn readiness_check_reflects_provider_health() {
    let healthy_port = spawn_app(Arc::new(MockTextProvider::replying("code"))).await;
    let unhealthy_port = spawn_app(Arc::new(MockTextProvider::failing("down"))).await;
    let client = Client::new();

    let healthy = client
        .get(format!("http://localhost:{}/ready", healthy_port))
        .timeout(Duration::from_secs(5))
        .send()
        .await
        .expect("Failed to send request");
    assert!(healthy.status().is_success());

    let unhealthy = client
        .get(format!("http://localhost:{}/ready", unhealthy_port))
        .timeout(Duration::from_secs(5))
        .send()
        .await
        .expect("Failed to send request");
    assert_eq!(unhealthy.status().as_u16(), 503);
}

#[tokio::test]
async fn generate_is_reachable_cross_origin() {
    let port = spawn_app(Arc::new(MockTextProvider::replying("code"))).await;
    let client = Client::new();

    let response = client
        .post(format!("http://localhost:{}/generate", port))
        .header("origin", "http://localhost:5173")
        .json(&serde_json::json!({ "prompt": "a red button" }))
        .timeout(Duration::from_secs(5))
        .send()
        .await
        .expect("Failed to send request");

    assert!(response.status().is_success());
    assert_eq!(
        response
            .headers()
            .get("access-control-allow-origin")
            .and_then(|v| v.to_str().ok()),
        Some("*")
    );

    let body: serde_json::Value = response.json().await.expect("Failed to parse JSON");
    assert_eq!(body["code"], "code");
}
