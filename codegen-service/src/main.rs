use codegen_service::config::CodegenConfig;
use codegen_service::observability::init_tracing;
use codegen_service::startup::Application;

#[tokio::main]
async fn main() -> std::io::Result<()> {
    init_tracing("codegen-service", "info");

    let config = CodegenConfig::load().map_err(|e| {
        tracing::error!("Failed to load configuration: {}", e);
        std::io::Error::other(format!("Configuration error: {}", e))
    })?;

    let app = Application::build(config).await.map_err(|e| {
        tracing::error!("Failed to build application: {}", e);
        std::io::Error::other(format!("Startup error: {}", e))
    })?;

    app.run_until_stopped().await
}
