use symptom_service::config::SymptomConfig;
use symptom_service::services::init_metrics;
use symptom_service::startup::Application;

use service_core::observability::init_tracing;

#[tokio::main]
async fn main() -> std::io::Result<()> {
    // Loaded before tracing so the configured log level applies from the first event.
    let config = SymptomConfig::load();

    let log_level = config
        .as_ref()
        .map(|c| c.common.log_level.clone())
        .unwrap_or_else(|_| "info".to_string());
    let otlp_endpoint = std::env::var("OTLP_ENDPOINT").ok();
    init_tracing("symptom-service", &log_level, otlp_endpoint.as_deref());

    init_metrics();

    let config = config.map_err(|e| {
        tracing::error!("Failed to load configuration: {}", e);
        std::io::Error::other(format!("Configuration error: {}", e))
    })?;

    let app = Application::build(config).await.map_err(|e| {
        tracing::error!("Failed to start symptom service: {:?}", e);
        std::io::Error::other(format!("Startup error: {}", e))
    })?;

    app.run_until_stopped().await
}
