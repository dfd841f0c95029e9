//! Application startup and lifecycle management.
//!
//! Selects the suggestion provider once, prepares the history database and
//! serves the HTTP API.

use crate::config::{ProviderConfig, SymptomConfig};
use crate::handlers::{
    check_symptoms, health_check, history, metrics_endpoint, readiness_check, root,
};
use crate::services::{
    GroqConfig, GroqProvider, HistoryDb, MockSuggestionProvider, SuggestionProvider,
    SymptomChecker,
};
use axum::{
    middleware::from_fn,
    routing::{get, post},
    Router,
};
use service_core::error::AppError;
use service_core::middleware::{handle_panic, request_id_middleware, request_span};
use std::net::SocketAddr;
use std::sync::Arc;
use tokio::net::TcpListener;
use tokio::signal;
use tower_http::catch_panic::CatchPanicLayer;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;

/// Shared application state.
#[derive(Clone)]
pub struct AppState {
    pub db: HistoryDb,
    pub checker: SymptomChecker,
    pub use_mock: bool,
}

impl AppState {
    pub fn new(provider: Arc<dyn SuggestionProvider>, db: HistoryDb) -> Self {
        let use_mock = provider.name() == MockSuggestionProvider::NAME;
        Self {
            checker: SymptomChecker::new(provider, db.clone()),
            db,
            use_mock,
        }
    }
}

/// Pick the provider for the lifetime of the process.
///
/// `USE_MOCK=1` or a blank credential selects the mock. A Groq client that
/// cannot be constructed is a startup error.
pub fn build_provider(config: &ProviderConfig) -> Result<Arc<dyn SuggestionProvider>, AppError> {
    if config.use_mock {
        tracing::info!("USE_MOCK is set, using mock suggestion provider");
        return Ok(Arc::new(MockSuggestionProvider::new()));
    }

    if config.api_key.trim().is_empty() {
        tracing::warn!("GROQ_API_KEY is blank, using mock suggestion provider");
        return Ok(Arc::new(MockSuggestionProvider::new()));
    }

    let provider = GroqProvider::new(GroqConfig {
        api_key: config.api_key.clone(),
        model: config.model.clone(),
        api_base: config.api_base.clone(),
    })
    .map_err(|e| {
        tracing::error!("Failed to initialize Groq provider: {}", e);
        AppError::ConfigError(anyhow::Error::new(e))
    })?;

    tracing::info!(model = %provider.model(), "Initialized Groq suggestion provider");
    Ok(Arc::new(provider))
}

pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route("/", get(root))
        .route("/check", post(check_symptoms))
        .route("/history", get(history))
        .route("/health", get(health_check))
        .route("/ready", get(readiness_check))
        .route("/metrics", get(metrics_endpoint))
        .with_state(state)
        .layer(CatchPanicLayer::custom(handle_panic))
        .layer(TraceLayer::new_for_http().make_span_with(request_span))
        .layer(from_fn(request_id_middleware))
        .layer(
            CorsLayer::new()
                .allow_origin(Any)
                .allow_methods(Any)
                .allow_headers(Any),
        )
}

/// Application container for managing server lifecycle.
pub struct Application {
    port: u16,
    listener: TcpListener,
    state: AppState,
}

impl Application {
    /// Build the application with the given configuration.
    pub async fn build(config: SymptomConfig) -> Result<Self, AppError> {
        let db = HistoryDb::new(&config.database.path);
        db.initialize().await.map_err(|e| {
            tracing::error!(
                path = %config.database.path,
                "Failed to initialize history database: {}",
                e
            );
            AppError::DatabaseError(anyhow::Error::new(e))
        })?;

        let provider = build_provider(&config.provider)?;
        let state = AppState::new(provider, db);

        // Port 0 = random port for testing
        let addr = SocketAddr::from(([0, 0, 0, 0], config.common.port));
        let listener = TcpListener::bind(addr).await.map_err(|e| {
            tracing::error!("Failed to bind HTTP listener to {}: {}", addr, e);
            AppError::from(e)
        })?;
        let port = listener.local_addr()?.port();

        tracing::info!(
            port,
            use_mock = state.use_mock,
            database = %config.database.path,
            "Symptom service listening"
        );

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

    /// Run the application until a shutdown signal arrives.
    pub async fn run_until_stopped(self) -> std::io::Result<()> {
        let router = build_router(self.state);
        axum::serve(self.listener, router)
            .with_graceful_shutdown(shutdown_signal())
            .await
    }
}

async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = signal::ctrl_c().await {
            tracing::error!("Failed to install Ctrl+C handler: {}", e);
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match signal::unix::signal(signal::unix::SignalKind::terminate()) {
            Ok(mut sigterm) => {
                sigterm.recv().await;
            }
            Err(e) => {
                tracing::error!("Failed to install SIGTERM handler: {}", e);
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }

    tracing::info!("Shutdown signal received");
}
