#![allow(dead_code)]

use axum::{
    body::Body,
    http::{Request, StatusCode},
    Router,
};
use http_body_util::BodyExt;
use service_core::config::Config as CoreConfig;
use std::sync::Arc;
use symptom_service::config::{DatabaseConfig, ProviderConfig, SymptomConfig};
use symptom_service::services::{HistoryDb, MockSuggestionProvider, SuggestionProvider};
use symptom_service::startup::{build_router, AppState};
use tempfile::TempDir;
use tower::ServiceExt;

pub fn test_config(db_path: &str, provider: ProviderConfig) -> SymptomConfig {
    SymptomConfig {
        common: CoreConfig {
            port: 0,
            log_level: "debug".to_string(),
        },
        provider,
        database: DatabaseConfig {
            path: db_path.to_string(),
        },
    }
}

pub fn mock_provider_config() -> ProviderConfig {
    ProviderConfig {
        use_mock: true,
        api_key: String::new(),
        model: "llama-3.1-8b-instant".to_string(),
        api_base: "http://127.0.0.1:9".to_string(),
    }
}

/// Router over a fresh SQLite file. Keep `_dir` alive for the test's duration.
pub struct TestRouter {
    pub router: Router,
    pub db: HistoryDb,
    _dir: TempDir,
}

impl TestRouter {
    pub async fn with_provider(provider: Arc<dyn SuggestionProvider>) -> Self {
        let dir = tempfile::tempdir().expect("Failed to create temp dir");
        let path = dir.path().join("history.db");
        let db = HistoryDb::new(&path);
        db.initialize().await.expect("Failed to initialize history db");

        let state = AppState::new(provider, db.clone());

        Self {
            router: build_router(state),
            db,
            _dir: dir,
        }
    }

    pub async fn mock() -> Self {
        Self::with_provider(Arc::new(MockSuggestionProvider::new())).await
    }

    /// Router whose history file sits under a directory that does not exist.
    pub fn unreachable_store() -> Self {
        let dir = tempfile::tempdir().expect("Failed to create temp dir");
        let db = HistoryDb::new(dir.path().join("gone").join("history.db"));
        let state = AppState::new(Arc::new(MockSuggestionProvider::new()), db.clone());

        Self {
            router: build_router(state),
            db,
            _dir: dir,
        }
    }

    pub async fn get(&self, uri: &str) -> (StatusCode, serde_json::Value) {
        let request = Request::builder().uri(uri).body(Body::empty()).unwrap();
        send(self.router.clone(), request).await
    }

    pub async fn post_json(
        &self,
        uri: &str,
        body: serde_json::Value,
    ) -> (StatusCode, serde_json::Value) {
        let request = Request::builder()
            .method("POST")
            .uri(uri)
            .header("content-type", "application/json")
            .body(Body::from(body.to_string()))
            .unwrap();
        send(self.router.clone(), request).await
    }
}

pub async fn send(router: Router, request: Request<Body>) -> (StatusCode, serde_json::Value) {
    let response = router.oneshot(request).await.expect("router should respond");
    let status = response.status();
    let bytes = response
        .into_body()
        .collect()
        .await
        .expect("body should be readable")
        .to_bytes();
    let json = serde_json::from_slice(&bytes).unwrap_or(serde_json::Value::Null);
    (status, json)
}
