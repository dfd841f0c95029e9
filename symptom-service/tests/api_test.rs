//! HTTP-level tests for the symptom check and history endpoints.

mod common;

use async_trait::async_trait;
use axum::http::StatusCode;
use common::TestRouter;
use serde_json::json;
use std::sync::Arc;
use symptom_service::services::{
    GroqConfig, GroqProvider, MockSuggestionProvider, ProviderError, SuggestionProvider,
};
use wiremock::matchers::method;
use wiremock::{Mock, MockServer, ResponseTemplate};

struct PanickingProvider;

#[async_trait]
impl SuggestionProvider for PanickingProvider {
    fn name(&self) -> &'static str {
        "panicking"
    }

    async fn generate(&self, _symptoms: &str) -> Result<String, ProviderError> {
        panic!("provider exploded");
    }
}

#[tokio::test]
async fn root_reports_mock_mode() {
    let app = TestRouter::mock().await;

    let (status, body) = app.get("/").await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["message"], "HealBuddy backend is running");
    assert_eq!(body["use_mock"], true);
}

#[tokio::test]
async fn check_returns_mock_suggestion_and_records_it() {
    let app = TestRouter::mock().await;

    let (status, body) = app
        .post_json("/check", json!({"symptoms": "headache and fever"}))
        .await;

    assert_eq!(status, StatusCode::OK);
    let suggestion = body["suggestion"].as_str().expect("suggestion should be a string");
    assert!(suggestion.starts_with("**(MOCK)**"));
    assert!(suggestion.contains("Symptoms received: headache and fever"));

    let (status, body) = app.get("/history").await;
    assert_eq!(status, StatusCode::OK);
    let history = body["history"].as_array().unwrap();
    assert_eq!(history.len(), 1);
    assert_eq!(history[0]["symptoms"], "headache and fever");
    assert_eq!(history[0]["suggestion"], suggestion);
    assert!(history[0]["id"].is_i64());
}

#[tokio::test]
async fn check_trims_surrounding_whitespace() {
    let app = TestRouter::mock().await;

    let (status, body) = app
        .post_json("/check", json!({"symptoms": "\n  sore throat  \t"}))
        .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(
        body["suggestion"],
        MockSuggestionProvider::suggestion_for("sore throat")
    );
    let (_, history) = app.get("/history").await;
    assert_eq!(history["history"][0]["symptoms"], "sore throat");
}

#[tokio::test]
async fn blank_symptoms_are_rejected_and_not_recorded() {
    let app = TestRouter::mock().await;

    for blank in ["", "   ", "\n\t"] {
        let (status, body) = app.post_json("/check", json!({"symptoms": blank})).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["detail"], "No symptoms provided");
    }

    let (_, body) = app.get("/history").await;
    assert!(body["history"].as_array().unwrap().is_empty());
}

#[tokio::test]
async fn missing_symptoms_field_is_a_client_error() {
    let app = TestRouter::mock().await;

    let (status, body) = app.post_json("/check", json!({"text": "cough"})).await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(body["detail"].as_str().unwrap().contains("symptoms"));
    assert!(app.db.list_all().await.unwrap().is_empty());
}

#[tokio::test]
async fn malformed_json_body_returns_400_with_detail() {
    let app = TestRouter::mock().await;

    let request = axum::http::Request::builder()
        .method("POST")
        .uri("/check")
        .header("content-type", "application/json")
        .body(axum::body::Body::from("{\"symptoms\": "))
        .unwrap();
    let (status, body) = common::send(app.router.clone(), request).await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(!body["detail"].as_str().unwrap().is_empty());
    assert!(app.db.list_all().await.unwrap().is_empty());
}

#[tokio::test]
async fn history_is_newest_first_and_stable() {
    let app = TestRouter::mock().await;

    for symptoms in ["first", "second", "third"] {
        let (status, _) = app.post_json("/check", json!({"symptoms": symptoms})).await;
        assert_eq!(status, StatusCode::OK);
    }

    let (_, first_read) = app.get("/history").await;
    let (_, second_read) = app.get("/history").await;
    assert_eq!(first_read, second_read);

    let history = first_read["history"].as_array().unwrap();
    let symptoms: Vec<_> = history.iter().map(|r| r["symptoms"].as_str().unwrap()).collect();
    assert_eq!(symptoms, vec!["third", "second", "first"]);

    let ids: Vec<_> = history.iter().map(|r| r["id"].as_i64().unwrap()).collect();
    assert!(ids.windows(2).all(|w| w[0] > w[1]));
}

#[tokio::test]
async fn upstream_failure_returns_500_and_records_nothing() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(500).set_body_string("model overloaded"))
        .mount(&server)
        .await;

    let provider = GroqProvider::new(GroqConfig {
        api_key: "gsk_test".to_string(),
        model: "llama-3.1-8b-instant".to_string(),
        api_base: server.uri(),
    })
    .unwrap();
    let app = TestRouter::with_provider(Arc::new(provider)).await;

    let (status, body) = app.post_json("/check", json!({"symptoms": "fever"})).await;

    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    let detail = body["detail"].as_str().unwrap();
    assert!(detail.contains("model overloaded"), "detail: {}", detail);

    let (_, history) = app.get("/history").await;
    assert!(history["history"].as_array().unwrap().is_empty());
}

#[tokio::test]
async fn groq_suggestion_flows_through_to_history() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "choices": [{"message": {"role": "assistant", "content": "Likely a cold. Not medical advice."}}]
        })))
        .mount(&server)
        .await;

    let provider = GroqProvider::new(GroqConfig {
        api_key: "gsk_test".to_string(),
        model: "llama-3.1-8b-instant".to_string(),
        api_base: server.uri(),
    })
    .unwrap();
    let app = TestRouter::with_provider(Arc::new(provider)).await;

    let (_, root) = app.get("/").await;
    assert_eq!(root["use_mock"], false);

    let (status, body) = app.post_json("/check", json!({"symptoms": "runny nose"})).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["suggestion"], "Likely a cold. Not medical advice.");

    let (_, history) = app.get("/history").await;
    assert_eq!(
        history["history"][0]["suggestion"],
        "Likely a cold. Not medical advice."
    );
}

#[tokio::test]
async fn store_failure_returns_500_without_suggestion() {
    let app = TestRouter::mock().await;
    let broken = TestRouter::unreachable_store();

    let (status, body) = broken.post_json("/check", json!({"symptoms": "fever"})).await;

    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert!(body.get("suggestion").is_none());
    assert!(body["detail"]
        .as_str()
        .unwrap()
        .contains("Failed to open history database"));

    // The healthy app is unaffected.
    assert!(app.db.list_all().await.unwrap().is_empty());
}

#[tokio::test]
async fn history_store_failure_returns_500() {
    let broken = TestRouter::unreachable_store();

    let (status, body) = broken.get("/history").await;

    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert!(body.get("history").is_none());
    assert!(body["detail"]
        .as_str()
        .unwrap()
        .contains("Failed to open history database"));
}

#[tokio::test]
async fn handler_panic_becomes_internal_error() {
    let app = TestRouter::with_provider(Arc::new(PanickingProvider)).await;

    let (status, body) = app.post_json("/check", json!({"symptoms": "fever"})).await;

    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert!(body["detail"].as_str().unwrap().contains("provider exploded"));
    assert!(app.db.list_all().await.unwrap().is_empty());
}

#[tokio::test]
async fn responses_carry_request_id() {
    let app = TestRouter::mock().await;

    let request = axum::http::Request::builder()
        .uri("/")
        .header("x-request-id", "req-42")
        .body(axum::body::Body::empty())
        .unwrap();
    let response = tower::ServiceExt::oneshot(app.router.clone(), request)
        .await
        .unwrap();

    assert_eq!(response.headers()["x-request-id"], "req-42");
}
