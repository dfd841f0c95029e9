//! Suggestion provider abstractions and implementations.
//!
//! A provider turns a (trimmed, non-blank) symptom description into a
//! free-text suggestion. The concrete provider is chosen once at startup.

pub mod groq;
pub mod mock;

pub use groq::{Completion, GroqConfig, GroqProvider};
pub use mock::MockSuggestionProvider;

use async_trait::async_trait;
use thiserror::Error;

/// System message sent ahead of every prompt.
pub const SYSTEM_PROMPT: &str = "You are a medical assistant (educational only).";

/// Error type for provider operations.
#[derive(Error, Debug)]
pub enum ProviderError {
    #[error("Provider not configured: {0}")]
    NotConfigured(String),

    #[error("Network error: {0}")]
    NetworkError(String),

    #[error("Unauthorized: {0}")]
    Unauthorized(String),

    #[error("Rate limited")]
    RateLimited,

    #[error("Invalid request: {0}")]
    InvalidRequest(String),

    #[error("API error: {0}")]
    ApiError(String),
}

impl ProviderError {
    /// Short label used for metrics.
    pub fn error_type(&self) -> &'static str {
        match self {
            ProviderError::NotConfigured(_) => "not_configured",
            ProviderError::NetworkError(_) => "network",
            ProviderError::Unauthorized(_) => "unauthorized",
            ProviderError::RateLimited => "rate_limited",
            ProviderError::InvalidRequest(_) => "invalid_request",
            ProviderError::ApiError(_) => "api",
        }
    }
}

/// Trait for symptom suggestion providers (Groq, mock).
#[async_trait]
pub trait SuggestionProvider: Send + Sync {
    /// Provider name, used in logs and metric labels.
    fn name(&self) -> &'static str;

    /// Generate a suggestion for the given symptoms.
    async fn generate(&self, symptoms: &str) -> Result<String, ProviderError>;
}

/// Instruction prompt wrapping the user's symptom text.
pub fn build_prompt(symptoms: &str) -> String {
    format!(
        "You are a helpful healthcare assistant (educational only). \
         User symptoms: {}. List 2-3 possible conditions and safe next steps. \
         Include an educational disclaimer that this is not medical advice.",
        symptoms
    )
}
