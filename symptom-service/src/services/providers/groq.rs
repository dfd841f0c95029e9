//! Groq provider implementation.
//!
//! Sends the symptom prompt to Groq's OpenAI-compatible chat completions
//! endpoint and extracts the first choice's text.

use super::{build_prompt, ProviderError, SuggestionProvider, SYSTEM_PROMPT};
use async_trait::async_trait;
use reqwest::{Client, StatusCode};
use serde::{Deserialize, Serialize};

/// Groq provider configuration.
#[derive(Debug, Clone)]
pub struct GroqConfig {
    pub api_key: String,
    pub model: String,
    pub api_base: String,
}

/// Groq chat-completion provider.
pub struct GroqProvider {
    config: GroqConfig,
    client: Client,
}

impl GroqProvider {
    pub const NAME: &'static str = "groq";

    /// Requests use reqwest's default transport timeouts.
    pub fn new(config: GroqConfig) -> Result<Self, ProviderError> {
        let client = Client::builder().build().map_err(|e| {
            ProviderError::NotConfigured(format!("Failed to create HTTP client: {}", e))
        })?;

        Ok(Self { config, client })
    }

    pub fn model(&self) -> &str {
        &self.config.model
    }

    fn api_url(&self) -> String {
        format!(
            "{}/chat/completions",
            self.config.api_base.trim_end_matches('/')
        )
    }

    fn build_request<'a>(&'a self, symptoms: &str) -> ChatCompletionRequest<'a> {
        ChatCompletionRequest {
            model: &self.config.model,
            messages: vec![
                ChatMessage {
                    role: "system",
                    content: SYSTEM_PROMPT.to_string(),
                },
                ChatMessage {
                    role: "user",
                    content: build_prompt(symptoms),
                },
            ],
        }
    }
}

/// Map a non-success HTTP status onto the provider error taxonomy.
fn status_error(status: StatusCode, body: String) -> ProviderError {
    match status {
        StatusCode::UNAUTHORIZED | StatusCode::FORBIDDEN => {
            ProviderError::Unauthorized(format!("Groq API rejected credentials ({})", status))
        }
        StatusCode::TOO_MANY_REQUESTS => ProviderError::RateLimited,
        s if s.is_client_error() => {
            ProviderError::InvalidRequest(format!("Groq API error {}: {}", status, body))
        }
        _ => ProviderError::ApiError(format!("Groq API error {}: {}", status, body)),
    }
}

#[async_trait]
impl SuggestionProvider for GroqProvider {
    fn name(&self) -> &'static str {
        Self::NAME
    }

    async fn generate(&self, symptoms: &str) -> Result<String, ProviderError> {
        let request = self.build_request(symptoms);

        tracing::debug!(
            model = %self.config.model,
            symptoms_len = symptoms.len(),
            "Sending request to Groq API"
        );

        let response = self
            .client
            .post(self.api_url())
            .bearer_auth(&self.config.api_key)
            .json(&request)
            .send()
            .await
            .map_err(|e| ProviderError::NetworkError(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            let error_text = response.text().await.unwrap_or_default();
            return Err(status_error(status, error_text));
        }

        let body = response
            .text()
            .await
            .map_err(|e| ProviderError::NetworkError(e.to_string()))?;

        let completion = Completion::parse(&body);
        if matches!(completion, Completion::RawFallback(_)) {
            tracing::warn!(
                model = %self.config.model,
                "Unexpected Groq response shape, returning raw body"
            );
        }

        Ok(completion.into_text())
    }
}

/// Outcome of reading a successful completion body.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Completion {
    /// `choices[0].message.content`, trimmed.
    StructuredText(String),
    /// The body as received, when it does not have the expected shape.
    RawFallback(String),
}

impl Completion {
    /// Best-effort extraction; never fails.
    pub fn parse(body: &str) -> Self {
        serde_json::from_str::<ChatCompletionResponse>(body)
            .ok()
            .and_then(|response| response.choices.into_iter().next())
            .and_then(|choice| choice.message.content)
            .map(|content| Completion::StructuredText(content.trim().to_string()))
            .unwrap_or_else(|| Completion::RawFallback(body.to_string()))
    }

    pub fn into_text(self) -> String {
        match self {
            Completion::StructuredText(text) | Completion::RawFallback(text) => text,
        }
    }
}

// ============================================================================
// Groq API Request/Response Types
// ============================================================================

#[derive(Debug, Serialize)]
struct ChatCompletionRequest<'a> {
    model: &'a str,
    messages: Vec<ChatMessage>,
}

#[derive(Debug, Serialize)]
struct ChatMessage {
    role: &'static str,
    content: String,
}

#[derive(Debug, Deserialize)]
struct ChatCompletionResponse {
    #[serde(default)]
    choices: Vec<Choice>,
}

#[derive(Debug, Deserialize)]
struct Choice {
    message: ChoiceMessage,
}

#[derive(Debug, Deserialize)]
struct ChoiceMessage {
    #[serde(default)]
    content: Option<String>,
}
