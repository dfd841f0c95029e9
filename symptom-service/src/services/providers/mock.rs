//! Mock provider used when no Groq credential is available.

use super::{ProviderError, SuggestionProvider};
use async_trait::async_trait;

/// Deterministic stand-in for the LLM. Never fails.
#[derive(Debug, Default, Clone, Copy)]
pub struct MockSuggestionProvider;

impl MockSuggestionProvider {
    pub const NAME: &'static str = "mock";

    pub fn new() -> Self {
        Self
    }

    /// Canned suggestion embedding the literal symptoms.
    pub fn suggestion_for(symptoms: &str) -> String {
        format!(
            "**(MOCK)** Disclaimer: Educational only.\n\n\
             Symptoms received: {}\n\n\
             Possible conditions: Common viral infection, Seasonal flu (educational guess).\n\
             Next steps: Rest, hydrate, monitor temperature, consult a doctor if worsening.\n",
            symptoms
        )
    }
}

#[async_trait]
impl SuggestionProvider for MockSuggestionProvider {
    fn name(&self) -> &'static str {
        Self::NAME
    }

    async fn generate(&self, symptoms: &str) -> Result<String, ProviderError> {
        Ok(Self::suggestion_for(symptoms))
    }
}
