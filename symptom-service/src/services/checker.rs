//! The symptom check pipeline: validate, ask the provider, persist, respond.
//!
//! A suggestion is only returned once it has been written to the history
//! store, so callers never see an answer that is missing from `/history`.

use crate::models::QueryRecord;
use crate::services::database::{HistoryDb, StoreError};
use crate::services::metrics::{record_check, record_provider_error, record_provider_latency};
use crate::services::providers::{ProviderError, SuggestionProvider};
use service_core::error::AppError;
use std::sync::Arc;
use std::time::Instant;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum CheckError {
    #[error("{0}")]
    InvalidInput(String),

    #[error(transparent)]
    Provider(#[from] ProviderError),

    #[error(transparent)]
    Store(#[from] StoreError),
}

impl From<CheckError> for AppError {
    fn from(err: CheckError) -> Self {
        match err {
            CheckError::InvalidInput(msg) => AppError::BadRequest(anyhow::anyhow!(msg)),
            CheckError::Provider(e) => AppError::UpstreamError(anyhow::Error::new(e)),
            CheckError::Store(e) => AppError::DatabaseError(anyhow::Error::new(e)),
        }
    }
}

#[derive(Clone)]
pub struct SymptomChecker {
    provider: Arc<dyn SuggestionProvider>,
    db: HistoryDb,
}

impl SymptomChecker {
    pub fn new(provider: Arc<dyn SuggestionProvider>, db: HistoryDb) -> Self {
        Self { provider, db }
    }

    #[tracing::instrument(skip(self, raw_symptoms), fields(provider = self.provider.name()))]
    pub async fn check(&self, raw_symptoms: &str) -> Result<String, CheckError> {
        let symptoms = raw_symptoms.trim();
        if symptoms.is_empty() {
            record_check("invalid_input");
            return Err(CheckError::InvalidInput("No symptoms provided".to_string()));
        }

        let provider = self.provider.name();
        let started = Instant::now();
        let suggestion = match self.provider.generate(symptoms).await {
            Ok(suggestion) => suggestion,
            Err(e) => {
                tracing::error!(provider, error = ?e, "Suggestion provider failed");
                record_provider_error(provider, e.error_type());
                record_check("provider_error");
                return Err(e.into());
            }
        };
        record_provider_latency(provider, started.elapsed().as_secs_f64());

        let record_id = match self.db.append(symptoms, &suggestion).await {
            Ok(id) => id,
            Err(e) => {
                record_check("store_error");
                return Err(e.into());
            }
        };

        record_check("ok");
        tracing::info!(
            record_id,
            symptoms_len = symptoms.len(),
            suggestion_len = suggestion.len(),
            "Symptom check recorded"
        );

        Ok(suggestion)
    }

    pub async fn history(&self) -> Result<Vec<QueryRecord>, CheckError> {
        Ok(self.db.list_all().await?)
    }
}
