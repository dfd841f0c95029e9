use axum::{extract::State, Json};
use axum_extra::extract::WithRejection;
use serde::{Deserialize, Serialize};

use crate::models::QueryRecord;
use crate::startup::AppState;
use service_core::error::AppError;

#[derive(Debug, Deserialize)]
pub struct CheckRequest {
    pub symptoms: String,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct CheckResponse {
    pub suggestion: String,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct HistoryResponse {
    pub history: Vec<QueryRecord>,
}

#[tracing::instrument(skip(state, request))]
pub async fn check_symptoms(
    State(state): State<AppState>,
    WithRejection(Json(request), _): WithRejection<Json<CheckRequest>, AppError>,
) -> Result<Json<CheckResponse>, AppError> {
    let suggestion = state.checker.check(&request.symptoms).await?;
    Ok(Json(CheckResponse { suggestion }))
}

#[tracing::instrument(skip(state))]
pub async fn history(State(state): State<AppState>) -> Result<Json<HistoryResponse>, AppError> {
    let history = state.checker.history().await?;
    Ok(Json(HistoryResponse { history }))
}
