use axum::{extract::State, Json};
use serde::{Deserialize, Serialize};

use crate::startup::AppState;

#[derive(Debug, Serialize, Deserialize)]
pub struct StatusResponse {
    pub message: String,
    pub use_mock: bool,
}

pub async fn root(State(state): State<AppState>) -> Json<StatusResponse> {
    Json(StatusResponse {
        message: "HealBuddy backend is running".to_string(),
        use_mock: state.use_mock,
    })
}
