use crate::error::AppError;
use axum::response::{IntoResponse, Response};
use std::any::Any;

/// Turns a handler panic into a logged 500, for `CatchPanicLayer::custom`.
pub fn handle_panic(err: Box<dyn Any + Send + 'static>) -> Response {
    let message = if let Some(s) = err.downcast_ref::<String>() {
        s.clone()
    } else if let Some(s) = err.downcast_ref::<&str>() {
        s.to_string()
    } else {
        "unknown panic payload".to_string()
    };

    AppError::InternalError(anyhow::anyhow!("Handler panicked: {}", message)).into_response()
}
