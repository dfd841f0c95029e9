//! HTTP handlers for symptom-service.

pub mod check;
pub mod health;
pub mod status;

pub use check::{check_symptoms, history};
pub use health::{health_check, metrics_endpoint, readiness_check};
pub use status::root;
