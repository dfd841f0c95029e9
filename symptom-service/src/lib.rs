//! Symptom Service - LLM-backed symptom suggestions with a persisted history.

pub mod config;
pub mod handlers;
pub mod models;
pub mod services;
pub mod startup;
