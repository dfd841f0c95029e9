//! Domain models for the symptom service.

pub mod record;

pub use record::QueryRecord;
