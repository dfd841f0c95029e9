use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// One persisted symptom query and the suggestion that answered it.
///
/// `id` is assigned by the store on insert and never changes; records are
/// neither updated nor deleted through the service.
///
/// The text columns are nullable in the schema, so rows written by other
/// tools may carry NULL; those serialise as `null`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, FromRow)]
pub struct QueryRecord {
    pub id: i64,
    pub symptoms: Option<String>,
    pub suggestion: Option<String>,
}
