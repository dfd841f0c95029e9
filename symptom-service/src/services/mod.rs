pub mod checker;
pub mod database;
pub mod metrics;
pub mod providers;

pub use checker::{CheckError, SymptomChecker};
pub use database::{HistoryDb, StoreError};
pub use metrics::{get_metrics, init_metrics};
pub use providers::{
    GroqConfig, GroqProvider, MockSuggestionProvider, ProviderError, SuggestionProvider,
};
