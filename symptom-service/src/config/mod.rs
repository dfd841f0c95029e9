use serde::Deserialize;
use service_core::config as core_config;
use service_core::error::AppError;
use std::env;

pub const DEFAULT_GROQ_MODEL: &str = "llama-3.1-8b-instant";
pub const DEFAULT_GROQ_API_BASE: &str = "https://api.groq.com/openai/v1";
pub const DEFAULT_DATABASE_PATH: &str = "history.db";

#[derive(Debug, Clone, Deserialize)]
pub struct SymptomConfig {
    #[serde(flatten)]
    pub common: core_config::Config,
    pub provider: ProviderConfig,
    pub database: DatabaseConfig,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ProviderConfig {
    /// Force the canned mock provider regardless of credentials.
    pub use_mock: bool,
    /// Groq credential. Must be present in the environment; blank selects mock mode.
    pub api_key: String,
    pub model: String,
    pub api_base: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct DatabaseConfig {
    /// SQLite file holding the query history.
    pub path: String,
}

impl SymptomConfig {
    pub fn load() -> Result<Self, AppError> {
        let common_config = core_config::Config::load()?;
        let is_prod = env::var("ENVIRONMENT").unwrap_or_else(|_| "dev".to_string()) == "prod";

        Ok(SymptomConfig {
            common: common_config,
            provider: ProviderConfig {
                use_mock: parse_flag(&get_env("USE_MOCK", Some("0"), is_prod)?),
                api_key: get_env("GROQ_API_KEY", None, is_prod)?,
                model: get_env("GROQ_MODEL", Some(DEFAULT_GROQ_MODEL), is_prod)?,
                api_base: get_env("GROQ_API_BASE", Some(DEFAULT_GROQ_API_BASE), is_prod)?,
            },
            database: DatabaseConfig {
                path: get_env("DATABASE_PATH", Some(DEFAULT_DATABASE_PATH), is_prod)?,
            },
        })
    }
}

impl ProviderConfig {
    /// Whether requests will be served by the mock provider.
    pub fn mock_mode(&self) -> bool {
        self.use_mock || self.api_key.trim().is_empty()
    }
}

/// Only the literal `1` turns a flag on.
fn parse_flag(value: &str) -> bool {
    value.trim() == "1"
}

fn get_env(key: &str, default: Option<&str>, is_prod: bool) -> Result<String, AppError> {
    match env::var(key) {
        Ok(val) => Ok(val),
        Err(_) => {
            if is_prod {
                Err(AppError::ConfigError(anyhow::anyhow!(
                    "{} is required in production but not set",
                    key
                )))
            } else if let Some(def) = default {
                Ok(def.to_string())
            } else {
                Err(AppError::ConfigError(anyhow::anyhow!(
                    "{} is required but not set",
                    key
                )))
            }
        }
    }
}
