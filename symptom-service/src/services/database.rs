//! History store for symptom checks.
//!
//! Backed by a single SQLite file. Every operation opens its own connection,
//! does one unit of work and closes it again; nothing is held between calls.
//! Id assignment is left to SQLite's AUTOINCREMENT primary key.

use crate::models::QueryRecord;
use crate::services::metrics::{record_db_error, record_db_operation};
use sqlx::sqlite::{SqliteConnectOptions, SqliteConnection};
use sqlx::Connection;
use std::path::Path;
use std::time::Instant;
use thiserror::Error;
use tracing::instrument;

const CREATE_HISTORY_TABLE: &str = r#"
    CREATE TABLE IF NOT EXISTS history (
        id INTEGER PRIMARY KEY AUTOINCREMENT,
        symptoms TEXT,
        suggestion TEXT
    )
"#;

/// Error type for history store operations.
#[derive(Error, Debug)]
pub enum StoreError {
    #[error("Failed to open history database: {0}")]
    Connect(#[source] sqlx::Error),

    #[error("History database query failed: {0}")]
    Query(#[source] sqlx::Error),
}

#[derive(Clone)]
pub struct HistoryDb {
    options: SqliteConnectOptions,
}

impl HistoryDb {
    /// The file is created on first use if it does not exist.
    pub fn new(path: impl AsRef<Path>) -> Self {
        let options = SqliteConnectOptions::new()
            .filename(path)
            .create_if_missing(true);
        Self { options }
    }

    async fn acquire(&self, operation: &str) -> Result<SqliteConnection, StoreError> {
        SqliteConnection::connect_with(&self.options)
            .await
            .map_err(|e| {
                tracing::error!(operation, error = %e, "Failed to open history database");
                record_db_error(operation);
                StoreError::Connect(e)
            })
    }

    /// Always runs, whether or not the unit of work succeeded.
    async fn release(conn: SqliteConnection) {
        if let Err(e) = conn.close().await {
            tracing::warn!(error = %e, "Failed to close history database connection");
        }
    }

    fn finish<T>(
        operation: &str,
        started: Instant,
        outcome: Result<T, sqlx::Error>,
    ) -> Result<T, StoreError> {
        record_db_operation(operation, started.elapsed().as_secs_f64());
        outcome.map_err(|e| {
            tracing::error!(operation, error = %e, "History database query failed");
            record_db_error(operation);
            StoreError::Query(e)
        })
    }

    /// Create the history table if it is missing.
    #[instrument(skip(self))]
    pub async fn initialize(&self) -> Result<(), StoreError> {
        let started = Instant::now();
        let mut conn = self.acquire("initialize").await?;
        let outcome = sqlx::query(CREATE_HISTORY_TABLE).execute(&mut conn).await;
        Self::release(conn).await;
        Self::finish("initialize", started, outcome)?;

        tracing::info!("History table ready");
        Ok(())
    }

    /// Insert one record and return its id once committed.
    #[instrument(skip(self, symptoms, suggestion))]
    pub async fn append(&self, symptoms: &str, suggestion: &str) -> Result<i64, StoreError> {
        let started = Instant::now();
        let mut conn = self.acquire("append").await?;
        let outcome = sqlx::query("INSERT INTO history (symptoms, suggestion) VALUES (?, ?)")
            .bind(symptoms)
            .bind(suggestion)
            .execute(&mut conn)
            .await;
        Self::release(conn).await;

        let id = Self::finish("append", started, outcome)?.last_insert_rowid();
        tracing::debug!(record_id = id, "History record appended");
        Ok(id)
    }

    /// Every record, newest first.
    #[instrument(skip(self))]
    pub async fn list_all(&self) -> Result<Vec<QueryRecord>, StoreError> {
        let started = Instant::now();
        let mut conn = self.acquire("list_all").await?;
        let outcome = sqlx::query_as::<_, QueryRecord>(
            "SELECT id, symptoms, suggestion FROM history ORDER BY id DESC",
        )
        .fetch_all(&mut conn)
        .await;
        Self::release(conn).await;

        Self::finish("list_all", started, outcome)
    }

    /// Check database health.
    #[instrument(skip(self))]
    pub async fn health_check(&self) -> Result<(), StoreError> {
        let started = Instant::now();
        let mut conn = self.acquire("health_check").await?;
        let outcome = sqlx::query("SELECT 1").execute(&mut conn).await;
        Self::release(conn).await;

        Self::finish("health_check", started, outcome).map(|_| ())
    }
}
