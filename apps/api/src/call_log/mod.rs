//! Call Logger: one append-only record per LLM invocation.
//!
//! Recording never fails to the caller: a broken log store must not abort an
//! analysis, so storage errors are reported through `tracing` and dropped.

use std::path::PathBuf;

use async_trait::async_trait;
use chrono::{DateTime, SecondsFormat, Utc};
use serde::Serialize;
use sqlx::Connection;
use tracing::{info, warn};

use crate::db::open_log_store;
use crate::llm_client::Usage;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum CallStatus {
    Success,
    Error,
}

impl CallStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            CallStatus::Success => "success",
            CallStatus::Error => "error",
        }
    }
}

/// Metadata for a single LLM call. Token counts are present iff the call succeeded.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct LogRecord {
    pub ts: DateTime<Utc>,
    pub feature: String,
    pub resume_filename: Option<String>,
    pub model: String,
    pub input_tokens: Option<u32>,
    pub output_tokens: Option<u32>,
    pub duration_ms: u64,
    pub status: CallStatus,
    pub error_message: Option<String>,
}

impl LogRecord {
    pub fn success(
        feature: &str,
        resume_filename: Option<&str>,
        model: &str,
        usage: Usage,
        duration_ms: u64,
    ) -> Self {
        Self {
            ts: Utc::now(),
            feature: feature.to_string(),
            resume_filename: resume_filename.map(String::from),
            model: model.to_string(),
            input_tokens: Some(usage.input_tokens),
            output_tokens: Some(usage.output_tokens),
            duration_ms,
            status: CallStatus::Success,
            error_message: None,
        }
    }

    pub fn error(
        feature: &str,
        resume_filename: Option<&str>,
        model: &str,
        error_message: String,
        duration_ms: u64,
    ) -> Self {
        Self {
            ts: Utc::now(),
            feature: feature.to_string(),
            resume_filename: resume_filename.map(String::from),
            model: model.to_string(),
            input_tokens: None,
            output_tokens: None,
            duration_ms,
            status: CallStatus::Error,
            error_message: Some(error_message),
        }
    }
}

#[async_trait]
pub trait CallLogger: Send + Sync {
    async fn record(&self, record: LogRecord);
}

/// Appends records to the `llm_logs` table of a local SQLite file.
#[derive(Debug, Clone)]
pub struct SqliteCallLogger {
    path: PathBuf,
}

impl SqliteCallLogger {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    async fn append(&self, record: &LogRecord) -> anyhow::Result<()> {
        let mut conn = open_log_store(&self.path).await?;

        sqlx::query(
            r#"
            INSERT INTO llm_logs
                (ts, feature, resume_filename, model, input_tokens, output_tokens,
                 duration_ms, status, error_message)
            VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?)
            "#,
        )
        .bind(record.ts.to_rfc3339_opts(SecondsFormat::Micros, false))
        .bind(&record.feature)
        .bind(&record.resume_filename)
        .bind(&record.model)
        .bind(record.input_tokens.map(i64::from))
        .bind(record.output_tokens.map(i64::from))
        .bind(i64::try_from(record.duration_ms).unwrap_or(i64::MAX))
        .bind(record.status.as_str())
        .bind(&record.error_message)
        .execute(&mut conn)
        .await?;

        conn.close().await?;
        Ok(())
    }
}

#[async_trait]
impl CallLogger for SqliteCallLogger {
    async fn record(&self, record: LogRecord) {
        match self.append(&record).await {
            Ok(()) => info!(
                "Logged LLM call: feature={} status={} duration={}ms",
                record.feature,
                record.status.as_str(),
                record.duration_ms
            ),
            Err(e) => warn!(
                "Failed to log LLM call to {}: {e:#} (feature={} status={})",
                self.path.display(),
                record.feature,
                record.status.as_str()
            ),
        }
    }
}
