use std::path::Path;

use anyhow::{Context, Result};
use sqlx::sqlite::{SqliteConnectOptions, SqliteConnection};
use sqlx::ConnectOptions;

const CREATE_LLM_LOGS: &str = r#"
    CREATE TABLE IF NOT EXISTS llm_logs (
        id INTEGER PRIMARY KEY,
        ts TEXT,
        feature TEXT,
        resume_filename TEXT,
        model TEXT,
        input_tokens INTEGER,
        output_tokens INTEGER,
        duration_ms INTEGER,
        status TEXT,
        error_message TEXT
    )
"#;

/// Opens a fresh connection to the SQLite log store, creating the file, its
/// parent directory, and the `llm_logs` table on first use.
///
/// There is no pool: each caller opens, writes, and closes its own connection.
pub async fn open_log_store(path: &Path) -> Result<SqliteConnection> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        tokio::fs::create_dir_all(parent)
            .await
            .with_context(|| format!("Failed to create log directory {}", parent.display()))?;
    }

    let mut conn = SqliteConnectOptions::new()
        .filename(path)
        .create_if_missing(true)
        .connect()
        .await
        .with_context(|| format!("Failed to open log store {}", path.display()))?;

    sqlx::query(CREATE_LLM_LOGS).execute(&mut conn).await?;

    Ok(conn)
}
