use std::path::PathBuf;

use anyhow::{Context, Result};

/// Default Anthropic model used when `LLM_MODEL` is not set.
pub const DEFAULT_MODEL: &str = "claude-haiku-4-5-20251001";

/// Application configuration loaded from environment variables.
///
/// The API key is optional here: the server still starts without one so the
/// résumé listing keeps working, and each analysis fails with a configuration
/// error instead.
#[derive(Debug, Clone)]
pub struct Config {
    pub anthropic_api_key: Option<String>,
    pub model: String,
    pub data_dir: PathBuf,
    pub log_db_path: PathBuf,
    pub app_log_path: PathBuf,
    pub port: u16,
    pub rust_log: String,
}

impl Config {
    pub fn from_env() -> Result<Self> {
        dotenvy::dotenv().ok(); // load .env if present; ignore if missing

        let data_dir = PathBuf::from(optional_env("DATA_DIR").unwrap_or_else(|| "data".into()));

        Ok(Config {
            anthropic_api_key: optional_env("ANTHROPIC_API_KEY"),
            model: optional_env("LLM_MODEL").unwrap_or_else(|| DEFAULT_MODEL.to_string()),
            log_db_path: optional_env("LOG_DB_PATH")
                .map(PathBuf::from)
                .unwrap_or_else(|| data_dir.join("logs").join("history.db")),
            app_log_path: optional_env("APP_LOG_PATH")
                .map(PathBuf::from)
                .unwrap_or_else(|| data_dir.join("logs").join("app.log")),
            port: std::env::var("PORT")
                .unwrap_or_else(|_| "8080".to_string())
                .parse::<u16>()
                .context("PORT must be a valid port number")?,
            rust_log: std::env::var("RUST_LOG").unwrap_or_else(|_| "info".to_string()),
            data_dir,
        })
    }

    /// Directory holding `<name>.txt` prompt templates.
    pub fn prompts_dir(&self) -> PathBuf {
        self.data_dir.join("prompts")
    }

    /// Directory holding the Typst résumé sources.
    pub fn resumes_dir(&self) -> PathBuf {
        self.data_dir.join("personal")
    }
}

/// Reads an env var, treating an empty or whitespace-only value as unset.
fn optional_env(key: &str) -> Option<String> {
    std::env::var(key)
        .ok()
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}
