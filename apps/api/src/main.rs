mod analysis;
mod call_log;
mod config;
mod db;
mod errors;
mod llm_client;
mod routes;
mod state;
mod store;
#[cfg(test)]
mod testing;

use std::fs::OpenOptions;
use std::net::SocketAddr;
use std::sync::{Arc, Mutex};

use anyhow::{Context, Result};
use tower::ServiceBuilder;
use tower_http::{cors::CorsLayer, trace::TraceLayer};
use tracing::{info, warn};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use crate::analysis::Analyzer;
use crate::call_log::SqliteCallLogger;
use crate::config::Config;
use crate::llm_client::{LlmClient, LlmEndpoint};
use crate::routes::build_router;
use crate::state::AppState;
use crate::store::{PromptStore, ResumeStore};

#[tokio::main]
async fn main() -> Result<()> {
    // Load configuration first (fails on an unparseable PORT)
    let config = Config::from_env()?;

    init_tracing(&config)?;

    info!("Starting Tailor v{}", env!("CARGO_PKG_VERSION"));
    info!("Data directory: {}", config.data_dir.display());
    info!("Call log store: {}", config.log_db_path.display());

    // Initialize LLM client. Without a key the server still serves résumés;
    // every analysis then fails with a configuration error.
    let llm: Option<Arc<dyn LlmEndpoint>> = match &config.anthropic_api_key {
        Some(key) => {
            let client: Arc<dyn LlmEndpoint> =
                Arc::new(LlmClient::new(key.clone()).context("Failed to build HTTP client")?);
            info!("LLM client initialized (model: {})", config.model);
            Some(client)
        }
        None => {
            warn!("ANTHROPIC_API_KEY is not set; analysis requests will be rejected");
            None
        }
    };

    let analyzer = Analyzer::new(
        llm,
        PromptStore::new(config.prompts_dir()),
        Arc::new(SqliteCallLogger::new(&config.log_db_path)),
        config.model.clone(),
    );

    let resumes = ResumeStore::new(config.resumes_dir());
    match resumes.list().await {
        Ok(found) if found.is_empty() => warn!(
            "No resumes found in {}. Add some .typ files.",
            config.resumes_dir().display()
        ),
        Ok(found) => info!("Found {} resume(s)", found.len()),
        Err(e) => warn!("Failed to list resumes: {e}"),
    }

    let state = AppState {
        analyzer: Arc::new(analyzer),
        resumes,
    };

    let app = build_router(state).layer(
        ServiceBuilder::new()
            .layer(TraceLayer::new_for_http())
            .layer(CorsLayer::permissive()),
    );

    let addr: SocketAddr = format!("0.0.0.0:{}", config.port).parse()?;
    info!("Listening on {addr}");

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    info!("Tailor shut down");
    Ok(())
}

/// Structured logging to stdout and, without colors, to the application log file.
fn init_tracing(config: &Config) -> Result<()> {
    if let Some(parent) = config.app_log_path.parent().filter(|p| !p.as_os_str().is_empty()) {
        std::fs::create_dir_all(parent)
            .with_context(|| format!("Failed to create log directory {}", parent.display()))?;
    }
    let log_file = OpenOptions::new()
        .create(true)
        .append(true)
        .open(&config.app_log_path)
        .with_context(|| format!("Failed to open {}", config.app_log_path.display()))?;

    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| {
            EnvFilter::new(format!("{}={}", env!("CARGO_PKG_NAME"), &config.rust_log))
        }))
        .with(tracing_subscriber::fmt::layer())
        .with(
            tracing_subscriber::fmt::layer()
                .with_ansi(false)
                .with_writer(Mutex::new(log_file)),
        )
        .init();

    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        warn!("Failed to listen for shutdown signal: {e}");
        std::future::pending::<()>().await;
    }
    info!("Shutdown signal received");
}
