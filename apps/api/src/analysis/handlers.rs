//! Axum route handlers for résumé browsing, full analysis, and re-scoring.

use axum::{
    extract::{Path, State},
    Json,
};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use tracing::warn;

use crate::analysis::interpreter::{extract_structured, ExtractionError, FullAnalysis, ScoreAnalysis};
use crate::analysis::view::{ImprovementView, RiskView, ScoreView};
use crate::analysis::{AnalysisMode, AnalysisRequest};
use crate::errors::AppError;
use crate::llm_client::Usage;
use crate::state::AppState;
use crate::store::ResumeEntry;

/// How much of an unparseable response is kept in the application log.
const RAW_RESPONSE_LOG_CHARS: usize = 500;

// ────────────────────────────────────────────────────────────────────────────
// Request / Response types
// ────────────────────────────────────────────────────────────────────────────

#[derive(Debug, Serialize)]
pub struct ResumeSourceResponse {
    pub id: String,
    pub source: String,
}

#[derive(Debug, Deserialize)]
pub struct AnalyzeRequest {
    pub resume_id: String,
    pub job_description: String,
}

#[derive(Debug, Serialize)]
pub struct AnalyzeResponse {
    pub resume_id: String,
    /// Starting point for the editor.
    pub source: String,
    pub score: ScoreView,
    pub hard_filter_risk: RiskView,
    pub missing_keywords: Vec<String>,
    pub improvements: Vec<ImprovementView>,
    pub usage: Usage,
}

#[derive(Debug, Deserialize)]
pub struct RescoreRequest {
    /// The edited résumé source, not necessarily what is on disk.
    pub source: String,
    pub job_description: String,
    pub resume_id: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct RescoreResponse {
    pub score: ScoreView,
    pub main_fixes: String,
    pub usage: Usage,
}

// ────────────────────────────────────────────────────────────────────────────
// Handlers
// ────────────────────────────────────────────────────────────────────────────

/// GET /api/v1/resumes
pub async fn handle_list_resumes(
    State(state): State<AppState>,
) -> Result<Json<Vec<ResumeEntry>>, AppError> {
    Ok(Json(state.resumes.list().await?))
}

/// GET /api/v1/resumes/:id
pub async fn handle_get_resume(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<ResumeSourceResponse>, AppError> {
    let source = state.resumes.load(&id).await?;
    Ok(Json(ResumeSourceResponse { id, source }))
}

/// POST /api/v1/analysis
///
/// Full report for a stored résumé. The résumé is loaded before the LLM is
/// called, so an unknown id never costs a call or a log record.
pub async fn handle_analyze(
    State(state): State<AppState>,
    Json(request): Json<AnalyzeRequest>,
) -> Result<Json<AnalyzeResponse>, AppError> {
    require_job_description(&request.job_description)?;

    let source = state.resumes.load(&request.resume_id).await?;

    let result = state
        .analyzer
        .analyze(AnalysisRequest {
            resume: source.clone(),
            job_description: request.job_description,
            mode: AnalysisMode::Full,
            resume_id: Some(request.resume_id.clone()),
        })
        .await?;

    let full = FullAnalysis::from_map(&interpret(&result.text, AnalysisMode::Full)?);

    Ok(Json(AnalyzeResponse {
        resume_id: request.resume_id,
        source,
        score: full.score.into(),
        hard_filter_risk: RiskView::from(&full.hard_filter_risk),
        missing_keywords: full.missing_keywords,
        improvements: full.improvements.iter().map(ImprovementView::from).collect(),
        usage: result.usage,
    }))
}

/// POST /api/v1/analysis/rescore
///
/// Lightweight score for an edited résumé source.
pub async fn handle_rescore(
    State(state): State<AppState>,
    Json(request): Json<RescoreRequest>,
) -> Result<Json<RescoreResponse>, AppError> {
    require_job_description(&request.job_description)?;
    if request.source.trim().is_empty() {
        return Err(AppError::Validation("source cannot be empty".to_string()));
    }

    let result = state
        .analyzer
        .analyze(AnalysisRequest {
            resume: request.source,
            job_description: request.job_description,
            mode: AnalysisMode::Score,
            resume_id: request.resume_id,
        })
        .await?;

    let scored = ScoreAnalysis::from_map(&interpret(&result.text, AnalysisMode::Score)?);

    Ok(Json(RescoreResponse {
        score: scored.score.into(),
        main_fixes: scored.main_fixes,
        usage: result.usage,
    }))
}

fn require_job_description(job_description: &str) -> Result<(), AppError> {
    if job_description.trim().is_empty() {
        return Err(AppError::Validation(
            "Please paste a job description to proceed.".to_string(),
        ));
    }
    Ok(())
}

/// Extracts the JSON object, keeping a truncated copy of the raw text in the
/// application log when nothing can be recovered.
fn interpret(text: &str, mode: AnalysisMode) -> Result<Map<String, Value>, ExtractionError> {
    extract_structured(text).map_err(|e| {
        warn!(
            "No JSON in {} response ({} chars): {}",
            mode.feature(),
            text.chars().count(),
            log_preview(text)
        );
        e
    })
}

/// The first `RAW_RESPONSE_LOG_CHARS` characters of `text`, cut on a char boundary.
fn log_preview(text: &str) -> &str {
    match text.char_indices().nth(RAW_RESPONSE_LOG_CHARS) {
        Some((end, _)) => &text[..end],
        None => text,
    }
}
