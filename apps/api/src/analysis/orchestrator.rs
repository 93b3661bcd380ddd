//! Analysis Orchestrator: prompt composition, the LLM call, and call logging.
//!
//! Flow: check credential and prompt pair → compose user message → call
//!       endpoint → log exactly one record → return raw text + usage (or
//!       propagate). A failed check is logged too, without calling.
//!
//! Errors are logged, then propagated. Nothing here retries or swallows a
//! failure; the action handler decides what the user sees.

use std::sync::Arc;
use std::time::Instant;

use serde::Serialize;
use thiserror::Error;
use tracing::{info, warn};

use crate::analysis::mode::AnalysisMode;
use crate::call_log::{CallLogger, LogRecord};
use crate::llm_client::{CompletionRequest, LlmEndpoint, LlmError, Usage};
use crate::store::PromptStore;

#[derive(Debug, Error)]
pub enum AnalysisError {
    #[error("Missing ANTHROPIC_API_KEY: no LLM credential is configured")]
    Configuration,

    #[error("Prompt template '{0}' is missing or empty")]
    PromptMissing(String),

    #[error("LLM call failed: {0}")]
    Upstream(#[from] LlmError),
}

/// One user action's worth of input. Consumed by `Analyzer::analyze`.
#[derive(Debug, Clone)]
pub struct AnalysisRequest {
    pub resume: String,
    pub job_description: String,
    pub mode: AnalysisMode,
    /// Only used to tag the call log record.
    pub resume_id: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AnalysisResult {
    pub text: String,
    pub usage: Usage,
}

/// The system instruction and the user-message template for one mode.
#[derive(Debug, Clone, PartialEq)]
pub struct PromptPair {
    pub system: String,
    pub template: String,
}

pub struct Analyzer {
    /// `None` when no credential is configured.
    llm: Option<Arc<dyn LlmEndpoint>>,
    prompts: PromptStore,
    call_log: Arc<dyn CallLogger>,
    model: String,
}

impl Analyzer {
    pub fn new(
        llm: Option<Arc<dyn LlmEndpoint>>,
        prompts: PromptStore,
        call_log: Arc<dyn CallLogger>,
        model: impl Into<String>,
    ) -> Self {
        Self {
            llm,
            prompts,
            call_log,
            model: model.into(),
        }
    }

    pub fn is_configured(&self) -> bool {
        self.llm.is_some()
    }

    pub fn model(&self) -> &str {
        &self.model
    }

    /// Runs one LLM analysis.
    ///
    /// Exactly one record is written per invocation. Configuration and prompt
    /// errors are recorded with a zero duration and never reach the endpoint.
    pub async fn analyze(&self, request: AnalysisRequest) -> Result<AnalysisResult, AnalysisError> {
        let mode = request.mode;
        let resume_id = request.resume_id.as_deref();

        let (llm, prompts) = match self.prepare(mode).await {
            Ok(ready) => ready,
            Err(e) => {
                warn!("{} analysis not attempted: {e}", mode.feature());
                self.call_log
                    .record(LogRecord::error(
                        mode.feature(),
                        resume_id,
                        &self.model,
                        e.to_string(),
                        0,
                    ))
                    .await;
                return Err(e);
            }
        };
        let user_message = compose_user_message(
            &prompts.template,
            &request.resume,
            &request.job_description,
        );

        info!(
            "Running {} analysis (resume={})",
            mode.feature(),
            resume_id.unwrap_or("-")
        );

        let started = Instant::now();
        let outcome = llm
            .complete(CompletionRequest {
                model: &self.model,
                system: &prompts.system,
                user: &user_message,
                max_tokens: mode.max_tokens(),
            })
            .await
            .and_then(|response| {
                let text = response.text().ok_or(LlmError::EmptyContent)?.to_string();
                Ok(AnalysisResult {
                    text,
                    usage: response.usage,
                })
            });
        let duration_ms = u64::try_from(started.elapsed().as_millis()).unwrap_or(u64::MAX);

        match outcome {
            Ok(result) => {
                self.call_log
                    .record(LogRecord::success(
                        mode.feature(),
                        resume_id,
                        &self.model,
                        result.usage,
                        duration_ms,
                    ))
                    .await;
                Ok(result)
            }
            Err(e) => {
                warn!("{} analysis failed after {duration_ms}ms: {e}", mode.feature());
                self.call_log
                    .record(LogRecord::error(
                        mode.feature(),
                        resume_id,
                        &self.model,
                        e.to_string(),
                        duration_ms,
                    ))
                    .await;
                Err(AnalysisError::Upstream(e))
            }
        }
    }

    /// Everything that must hold before the endpoint is called.
    async fn prepare(
        &self,
        mode: AnalysisMode,
    ) -> Result<(&Arc<dyn LlmEndpoint>, PromptPair), AnalysisError> {
        let llm = self.llm.as_ref().ok_or(AnalysisError::Configuration)?;
        let prompts = self.load_prompt_pair(mode).await?;
        Ok((llm, prompts))
    }

    /// Loads both templates for `mode`, fresh from disk.
    async fn load_prompt_pair(&self, mode: AnalysisMode) -> Result<PromptPair, AnalysisError> {
        let system = self.prompts.load(mode.system_prompt_name()).await;
        let template = self.prompts.load(mode.template_prompt_name()).await;

        for (name, text) in [
            (mode.system_prompt_name(), &system),
            (mode.template_prompt_name(), &template),
        ] {
            if text.trim().is_empty() {
                return Err(AnalysisError::PromptMissing(name.to_string()));
            }
        }

        Ok(PromptPair { system, template })
    }
}

/// Template first, then the résumé, then the job description.
/// The prompt templates are written against this exact layout.
pub fn compose_user_message(template: &str, resume: &str, job_description: &str) -> String {
    format!("{template}\n\nRESUME:\n{resume}\n\nJD:\n{job_description}")
}
