//! Test doubles for the two injected collaborators of the orchestrator.

use std::collections::VecDeque;
use std::sync::Mutex;

use async_trait::async_trait;

use crate::call_log::{CallLogger, LogRecord};
use crate::llm_client::{CompletionRequest, ContentBlock, LlmEndpoint, LlmError, LlmResponse, Usage};

/// What the endpoint was asked, captured by value.
#[derive(Debug, Clone)]
pub struct RecordedCall {
    pub model: String,
    pub system: String,
    pub user: String,
    pub max_tokens: u32,
}

/// Replays queued responses in order and remembers every request.
#[derive(Default)]
pub struct ScriptedEndpoint {
    responses: Mutex<VecDeque<Result<LlmResponse, LlmError>>>,
    calls: Mutex<Vec<RecordedCall>>,
}

impl ScriptedEndpoint {
    pub fn replying(text: &str) -> Self {
        let endpoint = Self::default();
        endpoint.push(Ok(text_response(text, 900, 120)));
        endpoint
    }

    pub fn failing(err: LlmError) -> Self {
        let endpoint = Self::default();
        endpoint.push(Err(err));
        endpoint
    }

    pub fn push(&self, response: Result<LlmResponse, LlmError>) {
        self.responses.lock().unwrap().push_back(response);
    }

    pub fn calls(&self) -> Vec<RecordedCall> {
        self.calls.lock().unwrap().clone()
    }
}

#[async_trait]
impl LlmEndpoint for ScriptedEndpoint {
    async fn complete(&self, request: CompletionRequest<'_>) -> Result<LlmResponse, LlmError> {
        self.calls.lock().unwrap().push(RecordedCall {
            model: request.model.to_string(),
            system: request.system.to_string(),
            user: request.user.to_string(),
            max_tokens: request.max_tokens,
        });
        self.responses
            .lock()
            .unwrap()
            .pop_front()
            .unwrap_or(Err(LlmError::EmptyContent))
    }
}

pub fn text_response(text: &str, input_tokens: u32, output_tokens: u32) -> LlmResponse {
    LlmResponse {
        content: vec![ContentBlock {
            block_type: "text".to_string(),
            text: Some(text.to_string()),
        }],
        usage: Usage {
            input_tokens,
            output_tokens,
        },
    }
}

/// Keeps every record in memory.
#[derive(Default)]
pub struct RecordingCallLogger {
    records: Mutex<Vec<LogRecord>>,
}

impl RecordingCallLogger {
    pub fn records(&self) -> Vec<LogRecord> {
        self.records.lock().unwrap().clone()
    }
}

#[async_trait]
impl CallLogger for RecordingCallLogger {
    async fn record(&self, record: LogRecord) {
        self.records.lock().unwrap().push(record);
    }
}
