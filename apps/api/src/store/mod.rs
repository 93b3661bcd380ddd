// File-backed stores for prompt templates and résumé sources.
// Both are plain lookups: nothing is cached, every call hits the filesystem.

pub mod prompts;
pub mod resumes;

pub use prompts::PromptStore;
pub use resumes::{ResumeEntry, ResumeStore};

use thiserror::Error;

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("Resume not found: {0}")]
    NotFound(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}
