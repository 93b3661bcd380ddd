// Résumé analysis: orchestration of the LLM call, recovery of structured
// results from its text, and the HTTP actions that drive both.
// All LLM calls go through llm_client via the orchestrator.

pub mod handlers;
pub mod interpreter;
pub mod mode;
pub mod orchestrator;
pub mod view;

pub use mode::AnalysisMode;
pub use orchestrator::{AnalysisRequest, Analyzer};
