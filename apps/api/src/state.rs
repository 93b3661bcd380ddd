use std::sync::Arc;

use crate::analysis::Analyzer;
use crate::store::ResumeStore;

/// Shared application state injected into all route handlers via Axum extractors.
#[derive(Clone)]
pub struct AppState {
    pub analyzer: Arc<Analyzer>,
    pub resumes: ResumeStore,
}
