pub mod health;

use axum::{
    routing::{get, post},
    Router,
};

use crate::analysis::handlers;
use crate::state::AppState;

pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health::health_handler))
        .route("/api/v1/resumes", get(handlers::handle_list_resumes))
        .route("/api/v1/resumes/:id", get(handlers::handle_get_resume))
        .route("/api/v1/analysis", post(handlers::handle_analyze))
        .route("/api/v1/analysis/rescore", post(handlers::handle_rescore))
        .with_state(state)
}
