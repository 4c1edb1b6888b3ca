pub mod health;

use axum::{
    routing::{get, post},
    Router,
};

use crate::extraction::handlers;
use crate::state::AppState;

pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health::health_handler))
        // Extraction API
        .route("/api/v1/extract/resume", post(handlers::handle_extract_resume))
        .route("/api/v1/extract/job", post(handlers::handle_extract_job))
        .route("/api/v1/extract/pair", post(handlers::handle_extract_pair))
        .with_state(state)
}
