pub mod health;

use axum::{extract::DefaultBodyLimit, routing::get, routing::post, Router};

use crate::analysis::handlers as analysis;
use crate::extraction::handlers as extraction;
use crate::state::AppState;

pub fn build_router(state: AppState) -> Router {
    let body_limit = DefaultBodyLimit::max(state.max_upload_bytes);

    Router::new()
        .route("/health", get(health::health_handler))
        // Routes used by the mobile client
        .route("/extract-text", post(extraction::handle_extract_text))
        .route("/resume-gap-analysis", post(analysis::handle_gap_analysis))
        // Documents API
        .route(
            "/api/v1/documents/extract",
            post(extraction::handle_upload_extract),
        )
        // Analysis stages, individually
        .route("/api/v1/skills/extract", post(analysis::handle_extract_skills))
        .route("/api/v1/skills/match", post(analysis::handle_match_skills))
        .route(
            "/api/v1/projects/suggest",
            post(analysis::handle_suggest_projects),
        )
        .layer(body_limit)
        .with_state(state)
}
