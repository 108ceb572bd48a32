pub mod health;

use axum::{
    extract::DefaultBodyLimit,
    routing::{get, post},
    Router,
};

use crate::analysis::handlers;
use crate::state::AppState;

pub fn build_router(state: AppState) -> Router {
    let body_limit = DefaultBodyLimit::max(state.config.max_upload_bytes);

    Router::new()
        .route("/health", get(health::health_handler))
        // Upload + analysis
        .route("/api/v1/resume/preview", post(handlers::handle_preview))
        .route("/api/v1/analyze", post(handlers::handle_analyze))
        // Session views (one per UI tab)
        .route("/api/v1/analysis", get(handlers::handle_get_analysis))
        .route(
            "/api/v1/analysis/overview",
            get(handlers::handle_overview_tab),
        )
        .route(
            "/api/v1/analysis/insights",
            get(handlers::handle_insights_tab),
        )
        .route(
            "/api/v1/analysis/interview-prep",
            get(handlers::handle_interview_tab),
        )
        .route(
            "/api/v1/analysis/industry",
            get(handlers::handle_industry_tab),
        )
        .layer(body_limit)
        .with_state(state)
}
