pub mod download;
pub mod health;

use axum::{
    extract::DefaultBodyLimit,
    routing::{get, post},
    Router,
};

use crate::optimize::handlers;
use crate::state::AppState;

pub fn build_router(state: AppState) -> Router {
    let upload_limit = state.config.max_upload_bytes;

    Router::new()
        .route("/health", get(health::health_handler))
        .route(
            "/api/optimize-for-job",
            post(handlers::handle_optimize).layer(DefaultBodyLimit::max(upload_limit)),
        )
        .route("/api/download/:filename", get(download::handle_download))
        .with_state(state)
}
