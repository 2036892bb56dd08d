use axum::{extract::State, Json};
use serde_json::{json, Value};

use crate::state::AppState;

/// GET /health
/// Liveness probe. Reports the service version and which model backs the analysis step.
pub async fn health_handler(State(state): State<AppState>) -> Json<Value> {
    Json(json!({
        "status": "ok",
        "service": "cv-optimizer",
        "version": env!("CARGO_PKG_VERSION"),
        "model": state.model.model_name(),
    }))
}
