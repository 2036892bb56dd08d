use axum::{
    extract::{Path, State},
    http::{header, StatusCode},
    response::{IntoResponse, Response},
};
use tracing::error;

use crate::errors::AppError;
use crate::store::StoreError;
use crate::state::AppState;

/// GET /api/download/:filename
///
/// Streams a previously generated PDF as an attachment. Unknown or unsafe names are 404;
/// any other read failure is a plain-text 500.
pub async fn handle_download(
    State(state): State<AppState>,
    Path(filename): Path<String>,
) -> Response {
    match state.store.read_generated(&filename).await {
        Ok(bytes) => (
            [
                (header::CONTENT_TYPE, "application/pdf".to_string()),
                (
                    header::CONTENT_DISPOSITION,
                    format!("attachment; filename=\"{filename}\""),
                ),
            ],
            bytes,
        )
            .into_response(),
        Err(e @ (StoreError::NotFound(_) | StoreError::InvalidName(_))) => {
            AppError::from(e).into_response()
        }
        Err(e) => {
            error!(filename = %filename, error = %e, "Failed to read generated document");
            (StatusCode::INTERNAL_SERVER_ERROR, "Server error").into_response()
        }
    }
}
