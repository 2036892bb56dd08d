//! Axum route handler for the optimize endpoint.

use axum::{
    extract::{
        multipart::{MultipartError, MultipartRejection},
        Multipart, State,
    },
    http::StatusCode,
    Json,
};
use bytes::Bytes;
use tracing::debug;

use crate::errors::AppError;
use crate::optimize::pipeline::{run_optimization, warn_if_not_pdf, OptimizeInput, OptimizeResponse};
use crate::state::AppState;

const CV_FIELD: &str = "cv";
const JOB_DESCRIPTION_FIELD: &str = "jobDescription";
const FALLBACK_FILE_NAME: &str = "cv.pdf";

/// POST /api/optimize-for-job
///
/// Multipart form: `cv` (PDF file) and `jobDescription` (text).
/// Both are validated before anything is stored or sent to the model.
/// A body that is not a multipart form carries no file at all.
pub async fn handle_optimize(
    State(state): State<AppState>,
    multipart: Result<Multipart, MultipartRejection>,
) -> Result<Json<OptimizeResponse>, AppError> {
    let mut multipart = multipart.map_err(|rejection| {
        debug!(reason = %rejection, "Optimize request is not a multipart form");
        AppError::MissingInput("Missing CV file".to_string())
    })?;
    let limit = state.config.max_upload_bytes;

    let mut cv: Option<(String, Bytes)> = None;
    let mut job_description = String::new();

    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| read_error(e, "upload", limit))?
    {
        let name = field.name().unwrap_or("").to_string();
        match name.as_str() {
            CV_FIELD => {
                let file_name = field
                    .file_name()
                    .filter(|n| !n.is_empty())
                    .unwrap_or(FALLBACK_FILE_NAME)
                    .to_string();
                let data = field
                    .bytes()
                    .await
                    .map_err(|e| read_error(e, "CV file", limit))?;
                // Browsers send an empty part when no file was chosen.
                if !data.is_empty() {
                    cv = Some((file_name, data));
                }
            }
            JOB_DESCRIPTION_FIELD => {
                job_description = field
                    .text()
                    .await
                    .map_err(|e| read_error(e, "job description", limit))?;
            }
            other => debug!(field = other, "Ignoring unexpected form field"),
        }
    }

    let Some((file_name, bytes)) = cv else {
        return Err(AppError::MissingInput("Missing CV file".to_string()));
    };
    if job_description.trim().is_empty() {
        return Err(AppError::MissingInput("Missing job description".to_string()));
    }
    warn_if_not_pdf(&file_name, &bytes);

    let response = run_optimization(
        &state,
        OptimizeInput {
            file_name,
            bytes,
            job_description,
        },
    )
    .await?;

    Ok(Json(response))
}

/// Keeps the body-limit cause visible; every other read failure is a malformed form.
fn read_error(e: MultipartError, what: &str, limit: usize) -> AppError {
    if e.status() == StatusCode::PAYLOAD_TOO_LARGE {
        AppError::PayloadTooLarge(format!("Upload exceeds the {limit}-byte limit"))
    } else {
        AppError::MissingInput(format!("Failed to read {what}: {}", e.body_text()))
    }
}
