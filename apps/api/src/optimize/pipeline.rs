//! Optimization pipeline: store → analyze → render → clean up → respond.
//!
//! The upload is held in a `TempUpload` guard for the whole run, so it is removed on
//! every exit path. The analysis step is the only suspension point of material length
//! and is bounded by `Config::analysis_timeout`.

use bytes::Bytes;
use serde::Serialize;
use tracing::{info, warn};

use crate::analysis::{analyze_cv, AnalysisResult};
use crate::errors::AppError;
use crate::render::render_to_store;
use crate::state::AppState;

/// Validated request input, ready for the pipeline.
#[derive(Debug)]
pub struct OptimizeInput {
    pub file_name: String,
    pub bytes: Bytes,
    pub job_description: String,
}

#[derive(Debug, Serialize)]
pub struct OptimizeResponse {
    pub analysis: AnalysisResult,
    /// Name to pass to `GET /api/download/:filename`.
    pub filename: String,
}

pub async fn run_optimization(
    state: &AppState,
    input: OptimizeInput,
) -> Result<OptimizeResponse, AppError> {
    let upload = state
        .store
        .save_upload(&input.file_name, &input.bytes)
        .await?;
    info!(
        stored_name = upload.stored_name(),
        original_name = upload.original_name(),
        path = %upload.path().display(),
        bytes = input.bytes.len(),
        "Upload stored"
    );

    let document = upload.read().await?;
    let timeout = state.config.analysis_timeout;
    let analysis = tokio::time::timeout(
        timeout,
        analyze_cv(state.model.as_ref(), document, &input.job_description),
    )
    .await
    .map_err(|_| {
        AppError::ExternalService(format!(
            "analysis timed out after {}s",
            timeout.as_secs_f32()
        ))
    })??;
    info!(
        match_score = analysis.match_score,
        missing_skills = analysis.missing_skills.len(),
        "Analysis received"
    );

    let filename = state.store.reserve_generated().await?;
    let pages = match render_to_store(
        &state.store,
        &filename,
        analysis.improved_cv_text.clone(),
        state.page_config.clone(),
    )
    .await
    {
        Ok(pages) => pages,
        Err(e) => {
            state.store.remove_generated(&filename).await;
            return Err(e);
        }
    };
    info!(filename = %filename, pages, "Improved CV rendered");

    upload.discard().await;

    Ok(OptimizeResponse { analysis, filename })
}

/// Logs when an upload does not carry the PDF magic prefix. The upload is still processed.
pub fn warn_if_not_pdf(file_name: &str, bytes: &[u8]) {
    if !bytes.starts_with(b"%PDF-") {
        warn!(file_name, "Uploaded CV does not look like a PDF");
    }
}
