// Document rendering: raw text → wrapped lines → pages → PDF bytes → generated store.
// PDF encoding is CPU-bound and runs inside tokio::task::spawn_blocking.

pub mod pdf;

use thiserror::Error;
use tracing::debug;

use crate::layout::{layout_text, PageConfig};
use crate::store::ArtifactStore;

#[derive(Debug, Error)]
pub enum RenderError {
    #[error("PDF encoding failed: {0}")]
    Encode(String),

    #[error("render task failed: {0}")]
    Task(#[from] tokio::task::JoinError),
}

/// A serialised document ready to be written to the store.
#[derive(Debug)]
pub struct RenderedDocument {
    pub bytes: Vec<u8>,
    pub page_count: usize,
}

/// Wraps, paginates and serialises `text` synchronously.
pub fn render_text(text: &str, config: &PageConfig) -> Result<RenderedDocument, RenderError> {
    let pages = layout_text(text, config);
    let bytes = pdf::write_pdf(&pages, config)?;
    Ok(RenderedDocument {
        bytes,
        page_count: pages.len(),
    })
}

/// Renders `text` off the async executor and writes the result under `filename`
/// in the generated-documents area. An existing file of that name is overwritten.
pub async fn render_to_store(
    store: &ArtifactStore,
    filename: &str,
    text: String,
    config: PageConfig,
) -> Result<usize, crate::errors::AppError> {
    let rendered = tokio::task::spawn_blocking(move || render_text(&text, &config))
        .await
        .map_err(RenderError::from)??;

    debug!(
        filename,
        pages = rendered.page_count,
        bytes = rendered.bytes.len(),
        "Rendered document"
    );

    store.write_generated(filename, &rendered.bytes).await?;
    Ok(rendered.page_count)
}
