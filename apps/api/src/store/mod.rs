//! Artifact Store
//!
//! Two flat directories on the local filesystem:
//! - uploads: transient copies of submitted CVs, one per in-flight request
//! - generated: rendered PDFs, kept until something outside this service removes them
//!
//! Nothing indexes either directory; a generated document is addressed only by the
//! filename handed back to the client.

mod upload;

use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use chrono::Utc;
use thiserror::Error;
use tokio::fs::{self, OpenOptions};
use tracing::{debug, warn};
use uuid::Uuid;

pub use upload::TempUpload;

/// How many consecutive names `reserve_generated` tries before giving up.
const MAX_NAME_ATTEMPTS: i64 = 16;
const MAX_ORIGINAL_NAME_CHARS: usize = 100;

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("file not found: {0}")]
    NotFound(String),

    #[error("invalid file name: {0:?}")]
    InvalidName(String),

    #[error("could not reserve a unique name after {0} attempts")]
    NamesExhausted(i64),
}

#[derive(Debug, Clone)]
pub struct ArtifactStore {
    upload_dir: PathBuf,
    generated_dir: PathBuf,
}

impl ArtifactStore {
    pub fn new(upload_dir: impl Into<PathBuf>, generated_dir: impl Into<PathBuf>) -> Self {
        Self {
            upload_dir: upload_dir.into(),
            generated_dir: generated_dir.into(),
        }
    }

    pub fn upload_dir(&self) -> &Path {
        &self.upload_dir
    }

    pub fn generated_dir(&self) -> &Path {
        &self.generated_dir
    }

    /// Creates both directories (and parents) if they do not exist yet.
    pub async fn ensure_dirs(&self) -> Result<(), StoreError> {
        fs::create_dir_all(&self.upload_dir).await?;
        fs::create_dir_all(&self.generated_dir).await?;
        Ok(())
    }

    /// Persists an uploaded document under a fresh unique name.
    ///
    /// The returned guard removes the file when dropped unless it was discarded first.
    pub async fn save_upload(
        &self,
        original_name: &str,
        bytes: &[u8],
    ) -> Result<TempUpload, StoreError> {
        let stored_name = upload_name(original_name);
        let path = self.upload_dir.join(&stored_name);

        fs::write(&path, bytes).await?;
        debug!(stored_name = %stored_name, bytes = bytes.len(), "Stored upload");

        Ok(TempUpload::new(original_name.to_string(), stored_name, path))
    }

    /// Claims an unused `improved-<millis>.pdf` name in the generated area.
    ///
    /// The name is claimed by creating an empty file with `create_new`, so two concurrent
    /// callers can never receive the same name. On a clash the next millisecond value is tried.
    pub async fn reserve_generated(&self) -> Result<String, StoreError> {
        let base = Utc::now().timestamp_millis();

        for attempt in 0..MAX_NAME_ATTEMPTS {
            let name = format!("improved-{}.pdf", base + attempt);
            let path = self.generated_dir.join(&name);

            match OpenOptions::new()
                .write(true)
                .create_new(true)
                .open(&path)
                .await
            {
                Ok(_) => return Ok(name),
                Err(e) if e.kind() == ErrorKind::AlreadyExists => {
                    debug!(name = %name, "Generated name taken, trying next");
                }
                Err(e) => return Err(e.into()),
            }
        }

        Err(StoreError::NamesExhausted(MAX_NAME_ATTEMPTS))
    }

    /// Writes a generated document. An existing file of the same name is replaced.
    pub async fn write_generated(&self, name: &str, bytes: &[u8]) -> Result<(), StoreError> {
        let path = self.generated_path(name)?;
        fs::write(&path, bytes).await?;
        Ok(())
    }

    /// Reads a generated document by name.
    ///
    /// Names that could escape the generated directory are reported as `InvalidName`
    /// without touching the filesystem. A name that is reserved but not yet written
    /// (an empty file) is `NotFound`.
    pub async fn read_generated(&self, name: &str) -> Result<Vec<u8>, StoreError> {
        let path = self.generated_path(name)?;
        match fs::read(&path).await {
            Ok(bytes) if bytes.is_empty() => Err(StoreError::NotFound(name.to_string())),
            Ok(bytes) => Ok(bytes),
            Err(e) if e.kind() == ErrorKind::NotFound => Err(StoreError::NotFound(name.to_string())),
            Err(e) => Err(e.into()),
        }
    }

    /// Best-effort removal of a generated document, used to drop a reserved name whose
    /// render failed. Failures are logged, not returned.
    pub async fn remove_generated(&self, name: &str) {
        let Ok(path) = self.generated_path(name) else {
            return;
        };
        if let Err(e) = fs::remove_file(&path).await {
            if e.kind() != ErrorKind::NotFound {
                warn!(name, error = %e, "Failed to remove generated document");
            }
        }
    }

    fn generated_path(&self, name: &str) -> Result<PathBuf, StoreError> {
        if !is_plain_file_name(name) {
            return Err(StoreError::InvalidName(name.to_string()));
        }
        Ok(self.generated_dir.join(name))
    }
}

/// `<millis>-<uuid>-<sanitised original>` for a stored upload.
fn upload_name(original_name: &str) -> String {
    format!(
        "{}-{}-{}",
        Utc::now().timestamp_millis(),
        Uuid::new_v4().simple(),
        sanitize_file_name(original_name)
    )
}

/// Keeps `[A-Za-z0-9._-]`, replaces everything else with `_`, caps the length.
fn sanitize_file_name(name: &str) -> String {
    // Browsers may send a full client-side path; keep the last component only.
    let last = name.rsplit(['/', '\\']).next().unwrap_or(name);

    let cleaned: String = last
        .chars()
        .take(MAX_ORIGINAL_NAME_CHARS)
        .map(|c| {
            if c.is_ascii_alphanumeric() || matches!(c, '.' | '_' | '-') {
                c
            } else {
                '_'
            }
        })
        .collect();

    if cleaned.trim_matches('.').is_empty() {
        "upload.pdf".to_string()
    } else {
        cleaned
    }
}

fn is_plain_file_name(name: &str) -> bool {
    !name.is_empty()
        && !name.contains(['/', '\\', '\0'])
        && !name.contains("..")
}
