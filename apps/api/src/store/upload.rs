use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use tracing::{debug, warn};

use super::StoreError;

/// A stored upload that is removed from disk when it goes out of scope.
///
/// `discard` deletes asynchronously on the happy path. Any other exit (an early `?`,
/// a timeout, a cancelled request future) falls through to `Drop`, which deletes
/// synchronously. Deletion failures are logged and swallowed in both cases.
#[derive(Debug)]
pub struct TempUpload {
    original_name: String,
    stored_name: String,
    path: PathBuf,
    released: bool,
}

impl TempUpload {
    pub(super) fn new(original_name: String, stored_name: String, path: PathBuf) -> Self {
        Self {
            original_name,
            stored_name,
            path,
            released: false,
        }
    }

    pub fn original_name(&self) -> &str {
        &self.original_name
    }

    pub fn stored_name(&self) -> &str {
        &self.stored_name
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub async fn read(&self) -> Result<Vec<u8>, StoreError> {
        Ok(tokio::fs::read(&self.path).await?)
    }

    /// Deletes the stored file now.
    pub async fn discard(mut self) {
        self.released = true;
        match tokio::fs::remove_file(&self.path).await {
            Ok(()) => debug!(stored_name = %self.stored_name, "Removed upload"),
            Err(e) => log_remove_failure(&self.stored_name, &e),
        }
    }
}

impl Drop for TempUpload {
    fn drop(&mut self) {
        if self.released {
            return;
        }
        match std::fs::remove_file(&self.path) {
            Ok(()) => debug!(stored_name = %self.stored_name, "Removed upload on early exit"),
            Err(e) => log_remove_failure(&self.stored_name, &e),
        }
    }
}

fn log_remove_failure(stored_name: &str, error: &std::io::Error) {
    if error.kind() == ErrorKind::NotFound {
        return;
    }
    warn!(stored_name, error = %error, "Failed to remove upload");
}
