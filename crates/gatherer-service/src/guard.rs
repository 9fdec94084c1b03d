//! Drop guard for blobs whose metadata record is not yet committed.

use std::sync::Arc;

use tracing::{debug, warn};

use gatherer_core::result::AppResult;
use gatherer_core::traits::content::ContentStore;

/// Owns a freshly written blob until its record is committed.
///
/// If the guard is dropped while still armed (the caller's future was
/// cancelled between the blob write and the record write), the blob is
/// removed on a background task.
pub(crate) struct UncommittedBlob {
    content: Arc<dyn ContentStore>,
    path: Option<String>,
}

impl UncommittedBlob {
    pub(crate) fn new(content: Arc<dyn ContentStore>, path: String) -> Self {
        Self {
            content,
            path: Some(path),
        }
    }

    /// The record is in place; keep the blob.
    pub(crate) fn commit(mut self) {
        self.path = None;
    }

    /// Remove the blob now and report the outcome.
    pub(crate) async fn discard(mut self) -> AppResult<()> {
        match self.path.take() {
            Some(path) => self.content.remove(&path).await,
            None => Ok(()),
        }
    }
}

impl Drop for UncommittedBlob {
    fn drop(&mut self) {
        let Some(path) = self.path.take() else {
            return;
        };
        match tokio::runtime::Handle::try_current() {
            Ok(handle) => {
                let content = Arc::clone(&self.content);
                handle.spawn(async move {
                    match content.remove(&path).await {
                        Ok(()) => debug!(path = %path, "Removed blob of cancelled save"),
                        Err(e) => warn!(
                            path = %path,
                            error = %e,
                            "Failed to remove blob of cancelled save; blob is orphaned"
                        ),
                    }
                });
            }
            Err(_) => warn!(
                path = %path,
                "No runtime to remove blob of cancelled save; blob is orphaned"
            ),
        }
    }
}
