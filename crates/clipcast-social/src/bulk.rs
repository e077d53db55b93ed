//! Bounded-concurrency bulk upload.
//!
//! Utility for uploading a batch of already-prepared files outside the
//! scheduling core. The schedule orchestrators stay strictly sequential to
//! keep per-account timing deterministic; this helper is for gallery-style
//! batch ingestion where ordering does not matter.

use futures::stream::{self, StreamExt};
use std::path::PathBuf;
use tracing::warn;

use crate::capabilities::{MediaUploader, UploadedMedia};
use crate::error::ApiResult;

/// Maximum in-flight uploads.
pub const BULK_CONCURRENCY: usize = 3;

/// Upload all files with at most [`BULK_CONCURRENCY`] in flight.
///
/// Results are returned in input order; individual failures do not abort the
/// batch.
pub async fn upload_all(
    uploader: &dyn MediaUploader,
    paths: &[PathBuf],
) -> Vec<ApiResult<UploadedMedia>> {
    stream::iter(paths.iter())
        .map(|path| async move {
            let name = path
                .file_name()
                .map(|n| n.to_string_lossy().into_owned())
                .unwrap_or_else(|| path.display().to_string());
            let result = uploader.upload(path, &name).await;
            if let Err(e) = &result {
                warn!(file = %path.display(), error = %e, "Bulk upload item failed");
            }
            result
        })
        .buffered(BULK_CONCURRENCY)
        .collect()
        .await
}
