//! Capability traits consumed by the schedule orchestrators.
//!
//! The orchestrators only depend on these traits; the reqwest-backed clients
//! in this crate implement them, and tests substitute scripted fakes.

use async_trait::async_trait;
use std::path::Path;

use clipcast_models::{CreatePostRequest, Post};

use crate::captions::GeneratedCaption;
use crate::error::ApiResult;

/// Handle returned by a successful media upload.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UploadedMedia {
    /// Opaque media handle for post creation
    pub media_id: String,
    /// Stored name
    pub name: String,
}

/// Uploads one local media file and returns its handle.
#[async_trait]
pub trait MediaUploader: Send + Sync {
    async fn upload(&self, path: &Path, display_name: &str) -> ApiResult<UploadedMedia>;
}

/// Generates a caption for an asset. Best-effort: callers must treat failure
/// as "use the display name" and never let it abort an asset.
#[async_trait]
pub trait CaptionGenerator: Send + Sync {
    async fn generate(&self, display_name: &str, existing: &[String])
        -> ApiResult<GeneratedCaption>;
}

/// Creates one scheduled post.
#[async_trait]
pub trait PostCreator: Send + Sync {
    async fn create_post(&self, request: &CreatePostRequest) -> ApiResult<Post>;
}
