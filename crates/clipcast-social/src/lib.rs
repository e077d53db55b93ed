//! Remote-service clients for the clipcast scheduler.
//!
//! Provides the capability traits the orchestrators depend on (media upload,
//! caption generation, post creation), reqwest-backed implementations, and
//! the bounded-retry executor that classifies errors as transient or
//! permanent.

pub mod bulk;
pub mod capabilities;
pub mod captions;
pub mod client;
pub mod error;
pub mod retry;

pub use bulk::upload_all;
pub use capabilities::{CaptionGenerator, MediaUploader, PostCreator, UploadedMedia};
pub use captions::{build_video_title, GeneratedCaption, OpenAiCaptionClient};
pub use client::PostBridgeClient;
pub use error::{ApiError, ApiResult};
pub use retry::{with_retry, RetryPolicy, RetryableError};
