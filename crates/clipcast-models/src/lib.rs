//! Shared data models for the clipcast scheduler.
//!
//! This crate provides Serde-serializable types for:
//! - Scenes and merged clips from the extraction pipeline
//! - Social accounts and platforms
//! - Post creation requests and platform configurations
//! - Schedule progress reporting

pub mod account;
pub mod asset;
pub mod clip;
pub mod post;
pub mod progress;
pub mod scene;

// Re-export common types
pub use account::{Platform, SocialAccount};
pub use asset::{CarouselFolder, ClipAsset};
pub use clip::{Clip, VideoAnalysis};
pub use post::{
    CreatePostRequest, CreateUploadUrlRequest, CreateUploadUrlResponse, InstagramConfig,
    InstagramPlacement, MediaItem, PlatformConfigurations, Post, PostStatus, TikTokConfig,
};
pub use progress::{ErrorEntry, SchedulePhase, ScheduleProgress};
pub use scene::Scene;
