//! Post creation models for the social posting API.

use chrono::{DateTime, Utc};
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::Platform;

/// Instagram post placement.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, JsonSchema, Default)]
#[serde(rename_all = "snake_case")]
pub enum InstagramPlacement {
    Feed,
    #[default]
    Reels,
}

/// Instagram-specific post options.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, JsonSchema, Default)]
pub struct InstagramConfig {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub placement: Option<InstagramPlacement>,
}

/// TikTok-specific post options.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, JsonSchema, Default)]
pub struct TikTokConfig {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub draft: Option<bool>,
}

/// Per-platform post overrides.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, JsonSchema, Default)]
pub struct PlatformConfigurations {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub instagram: Option<InstagramConfig>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tiktok: Option<TikTokConfig>,
}

impl PlatformConfigurations {
    /// Default configuration for a platform: Instagram posts go to reels,
    /// everything else needs no override.
    pub fn defaults_for(platform: Platform) -> Option<Self> {
        match platform {
            Platform::Instagram => Some(Self {
                instagram: Some(InstagramConfig {
                    placement: Some(InstagramPlacement::Reels),
                }),
                tiktok: None,
            }),
            _ => None,
        }
    }
}

/// Request body for creating one scheduled post.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
pub struct CreatePostRequest {
    pub caption: String,
    pub social_accounts: Vec<u64>,
    pub media: Vec<String>,
    pub scheduled_at: DateTime<Utc>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub platform_configurations: Option<PlatformConfigurations>,
}

/// Post lifecycle status reported by the posting API.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, JsonSchema, Default)]
#[serde(rename_all = "snake_case")]
pub enum PostStatus {
    Draft,
    #[default]
    Scheduled,
    Processing,
    Published,
    Failed,
}

/// A post as returned by the posting API.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
pub struct Post {
    pub id: String,
    pub caption: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub scheduled_at: Option<DateTime<Utc>>,
    #[serde(default)]
    pub status: PostStatus,
    #[serde(default)]
    pub social_accounts: Vec<u64>,
    #[serde(default)]
    pub media: Vec<String>,
}

/// A stored media item.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
pub struct MediaItem {
    pub id: String,
    pub name: String,
    pub mime_type: String,
    #[serde(default)]
    pub size_bytes: u64,
}

/// Request body for the two-step upload protocol.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
pub struct CreateUploadUrlRequest {
    pub name: String,
    pub mime_type: String,
    pub size_bytes: u64,
}

/// Response carrying the media handle and the signed upload URL.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
pub struct CreateUploadUrlResponse {
    pub media_id: String,
    pub upload_url: String,
    pub name: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_instagram_defaults_to_reels() {
        let cfg = PlatformConfigurations::defaults_for(Platform::Instagram).unwrap();
        assert_eq!(
            cfg.instagram.unwrap().placement,
            Some(InstagramPlacement::Reels)
        );
        assert!(PlatformConfigurations::defaults_for(Platform::Tiktok).is_none());
    }

    #[test]
    fn test_create_post_request_serializes_iso8601() {
        let req = CreatePostRequest {
            caption: "hello".to_string(),
            social_accounts: vec![7],
            media: vec!["m1".to_string()],
            scheduled_at: "2025-06-01T10:00:00Z".parse().unwrap(),
            platform_configurations: None,
        };
        let json = serde_json::to_value(&req).unwrap();
        assert_eq!(json["scheduled_at"], "2025-06-01T10:00:00Z");
        assert!(json.get("platform_configurations").is_none());
    }
}
