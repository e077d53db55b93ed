//! Social account models.

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Supported social platforms.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "snake_case")]
pub enum Platform {
    Instagram,
    Tiktok,
    Facebook,
    Twitter,
    Threads,
    Youtube,
    Pinterest,
    Linkedin,
    Bluesky,
}

impl Platform {
    pub fn as_str(&self) -> &'static str {
        match self {
            Platform::Instagram => "instagram",
            Platform::Tiktok => "tiktok",
            Platform::Facebook => "facebook",
            Platform::Twitter => "twitter",
            Platform::Threads => "threads",
            Platform::Youtube => "youtube",
            Platform::Pinterest => "pinterest",
            Platform::Linkedin => "linkedin",
            Platform::Bluesky => "bluesky",
        }
    }
}

impl fmt::Display for Platform {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// A connected social account. Read-only input to a schedule run.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub struct SocialAccount {
    /// Upstream account ID
    pub id: u64,
    /// Platform this account posts to
    pub platform: Platform,
    /// Account username (used for progress display)
    pub username: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_platform_serde_snake_case() {
        let json = serde_json::to_string(&Platform::Instagram).unwrap();
        assert_eq!(json, "\"instagram\"");
        let back: Platform = serde_json::from_str("\"bluesky\"").unwrap();
        assert_eq!(back, Platform::Bluesky);
    }
}
