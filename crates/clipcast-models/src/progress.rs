//! Schedule run progress reporting.

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

/// One of the three mutually exclusive stages of a schedule run.
///
/// Phases are strictly ordered and never re-entered:
/// `Uploading -> Creating -> Done`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, JsonSchema, Default)]
#[serde(rename_all = "snake_case")]
pub enum SchedulePhase {
    #[default]
    Uploading,
    Creating,
    Done,
}

/// One failed upload or failed post creation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub struct ErrorEntry {
    /// Display name of the asset that failed
    pub asset: String,
    /// Account username, present for post-creation failures
    #[serde(skip_serializing_if = "Option::is_none")]
    pub account: Option<String>,
    /// Human-readable failure message
    pub message: String,
}

impl ErrorEntry {
    /// Record a failed upload.
    pub fn upload(asset: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            asset: asset.into(),
            account: None,
            message: message.into(),
        }
    }

    /// Record a failed post creation.
    pub fn post(
        asset: impl Into<String>,
        account: impl Into<String>,
        message: impl Into<String>,
    ) -> Self {
        Self {
            asset: asset.into(),
            account: Some(account.into()),
            message: message.into(),
        }
    }
}

/// Mutable run-wide state, owned by the orchestrator for the lifetime of one
/// run. Callers only ever observe cloned snapshots, emitted after every
/// state-changing event.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
pub struct ScheduleProgress {
    /// Current phase
    pub phase: SchedulePhase,
    /// Assets uploaded successfully so far
    pub videos_uploaded: u32,
    /// Assets whose upload failed after retries
    pub videos_failed: u32,
    /// Total assets in this run
    pub videos_total: u32,
    /// Posts created successfully so far
    pub posts_created: u32,
    /// Posts that failed permanently
    pub posts_failed: u32,
    /// Total posts planned; computed after the upload phase as
    /// `uploaded * accounts`
    pub posts_total: u32,
    /// Username of the account currently being processed
    #[serde(skip_serializing_if = "Option::is_none")]
    pub current_account: Option<String>,
    /// Ordered record of every failure in this run
    pub errors: Vec<ErrorEntry>,
}

impl ScheduleProgress {
    /// Fresh progress state for a run over `total` assets.
    pub fn start(total: u32) -> Self {
        Self {
            phase: SchedulePhase::Uploading,
            videos_uploaded: 0,
            videos_failed: 0,
            videos_total: total,
            posts_created: 0,
            posts_failed: 0,
            posts_total: 0,
            current_account: None,
            errors: Vec::new(),
        }
    }
}
