//! Schedule run configuration.

use chrono::{DateTime, Utc};
use std::time::Duration;

use crate::error::{SchedulerError, SchedulerResult};

/// The future time window posts are spread across.
#[derive(Debug, Clone)]
pub struct ScheduleWindow {
    /// Earliest possible scheduled time
    pub start_time: DateTime<Utc>,
    /// Minimum gap between two posts on the same account, in minutes
    pub min_interval_minutes: f64,
    /// Maximum gap between two posts on the same account, in minutes
    pub max_interval_minutes: f64,
}

impl ScheduleWindow {
    pub fn new(start_time: DateTime<Utc>, min_interval_minutes: f64, max_interval_minutes: f64) -> Self {
        Self {
            start_time,
            min_interval_minutes,
            max_interval_minutes,
        }
    }

    /// Validate interval bounds. Called before any remote call is made.
    pub fn validate(&self) -> SchedulerResult<()> {
        if !self.min_interval_minutes.is_finite() || !self.max_interval_minutes.is_finite() {
            return Err(SchedulerError::config("interval bounds must be finite"));
        }
        if self.min_interval_minutes < 0.0 || self.max_interval_minutes < 0.0 {
            return Err(SchedulerError::config("interval bounds must be non-negative"));
        }
        if self.min_interval_minutes > self.max_interval_minutes {
            return Err(SchedulerError::config(format!(
                "min interval ({}) exceeds max interval ({})",
                self.min_interval_minutes, self.max_interval_minutes
            )));
        }
        Ok(())
    }
}

/// Fixed delays between remote calls, respecting host-side rate limits.
#[derive(Debug, Clone)]
pub struct Delays {
    /// Pause between video uploads
    pub upload_delay: Duration,
    /// Pause after each carousel image upload
    pub carousel_image_delay: Duration,
    /// Pause after each post submission
    pub post_delay: Duration,
    /// Base backoff for the retry executor
    pub retry_base: Duration,
}

impl Default for Delays {
    fn default() -> Self {
        Self {
            upload_delay: Duration::from_millis(2000),
            carousel_image_delay: Duration::from_millis(1500),
            post_delay: Duration::from_millis(800),
            retry_base: Duration::from_secs(5),
        }
    }
}

impl Delays {
    /// Create delays from environment variables, falling back to defaults.
    pub fn from_env() -> Self {
        let defaults = Self::default();
        Self {
            upload_delay: env_millis("CLIPCAST_UPLOAD_DELAY_MS", defaults.upload_delay),
            carousel_image_delay: env_millis(
                "CLIPCAST_IMAGE_DELAY_MS",
                defaults.carousel_image_delay,
            ),
            post_delay: env_millis("CLIPCAST_POST_DELAY_MS", defaults.post_delay),
            retry_base: env_millis("CLIPCAST_RETRY_BASE_MS", defaults.retry_base),
        }
    }
}

fn env_millis(key: &str, default: Duration) -> Duration {
    std::env::var(key)
        .ok()
        .and_then(|s| s.parse().ok())
        .map(Duration::from_millis)
        .unwrap_or(default)
}
