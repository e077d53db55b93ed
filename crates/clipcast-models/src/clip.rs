//! Merged clip models.

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::Scene;

/// A publishable segment built by merging consecutive scenes toward a target
/// duration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct Clip {
    /// Unique clip ID
    pub id: String,
    /// Start time in seconds
    pub start: f64,
    /// End time in seconds
    pub end: f64,
    /// Duration in seconds (`end - start`)
    pub duration: f64,
}

impl Clip {
    /// Create a clip spanning `[start, end)` with a fresh ID.
    pub fn spanning(start: f64, end: f64) -> Self {
        Self {
            id: Uuid::new_v4().to_string(),
            start,
            end,
            duration: end - start,
        }
    }

    /// Default output filename for the rendered clip.
    pub fn output_filename(&self) -> String {
        format!("clip_{:.0}_{:.0}_{}.mp4", self.start, self.end, self.id)
    }
}

/// Result of probing and segmenting a source video.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
pub struct VideoAnalysis {
    /// Identifier of the source video within this run
    pub video_id: String,
    /// Original filename
    pub filename: String,
    /// Duration in seconds
    pub duration: f64,
    /// Width in pixels
    pub width: u32,
    /// Height in pixels
    pub height: u32,
    /// Detected scenes
    pub scenes: Vec<Scene>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_clip_spanning() {
        let clip = Clip::spanning(10.0, 41.0);
        assert!((clip.duration - 31.0).abs() < f64::EPSILON);
        assert_ne!(clip.id, Clip::spanning(10.0, 41.0).id);
    }

    #[test]
    fn test_output_filename() {
        let clip = Clip::spanning(0.0, 30.0);
        let name = clip.output_filename();
        assert!(name.starts_with("clip_0_30_"));
        assert!(name.ends_with(".mp4"));
    }
}
