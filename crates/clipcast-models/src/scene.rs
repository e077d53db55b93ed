//! Scene intervals produced by keyframe segmentation.

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

/// A contiguous time interval of source video bounded by detected cut points.
///
/// A full segmentation is ordered with `scenes[i].end == scenes[i + 1].start`,
/// starting at 0 and ending at the video duration. The keyframe path may leave
/// sub-2s gaps between scenes; only the equal-segmentation fallback guarantees
/// exact tiling.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct Scene {
    /// Start time in seconds
    pub start: f64,
    /// End time in seconds
    pub end: f64,
}

impl Scene {
    /// Create a new scene interval.
    pub fn new(start: f64, end: f64) -> Self {
        Self { start, end }
    }

    /// Length of the scene in seconds.
    pub fn duration(&self) -> f64 {
        self.end - self.start
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_scene_duration() {
        let scene = Scene::new(12.5, 31.0);
        assert!((scene.duration() - 18.5).abs() < f64::EPSILON);
    }
}
