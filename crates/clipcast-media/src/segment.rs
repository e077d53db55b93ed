//! Scene segmentation from keyframe timestamps.

use clipcast_models::Scene;
use tracing::debug;

/// Minimum scene length in seconds; shorter keyframe gaps are treated as
/// flicker boundaries and discarded.
pub const MIN_SCENE_SECS: f64 = 2.0;

/// Window length used by the equal-segmentation fallback.
pub const EQUAL_SEGMENT_SECS: f64 = 30.0;

/// Convert keyframe timestamps into scene intervals.
///
/// Timestamps are deduplicated and sorted first. With fewer than two distinct
/// timestamps the video is partitioned into fixed 30s windows instead.
///
/// Note: sub-2s keyframe gaps are dropped outright, so the union of emitted
/// scenes may not cover every instant of the video. Downstream clip totals
/// depend on this behavior.
pub fn scenes_from_keyframes(timestamps: &[f64], duration: f64) -> Vec<Scene> {
    let mut unique: Vec<f64> = timestamps.to_vec();
    unique.sort_by(|a, b| a.partial_cmp(b).unwrap_or(std::cmp::Ordering::Equal));
    unique.dedup();

    if unique.len() < 2 {
        return equal_segments(duration);
    }

    let mut scenes = Vec::new();
    let mut dropped = 0usize;

    for pair in unique.windows(2) {
        if pair[1] - pair[0] >= MIN_SCENE_SECS {
            scenes.push(Scene::new(pair[0], pair[1]));
        } else {
            dropped += 1;
        }
    }

    let last = unique[unique.len() - 1];
    if duration - last >= MIN_SCENE_SECS {
        scenes.push(Scene::new(last, duration));
    }

    if dropped > 0 {
        debug!(
            dropped,
            scenes = scenes.len(),
            "Dropped sub-2s keyframe gaps; scene union may not cover full duration"
        );
    }

    if scenes.is_empty() {
        return equal_segments(duration);
    }
    scenes
}

/// Partition `[0, duration)` into fixed-length windows, the last truncated to
/// `duration`. Always tiles the full range with no gaps or overlaps.
pub fn equal_segments(duration: f64) -> Vec<Scene> {
    let mut scenes = Vec::new();
    let mut t = 0.0;
    while t < duration {
        scenes.push(Scene::new(t, (t + EQUAL_SEGMENT_SECS).min(duration)));
        t += EQUAL_SEGMENT_SECS;
    }
    scenes
}
