//! Merging scenes into duration-bounded clips.

use clipcast_models::{Clip, Scene};

/// Target clip length in seconds.
pub const TARGET_CLIP_SECS: f64 = 30.0;

/// Minimum publishable clip length in seconds. Accumulated spans below this
/// are dropped, never emitted as standalone clips.
pub const MIN_CLIP_SECS: f64 = 10.0;

/// Merge consecutive scenes into clips near `target_secs`.
///
/// Scenes accumulate from the current clip start until the accumulated span
/// reaches the target (ties close the clip) or the scene list ends. Spans
/// shorter than [`MIN_CLIP_SECS`] at close time are dropped and merging
/// restarts from the next scene.
pub fn merge_into_clips(scenes: &[Scene], target_secs: f64) -> Vec<Clip> {
    if scenes.is_empty() {
        return Vec::new();
    }

    let mut clips = Vec::new();
    let mut clip_start = scenes[0].start;

    for (i, scene) in scenes.iter().enumerate() {
        let accumulated = scene.end - clip_start;
        let is_last = i == scenes.len() - 1;

        if accumulated >= target_secs || is_last {
            if accumulated >= MIN_CLIP_SECS {
                clips.push(Clip::spanning(clip_start, scene.end));
            }
            clip_start = if is_last {
                scene.end
            } else {
                scenes[i + 1].start
            };
        }
    }

    clips
}

#[cfg(test)]
mod tests {
    use super::*;

    fn scene(start: f64, end: f64) -> Scene {
        Scene::new(start, end)
    }

    #[test]
    fn test_empty_scene_list() {
        assert!(merge_into_clips(&[], TARGET_CLIP_SECS).is_empty());
    }

    #[test]
    fn test_short_trailing_remainder_is_dropped() {
        // Accumulation closes at the third scene (31 >= 30); the trailing
        // 9s span is below the 10s minimum and must be dropped.
        let scenes = [
            scene(0.0, 12.0),
            scene(12.0, 25.0),
            scene(25.0, 31.0),
            scene(31.0, 40.0),
        ];
        let clips = merge_into_clips(&scenes, 30.0);
        assert_eq!(clips.len(), 1);
        assert_eq!(clips[0].start, 0.0);
        assert_eq!(clips[0].end, 31.0);
        assert!((clips[0].duration - 31.0).abs() < 1e-9);
    }

    #[test]
    fn test_last_scene_emits_when_above_minimum() {
        let scenes = [scene(0.0, 12.0), scene(12.0, 31.0), scene(31.0, 45.0)];
        let clips = merge_into_clips(&scenes, 30.0);
        assert_eq!(clips.len(), 2);
        assert_eq!((clips[0].start, clips[0].end), (0.0, 31.0));
        assert_eq!((clips[1].start, clips[1].end), (31.0, 45.0));
    }

    #[test]
    fn test_tie_at_target_closes_clip() {
        let scenes = [scene(0.0, 30.0), scene(30.0, 42.0)];
        let clips = merge_into_clips(&scenes, 30.0);
        assert_eq!(clips.len(), 2);
        assert_eq!((clips[0].start, clips[0].end), (0.0, 30.0));
        assert_eq!((clips[1].start, clips[1].end), (30.0, 42.0));
    }

    #[test]
    fn test_single_short_scene_is_dropped() {
        let clips = merge_into_clips(&[scene(0.0, 8.0)], 30.0);
        assert!(clips.is_empty());
    }

    #[test]
    fn test_no_clip_below_minimum() {
        // Irregular scene lists never yield a clip under 10s.
        let scenes = [
            scene(0.0, 3.0),
            scene(3.0, 9.0),
            scene(9.0, 34.0),
            scene(34.0, 41.0),
            scene(41.0, 80.0),
        ];
        for clip in merge_into_clips(&scenes, 30.0) {
            assert!(clip.duration >= MIN_CLIP_SECS);
        }
    }

    #[test]
    fn test_restart_after_dropped_span_skips_gap() {
        // A dropped span restarts accumulation at the next scene start even
        // when scenes are not contiguous.
        let scenes = [scene(0.0, 31.0), scene(33.0, 38.0)];
        let clips = merge_into_clips(&scenes, 30.0);
        assert_eq!(clips.len(), 1);
        assert_eq!((clips[0].start, clips[0].end), (0.0, 31.0));
    }

    #[test]
    fn test_fresh_ids_per_clip() {
        let scenes = [scene(0.0, 30.0), scene(30.0, 60.0)];
        let clips = merge_into_clips(&scenes, 30.0);
        assert_ne!(clips[0].id, clips[1].id);
    }
}
