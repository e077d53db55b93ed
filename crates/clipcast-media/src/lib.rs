//! FFmpeg CLI wrapper for the clip extraction pipeline.
//!
//! The pipeline runs once per source video:
//! probe -> keyframe detection -> scene segmentation -> clip merging ->
//! clip cutting. Only probing and cutting shell out; segmentation and
//! merging are pure functions over the probed timing data.

pub mod analyze;
pub mod cut;
pub mod error;
pub mod keyframes;
pub mod merge;
pub mod probe;
pub mod segment;

pub use analyze::analyze_video;
pub use cut::cut_clip;
pub use error::{MediaError, MediaResult};
pub use keyframes::detect_keyframes;
pub use merge::{merge_into_clips, MIN_CLIP_SECS, TARGET_CLIP_SECS};
pub use probe::{probe_video, VideoInfo};
pub use segment::{equal_segments, scenes_from_keyframes, EQUAL_SEGMENT_SECS, MIN_SCENE_SECS};
