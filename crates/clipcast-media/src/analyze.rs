//! Source video analysis: probe + keyframe detection + segmentation.

use std::path::Path;
use tracing::info;

use clipcast_models::VideoAnalysis;

use crate::error::MediaResult;
use crate::keyframes::detect_keyframes;
use crate::probe::probe_video;
use crate::segment::scenes_from_keyframes;

/// Analyze a source video into scene intervals.
pub async fn analyze_video(
    path: impl AsRef<Path>,
    video_id: impl Into<String>,
    filename: impl Into<String>,
) -> MediaResult<VideoAnalysis> {
    let path = path.as_ref();

    let info = probe_video(path).await?;
    let keyframes = detect_keyframes(path).await?;
    let scenes = scenes_from_keyframes(&keyframes, info.duration);

    let analysis = VideoAnalysis {
        video_id: video_id.into(),
        filename: filename.into(),
        duration: info.duration,
        width: info.width,
        height: info.height,
        scenes,
    };

    info!(
        video_id = %analysis.video_id,
        duration = analysis.duration,
        keyframes = keyframes.len(),
        scenes = analysis.scenes.len(),
        "Video analyzed"
    );

    Ok(analysis)
}
