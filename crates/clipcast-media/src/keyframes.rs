//! Keyframe timestamp detection.
//!
//! Keyframes are encoder-level frame boundaries used as a proxy for visual
//! scene changes. FFprobe emits one CSV line per packet; keyframe packets
//! carry a `K` flag.

use std::path::Path;
use std::process::Stdio;
use tokio::process::Command;

use crate::error::MediaResult;

/// Detect keyframe timestamps in a video file.
///
/// A probe failure is not fatal: an empty list is returned and the caller
/// falls back to equal segmentation.
pub async fn detect_keyframes(path: impl AsRef<Path>) -> MediaResult<Vec<f64>> {
    let path = path.as_ref();

    if which::which("ffprobe").is_err() {
        tracing::warn!("ffprobe not found, skipping keyframe detection");
        return Ok(Vec::new());
    }

    let output = Command::new("ffprobe")
        .args([
            "-select_streams",
            "v",
            "-show_entries",
            "packet=pts_time,flags",
            "-of",
            "csv=p=0",
        ])
        .arg(path)
        .stdin(Stdio::null())
        .stdout(Stdio::piped())
        .stderr(Stdio::null())
        .output()
        .await?;

    if !output.status.success() {
        tracing::warn!(
            path = %path.display(),
            "ffprobe packet scan failed, falling back to equal segmentation"
        );
        return Ok(Vec::new());
    }

    let stdout = String::from_utf8_lossy(&output.stdout);
    Ok(parse_keyframe_lines(&stdout))
}

/// Parse ffprobe `pts_time,flags` CSV lines, keeping keyframe timestamps.
fn parse_keyframe_lines(stdout: &str) -> Vec<f64> {
    let mut times = Vec::new();
    for line in stdout.lines() {
        if !line.contains(",K") {
            continue;
        }
        if let Some(ts) = line.split(',').next() {
            if let Ok(t) = ts.parse::<f64>() {
                times.push(t);
            }
        }
    }
    times
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_keyframe_lines() {
        let out = "0.000000,K__\n1.501500,___\n3.003000,K__\nN/A,K__\n";
        let times = parse_keyframe_lines(out);
        assert_eq!(times, vec![0.0, 3.003]);
    }

    #[test]
    fn test_parse_ignores_non_keyframes() {
        let out = "0.5,___\n1.0,___\n";
        assert!(parse_keyframe_lines(out).is_empty());
    }
}
