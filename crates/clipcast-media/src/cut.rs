//! Clip cutting via FFmpeg stream copy.

use std::path::Path;
use std::process::Stdio;
use tokio::process::Command;
use tracing::info;

use crate::error::{MediaError, MediaResult};

/// Cut `[start, start + duration)` out of `input` into `output` without
/// re-encoding.
pub async fn cut_clip(
    input: impl AsRef<Path>,
    output: impl AsRef<Path>,
    start_secs: f64,
    duration_secs: f64,
) -> MediaResult<()> {
    let input = input.as_ref();
    let output = output.as_ref();

    if !input.exists() {
        return Err(MediaError::FileNotFound(input.to_path_buf()));
    }

    which::which("ffmpeg").map_err(|_| MediaError::FfmpegNotFound)?;

    info!(
        input = %input.display(),
        output = %output.display(),
        start = start_secs,
        duration = duration_secs,
        "Cutting clip"
    );

    let out = Command::new("ffmpeg")
        .arg("-y")
        .arg("-ss")
        .arg(format!("{:.3}", start_secs))
        .arg("-t")
        .arg(format!("{:.3}", duration_secs))
        .arg("-i")
        .arg(input)
        .args(["-c", "copy", "-avoid_negative_ts", "make_zero"])
        .arg(output)
        .stdin(Stdio::null())
        .stdout(Stdio::null())
        .stderr(Stdio::piped())
        .output()
        .await?;

    if !out.status.success() {
        return Err(MediaError::ffmpeg_failed(
            format!("clip cut failed for {}", input.display()),
            Some(String::from_utf8_lossy(&out.stderr).to_string()),
            out.status.code(),
        ));
    }

    Ok(())
}
