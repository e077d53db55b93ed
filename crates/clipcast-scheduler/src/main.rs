//! Clipcast runner binary.
//!
//! Drives one schedule run end to end: in `video` mode a long source video
//! is segmented, merged, and cut into clips before scheduling; in `carousel`
//! mode image folders under a root directory are scheduled directly.

use anyhow::Context;
use rand::rngs::StdRng;
use rand::SeedableRng;
use std::path::PathBuf;
use tracing::info;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use clipcast_media::{analyze_video, cut_clip, merge_into_clips, TARGET_CLIP_SECS};
use clipcast_models::{ClipAsset, ScheduleProgress};
use clipcast_scheduler::{
    find_carousel_folders, run_carousel_schedule, run_video_schedule, Delays,
    LocalCarouselSource, ScheduleContext, ScheduleWindow,
};
use clipcast_social::{CaptionGenerator, OpenAiCaptionClient, PostBridgeClient};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();
    init_tracing();

    let window = window_from_env()?;
    window.validate()?;
    let delays = Delays::from_env();

    let client = PostBridgeClient::from_env().context("posting API client")?;
    let captions = OpenAiCaptionClient::from_env().ok();
    if captions.is_none() {
        info!("OPENAI_API_KEY not set, captions fall back to display names");
    }

    let accounts = client.list_accounts().await.context("listing accounts")?;
    info!(accounts = accounts.len(), "Fetched target accounts");

    let ctx = ScheduleContext::new(
        &client,
        captions.as_ref().map(|c| c as &dyn CaptionGenerator),
        &client,
        delays,
    );
    let mut rng = StdRng::from_os_rng();

    let mode = std::env::var("CLIPCAST_MODE").unwrap_or_else(|_| "video".to_string());
    let progress = match mode.as_str() {
        "video" => {
            let assets = prepare_clips().await?;
            run_video_schedule(&ctx, &assets, &accounts, &window, &mut rng, log_progress).await?
        }
        "carousel" => {
            let root =
                std::env::var("CLIPCAST_CAROUSEL_ROOT").context("CLIPCAST_CAROUSEL_ROOT not set")?;
            let folders = find_carousel_folders(&root).await?;
            info!(folders = folders.len(), root = %root, "Discovered carousel folders");
            let source = LocalCarouselSource::new();
            run_carousel_schedule(
                &ctx,
                &source,
                &folders,
                &accounts,
                &window,
                &mut rng,
                log_progress,
            )
            .await?
        }
        other => anyhow::bail!("unknown CLIPCAST_MODE: {}", other),
    };

    info!(
        uploaded = progress.videos_uploaded,
        upload_failures = progress.videos_failed,
        posts_created = progress.posts_created,
        posts_failed = progress.posts_failed,
        errors = progress.errors.len(),
        "Run complete"
    );
    for entry in &progress.errors {
        info!(
            asset = %entry.asset,
            account = entry.account.as_deref().unwrap_or("-"),
            message = %entry.message,
            "Run error"
        );
    }

    Ok(())
}

/// Cut the source video into clip assets inside the work directory.
async fn prepare_clips() -> anyhow::Result<Vec<ClipAsset>> {
    let source = std::env::var("CLIPCAST_SOURCE_VIDEO").context("CLIPCAST_SOURCE_VIDEO not set")?;
    let source = PathBuf::from(source);
    let work_dir = PathBuf::from(
        std::env::var("CLIPCAST_WORK_DIR").unwrap_or_else(|_| "/tmp/clipcast".to_string()),
    );
    tokio::fs::create_dir_all(&work_dir).await?;

    let filename = source
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_else(|| source.display().to_string());

    let analysis = analyze_video(&source, uuid::Uuid::new_v4().to_string(), filename.as_str()).await?;
    let clips = merge_into_clips(&analysis.scenes, TARGET_CLIP_SECS);
    info!(
        scenes = analysis.scenes.len(),
        clips = clips.len(),
        "Merged scenes into clips"
    );

    let stem = filename
        .rsplit_once('.')
        .map(|(s, _)| s)
        .unwrap_or(filename.as_str());
    let mut assets = Vec::with_capacity(clips.len());
    for (i, clip) in clips.iter().enumerate() {
        let output = work_dir.join(clip.output_filename());
        cut_clip(&source, &output, clip.start, clip.duration).await?;
        assets.push(ClipAsset::new(
            clip.id.clone(),
            format!("{} part {}", stem, i + 1),
            output,
        ));
    }

    Ok(assets)
}

fn window_from_env() -> anyhow::Result<ScheduleWindow> {
    let start_time = match std::env::var("CLIPCAST_START_TIME") {
        Ok(raw) => raw
            .parse()
            .with_context(|| format!("invalid CLIPCAST_START_TIME: {}", raw))?,
        Err(_) => chrono::Utc::now() + chrono::Duration::minutes(10),
    };
    let min = env_f64("CLIPCAST_MIN_INTERVAL_MIN", 30.0);
    let max = env_f64("CLIPCAST_MAX_INTERVAL_MIN", 90.0);
    Ok(ScheduleWindow::new(start_time, min, max))
}

fn env_f64(key: &str, default: f64) -> f64 {
    std::env::var(key)
        .ok()
        .and_then(|s| s.parse().ok())
        .unwrap_or(default)
}

fn log_progress(snapshot: ScheduleProgress) {
    info!(
        phase = ?snapshot.phase,
        uploaded = snapshot.videos_uploaded,
        upload_failures = snapshot.videos_failed,
        posts_created = snapshot.posts_created,
        posts_failed = snapshot.posts_failed,
        posts_total = snapshot.posts_total,
        account = snapshot.current_account.as_deref().unwrap_or("-"),
        "Progress"
    );
}

fn init_tracing() {
    let use_json = std::env::var("LOG_FORMAT")
        .map(|v| v.to_lowercase() == "json")
        .unwrap_or(false);

    let env_filter = EnvFilter::from_default_env()
        .add_directive("clipcast=info".parse().unwrap());

    if use_json {
        tracing_subscriber::registry()
            .with(fmt::layer().json())
            .with(env_filter)
            .init();
    } else {
        tracing_subscriber::registry()
            .with(
                fmt::layer()
                    .with_ansi(true)
                    .with_target(true)
                    .with_file(false)
                    .with_line_number(false),
            )
            .with(env_filter)
            .init();
    }
}
