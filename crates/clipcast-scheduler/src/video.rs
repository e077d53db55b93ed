//! The video schedule orchestrator.

use rand::Rng;
use tracing::{debug, info, warn};

use clipcast_models::{ClipAsset, ErrorEntry, SchedulePhase, ScheduleProgress, SocialAccount};
use clipcast_social::{with_retry, RetryPolicy};

use crate::config::ScheduleWindow;
use crate::context::ScheduleContext;
use crate::distribute::{distribute_posts, UploadedBundle};
use crate::error::{SchedulerError, SchedulerResult};

/// Upload every clip, then create one post per (clip, account) pair across
/// the jittered window.
///
/// Per-asset and per-pair failures are recorded in the returned progress and
/// never abort the run. The only pre-run error class is configuration
/// (interval bounds, empty inputs); the only mid-run abort is cancellation.
pub async fn run_video_schedule<R, F>(
    ctx: &ScheduleContext<'_>,
    assets: &[ClipAsset],
    accounts: &[SocialAccount],
    window: &ScheduleWindow,
    rng: &mut R,
    mut on_progress: F,
) -> SchedulerResult<ScheduleProgress>
where
    R: Rng,
    F: FnMut(ScheduleProgress),
{
    window.validate()?;
    if assets.is_empty() {
        return Err(SchedulerError::config("no assets selected"));
    }
    if accounts.is_empty() {
        return Err(SchedulerError::config("no target accounts selected"));
    }

    let mut state = ScheduleProgress::start(assets.len() as u32);
    on_progress(state.clone());

    info!(
        assets = assets.len(),
        accounts = accounts.len(),
        "Starting video schedule run"
    );

    // Phase 1: upload sequentially, with a fixed delay between assets.
    let mut uploaded: Vec<UploadedBundle> = Vec::new();
    let mut prior_captions: Vec<String> = Vec::new();

    for (i, asset) in assets.iter().enumerate() {
        ctx.cancel.check()?;

        let policy = RetryPolicy::new(format!("upload {}", asset.name))
            .with_base_delay(ctx.delays.retry_base);

        match with_retry(&policy, || ctx.uploader.upload(&asset.path, &asset.name)).await {
            Ok(media) => {
                state.videos_uploaded += 1;

                // Best-effort caption; failure silently falls back to the
                // display name and is never recorded as a run error.
                let caption = generate_caption(ctx, &asset.name, &prior_captions).await;
                prior_captions.push(caption.clone());

                uploaded.push(UploadedBundle {
                    name: asset.name.clone(),
                    caption,
                    media_ids: vec![media.media_id],
                });
            }
            Err(e) => {
                state.videos_failed += 1;
                warn!(asset = %asset.name, error = %e, "Upload failed");
                state
                    .errors
                    .push(ErrorEntry::upload(asset.name.as_str(), e.to_string()));
            }
        }

        on_progress(state.clone());

        if i < assets.len() - 1 {
            ctx.cancel.check()?;
            tokio::time::sleep(ctx.delays.upload_delay).await;
        }
    }

    // Planned posts count only what actually uploaded.
    state.posts_total = uploaded.len() as u32 * accounts.len() as u32;
    state.phase = SchedulePhase::Creating;
    on_progress(state.clone());

    distribute_posts(
        ctx,
        &uploaded,
        accounts,
        window,
        rng,
        &mut state,
        &mut on_progress,
    )
    .await?;

    state.phase = SchedulePhase::Done;
    state.current_account = None;
    on_progress(state.clone());

    info!(
        uploaded = state.videos_uploaded,
        upload_failures = state.videos_failed,
        posts_created = state.posts_created,
        posts_failed = state.posts_failed,
        "Video schedule run finished"
    );

    Ok(state)
}

/// Ask the caption generator for a caption, falling back to the display name.
async fn generate_caption(
    ctx: &ScheduleContext<'_>,
    display_name: &str,
    prior_captions: &[String],
) -> String {
    let Some(captions) = ctx.captions else {
        return display_name.to_string();
    };
    match captions.generate(display_name, prior_captions).await {
        Ok(caption) => caption.es,
        Err(e) => {
            debug!(asset = display_name, error = %e, "Caption generation failed, using display name");
            display_name.to_string()
        }
    }
}
