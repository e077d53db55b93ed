//! The carousel schedule orchestrator.
//!
//! Structurally the video orchestrator with a different upload phase: each
//! carousel folder expands to one upload per image plus one caption lookup.
//! A folder is all-or-nothing: zero images or any failed image upload
//! excludes the whole carousel from distribution.

use rand::Rng;
use tracing::{info, warn};

use clipcast_models::{CarouselFolder, ErrorEntry, SchedulePhase, ScheduleProgress, SocialAccount};
use clipcast_social::{with_retry, RetryPolicy};

use crate::config::ScheduleWindow;
use crate::context::ScheduleContext;
use crate::distribute::{distribute_posts, UploadedBundle};
use crate::error::{SchedulerError, SchedulerResult};
use crate::run_context::RunContext;
use crate::source::CarouselSource;

/// Upload every carousel folder, then create one post per (carousel,
/// account) pair across the jittered window.
pub async fn run_carousel_schedule<R, F>(
    ctx: &ScheduleContext<'_>,
    source: &dyn CarouselSource,
    folders: &[CarouselFolder],
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
    if folders.is_empty() {
        return Err(SchedulerError::config("no carousel folders selected"));
    }
    if accounts.is_empty() {
        return Err(SchedulerError::config("no target accounts selected"));
    }

    let mut run = RunContext::new();
    let mut state = ScheduleProgress::start(folders.len() as u32);
    on_progress(state.clone());

    info!(
        folders = folders.len(),
        accounts = accounts.len(),
        "Starting carousel schedule run"
    );

    let mut uploaded: Vec<UploadedBundle> = Vec::new();

    for folder in folders {
        ctx.cancel.check()?;

        match upload_carousel(ctx, source, folder, &mut run).await {
            Ok(bundle) => {
                state.videos_uploaded += 1;
                uploaded.push(bundle);
            }
            Err(SchedulerError::Cancelled) => return Err(SchedulerError::Cancelled),
            Err(e) => {
                state.videos_failed += 1;
                warn!(folder = %folder.name, error = %e, "Carousel upload failed");
                state
                    .errors
                    .push(ErrorEntry::upload(folder.name.as_str(), e.to_string()));
            }
        }

        on_progress(state.clone());
    }

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
        "Carousel schedule run finished"
    );

    Ok(state)
}

/// Upload all images of one folder and resolve its caption.
///
/// All-or-nothing: any failing image upload fails the carousel, and
/// previously uploaded images of the folder are simply abandoned.
async fn upload_carousel(
    ctx: &ScheduleContext<'_>,
    source: &dyn CarouselSource,
    folder: &CarouselFolder,
    run: &mut RunContext,
) -> SchedulerResult<UploadedBundle> {
    let images = source.list_images(folder).await?;
    if images.is_empty() {
        return Err(SchedulerError::source("No images found"));
    }

    let display_name = run.names.resolve(source, folder).await;
    let caption = source
        .read_caption(folder)
        .await?
        .unwrap_or_else(|| display_name.clone());

    let mut media_ids = Vec::with_capacity(images.len());
    for image in &images {
        ctx.cancel.check()?;

        let image_name = image
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_else(|| image.display().to_string());

        let policy = RetryPolicy::new(format!("upload {} from {}", image_name, folder.name))
            .with_base_delay(ctx.delays.retry_base);

        let media = with_retry(&policy, || ctx.uploader.upload(image, &image_name)).await?;
        media_ids.push(media.media_id);

        tokio::time::sleep(ctx.delays.carousel_image_delay).await;
    }

    Ok(UploadedBundle {
        name: display_name,
        caption,
        media_ids,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::Delays;
    use crate::testing::{account, FakeCaptions, FakePosts, FakeUploader};
    use async_trait::async_trait;
    use chrono::{TimeZone, Utc};
    use rand::rngs::StdRng;
    use rand::SeedableRng;
    use std::collections::HashMap;
    use std::path::PathBuf;

    /// In-memory carousel source: folder id -> (image names, caption).
    struct MemorySource {
        folders: HashMap<String, (Vec<&'static str>, Option<&'static str>)>,
    }

    #[async_trait]
    impl CarouselSource for MemorySource {
        async fn list_images(&self, folder: &CarouselFolder) -> SchedulerResult<Vec<PathBuf>> {
            let (images, _) = self
                .folders
                .get(&folder.id)
                .ok_or_else(|| SchedulerError::source("unknown folder"))?;
            Ok(images.iter().map(PathBuf::from).collect())
        }

        async fn read_caption(&self, folder: &CarouselFolder) -> SchedulerResult<Option<String>> {
            let (_, caption) = self
                .folders
                .get(&folder.id)
                .ok_or_else(|| SchedulerError::source("unknown folder"))?;
            Ok(caption.map(str::to_string))
        }

        async fn folder_name(&self, folder: &CarouselFolder) -> SchedulerResult<String> {
            Ok(folder.name.clone())
        }
    }

    fn folder(id: &str) -> CarouselFolder {
        CarouselFolder::new(id, id, format!("/tmp/{}", id))
    }

    fn test_window() -> ScheduleWindow {
        ScheduleWindow::new(
            Utc.with_ymd_and_hms(2025, 6, 1, 10, 0, 0).unwrap(),
            30.0,
            90.0,
        )
    }

    fn fast_delays() -> Delays {
        Delays {
            upload_delay: std::time::Duration::from_millis(1),
            carousel_image_delay: std::time::Duration::from_millis(1),
            post_delay: std::time::Duration::from_millis(1),
            retry_base: std::time::Duration::from_millis(1),
        }
    }

    #[tokio::test]
    async fn test_carousel_posts_carry_all_images_in_order() {
        let uploader = FakeUploader::new();
        let captions = FakeCaptions::new();
        let posts = FakePosts::new();
        let ctx = ScheduleContext::new(&uploader, Some(&captions), &posts, fast_delays());
        let source = MemorySource {
            folders: HashMap::from([(
                "series-a".to_string(),
                (vec!["a/1.png", "a/2.png", "a/3.png"], Some("my caption")),
            )]),
        };
        let mut rng = StdRng::seed_from_u64(3);

        let progress = run_carousel_schedule(
            &ctx,
            &source,
            &[folder("series-a")],
            &[account(1, "alice")],
            &test_window(),
            &mut rng,
            |_| {},
        )
        .await
        .unwrap();

        assert_eq!(progress.videos_uploaded, 1);
        assert_eq!(progress.posts_created, 1);
        let requests = posts.requests();
        assert_eq!(requests[0].caption, "my caption");
        assert_eq!(
            requests[0].media,
            vec!["media-1.png", "media-2.png", "media-3.png"]
        );
    }

    #[tokio::test]
    async fn test_empty_folder_is_excluded_entirely() {
        let uploader = FakeUploader::new();
        let captions = FakeCaptions::new();
        let posts = FakePosts::new();
        let ctx = ScheduleContext::new(&uploader, Some(&captions), &posts, fast_delays());
        let source = MemorySource {
            folders: HashMap::from([
                ("empty".to_string(), (vec![], None)),
                ("full".to_string(), (vec!["f/1.png"], Some("cap"))),
            ]),
        };
        let mut rng = StdRng::seed_from_u64(3);

        let progress = run_carousel_schedule(
            &ctx,
            &source,
            &[folder("empty"), folder("full")],
            &[account(1, "alice"), account(2, "bob")],
            &test_window(),
            &mut rng,
            |_| {},
        )
        .await
        .unwrap();

        assert_eq!(progress.videos_uploaded, 1);
        assert_eq!(progress.videos_failed, 1);
        assert_eq!(progress.posts_total, 2);
        assert_eq!(progress.posts_created, 2);
        assert_eq!(progress.errors.len(), 1);
        assert_eq!(progress.errors[0].asset, "empty");
        assert!(progress.errors[0].message.contains("No images found"));
    }

    #[tokio::test]
    async fn test_one_failed_image_fails_whole_carousel() {
        // 2.png fails permanently; no partial-carousel post may be created.
        let uploader = FakeUploader::new().failing_for("2.png");
        let captions = FakeCaptions::new();
        let posts = FakePosts::new();
        let ctx = ScheduleContext::new(&uploader, Some(&captions), &posts, fast_delays());
        let source = MemorySource {
            folders: HashMap::from([
                (
                    "broken".to_string(),
                    (vec!["b/1.png", "b/2.png", "b/3.png"], None),
                ),
                ("good".to_string(), (vec!["g/9.png"], Some("ok"))),
            ]),
        };
        let mut rng = StdRng::seed_from_u64(3);

        let progress = run_carousel_schedule(
            &ctx,
            &source,
            &[folder("broken"), folder("good")],
            &[account(1, "alice")],
            &test_window(),
            &mut rng,
            |_| {},
        )
        .await
        .unwrap();

        assert_eq!(progress.videos_failed, 1);
        assert_eq!(progress.videos_uploaded, 1);
        assert_eq!(progress.posts_total, 1);
        let requests = posts.requests();
        assert_eq!(requests.len(), 1);
        assert!(requests[0].media.iter().all(|m| m.contains("9.png")));
    }

    #[tokio::test]
    async fn test_missing_caption_falls_back_to_folder_name() {
        let uploader = FakeUploader::new();
        let captions = FakeCaptions::new();
        let posts = FakePosts::new();
        let ctx = ScheduleContext::new(&uploader, Some(&captions), &posts, fast_delays());
        let source = MemorySource {
            folders: HashMap::from([("series-b".to_string(), (vec!["s/1.png"], None))]),
        };
        let mut rng = StdRng::seed_from_u64(3);

        run_carousel_schedule(
            &ctx,
            &source,
            &[folder("series-b")],
            &[account(1, "alice")],
            &test_window(),
            &mut rng,
            |_| {},
        )
        .await
        .unwrap();

        assert_eq!(posts.requests()[0].caption, "series-b");
    }
}
