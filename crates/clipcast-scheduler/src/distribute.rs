//! The shared creating-phase core.
//!
//! Both orchestrators feed their successfully uploaded bundles through this
//! routine: one post per (bundle, account) pair, shuffled per account,
//! spread across a jittered future window. Accounts are processed in input
//! order; within one account scheduled times are strictly increasing.

use chrono::Duration as ChronoDuration;
use rand::seq::SliceRandom;
use rand::Rng;
use tracing::{info, warn};

use clipcast_models::{
    CreatePostRequest, ErrorEntry, PlatformConfigurations, ScheduleProgress, SocialAccount,
};
use clipcast_social::{with_retry, RetryPolicy};

use crate::config::ScheduleWindow;
use crate::context::ScheduleContext;
use crate::error::SchedulerResult;
use crate::rng::random_between;

/// One successfully uploaded asset, ready for distribution.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UploadedBundle {
    /// Display name (error reporting)
    pub name: String,
    /// Caption for every post of this asset
    pub caption: String,
    /// Media handles, in posting order
    pub media_ids: Vec<String>,
}

fn minutes(m: f64) -> ChronoDuration {
    ChronoDuration::milliseconds((m * 60_000.0).round() as i64)
}

/// Create one post per (bundle, account) pair.
///
/// Mutates `state` in place and emits a snapshot after every submission
/// attempt. Per-pair failures are recorded and never abort the loop.
pub(crate) async fn distribute_posts<R, F>(
    ctx: &ScheduleContext<'_>,
    uploaded: &[UploadedBundle],
    accounts: &[SocialAccount],
    window: &ScheduleWindow,
    rng: &mut R,
    state: &mut ScheduleProgress,
    on_progress: &mut F,
) -> SchedulerResult<()>
where
    R: Rng,
    F: FnMut(ScheduleProgress),
{
    for account in accounts {
        state.current_account = Some(account.username.clone());

        // Fresh shuffle per account so accounts do not share an asset order.
        let mut order: Vec<&UploadedBundle> = uploaded.iter().collect();
        order.shuffle(rng);

        let mut current_time = window.start_time
            + minutes(random_between(rng, 0.0, window.min_interval_minutes));

        for bundle in order {
            ctx.cancel.check()?;

            let request = CreatePostRequest {
                caption: bundle.caption.clone(),
                social_accounts: vec![account.id],
                media: bundle.media_ids.clone(),
                scheduled_at: current_time,
                platform_configurations: PlatformConfigurations::defaults_for(account.platform),
            };

            let policy = RetryPolicy::new(format!("post @{}/{}", account.username, bundle.name))
                .with_base_delay(ctx.delays.retry_base);

            match with_retry(&policy, || ctx.posts.create_post(&request)).await {
                Ok(post) => {
                    state.posts_created += 1;
                    metrics::counter!("clipcast_posts_created_total").increment(1);
                    info!(
                        post_id = %post.id,
                        account = %account.username,
                        asset = %bundle.name,
                        scheduled_at = %current_time,
                        "Post created"
                    );
                }
                Err(e) => {
                    state.posts_failed += 1;
                    metrics::counter!("clipcast_posts_failed_total").increment(1);
                    warn!(
                        account = %account.username,
                        asset = %bundle.name,
                        error = %e,
                        "Post creation failed"
                    );
                    state.errors.push(ErrorEntry::post(
                        bundle.name.as_str(),
                        account.username.as_str(),
                        e.to_string(),
                    ));
                }
            }

            on_progress(state.clone());

            ctx.cancel.check()?;
            tokio::time::sleep(ctx.delays.post_delay).await;
            current_time = current_time
                + minutes(random_between(
                    rng,
                    window.min_interval_minutes,
                    window.max_interval_minutes,
                ));
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_minutes_conversion() {
        assert_eq!(minutes(1.0), ChronoDuration::milliseconds(60_000));
        assert_eq!(minutes(0.5), ChronoDuration::milliseconds(30_000));
        assert_eq!(minutes(0.0), ChronoDuration::zero());
    }
}
