//! Bulk schedule orchestration.
//!
//! A schedule run is a two-phase state machine: every asset is uploaded
//! sequentially (`Uploading`), then one post per (asset, account) pair is
//! created at a jittered future time (`Creating`), then the run reports
//! `Done`. Failures local to one asset or one pair are recorded and never
//! abort the run; only pre-run configuration violations and explicit
//! cancellation do.

pub mod cancel;
pub mod carousel;
pub mod config;
pub mod context;
pub mod distribute;
pub mod error;
pub mod rng;
pub mod run_context;
pub mod source;
pub mod video;

#[cfg(test)]
pub(crate) mod testing;

pub use cancel::CancellationToken;
pub use carousel::run_carousel_schedule;
pub use config::{Delays, ScheduleWindow};
pub use context::ScheduleContext;
pub use distribute::UploadedBundle;
pub use error::{SchedulerError, SchedulerResult};
pub use run_context::{NameCache, RunContext};
pub use source::{find_carousel_folders, CarouselSource, LocalCarouselSource};
pub use video::run_video_schedule;
