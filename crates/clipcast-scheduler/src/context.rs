//! Capability wiring for a schedule run.

use clipcast_social::{CaptionGenerator, MediaUploader, PostCreator};

use crate::cancel::CancellationToken;
use crate::config::Delays;

/// The remote capabilities and pacing a run operates with.
///
/// The orchestrators only see these trait objects; production wires the
/// reqwest-backed clients, tests wire scripted fakes.
pub struct ScheduleContext<'a> {
    /// Media upload endpoint
    pub uploader: &'a dyn MediaUploader,
    /// Best-effort caption generation; `None` always falls back to the
    /// asset's display name
    pub captions: Option<&'a dyn CaptionGenerator>,
    /// Post-creation endpoint
    pub posts: &'a dyn PostCreator,
    /// Rate-limit pacing
    pub delays: Delays,
    /// Checked at every suspension point
    pub cancel: CancellationToken,
}

impl<'a> ScheduleContext<'a> {
    pub fn new(
        uploader: &'a dyn MediaUploader,
        captions: Option<&'a dyn CaptionGenerator>,
        posts: &'a dyn PostCreator,
        delays: Delays,
    ) -> Self {
        Self {
            uploader,
            captions,
            posts,
            delays,
            cancel: CancellationToken::new(),
        }
    }

    /// Replace the cancellation token, e.g. to share it with a caller.
    pub fn with_cancel(mut self, cancel: CancellationToken) -> Self {
        self.cancel = cancel;
        self
    }
}
