//! Run cancellation.
//!
//! The token is checked at every suspension point (before each remote call
//! and sleep). Cancelling stops the run with [`SchedulerError::Cancelled`];
//! bookkeeping for work already completed is preserved in the progress state
//! the caller last observed.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use crate::error::{SchedulerError, SchedulerResult};

/// Cheap clonable cancellation flag shared between a run and its caller.
#[derive(Debug, Clone, Default)]
pub struct CancellationToken {
    cancelled: Arc<AtomicBool>,
}

impl CancellationToken {
    pub fn new() -> Self {
        Self::default()
    }

    /// Request cancellation. Takes effect at the run's next suspension point.
    pub fn cancel(&self) {
        self.cancelled.store(true, Ordering::SeqCst);
    }

    pub fn is_cancelled(&self) -> bool {
        self.cancelled.load(Ordering::SeqCst)
    }

    /// Fail with [`SchedulerError::Cancelled`] if cancellation was requested.
    pub fn check(&self) -> SchedulerResult<()> {
        if self.is_cancelled() {
            Err(SchedulerError::Cancelled)
        } else {
            Ok(())
        }
    }
}
