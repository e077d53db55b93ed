//! Bounded retry with linear backoff.
//!
//! Wraps remote calls against the posting API. Errors are classified by the
//! [`RetryableError`] trait: transient errors (HTTP 429 and 5xx) are retried
//! with a linearly growing delay, everything else propagates immediately.

use std::future::Future;
use std::time::Duration;
use tracing::warn;

/// Total attempts per operation, including the initial one.
pub const MAX_ATTEMPTS: u32 = 5;

/// Base backoff delay; the wait before retry `n` is `base * n`.
pub const RETRY_BASE: Duration = Duration::from_secs(5);

/// Classification of an error as transient or permanent.
pub trait RetryableError {
    fn is_retryable(&self) -> bool;
}

/// Retry behavior for one labeled operation.
#[derive(Debug, Clone)]
pub struct RetryPolicy {
    /// Maximum total attempts (including the initial attempt).
    pub max_attempts: u32,
    /// Base delay; grows linearly with the attempt number. No jitter.
    pub base_delay: Duration,
    /// Operation name for logging.
    pub label: String,
}

impl RetryPolicy {
    /// Create a policy with the default attempt budget and backoff.
    pub fn new(label: impl Into<String>) -> Self {
        Self {
            max_attempts: MAX_ATTEMPTS,
            base_delay: RETRY_BASE,
            label: label.into(),
        }
    }

    /// Set the maximum total attempts.
    pub fn with_max_attempts(mut self, max_attempts: u32) -> Self {
        self.max_attempts = max_attempts;
        self
    }

    /// Set the base backoff delay.
    pub fn with_base_delay(mut self, base_delay: Duration) -> Self {
        self.base_delay = base_delay;
        self
    }

    /// Delay before the retry following failed attempt `attempt` (0-indexed):
    /// 5s, 10s, 15s, 20s with the default base.
    fn delay_after_attempt(&self, attempt: u32) -> Duration {
        self.base_delay.saturating_mul(attempt + 1)
    }
}

/// Execute an async operation, retrying transient failures.
///
/// Returns the first success, the first permanent error, or the last
/// transient error once the attempt budget is exhausted.
pub async fn with_retry<F, Fut, T, E>(policy: &RetryPolicy, operation: F) -> Result<T, E>
where
    F: Fn() -> Fut,
    Fut: Future<Output = Result<T, E>>,
    E: RetryableError + std::fmt::Display,
{
    let mut attempt = 0u32;

    loop {
        match operation().await {
            Ok(value) => return Ok(value),
            Err(e) if e.is_retryable() && attempt + 1 < policy.max_attempts => {
                let delay = policy.delay_after_attempt(attempt);
                attempt += 1;
                warn!(
                    operation = %policy.label,
                    attempt,
                    max_attempts = policy.max_attempts,
                    delay_ms = delay.as_millis() as u64,
                    error = %e,
                    "Transient failure, retrying"
                );
                metrics::counter!("clipcast_retries_total").increment(1);
                tokio::time::sleep(delay).await;
            }
            Err(e) => {
                metrics::counter!("clipcast_retry_exhausted_total").increment(1);
                return Err(e);
            }
        }
    }
}
