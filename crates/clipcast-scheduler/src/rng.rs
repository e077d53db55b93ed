//! Jitter helpers over an injected random generator.
//!
//! All randomness (per-account shuffles, schedule jitter) flows through the
//! generator the caller provides, so seeded tests can assert exact schedules.

use rand::Rng;

/// Uniform value in `[min, max)`; returns `min` for an empty range.
pub fn random_between<R: Rng + ?Sized>(rng: &mut R, min: f64, max: f64) -> f64 {
    min + (max - min) * rng.random::<f64>()
}
