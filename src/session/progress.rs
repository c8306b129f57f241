//! Session progress derivation.

use std::time::Duration;

/// Derives a completion fraction from elapsed time. Holds no state.
pub struct ProgressTracker;

impl ProgressTracker {
    /// Returns `elapsed / total` clamped to `0..=1`.
    pub fn fraction(elapsed: Duration, total: Duration) -> f64 {
        if total.is_zero() {
            return 1.0;
        }
        (elapsed.as_secs_f64() / total.as_secs_f64()).clamp(0.0, 1.0)
    }
}
