//! Time-based animations for the result view.

use std::time::{Duration, Instant};

/// Ease-out quadratic: fast start, gentle landing.
#[must_use]
pub fn ease_out_quad(t: f64) -> f64 {
    t * (2.0 - t)
}

/// Animated count-up from zero to a target value.
///
/// Purely a function of elapsed time; rendering polls `current()` every
/// frame. Cosmetic only: the underlying prediction value is fixed the
/// moment the response arrives.
#[derive(Debug, Clone, Copy)]
pub struct CountUp {
    target: f64,
    duration: Duration,
    started_at: Instant,
}

impl CountUp {
    /// Start a count-up toward `target` lasting `duration`.
    #[must_use]
    pub fn new(target: f64, duration: Duration) -> Self {
        Self {
            target,
            duration,
            started_at: Instant::now(),
        }
    }

    /// The animated value right now.
    #[must_use]
    pub fn current(&self) -> f64 {
        self.value_after(self.started_at.elapsed())
    }

    /// The animated value after `elapsed` time.
    #[must_use]
    pub fn value_after(&self, elapsed: Duration) -> f64 {
        if self.duration.is_zero() {
            return self.target;
        }
        let t = (elapsed.as_secs_f64() / self.duration.as_secs_f64()).min(1.0);
        self.target * ease_out_quad(t)
    }

    /// Whether the animation has settled on the target.
    #[must_use]
    pub fn is_complete(&self) -> bool {
        self.started_at.elapsed() >= self.duration
    }

    #[must_use]
    pub fn target(&self) -> f64 {
        self.target
    }
}
