//! Playback scheduling.
//!
//! Turns a step's nominal duration and a caller-supplied scale factor into
//! the two waits the replay performs for that step: one before moving the
//! vehicle to the step's start, one before moving it to the step's end.

use std::time::Duration;

/// Duration assumed for a step the provider reported no duration for.
pub const DEFAULT_STEP_DURATION_SECS: f64 = 600.0;

/// Scale factor used when the caller does not supply one.
pub const DEFAULT_SCALE: f64 = 100.0;

/// The two waits of one step, in milliseconds.
///
/// Both halves are always equal, finite and non-negative. A wait longer
/// than [`Duration::MAX`] is clamped to it.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct StepWaits {
    /// Wait before moving to the step's start point.
    pub to_start_ms: f64,
    /// Wait before moving to the step's end point.
    pub to_end_ms: f64,
}

impl StepWaits {
    /// Sum of both waits, in milliseconds.
    pub fn total_ms(&self) -> f64 {
        self.to_start_ms + self.to_end_ms
    }

    /// Wait before the move to the step's start.
    pub fn to_start(&self) -> Duration {
        ms_to_duration(self.to_start_ms)
    }

    /// Wait before the move to the step's end.
    pub fn to_end(&self) -> Duration {
        ms_to_duration(self.to_end_ms)
    }

    /// Limit the total wait to `max_total`, keeping both halves equal.
    pub fn capped(self, max_total: Duration) -> Self {
        let max_ms = max_total.as_secs_f64() * 1000.0;
        if self.total_ms() <= max_ms {
            return self;
        }
        let half = max_ms / 2.0;
        Self {
            to_start_ms: half,
            to_end_ms: half,
        }
    }
}

/// Normalize a caller-supplied scale factor.
///
/// The sign is ignored. A scale that normalizes to zero (or is NaN) would
/// make every wait infinite, so it falls back to 1 (real time).
pub fn effective_scale(scale: f64) -> f64 {
    let scale = scale.abs();
    if scale == 0.0 || scale.is_nan() {
        1.0
    } else {
        scale
    }
}

/// Compute the two waits for a step.
///
/// A missing duration (or one that is negative or not finite) is replaced
/// by [`DEFAULT_STEP_DURATION_SECS`]. The total scaled duration is
/// `duration * 1000 / effective_scale(scale)` milliseconds, split evenly
/// between the two waits. Each wait is clamped to [`Duration::MAX`].
///
/// # Examples
///
/// ```
/// use trip_replay::replay::compute_step_waits;
///
/// let waits = compute_step_waits(Some(20.0), 100.0);
/// assert_eq!(waits.to_start_ms, 100.0);
/// assert_eq!(waits.to_end_ms, 100.0);
///
/// // Missing duration defaults to 10 minutes
/// let waits = compute_step_waits(None, 100.0);
/// assert_eq!(waits.to_start_ms, 3000.0);
///
/// // Sign is ignored, zero means real time
/// assert_eq!(compute_step_waits(None, -100.0), compute_step_waits(None, 100.0));
/// assert_eq!(compute_step_waits(Some(4.0), 0.0), compute_step_waits(Some(4.0), 1.0));
/// ```
pub fn compute_step_waits(nominal_duration_secs: Option<f64>, scale: f64) -> StepWaits {
    let duration_secs = nominal_duration_secs
        .filter(|d| d.is_finite() && *d >= 0.0)
        .unwrap_or(DEFAULT_STEP_DURATION_SECS);

    let total_ms = duration_secs * 1000.0 / effective_scale(scale);
    let half = (total_ms / 2.0).min(max_wait_ms());

    StepWaits {
        to_start_ms: half,
        to_end_ms: half,
    }
}

/// Longest representable wait, in milliseconds.
fn max_wait_ms() -> f64 {
    Duration::MAX.as_secs_f64() * 1000.0
}

/// Convert milliseconds to a `Duration`, saturating when unrepresentable.
fn ms_to_duration(ms: f64) -> Duration {
    Duration::try_from_secs_f64(ms / 1000.0).unwrap_or(Duration::MAX)
}
