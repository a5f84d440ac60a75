//! Fixed timing configuration.
//!
//! None of these values are adjustable at runtime. [`Timing`] only exists so
//! the poll cadence can be chosen at build time independently of the step
//! interval.

use crate::time::TimeDuration;

/// Minimum spacing between two accepted button presses, in microseconds.
///
/// The comparison is strict: a press exactly this long after the last
/// accepted one is still rejected.
pub const DEBOUNCE_WINDOW_US: u64 = 200_000;

/// Time each drain step waits before turning off the next LED.
pub const SEQUENCE_INTERVAL_MS: u64 = 3_000;

/// How often the periodic task checks the deadline.
pub const POLL_INTERVAL_MS: u64 = 100;

/// Poll cadence of the original firmware, equal to the step interval.
pub const LEGACY_POLL_INTERVAL_MS: u64 = SEQUENCE_INTERVAL_MS;

/// Timing parameters for a [`DrainController`](crate::DrainController).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Timing {
    /// Debounce window in microseconds.
    pub debounce_window_us: u64,
    /// Drain step interval in milliseconds.
    pub sequence_interval_ms: u64,
    /// Deadline poll cadence in milliseconds.
    pub poll_interval_ms: u64,
}

impl Timing {
    /// Fine-grained polling: a step lands at most 100 ms after its deadline.
    pub const DEFAULT: Timing = Timing {
        debounce_window_us: DEBOUNCE_WINDOW_US,
        sequence_interval_ms: SEQUENCE_INTERVAL_MS,
        poll_interval_ms: POLL_INTERVAL_MS,
    };

    /// Poll cadence coupled to the step interval.
    ///
    /// Steps can land up to a full interval late, depending on where the
    /// press falls between two ticks.
    pub const LEGACY: Timing = Timing {
        debounce_window_us: DEBOUNCE_WINDOW_US,
        sequence_interval_ms: SEQUENCE_INTERVAL_MS,
        poll_interval_ms: LEGACY_POLL_INTERVAL_MS,
    };

    /// Debounce window as a duration.
    #[inline]
    pub fn debounce_window<D: TimeDuration>(&self) -> D {
        D::from_micros(self.debounce_window_us)
    }

    /// Step interval as a duration.
    #[inline]
    pub fn sequence_interval<D: TimeDuration>(&self) -> D {
        D::from_millis(self.sequence_interval_ms)
    }

    /// Poll cadence as a duration.
    #[inline]
    pub fn poll_interval<D: TimeDuration>(&self) -> D {
        D::from_millis(self.poll_interval_ms)
    }
}

impl Default for Timing {
    fn default() -> Self {
        Timing::DEFAULT
    }
}
