//! Time abstraction traits for platform-agnostic timing.
//!
//! Timestamps are monotonic and microsecond-based. The controller only ever
//! compares instants and adds durations to them, so any free-running counter
//! (RP2040 64-bit timer, embassy-time, a host mock) can back these traits.

/// Trait for abstracting time sources.
pub trait TimeSource<I: TimeInstant> {
    /// Returns the current time instant.
    fn now(&self) -> I;
}

impl<I: TimeInstant, T: TimeSource<I> + ?Sized> TimeSource<I> for &T {
    #[inline]
    fn now(&self) -> I {
        (**self).now()
    }
}

/// Trait abstraction for duration types.
pub trait TimeDuration: Copy + PartialEq + PartialOrd {
    /// Zero duration constant.
    const ZERO: Self;

    /// Converts duration to microseconds.
    fn as_micros(&self) -> u64;

    /// Creates duration from microseconds.
    fn from_micros(micros: u64) -> Self;

    /// Converts duration to milliseconds (truncating).
    fn as_millis(&self) -> u64 {
        self.as_micros() / 1_000
    }

    /// Creates duration from milliseconds.
    fn from_millis(millis: u64) -> Self {
        Self::from_micros(millis.saturating_mul(1_000))
    }

    /// Saturating subtraction (returns ZERO on underflow).
    fn saturating_sub(self, other: Self) -> Self {
        Self::from_micros(self.as_micros().saturating_sub(other.as_micros()))
    }
}

/// Trait abstraction for instant types.
///
/// Ordering is plain `PartialOrd` on the underlying counter. A counter that
/// wraps will misorder instants across the wrap point; with a 64-bit
/// microsecond counter that happens after roughly 584 000 years of uptime.
pub trait TimeInstant: Copy + PartialOrd {
    /// Duration type for this instant.
    type Duration: TimeDuration;

    /// Calculates duration since an earlier instant.
    ///
    /// Returns `ZERO` when `earlier` is actually later than `self`.
    fn duration_since(&self, earlier: Self) -> Self::Duration;

    /// Adds duration to instant, returns None on overflow.
    fn checked_add(self, duration: Self::Duration) -> Option<Self>;
}
