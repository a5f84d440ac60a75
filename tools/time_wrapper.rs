#![allow(dead_code)] // Shared between bins; each uses a different subset

use led_drain::{TimeDuration, TimeInstant};

/// Newtype wrapper for embassy_time::Duration to implement TimeDuration
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub struct EmbassyDuration(pub embassy_time::Duration);

impl TimeDuration for EmbassyDuration {
    const ZERO: Self = EmbassyDuration(embassy_time::Duration::from_ticks(0));

    fn as_micros(&self) -> u64 {
        self.0.as_micros()
    }

    fn from_micros(micros: u64) -> Self {
        EmbassyDuration(embassy_time::Duration::from_micros(micros))
    }
}

/// Newtype wrapper for embassy_time::Instant to implement TimeInstant
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub struct EmbassyInstant(pub embassy_time::Instant);

impl EmbassyInstant {
    pub fn from_millis(millis: u64) -> Self {
        EmbassyInstant(embassy_time::Instant::from_millis(millis))
    }

    pub fn as_millis(&self) -> u64 {
        self.0.as_millis()
    }
}

impl TimeInstant for EmbassyInstant {
    type Duration = EmbassyDuration;

    fn duration_since(&self, earlier: Self) -> Self::Duration {
        EmbassyDuration(self.0.saturating_duration_since(earlier.0))
    }

    fn checked_add(self, duration: Self::Duration) -> Option<Self> {
        self.0.checked_add(duration.0).map(EmbassyInstant)
    }
}
