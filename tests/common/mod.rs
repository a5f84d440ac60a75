//! Shared test infrastructure for led-drain integration tests

#![allow(dead_code)] // Items used across multiple test files; Rust analyzes per-file

use core::sync::atomic::{AtomicU64, Ordering};
use led_drain::{Color, DrainController, LedBank, LedLevels, TimeDuration, TimeInstant, TimeSource};

// ============================================================================
// Mock Time Types
// ============================================================================

/// Mock duration type for testing (wraps microseconds)
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub struct TestDuration(pub u64);

impl TestDuration {
    pub fn ms(millis: u64) -> Self {
        TestDuration(millis * 1_000)
    }
}

impl TimeDuration for TestDuration {
    const ZERO: Self = TestDuration(0);

    fn as_micros(&self) -> u64 {
        self.0
    }

    fn from_micros(micros: u64) -> Self {
        TestDuration(micros)
    }
}

/// Mock instant type for testing (microseconds since boot)
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub struct TestInstant(pub u64);

impl TestInstant {
    pub fn ms(millis: u64) -> Self {
        TestInstant(millis * 1_000)
    }
}

impl TimeInstant for TestInstant {
    type Duration = TestDuration;

    fn duration_since(&self, earlier: Self) -> Self::Duration {
        TestDuration(self.0.saturating_sub(earlier.0))
    }

    fn checked_add(self, duration: Self::Duration) -> Option<Self> {
        self.0.checked_add(duration.0).map(TestInstant)
    }
}

// ============================================================================
// Mock LED Bank
// ============================================================================

/// Mock LED bank that records every write
pub struct MockLedBank {
    levels: LedLevels,
    write_history: heapless::Vec<(Color, bool), 64>,
}

impl MockLedBank {
    pub fn new() -> Self {
        Self {
            levels: LedLevels::ALL_OFF,
            write_history: heapless::Vec::new(),
        }
    }

    pub fn levels(&self) -> LedLevels {
        self.levels
    }

    pub fn write_history(&self) -> &[(Color, bool)] {
        &self.write_history
    }
}

impl LedBank for MockLedBank {
    fn set_led(&mut self, color: Color, on: bool) {
        self.levels.set(color, on);
        let _ = self.write_history.push((color, on));
    }
}

// ============================================================================
// Mock Time Sources
// ============================================================================

/// Mock time source with controllable time advancement
pub struct MockTimeSource {
    current_time: core::cell::Cell<TestInstant>,
}

impl MockTimeSource {
    pub fn new() -> Self {
        Self {
            current_time: core::cell::Cell::new(TestInstant(0)),
        }
    }

    /// Advance time by the given duration
    pub fn advance(&self, duration: TestDuration) {
        let current = self.current_time.get();
        self.current_time.set(TestInstant(current.0 + duration.0));
    }

    pub fn advance_ms(&self, millis: u64) {
        self.advance(TestDuration::ms(millis));
    }

    pub fn set_time(&self, time: TestInstant) {
        self.current_time.set(time);
    }
}

impl TimeSource<TestInstant> for MockTimeSource {
    fn now(&self) -> TestInstant {
        self.current_time.get()
    }
}

/// Thread-safe clock for tests that drive the controller from several threads
pub struct AtomicClock {
    micros: AtomicU64,
}

impl AtomicClock {
    pub const fn new() -> Self {
        Self {
            micros: AtomicU64::new(0),
        }
    }

    pub fn advance_ms(&self, millis: u64) {
        self.micros.fetch_add(millis * 1_000, Ordering::SeqCst);
    }
}

impl TimeSource<TestInstant> for AtomicClock {
    fn now(&self) -> TestInstant {
        TestInstant(self.micros.load(Ordering::SeqCst))
    }
}

// ============================================================================
// Test Helper Functions
// ============================================================================

pub type TestController<'a> = DrainController<TestInstant, MockLedBank, &'a MockTimeSource>;

pub fn controller(timer: &MockTimeSource) -> TestController<'_> {
    DrainController::new(MockLedBank::new(), timer)
}

pub const RED_OFF: LedLevels = LedLevels {
    red: false,
    blue: true,
    green: true,
};

pub const RED_BLUE_OFF: LedLevels = LedLevels {
    red: false,
    blue: false,
    green: true,
};
