//! The drain state machine: activation latch, color cursor and deadline.
//!
//! [`DrainSequencer`] only decides *what* happens; it never touches LEDs.
//! [`DrainController`](crate::DrainController) applies the returned steps
//! to the hardware.

use crate::time::TimeInstant;
use crate::types::{Color, DrainPhase, DrainStep};

/// Latch, cursor and deadline for one drain cycle.
///
/// Invariant: while idle the cursor is `Red` and there is no deadline;
/// while active the deadline is the instant of the next pending step.
#[derive(Debug, Clone, Copy)]
pub struct DrainSequencer<I: TimeInstant> {
    interval: I::Duration,
    active: bool,
    cursor: Color,
    turn_off_at: Option<I>,
}

impl<I: TimeInstant> DrainSequencer<I> {
    /// Creates an idle sequencer that steps every `interval`.
    pub fn new(interval: I::Duration) -> Self {
        Self {
            interval,
            active: false,
            cursor: Color::Red,
            turn_off_at: None,
        }
    }

    /// Starts a cycle at `now`. Returns false without changing anything if a
    /// cycle is already running.
    pub fn arm(&mut self, now: I) -> bool {
        if self.active {
            return false;
        }

        self.active = true;
        self.cursor = Color::Red;
        self.turn_off_at = Some(self.deadline_after(now));
        true
    }

    /// Returns true if armed and `now` has reached the deadline.
    pub fn is_due(&self, now: I) -> bool {
        match (self.active, self.turn_off_at) {
            (true, Some(deadline)) => now >= deadline,
            _ => false,
        }
    }

    /// Advances one step if due, otherwise does nothing.
    pub fn poll(&mut self, now: I) -> Option<DrainStep> {
        if self.is_due(now) {
            Some(self.advance(now))
        } else {
            None
        }
    }

    /// Turns off the cursor color and moves to the next one.
    ///
    /// The deadline is pushed one interval past `now` on every step,
    /// including the one that releases the latch. Must only be called while
    /// armed; [`poll`](Self::poll) enforces that.
    pub fn advance(&mut self, now: I) -> DrainStep {
        debug_assert!(self.active, "advance() called on an idle sequencer");

        let turned_off = self.cursor;
        let finished = turned_off.is_last();

        self.cursor = turned_off.next();
        self.turn_off_at = Some(self.deadline_after(now));
        if finished {
            self.active = false;
        }

        DrainStep {
            turned_off,
            finished,
        }
    }

    /// Returns true while a cycle is running.
    #[inline]
    pub fn is_active(&self) -> bool {
        self.active
    }

    /// The color that turns off at the next step.
    #[inline]
    pub fn cursor(&self) -> Color {
        self.cursor
    }

    /// Deadline of the next step, or None while idle.
    pub fn deadline(&self) -> Option<I> {
        if self.active { self.turn_off_at } else { None }
    }

    /// Configured step interval.
    pub fn interval(&self) -> I::Duration {
        self.interval
    }

    /// Current phase of the state machine.
    pub fn phase(&self) -> DrainPhase {
        DrainPhase::from_parts(self.active, self.cursor)
    }

    // On overflow the deadline collapses to `now`, so the next tick steps
    // immediately instead of the cycle stalling forever.
    fn deadline_after(&self, now: I) -> I {
        now.checked_add(self.interval).unwrap_or(now)
    }
}
