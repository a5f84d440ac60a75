//! Timestamp-based button debouncing.

use crate::time::TimeInstant;

/// Rejects button edges that arrive too soon after the last accepted one.
///
/// The gate has no notion of pin level; it only compares edge timestamps.
/// Before the first acceptance there is no reference point, so the first
/// edge always passes.
#[derive(Debug, Clone, Copy)]
pub struct DebounceGate<I: TimeInstant> {
    window: I::Duration,
    last_accepted: Option<I>,
}

impl<I: TimeInstant> DebounceGate<I> {
    /// Creates a gate that has never accepted an edge.
    pub fn new(window: I::Duration) -> Self {
        Self {
            window,
            last_accepted: None,
        }
    }

    /// Returns true if `event_time` is more than one window past the last
    /// accepted edge, and records it as the new reference point.
    ///
    /// An edge stamped before the last accepted one counts as zero elapsed
    /// time and is rejected.
    pub fn accept(&mut self, event_time: I) -> bool {
        let passes = match self.last_accepted {
            None => true,
            Some(last) => event_time.duration_since(last) > self.window,
        };

        if passes {
            self.last_accepted = Some(event_time);
        }
        passes
    }

    /// Timestamp of the last accepted edge.
    pub fn last_accepted(&self) -> Option<I> {
        self.last_accepted
    }

    /// Configured window.
    pub fn window(&self) -> I::Duration {
        self.window
    }
}
