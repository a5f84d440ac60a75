//! Single-threaded event loop feeding a controller.
//!
//! An alternative to running the handlers in interrupt context: interrupts
//! only timestamp their event and push it here, and the main loop dispatches
//! everything to the controller in order.

use heapless::Deque;

use crate::controller::{DrainController, PressOutcome, TickOutcome};
use crate::led::LedBank;
use crate::time::{TimeInstant, TimeSource};

/// A timestamped input to the controller.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum DrainEvent<I> {
    /// Falling edge on the button.
    ButtonEdge(I),
    /// Periodic deadline check.
    Tick(I),
}

impl<I: Copy> DrainEvent<I> {
    /// When the event happened.
    pub fn timestamp(&self) -> I {
        match *self {
            DrainEvent::ButtonEdge(at) | DrainEvent::Tick(at) => at,
        }
    }
}

/// Event queue errors.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum EventError {
    /// The button queue is full; the edge was not queued.
    ButtonQueueFull,
}

impl core::fmt::Display for EventError {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            EventError::ButtonQueueFull => {
                write!(f, "button event queue is full")
            }
        }
    }
}

#[cfg(feature = "std")]
impl std::error::Error for EventError {}

/// Counts of what one [`EventLoop::dispatch`] call did.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct DispatchReport {
    /// Button edges handled.
    pub edges: usize,
    /// Edges that armed a new cycle.
    pub armed: usize,
    /// Ticks handled.
    pub ticks: usize,
    /// LEDs turned off.
    pub steps: usize,
    /// Cycles that ended with the last LED turning off.
    pub cycles_completed: usize,
}

/// Two bounded input queues, one for button edges and one for ticks.
///
/// Events come out in timestamp order. A button edge and a tick with the
/// same timestamp yield the edge first, so a press accepted while idle is
/// always seen before the next deadline check.
///
/// # Type Parameters
/// * `I` - Time instant type
/// * `N` - Capacity of each queue
pub struct EventLoop<I, const N: usize> {
    buttons: Deque<I, N>,
    ticks: Deque<I, N>,
    dropped_ticks: usize,
}

impl<I: TimeInstant, const N: usize> EventLoop<I, N> {
    /// Creates an empty event loop.
    pub const fn new() -> Self {
        Self {
            buttons: Deque::new(),
            ticks: Deque::new(),
            dropped_ticks: 0,
        }
    }

    /// Queues a button edge.
    ///
    /// # Errors
    /// [`EventError::ButtonQueueFull`] if the button queue has no room.
    pub fn push_button_edge(&mut self, at: I) -> Result<(), EventError> {
        self.buttons
            .push_back(at)
            .map_err(|_| EventError::ButtonQueueFull)
    }

    /// Queues a tick. Never fails.
    ///
    /// When the tick queue is full the oldest tick is discarded. The deadline
    /// check is level-triggered, so the newer tick performs any step the
    /// discarded one would have.
    pub fn push_tick(&mut self, at: I) {
        if self.ticks.is_full() {
            self.ticks.pop_front();
            self.dropped_ticks += 1;
        }
        let _ = self.ticks.push_back(at);
    }

    /// Pops the earliest pending event.
    pub fn next_event(&mut self) -> Option<DrainEvent<I>> {
        let take_button = match (self.buttons.front(), self.ticks.front()) {
            (Some(edge), Some(tick)) => edge <= tick,
            (Some(_), None) => true,
            (None, Some(_)) => false,
            (None, None) => return None,
        };

        if take_button {
            self.buttons.pop_front().map(DrainEvent::ButtonEdge)
        } else {
            self.ticks.pop_front().map(DrainEvent::Tick)
        }
    }

    /// Feeds every pending event to `controller`.
    pub fn dispatch<L, T>(&mut self, controller: &mut DrainController<I, L, T>) -> DispatchReport
    where
        L: LedBank,
        T: TimeSource<I>,
    {
        let mut report = DispatchReport::default();

        while let Some(event) = self.next_event() {
            match event {
                DrainEvent::ButtonEdge(at) => {
                    report.edges += 1;
                    if controller.on_button_edge_at(at) == PressOutcome::Armed {
                        report.armed += 1;
                    }
                }
                DrainEvent::Tick(at) => {
                    report.ticks += 1;
                    if let TickOutcome::Advanced(step) = controller.on_tick_at(at) {
                        report.steps += 1;
                        if step.finished {
                            report.cycles_completed += 1;
                        }
                    }
                }
            }
        }

        report
    }

    /// Number of queued events.
    pub fn len(&self) -> usize {
        self.buttons.len() + self.ticks.len()
    }

    /// Returns true if nothing is queued.
    pub fn is_empty(&self) -> bool {
        self.buttons.is_empty() && self.ticks.is_empty()
    }

    /// Total ticks discarded because the tick queue was full.
    pub fn dropped_ticks(&self) -> usize {
        self.dropped_ticks
    }
}

impl<I: TimeInstant, const N: usize> Default for EventLoop<I, N> {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::time::TimeDuration;
    extern crate std;
    use std::format;

    #[derive(Debug, Clone, Copy, PartialEq, PartialOrd)]
    struct Micros(u64);

    impl TimeDuration for Micros {
        const ZERO: Self = Micros(0);

        fn as_micros(&self) -> u64 {
            self.0
        }

        fn from_micros(micros: u64) -> Self {
            Micros(micros)
        }
    }

    #[derive(Debug, Clone, Copy, PartialEq, PartialOrd)]
    struct At(u64);

    impl TimeInstant for At {
        type Duration = Micros;

        fn duration_since(&self, earlier: Self) -> Micros {
            Micros(self.0.saturating_sub(earlier.0))
        }

        fn checked_add(self, duration: Micros) -> Option<Self> {
            self.0.checked_add(duration.0).map(At)
        }
    }

    #[test]
    fn events_merge_in_timestamp_order() {
        let mut events = EventLoop::<At, 4>::new();
        events.push_tick(At(10));
        events.push_tick(At(30));
        events.push_button_edge(At(20)).unwrap();

        assert_eq!(events.next_event(), Some(DrainEvent::Tick(At(10))));
        assert_eq!(events.next_event(), Some(DrainEvent::ButtonEdge(At(20))));
        assert_eq!(events.next_event(), Some(DrainEvent::Tick(At(30))));
        assert_eq!(events.next_event(), None);
    }

    #[test]
    fn button_wins_timestamp_ties() {
        let mut events = EventLoop::<At, 4>::new();
        events.push_tick(At(5));
        events.push_button_edge(At(5)).unwrap();

        assert_eq!(events.next_event(), Some(DrainEvent::ButtonEdge(At(5))));
        assert_eq!(events.next_event(), Some(DrainEvent::Tick(At(5))));
    }

    #[test]
    fn full_button_queue_is_an_error() {
        let mut events = EventLoop::<At, 2>::new();
        events.push_button_edge(At(1)).unwrap();
        events.push_button_edge(At(2)).unwrap();

        assert_eq!(
            events.push_button_edge(At(3)),
            Err(EventError::ButtonQueueFull)
        );
        assert_eq!(events.len(), 2);
    }

    #[test]
    fn full_tick_queue_drops_oldest() {
        let mut events = EventLoop::<At, 2>::new();
        events.push_tick(At(1));
        events.push_tick(At(2));
        events.push_tick(At(3));

        assert_eq!(events.dropped_ticks(), 1);
        assert_eq!(events.next_event(), Some(DrainEvent::Tick(At(2))));
        assert_eq!(events.next_event(), Some(DrainEvent::Tick(At(3))));
        assert!(events.is_empty());
    }

    #[test]
    fn error_display() {
        assert_eq!(
            format!("{}", EventError::ButtonQueueFull),
            "button event queue is full"
        );
    }

    #[test]
    fn timestamp_reads_either_variant() {
        assert_eq!(DrainEvent::ButtonEdge(At(7)).timestamp(), At(7));
        assert_eq!(DrainEvent::Tick(At(9)).timestamp(), At(9));
    }
}
