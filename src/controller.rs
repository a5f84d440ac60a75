//! Button-triggered LED drain controller.
//!
//! Provides [`DrainController`], the single state struct both event sources
//! act on. A button edge lights all three LEDs and arms the cycle; periodic
//! ticks turn them off one at a time once each deadline passes.

use crate::config::Timing;
use crate::debounce::DebounceGate;
use crate::drain::DrainSequencer;
use crate::led::LedBank;
use crate::time::{TimeDuration, TimeInstant, TimeSource};
use crate::types::{Color, DrainPhase, DrainStep, LedLevels};

/// What a button edge did.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum PressOutcome {
    /// Too close to the last accepted edge. Nothing changed.
    Debounced,
    /// Passed the debounce gate while a cycle was running.
    ///
    /// Only the debounce reference moved; cursor, deadline and LEDs are
    /// untouched.
    IgnoredWhileActive,
    /// All LEDs lit and the first deadline set.
    Armed,
}

/// What a periodic tick did.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum TickOutcome<D> {
    /// No cycle running.
    Idle,
    /// Cycle running, deadline not reached yet.
    Waiting {
        /// Time left until the next step is due.
        remaining: D,
    },
    /// One LED was turned off.
    Advanced(DrainStep),
}

impl<D> TickOutcome<D> {
    /// Whether the periodic task should stay scheduled. Always true: the
    /// task runs for the lifetime of the process.
    #[inline]
    pub fn keep_running(&self) -> bool {
        true
    }
}

/// Point-in-time view of the controller.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct ControllerState<I> {
    pub phase: DrainPhase,
    pub cursor: Color,
    pub deadline: Option<I>,
    pub levels: LedLevels,
    pub last_accepted_press: Option<I>,
}

/// Owns the LEDs, debounce gate and drain state machine.
///
/// Neither handler blocks or allocates. The controller itself is not
/// synchronized: put it behind a [`SharedController`](crate::SharedController)
/// when the two handlers run in different interrupt contexts, or feed it
/// from an [`EventLoop`](crate::EventLoop).
///
/// # Type Parameters
/// * `I` - Time instant type
/// * `L` - LED bank implementation type
/// * `T` - Time source implementation type (a reference works too)
pub struct DrainController<I: TimeInstant, L: LedBank, T: TimeSource<I>> {
    leds: L,
    time_source: T,
    timing: Timing,
    gate: DebounceGate<I>,
    sequencer: DrainSequencer<I>,
    levels: LedLevels,
}

impl<I: TimeInstant, L: LedBank, T: TimeSource<I>> DrainController<I, L, T> {
    /// Creates an idle controller with default timing and all LEDs off.
    pub fn new(leds: L, time_source: T) -> Self {
        Self::with_timing(leds, time_source, Timing::DEFAULT)
    }

    /// Creates an idle controller with the given timing and all LEDs off.
    pub fn with_timing(mut leds: L, time_source: T, timing: Timing) -> Self {
        leds.set_all(false);

        Self {
            leds,
            time_source,
            timing,
            gate: DebounceGate::new(timing.debounce_window()),
            sequencer: DrainSequencer::new(timing.sequence_interval()),
            levels: LedLevels::ALL_OFF,
        }
    }

    /// Handles a falling edge on the button, stamped with the current time.
    pub fn on_button_edge(&mut self) -> PressOutcome {
        let now = self.time_source.now();
        self.on_button_edge_at(now)
    }

    /// Handles a falling edge on the button that happened at `event_time`.
    pub fn on_button_edge_at(&mut self, event_time: I) -> PressOutcome {
        if !self.gate.accept(event_time) {
            return PressOutcome::Debounced;
        }

        if !self.sequencer.arm(event_time) {
            #[cfg(feature = "defmt")]
            defmt::debug!("press ignored, drain in progress ({})", self.sequencer.phase());
            return PressOutcome::IgnoredWhileActive;
        }

        self.leds.set_all(true);
        self.levels = LedLevels::ALL_ON;

        #[cfg(feature = "defmt")]
        defmt::debug!("armed: all LEDs on");

        self.check_invariants();
        PressOutcome::Armed
    }

    /// Handles a periodic tick at the current time.
    pub fn on_tick(&mut self) -> TickOutcome<I::Duration> {
        let now = self.time_source.now();
        self.on_tick_at(now)
    }

    /// Handles a periodic tick at `now`.
    ///
    /// The check is level-triggered: a late or missed tick is caught up by
    /// the next one.
    pub fn on_tick_at(&mut self, now: I) -> TickOutcome<I::Duration> {
        if !self.sequencer.is_active() {
            return TickOutcome::Idle;
        }

        let Some(step) = self.sequencer.poll(now) else {
            let remaining = self
                .sequencer
                .deadline()
                .map(|deadline| deadline.duration_since(now))
                .unwrap_or(I::Duration::ZERO);
            return TickOutcome::Waiting { remaining };
        };

        self.leds.set_led(step.turned_off, false);
        self.levels.set(step.turned_off, false);

        #[cfg(feature = "defmt")]
        defmt::debug!("{} off (finished: {})", step.turned_off, step.finished);

        self.check_invariants();
        TickOutcome::Advanced(step)
    }

    /// Returns a snapshot of the controller state.
    pub fn state(&self) -> ControllerState<I> {
        ControllerState {
            phase: self.sequencer.phase(),
            cursor: self.sequencer.cursor(),
            deadline: self.sequencer.deadline(),
            levels: self.levels,
            last_accepted_press: self.gate.last_accepted(),
        }
    }

    /// Returns the current phase of the drain.
    pub fn phase(&self) -> DrainPhase {
        self.sequencer.phase()
    }

    /// Returns true while a drain cycle is running.
    pub fn is_active(&self) -> bool {
        self.sequencer.is_active()
    }

    /// Returns the levels last written to the LEDs.
    pub fn led_levels(&self) -> LedLevels {
        self.levels
    }

    /// Returns the timing this controller was built with.
    pub fn timing(&self) -> Timing {
        self.timing
    }

    /// Returns a reference to the LED bank.
    pub fn leds(&self) -> &L {
        &self.leds
    }

    /// Returns a reference to the time source.
    pub fn time_source(&self) -> &T {
        &self.time_source
    }

    /// Consumes the controller, returning the LED bank and time source.
    pub fn into_parts(self) -> (L, T) {
        (self.leds, self.time_source)
    }

    fn check_invariants(&self) {
        debug_assert_eq!(
            self.levels,
            self.sequencer.phase().expected_levels(),
            "LED levels out of step with the drain phase"
        );
        debug_assert_eq!(self.sequencer.is_active(), self.levels.any_lit());
    }
}
