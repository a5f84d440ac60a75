//! Memory footprint report for led-drain
//!
//! Prints the size of every state-carrying type for a few instant types, to
//! show what a controller costs in a `static` on a small MCU. Nothing in the
//! library allocates, so these numbers are the whole story.
//!
//! Usage:
//!   cd tools
//!   cargo run --release --bin sizeof_report

mod time_wrapper;

use std::mem::size_of;

use led_drain::{
    Color, DebounceGate, DrainController, DrainSequencer, EventLoop, LedBank, SharedController,
    TimeDuration, TimeInstant, TimeSource,
};
use time_wrapper::EmbassyInstant;

// u32 milliseconds (SysTick counter style)
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
struct Millis32(u32);

impl TimeDuration for Millis32 {
    const ZERO: Self = Millis32(0);

    fn as_micros(&self) -> u64 {
        self.0 as u64 * 1_000
    }

    fn from_micros(micros: u64) -> Self {
        Millis32((micros / 1_000) as u32)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
struct Instant32(u32);

impl TimeInstant for Instant32 {
    type Duration = Millis32;

    fn duration_since(&self, earlier: Self) -> Self::Duration {
        Millis32(self.0.saturating_sub(earlier.0))
    }

    fn checked_add(self, duration: Self::Duration) -> Option<Self> {
        self.0.checked_add(duration.0).map(Instant32)
    }
}

// u64 microseconds (RP2040 timer style)
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
struct Micros64(u64);

impl TimeDuration for Micros64 {
    const ZERO: Self = Micros64(0);

    fn as_micros(&self) -> u64 {
        self.0
    }

    fn from_micros(micros: u64) -> Self {
        Micros64(micros)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
struct Instant64(u64);

impl TimeInstant for Instant64 {
    type Duration = Micros64;

    fn duration_since(&self, earlier: Self) -> Self::Duration {
        Micros64(self.0.saturating_sub(earlier.0))
    }

    fn checked_add(self, duration: Self::Duration) -> Option<Self> {
        self.0.checked_add(duration.0).map(Instant64)
    }
}

/// Zero-sized LED bank, so the report measures controller state only
struct NullLeds;

impl LedBank for NullLeds {
    fn set_led(&mut self, _color: Color, _on: bool) {}
}

/// Zero-sized time source
struct NullClock;

impl<I: TimeInstant + Default> TimeSource<I> for NullClock {
    fn now(&self) -> I {
        I::default()
    }
}

impl Default for Instant32 {
    fn default() -> Self {
        Instant32(0)
    }
}

impl Default for Instant64 {
    fn default() -> Self {
        Instant64(0)
    }
}

impl Default for EmbassyInstant {
    fn default() -> Self {
        EmbassyInstant::from_millis(0)
    }
}

fn report<I: TimeInstant + Default>(label: &str) {
    println!("## {label}");
    println!("| Type | Bytes |");
    println!("|------|-------|");
    println!("| instant | {} |", size_of::<I>());
    println!("| DebounceGate | {} |", size_of::<DebounceGate<I>>());
    println!("| DrainSequencer | {} |", size_of::<DrainSequencer<I>>());
    println!(
        "| DrainController | {} |",
        size_of::<DrainController<I, NullLeds, NullClock>>()
    );
    println!(
        "| SharedController | {} |",
        size_of::<SharedController<DrainController<I, NullLeds, NullClock>>>()
    );
    println!("| EventLoop (8 per queue) | {} |", size_of::<EventLoop<I, 8>>());
    println!();
}

fn main() {
    println!("# led-drain memory footprint");
    println!();

    report::<Instant32>("u32 milliseconds");
    report::<Instant64>("u64 microseconds");
    report::<EmbassyInstant>("embassy-time Instant");
}
