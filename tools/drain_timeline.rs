//! Drain timeline simulator for led-drain
//!
//! Simulates a single button press and prints when each LED turns off,
//! once with the default 100 ms poll cadence and once with the legacy
//! cadence tied to the step interval. The "late" column shows how far each
//! step landed past its deadline.
//!
//! Usage:
//!   cd tools
//!   cargo run --bin drain_timeline [press_ms]

mod time_wrapper;

use std::cell::Cell;

use led_drain::{
    DrainController, DrainPhase, EventLoop, RgbLed, RgbLedBank, Srgb, TimeDuration, TimeInstant,
    TimeSource, Timing,
};
use time_wrapper::EmbassyInstant;

const DEFAULT_PRESS_MS: u64 = 1_234;

/// Simulated clock, moved forward by the tick loop
struct SimClock(Cell<EmbassyInstant>);

impl TimeSource<EmbassyInstant> for SimClock {
    fn now(&self) -> EmbassyInstant {
        self.0.get()
    }
}

/// RGB LED with no hardware behind it; the bank tracks the color
struct ConsoleLed;

impl RgbLed for ConsoleLed {
    fn set_color(&mut self, _color: Srgb) {}
}

fn describe(color: Srgb) -> &'static str {
    match (color.red > 0.5, color.green > 0.5, color.blue > 0.5) {
        (true, true, true) => "white",
        (false, true, true) => "cyan",
        (false, true, false) => "green",
        (false, false, false) => "off",
        _ => "?",
    }
}

fn simulate(label: &str, timing: Timing, press_ms: u64) {
    let clock = SimClock(Cell::new(EmbassyInstant::from_millis(0)));
    let leds = RgbLedBank::new(ConsoleLed);
    let mut controller: DrainController<EmbassyInstant, _, _> =
        DrainController::with_timing(leds, &clock, timing);
    let mut events = EventLoop::<EmbassyInstant, 4>::new();

    println!(
        "{} (poll every {} ms, step every {} ms)",
        label, timing.poll_interval_ms, timing.sequence_interval_ms
    );

    let press = EmbassyInstant::from_millis(press_ms);
    let mut pressed = false;

    let mut tick_ms = 0;
    while !pressed || controller.phase() != DrainPhase::Idle {
        tick_ms += timing.poll_interval_ms;
        let now = EmbassyInstant::from_millis(tick_ms);
        clock.0.set(now);

        if !pressed && now >= press {
            if let Err(err) = events.push_button_edge(press) {
                eprintln!("{err}");
                return;
            }
            pressed = true;
        }

        let deadline = controller.state().deadline;
        events.push_tick(now);
        let report = events.dispatch(&mut controller);

        if report.armed > 0 {
            println!(
                "  {:>6} ms  pressed            -> {}",
                press_ms,
                describe(controller.leds().current_color())
            );
        }

        if report.steps > 0 {
            let late = deadline
                .map(|deadline| now.duration_since(deadline).as_millis())
                .unwrap_or(0);
            println!(
                "  {:>6} ms  step   late {:>5} ms -> {}",
                now.as_millis(),
                late,
                describe(controller.leds().current_color())
            );
        }
    }

    println!();
}

fn main() {
    let press_ms = std::env::args()
        .nth(1)
        .and_then(|arg| arg.parse().ok())
        .unwrap_or(DEFAULT_PRESS_MS);

    simulate("default", Timing::DEFAULT, press_ms);
    simulate("legacy", Timing::LEGACY, press_ms);
}
