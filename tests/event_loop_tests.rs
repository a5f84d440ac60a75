//! Integration tests for EventLoop dispatch

mod common;
use common::*;

use led_drain::{DispatchReport, DrainPhase, EventLoop, LedLevels};

#[test]
fn dispatch_runs_a_full_cycle() {
    let timer = MockTimeSource::new();
    let mut controller = controller(&timer);
    let mut events = EventLoop::<TestInstant, 16>::new();

    events.push_button_edge(TestInstant::ms(50)).unwrap();
    for tick in 1..=10 {
        events.push_tick(TestInstant::ms(tick * 1_000));
    }

    let report = events.dispatch(&mut controller);

    assert_eq!(
        report,
        DispatchReport {
            edges: 1,
            armed: 1,
            ticks: 10,
            steps: 3,
            cycles_completed: 1,
        }
    );
    assert_eq!(controller.phase(), DrainPhase::Idle);
    assert_eq!(controller.leds().levels(), LedLevels::ALL_OFF);
    assert!(events.is_empty());
}

#[test]
fn edge_and_tick_at_same_instant_arm_before_checking() {
    let timer = MockTimeSource::new();
    let mut controller = controller(&timer);
    let mut events = EventLoop::<TestInstant, 4>::new();

    // Queued tick-first; the edge must still be handled first
    events.push_tick(TestInstant::ms(1_000));
    events.push_button_edge(TestInstant::ms(1_000)).unwrap();

    let report = events.dispatch(&mut controller);
    assert_eq!(report.armed, 1);
    assert_eq!(report.steps, 0);
    assert_eq!(controller.state().deadline, Some(TestInstant::ms(4_000)));
}

#[test]
fn dispatch_applies_debounce_and_active_guard() {
    let timer = MockTimeSource::new();
    let mut controller = controller(&timer);
    let mut events = EventLoop::<TestInstant, 8>::new();

    events.push_button_edge(TestInstant::ms(0)).unwrap();
    events.push_button_edge(TestInstant::ms(100)).unwrap(); // bounce
    events.push_button_edge(TestInstant::ms(1_000)).unwrap(); // during drain
    events.push_tick(TestInstant::ms(3_000));

    let report = events.dispatch(&mut controller);
    assert_eq!(report.edges, 3);
    assert_eq!(report.armed, 1);
    assert_eq!(report.steps, 1);
    assert_eq!(controller.phase(), DrainPhase::DrainingBlue);
}

#[test]
fn coalesced_ticks_still_step() {
    let timer = MockTimeSource::new();
    let mut controller = controller(&timer);
    let mut events = EventLoop::<TestInstant, 2>::new();

    events.push_button_edge(TestInstant::ms(0)).unwrap();
    events.dispatch(&mut controller);

    // Main loop stalled; ticks pile up past the deadline
    for tick in 1..=5 {
        events.push_tick(TestInstant::ms(tick * 1_000));
    }
    assert_eq!(events.dropped_ticks(), 3);

    let report = events.dispatch(&mut controller);
    assert_eq!(report.ticks, 2);
    assert_eq!(report.steps, 1);
    assert_eq!(controller.leds().levels(), RED_OFF);
}

#[test]
fn dispatch_on_empty_loop_reports_nothing() {
    let timer = MockTimeSource::new();
    let mut controller = controller(&timer);
    let mut events = EventLoop::<TestInstant, 4>::default();

    assert_eq!(events.dispatch(&mut controller), DispatchReport::default());
}
