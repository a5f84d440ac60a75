#![cfg_attr(not(feature = "std"), no_std)]
#![doc = include_str!("../README.md")]

//! # Core Concepts
//!
//! - **`DrainController`**: Owns the LEDs and all state; exposes the button-edge and tick handlers
//! - **`DebounceGate`**: Rejects button edges that arrive within the debounce window
//! - **`DrainSequencer`**: Activation latch, color cursor and deadline of the drain cycle
//! - **`SharedController`**: Critical-section guarded slot for use from interrupt handlers
//! - **`EventLoop`**: Timestamp-ordered button and tick queues for main-loop dispatch
//! - **`LedBank`**: Trait to implement for your three LED outputs
//! - **`RgbLed`**: Trait for a single RGB LED, driven through `RgbLedBank`
//! - **`TimeSource`**: Trait to implement for your timing system
//! - **`Timing`**: Debounce window, step interval and poll cadence
//!
//! All timestamps are monotonic microseconds. Nothing allocates; every type
//! has a fixed size known at compile time.

// Re-export Srgb from palette for user convenience
pub use palette::Srgb;

pub mod config;
pub mod controller;
pub mod debounce;
pub mod drain;
pub mod event;
pub mod led;
pub mod shared;
pub mod time;
pub mod types;

pub use config::{
    DEBOUNCE_WINDOW_US, LEGACY_POLL_INTERVAL_MS, POLL_INTERVAL_MS, SEQUENCE_INTERVAL_MS, Timing,
};
pub use controller::{ControllerState, DrainController, PressOutcome, TickOutcome};
pub use debounce::DebounceGate;
pub use drain::DrainSequencer;
pub use event::{DispatchReport, DrainEvent, EventError, EventLoop};
pub use led::{LedBank, RgbLed, RgbLedBank};
pub use shared::SharedController;
pub use time::{TimeDuration, TimeInstant, TimeSource};
pub use types::{Color, DrainPhase, DrainStep, LedLevels};
