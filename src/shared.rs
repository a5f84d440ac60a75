//! Interrupt-safe shared access to a controller.
//!
//! The button interrupt and the timer interrupt both mutate the same
//! controller. [`SharedController`] keeps it behind one
//! `critical_section::Mutex`, so every transition (clock read, gate check,
//! latch and deadline writes, LED writes) runs with interrupts masked and
//! neither handler can observe a half-applied update from the other.

use core::cell::RefCell;
use critical_section::Mutex;

use crate::controller::{ControllerState, DrainController, PressOutcome, TickOutcome};
use crate::led::LedBank;
use crate::time::{TimeInstant, TimeSource};

/// A controller slot that can live in a `static`.
///
/// The slot starts empty so it can be declared before the hardware exists;
/// call [`install`](Self::install) once initialization is done. Handlers that
/// fire before that are no-ops and return `None`.
///
/// ```rust,ignore
/// static CONTROLLER: SharedController<Controller> = SharedController::new();
///
/// #[interrupt]
/// fn IO_IRQ_BANK0() {
///     CONTROLLER.button_edge();
/// }
/// ```
pub struct SharedController<C> {
    inner: Mutex<RefCell<Option<C>>>,
}

impl<C> SharedController<C> {
    /// Creates an empty slot.
    pub const fn new() -> Self {
        Self {
            inner: Mutex::new(RefCell::new(None)),
        }
    }

    /// Places `controller` in the slot, returning any previous one.
    pub fn install(&self, controller: C) -> Option<C> {
        critical_section::with(|cs| self.inner.borrow_ref_mut(cs).replace(controller))
    }

    /// Removes the controller from the slot.
    pub fn take(&self) -> Option<C> {
        critical_section::with(|cs| self.inner.borrow_ref_mut(cs).take())
    }

    /// Returns true once a controller has been installed.
    pub fn is_installed(&self) -> bool {
        critical_section::with(|cs| self.inner.borrow_ref(cs).is_some())
    }

    /// Runs `f` on the controller inside a critical section.
    ///
    /// Keep `f` short; interrupts stay masked for its whole duration.
    pub fn with<R>(&self, f: impl FnOnce(&mut C) -> R) -> Option<R> {
        critical_section::with(|cs| self.inner.borrow_ref_mut(cs).as_mut().map(f))
    }
}

impl<C> Default for SharedController<C> {
    fn default() -> Self {
        Self::new()
    }
}

impl<I, L, T> SharedController<DrainController<I, L, T>>
where
    I: TimeInstant,
    L: LedBank,
    T: TimeSource<I>,
{
    /// Button-edge handler entry point.
    pub fn button_edge(&self) -> Option<PressOutcome> {
        self.with(|controller| controller.on_button_edge())
    }

    /// Periodic tick entry point.
    pub fn tick(&self) -> Option<TickOutcome<I::Duration>> {
        self.with(|controller| controller.on_tick())
    }

    /// Snapshot of the installed controller.
    pub fn state(&self) -> Option<ControllerState<I>> {
        self.with(|controller| controller.state())
    }
}
