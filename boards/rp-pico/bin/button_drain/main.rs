#![no_std]
#![no_main]

use core::cell::RefCell;

use critical_section::Mutex;
use fugit::MicrosDurationU32;
use panic_halt as _;
use rp_pico::entry;
use rp_pico::hal::{
    Clock, Sio, Timer,
    clocks::init_clocks_and_plls,
    gpio::{
        FunctionSioInput, FunctionSioOutput, Interrupt::EdgeLow, Pin, PullDown, PullUp,
        bank0::{Gpio5, Gpio11, Gpio12, Gpio13},
    },
    pac::{self, interrupt},
    timer::{Alarm, Alarm0},
    watchdog::Watchdog,
};
use rtt_target::{rprintln, rtt_init_print};

use led_drain::{DrainController, POLL_INTERVAL_MS, SharedController, Timing};
use rp_pico_drain::leds::GpioLedBank;
use rp_pico_drain::time::{HardwareTimer, Instant};

/// Button on GPIO5, active low
type Button = Pin<Gpio5, FunctionSioInput, PullUp>;

/// LED bank on GPIO11 (red), GPIO12 (blue), GPIO13 (green)
type Leds = GpioLedBank<
    Pin<Gpio11, FunctionSioOutput, PullDown>,
    Pin<Gpio12, FunctionSioOutput, PullDown>,
    Pin<Gpio13, FunctionSioOutput, PullDown>,
>;

type Controller = DrainController<Instant, Leds, HardwareTimer>;

const POLL_INTERVAL: MicrosDurationU32 = MicrosDurationU32::millis(POLL_INTERVAL_MS as u32);

static CONTROLLER: SharedController<Controller> = SharedController::new();

// Interrupt-owned peripherals, needed to acknowledge and re-arm the IRQs
static BUTTON: Mutex<RefCell<Option<Button>>> = Mutex::new(RefCell::new(None));
static POLL_ALARM: Mutex<RefCell<Option<Alarm0>>> = Mutex::new(RefCell::new(None));

#[entry]
fn main() -> ! {
    rtt_init_print!();
    rprintln!("=== RP Pico Button Drain ===");
    rprintln!("Starting initialization...");

    // Get peripherals
    let mut pac = pac::Peripherals::take().unwrap();

    // Set up watchdog driver
    let mut watchdog = Watchdog::new(pac.WATCHDOG);

    // Configure clocks (125 MHz)
    let clocks = init_clocks_and_plls(
        rp_pico::XOSC_CRYSTAL_FREQ,
        pac.XOSC,
        pac.CLOCKS,
        pac.PLL_SYS,
        pac.PLL_USB,
        &mut pac.RESETS,
        &mut watchdog,
    )
    .ok()
    .unwrap();

    rprintln!(
        "System clock configured: {} Hz",
        clocks.system_clock.freq().to_Hz()
    );

    // Set up the Single Cycle IO (for GPIO access)
    let sio = Sio::new(pac.SIO);

    // Set the pins to their default state
    let pins = rp_pico::Pins::new(
        pac.IO_BANK0,
        pac.PADS_BANK0,
        sio.gpio_bank0,
        &mut pac.RESETS,
    );

    let leds = GpioLedBank::new(
        pins.gpio11.into_push_pull_output(),
        pins.gpio12.into_push_pull_output(),
        pins.gpio13.into_push_pull_output(),
    );
    rprintln!("LEDs configured on GPIO11 (R), GPIO12 (B), GPIO13 (G)");

    let button: Button = pins.gpio5.into_pull_up_input();
    button.set_interrupt_enabled(EdgeLow, true);
    rprintln!("Button configured on GPIO5 (falling edge)");

    let mut timer = Timer::new(pac.TIMER, &mut pac.RESETS, &clocks);
    let mut alarm = timer.alarm_0().unwrap();
    alarm.schedule(POLL_INTERVAL).unwrap();
    alarm.enable_interrupt();
    rprintln!("Deadline poll every {} ms on ALARM0", POLL_INTERVAL_MS);

    // Controller turns all LEDs off on construction
    let controller = DrainController::with_timing(leds, HardwareTimer::new(timer), Timing::DEFAULT);
    CONTROLLER.install(controller);

    critical_section::with(|cs| {
        BUTTON.borrow_ref_mut(cs).replace(button);
        POLL_ALARM.borrow_ref_mut(cs).replace(alarm);
    });

    // SAFETY: both handlers only touch state behind critical sections, and
    // everything they need was installed above.
    unsafe {
        pac::NVIC::unmask(pac::Interrupt::IO_IRQ_BANK0);
        pac::NVIC::unmask(pac::Interrupt::TIMER_IRQ_0);
    }

    rprintln!("=== System Ready ===");
    rprintln!("Press the button to light all LEDs");

    loop {
        cortex_m::asm::wfi();
    }
}

#[interrupt]
fn IO_IRQ_BANK0() {
    let pressed = critical_section::with(|cs| {
        let mut button = BUTTON.borrow_ref_mut(cs);
        let Some(button) = button.as_mut() else {
            return false;
        };

        let fired = button.interrupt_status(EdgeLow);
        button.clear_interrupt(EdgeLow);
        fired
    });

    if pressed {
        CONTROLLER.button_edge();
    }
}

#[interrupt]
fn TIMER_IRQ_0() {
    critical_section::with(|cs| {
        if let Some(alarm) = POLL_ALARM.borrow_ref_mut(cs).as_mut() {
            alarm.clear_interrupt();
            let _ = alarm.schedule(POLL_INTERVAL);
        }
    });

    // The poll never stops, whatever the outcome
    CONTROLLER.tick();
}
