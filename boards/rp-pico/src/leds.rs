use embedded_hal::digital::{OutputPin, PinState};
use led_drain::{Color, LedBank};

/// Three active-high GPIO outputs, one per color.
///
/// This wrapper implements the LedBank trait required by the controller.
/// Pin errors are discarded; on the RP2040 SIO pins are infallible.
pub struct GpioLedBank<R, B, G>
where
    R: OutputPin,
    B: OutputPin,
    G: OutputPin,
{
    red: R,
    blue: B,
    green: G,
}

impl<R, B, G> GpioLedBank<R, B, G>
where
    R: OutputPin,
    B: OutputPin,
    G: OutputPin,
{
    /// Create a new LED bank
    ///
    /// # Arguments
    /// * `red` - output pin for the red LED
    /// * `blue` - output pin for the blue LED
    /// * `green` - output pin for the green LED
    pub fn new(red: R, blue: B, green: G) -> Self {
        Self { red, blue, green }
    }
}

impl<R, B, G> LedBank for GpioLedBank<R, B, G>
where
    R: OutputPin,
    B: OutputPin,
    G: OutputPin,
{
    fn set_led(&mut self, color: Color, on: bool) {
        let state = PinState::from(on);
        match color {
            Color::Red => {
                let _ = self.red.set_state(state);
            }
            Color::Blue => {
                let _ = self.blue.set_state(state);
            }
            Color::Green => {
                let _ = self.green.set_state(state);
            }
        }
    }
}
