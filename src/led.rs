//! LED hardware abstraction.
//!
//! The controller drives three independent on/off outputs through
//! [`LedBank`]. Boards where the three lines feed a single RGB package can
//! use [`RgbLedBank`] to drive it through the color-based [`RgbLed`] trait
//! instead.

use crate::types::{Color, LedLevels};
use palette::Srgb;

/// Trait for abstracting the three LED outputs.
///
/// Implement this for your GPIO pins. Writes cannot fail; handle any
/// hardware errors internally.
pub trait LedBank {
    /// Drives one LED on or off.
    fn set_led(&mut self, color: Color, on: bool);

    /// Drives all three LEDs to the same level.
    fn set_all(&mut self, on: bool) {
        for color in Color::DRAIN_ORDER {
            self.set_led(color, on);
        }
    }
}

impl<L: LedBank + ?Sized> LedBank for &mut L {
    fn set_led(&mut self, color: Color, on: bool) {
        (**self).set_led(color, on);
    }

    fn set_all(&mut self, on: bool) {
        (**self).set_all(on);
    }
}

/// Trait for abstracting a single RGB LED.
///
/// Color components are in the range 0.0-1.0. Implementations should
/// convert these to their hardware's native format (e.g., PWM duty cycles).
pub trait RgbLed {
    /// Sets the LED to the specified RGB color.
    fn set_color(&mut self, color: Srgb);
}

/// Drives one RGB LED as three on/off channels.
///
/// Tracks the channel levels and pushes their additive mix to the wrapped
/// LED whenever it changes, so all three lit shows white.
pub struct RgbLedBank<L: RgbLed> {
    led: L,
    levels: LedLevels,
}

impl<L: RgbLed> RgbLedBank<L> {
    /// Wraps `led` and turns it off.
    pub fn new(mut led: L) -> Self {
        let levels = LedLevels::ALL_OFF;
        led.set_color(levels.to_srgb());
        Self { led, levels }
    }

    /// Current channel levels.
    pub fn levels(&self) -> LedLevels {
        self.levels
    }

    /// Color currently shown on the LED.
    pub fn current_color(&self) -> Srgb {
        self.levels.to_srgb()
    }

    /// Returns the wrapped LED.
    pub fn into_inner(self) -> L {
        self.led
    }

    fn apply(&mut self, levels: LedLevels) {
        if levels != self.levels {
            self.levels = levels;
            self.led.set_color(levels.to_srgb());
        }
    }
}

impl<L: RgbLed> LedBank for RgbLedBank<L> {
    fn set_led(&mut self, color: Color, on: bool) {
        let mut levels = self.levels;
        levels.set(color, on);
        self.apply(levels);
    }

    fn set_all(&mut self, on: bool) {
        let levels = if on {
            LedLevels::ALL_ON
        } else {
            LedLevels::ALL_OFF
        };
        self.apply(levels);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use heapless::Vec;

    struct MockLed {
        color_history: Vec<Srgb, 16>,
    }

    impl RgbLed for MockLed {
        fn set_color(&mut self, color: Srgb) {
            let _ = self.color_history.push(color);
        }
    }

    const BLACK: Srgb = Srgb::new(0.0, 0.0, 0.0);
    const WHITE: Srgb = Srgb::new(1.0, 1.0, 1.0);

    #[test]
    fn new_turns_led_off() {
        let bank = RgbLedBank::new(MockLed {
            color_history: Vec::new(),
        });
        assert_eq!(bank.levels(), LedLevels::ALL_OFF);
        assert_eq!(bank.into_inner().color_history.as_slice(), &[BLACK]);
    }

    #[test]
    fn channels_mix_while_draining() {
        let mut bank = RgbLedBank::new(MockLed {
            color_history: Vec::new(),
        });

        bank.set_all(true);
        assert_eq!(bank.current_color(), WHITE);

        bank.set_led(Color::Red, false);
        assert_eq!(bank.current_color(), Srgb::new(0.0, 1.0, 1.0));

        bank.set_led(Color::Blue, false);
        assert_eq!(bank.current_color(), Srgb::new(0.0, 1.0, 0.0));

        bank.set_led(Color::Green, false);
        assert_eq!(bank.current_color(), BLACK);
    }

    #[test]
    fn unchanged_levels_do_not_rewrite_the_led() {
        let mut bank = RgbLedBank::new(MockLed {
            color_history: Vec::new(),
        });

        bank.set_all(true);
        bank.set_all(true);
        bank.set_led(Color::Green, true);

        assert_eq!(bank.into_inner().color_history.len(), 2);
    }
}
