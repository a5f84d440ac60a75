//! Core types shared by the gate, sequencer and controller.

use palette::Srgb;

/// One of the three LEDs, in the order they drain.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Color {
    /// Drains first.
    Red,
    /// Drains second.
    Blue,
    /// Drains last; turning it off ends the cycle.
    Green,
}

impl Color {
    /// All colors in drain order.
    pub const DRAIN_ORDER: [Color; 3] = [Color::Red, Color::Blue, Color::Green];

    /// Returns the color that drains after this one, wrapping Green to Red.
    #[inline]
    pub fn next(self) -> Self {
        match self {
            Color::Red => Color::Blue,
            Color::Blue => Color::Green,
            Color::Green => Color::Red,
        }
    }

    /// Returns true for the final color of a cycle.
    #[inline]
    pub fn is_last(self) -> bool {
        self == Color::Green
    }

    /// Full-intensity sRGB value of this channel.
    pub fn srgb(self) -> Srgb {
        match self {
            Color::Red => Srgb::new(1.0, 0.0, 0.0),
            Color::Blue => Srgb::new(0.0, 0.0, 1.0),
            Color::Green => Srgb::new(0.0, 1.0, 0.0),
        }
    }
}

/// Snapshot of the three output levels (`true` = lit).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct LedLevels {
    pub red: bool,
    pub blue: bool,
    pub green: bool,
}

impl LedLevels {
    pub const ALL_OFF: LedLevels = LedLevels {
        red: false,
        blue: false,
        green: false,
    };

    pub const ALL_ON: LedLevels = LedLevels {
        red: true,
        blue: true,
        green: true,
    };

    /// Returns the level of one LED.
    #[inline]
    pub fn get(&self, color: Color) -> bool {
        match color {
            Color::Red => self.red,
            Color::Blue => self.blue,
            Color::Green => self.green,
        }
    }

    /// Sets the level of one LED.
    #[inline]
    pub fn set(&mut self, color: Color, on: bool) {
        match color {
            Color::Red => self.red = on,
            Color::Blue => self.blue = on,
            Color::Green => self.green = on,
        }
    }

    /// Number of lit LEDs.
    pub fn lit_count(&self) -> usize {
        Color::DRAIN_ORDER
            .iter()
            .filter(|&&color| self.get(color))
            .count()
    }

    /// Returns true if any LED is lit.
    #[inline]
    pub fn any_lit(&self) -> bool {
        self.red || self.blue || self.green
    }

    /// Additive mix of the lit channels.
    pub fn to_srgb(&self) -> Srgb {
        Color::DRAIN_ORDER
            .iter()
            .filter(|&&color| self.get(color))
            .fold(Srgb::new(0.0, 0.0, 0.0), |acc, &color| {
                let c = color.srgb();
                Srgb::new(acc.red + c.red, acc.green + c.green, acc.blue + c.blue)
            })
    }
}

/// Position of the drain state machine.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum DrainPhase {
    /// Latch inactive, all LEDs off.
    Idle,
    /// Armed; red turns off at the next due tick.
    DrainingRed,
    /// Red is off; blue turns off at the next due tick.
    DrainingBlue,
    /// Red and blue are off; green turns off at the next due tick.
    DrainingGreen,
}

impl DrainPhase {
    /// Derives the phase from the latch and cursor.
    #[inline]
    pub fn from_parts(active: bool, cursor: Color) -> Self {
        match (active, cursor) {
            (false, _) => DrainPhase::Idle,
            (true, Color::Red) => DrainPhase::DrainingRed,
            (true, Color::Blue) => DrainPhase::DrainingBlue,
            (true, Color::Green) => DrainPhase::DrainingGreen,
        }
    }

    /// LED levels this phase implies.
    pub fn expected_levels(self) -> LedLevels {
        match self {
            DrainPhase::Idle => LedLevels::ALL_OFF,
            DrainPhase::DrainingRed => LedLevels::ALL_ON,
            DrainPhase::DrainingBlue => LedLevels {
                red: false,
                blue: true,
                green: true,
            },
            DrainPhase::DrainingGreen => LedLevels {
                red: false,
                blue: false,
                green: true,
            },
        }
    }
}

/// Result of one drain step.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct DrainStep {
    /// The LED that was turned off.
    pub turned_off: Color,
    /// True if this step released the latch.
    pub finished: bool,
}
