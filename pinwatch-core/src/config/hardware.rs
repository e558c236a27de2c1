//! Pin descriptors
//!
//! Pins are named in configuration with Klipper-style strings:
//! `gpio11`, `!gpio12` (active-low) or `^gpio4` (pull-up).

use pinwatch_hal::PinMode;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use super::types::IoConfig;

/// Highest pin index a descriptor can address
pub const MAX_PIN_INDEX: u8 = 63;

/// Pin configuration with optional inversion
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct PinConfig {
    /// GPIO pin number
    pub pin: u8,
    /// Pin is active-low (inverted)
    pub inverted: bool,
    /// Enable internal pull-up
    pub pull_up: bool,
}

impl PinConfig {
    /// Create a new pin config
    pub const fn new(pin: u8) -> Self {
        Self {
            pin,
            inverted: false,
            pull_up: false,
        }
    }

    /// Create an inverted (active-low) pin
    pub const fn inverted(pin: u8) -> Self {
        Self {
            pin,
            inverted: true,
            pull_up: false,
        }
    }

    /// Create a pin with pull-up enabled
    pub const fn with_pullup(pin: u8) -> Self {
        Self {
            pin,
            inverted: false,
            pull_up: true,
        }
    }

    /// Mode to use when this pin is read
    pub const fn input_mode(&self) -> PinMode {
        if self.pull_up {
            PinMode::InputPullUp
        } else {
            PinMode::Input
        }
    }

    /// Layer this pin's polarity on top of a shared policy
    ///
    /// An active-low pin flips both read and write sense relative to `base`.
    pub const fn apply_to(&self, base: IoConfig) -> IoConfig {
        let mut config = base;
        config.invert_input = base.invert_input != self.inverted;
        config.invert_output = base.invert_output != self.inverted;
        config
    }
}

/// Parse a pin string from config
///
/// Supports formats:
/// - "gpio11" -> pin 11
/// - "!gpio12" -> pin 12, inverted/active-low
/// - "^gpio4" -> pin 4, pull-up
/// - "!^gpio5" / "^!gpio5" -> both
pub fn parse_pin_string(s: &str) -> Option<PinConfig> {
    let mut s = s.trim();
    let mut config = PinConfig::default();

    loop {
        if let Some(rest) = s.strip_prefix('!') {
            if config.inverted {
                return None;
            }
            config.inverted = true;
            s = rest;
        } else if let Some(rest) = s.strip_prefix('^') {
            if config.pull_up {
                return None;
            }
            config.pull_up = true;
            s = rest;
        } else {
            break;
        }
    }

    let num_str = s.strip_prefix("gpio")?;
    if num_str.is_empty() || !num_str.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    let pin: u8 = num_str.parse().ok()?;
    if pin > MAX_PIN_INDEX {
        return None;
    }
    config.pin = pin;

    Some(config)
}
