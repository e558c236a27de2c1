//! GPIO register access
//!
//! Provides the trait that chip-specific HALs implement to read and drive
//! a single pin addressed by its platform pin index.

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Pin direction and input bias
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum PinMode {
    /// Floating input
    #[default]
    Input,
    /// Input with the internal pull-up enabled
    InputPullUp,
    /// Push-pull output
    Output,
}

impl PinMode {
    /// Check if this mode drives the pin
    pub fn is_output(self) -> bool {
        matches!(self, PinMode::Output)
    }
}

/// Register-level access to a bank of GPIO pins
///
/// Pins are addressed by index `0..pin_count()`. The methods take `&self`
/// because the capability is shared by every pin on the port.
///
/// Implementations must make each read-modify-write of a port register
/// atomic with respect to interrupts (disable interrupts, modify, restore
/// the previous interrupt state). Writes and mode changes on an index
/// `>= pin_count()` are silently ignored and reads of such an index return
/// `false`.
pub trait PinRegisters {
    /// Number of addressable pins
    fn pin_count(&self) -> u8;

    /// Configure the direction of a pin
    fn set_pin_mode(&self, pin: u8, mode: PinMode);

    /// Read the raw electrical level of a pin (true = high)
    fn read_pin(&self, pin: u8) -> bool;

    /// Drive a pin low
    fn write_pin_low(&self, pin: u8);

    /// Drive a pin high
    fn write_pin_high(&self, pin: u8);

    /// Check if `pin` addresses a pin on this port
    fn is_valid_pin(&self, pin: u8) -> bool {
        pin < self.pin_count()
    }
}

impl<T: PinRegisters + ?Sized> PinRegisters for &T {
    fn pin_count(&self) -> u8 {
        (**self).pin_count()
    }

    fn set_pin_mode(&self, pin: u8, mode: PinMode) {
        (**self).set_pin_mode(pin, mode)
    }

    fn read_pin(&self, pin: u8) -> bool {
        (**self).read_pin(pin)
    }

    fn write_pin_low(&self, pin: u8) {
        (**self).write_pin_low(pin)
    }

    fn write_pin_high(&self, pin: u8) {
        (**self).write_pin_high(pin)
    }
}
