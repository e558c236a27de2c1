//! I/O policy configuration

use pinwatch_hal::PinMode;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Debounce duration used when none is given (ms)
pub const DEFAULT_DEBOUNCE_MS: u32 = 100;

/// Pin mode used when none is given
pub const DEFAULT_PIN_MODE: PinMode = PinMode::Input;

/// I/O policy shared by a set of pins
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct IoConfig {
    /// Flip the logical sense of every read
    pub invert_input: bool,
    /// Flip the logical sense of every write
    pub invert_output: bool,
    /// Make output writes observable through the pin's tracked level
    pub retain_output_state: bool,
    /// Debounce duration when a debouncer is built without one (ms)
    pub default_debounce_ms: u32,
    /// Mode when a pin is built without one
    pub default_pin_mode: PinMode,
}

impl Default for IoConfig {
    fn default() -> Self {
        Self::new()
    }
}

impl IoConfig {
    /// Non-inverted, non-retaining configuration with default constants
    pub const fn new() -> Self {
        Self {
            invert_input: false,
            invert_output: false,
            retain_output_state: false,
            default_debounce_ms: DEFAULT_DEBOUNCE_MS,
            default_pin_mode: DEFAULT_PIN_MODE,
        }
    }

    /// Same configuration with input sense flipped
    pub const fn with_inverted_input(mut self, inverted: bool) -> Self {
        self.invert_input = inverted;
        self
    }

    /// Same configuration with output sense flipped
    pub const fn with_inverted_output(mut self, inverted: bool) -> Self {
        self.invert_output = inverted;
        self
    }

    /// Same configuration with output retention toggled
    pub const fn with_retained_output(mut self, retain: bool) -> Self {
        self.retain_output_state = retain;
        self
    }

    /// Same configuration with a different default debounce duration
    pub const fn with_default_debounce_ms(mut self, debounce_ms: u32) -> Self {
        self.default_debounce_ms = debounce_ms;
        self
    }

    /// Same configuration with a different default pin mode
    pub const fn with_default_pin_mode(mut self, mode: PinMode) -> Self {
        self.default_pin_mode = mode;
        self
    }

    /// Map a raw electrical level to a logical level
    #[inline]
    pub const fn logical_input(&self, raw: bool) -> bool {
        raw != self.invert_input
    }

    /// Map a logical output level to the electrical level to drive
    #[inline]
    pub const fn raw_output(&self, logical: bool) -> bool {
        logical != self.invert_output
    }
}
