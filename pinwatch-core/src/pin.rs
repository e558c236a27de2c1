//! Single-pin level tracking
//!
//! [`DigitalPin`] binds one pin index on a [`PinRegisters`] port and keeps
//! the two most recent logical levels seen by [`DigitalPin::update`]. It
//! knows nothing about debouncing; [`crate::debounce::Debouncer`] builds on
//! its change detection.
//!
//! The level history lives in [`Cell`]s so a debouncer can hold a shared
//! reference to the pin while the polling loop keeps calling `update()` on
//! it. A pin is therefore not `Sync`, matching its single polling-loop use.

use core::cell::Cell;
use core::convert::Infallible;

use embedded_hal::digital::{ErrorType, InputPin, OutputPin};
use pinwatch_hal::{PinMode, PinRegisters};

use crate::config::IoConfig;

/// Digital pin with a two-entry logical level history
pub struct DigitalPin<R> {
    registers: R,
    pin: u8,
    mode: Cell<PinMode>,
    config: IoConfig,
    /// Logical level from the latest update (or retained write)
    current: Cell<bool>,
    /// Logical level from the update before that
    previous: Cell<bool>,
}

impl<R: PinRegisters> DigitalPin<R> {
    /// Bind `pin` on `registers` and configure it as `mode`
    ///
    /// Outputs are driven to logical LOW straight away and track LOW,
    /// whatever the pin was doing before. Inputs are read once and the
    /// level is seeded into both history entries, so `changed()` starts
    /// out false.
    pub fn new(registers: R, pin: u8, mode: PinMode, config: IoConfig) -> Self {
        let digital_pin = Self {
            registers,
            pin,
            mode: Cell::new(mode),
            config,
            current: Cell::new(false),
            previous: Cell::new(false),
        };
        digital_pin.setup(mode);
        digital_pin
    }

    /// Bind `pin` using the configuration's default mode
    pub fn with_default_mode(registers: R, pin: u8, config: IoConfig) -> Self {
        Self::new(registers, pin, config.default_pin_mode, config)
    }

    /// Reconfigure the pin direction and re-seed the level history
    pub fn setup(&self, mode: PinMode) {
        self.mode.set(mode);
        self.registers.set_pin_mode(self.pin, mode);

        if mode.is_output() {
            // start from a known state
            self.drive(false);
            self.seed(false);
        } else {
            self.seed(self.read());
        }
    }

    /// Bound pin index
    pub fn pin(&self) -> u8 {
        self.pin
    }

    /// Mode the pin was last configured to
    pub fn mode(&self) -> PinMode {
        self.mode.get()
    }

    /// I/O policy this pin was built with
    pub fn config(&self) -> &IoConfig {
        &self.config
    }

    /// Read the pin's logical level from hardware
    ///
    /// Does not touch the tracked history.
    pub fn read(&self) -> bool {
        self.config.logical_input(self.registers.read_pin(self.pin))
    }

    /// Drive the pin to logical LOW
    pub fn write_low(&self) {
        self.drive(false);
        self.retain(false);
    }

    /// Drive the pin to logical HIGH
    pub fn write_high(&self) {
        self.drive(true);
        self.retain(true);
    }

    /// Drive the pin to the given logical level
    pub fn write(&self, level: bool) {
        if level {
            self.write_high();
        } else {
            self.write_low();
        }
    }

    /// Logical level recorded by the latest update
    ///
    /// Only meaningful for outputs when `retain_output_state` is set.
    pub fn current_level(&self) -> bool {
        self.current.get()
    }

    /// Logical level recorded by the update before the latest one
    pub fn previous_level(&self) -> bool {
        self.previous.get()
    }

    /// Check if the last update saw a different level than the one before
    pub fn changed(&self) -> bool {
        self.current.get() != self.previous.get()
    }

    /// Advance the history by one tick
    ///
    /// Must be called exactly once per polling tick, before any debouncer
    /// bound to this pin is updated.
    pub fn update(&self) {
        self.previous.set(self.current.get());
        self.current.set(self.read());
    }

    fn drive(&self, logical: bool) {
        if self.config.raw_output(logical) {
            self.registers.write_pin_high(self.pin);
        } else {
            self.registers.write_pin_low(self.pin);
        }
    }

    fn retain(&self, logical: bool) {
        if self.config.retain_output_state {
            self.current.set(logical);
        }
    }

    fn seed(&self, level: bool) {
        self.current.set(level);
        self.previous.set(level);
    }
}

impl<R: PinRegisters> ErrorType for DigitalPin<R> {
    type Error = Infallible;
}

impl<R: PinRegisters> InputPin for DigitalPin<R> {
    fn is_high(&mut self) -> Result<bool, Self::Error> {
        Ok(self.read())
    }

    fn is_low(&mut self) -> Result<bool, Self::Error> {
        Ok(!self.read())
    }
}

impl<R: PinRegisters> OutputPin for DigitalPin<R> {
    fn set_low(&mut self) -> Result<(), Self::Error> {
        self.write_low();
        Ok(())
    }

    fn set_high(&mut self) -> Result<(), Self::Error> {
        self.write_high();
        Ok(())
    }
}
