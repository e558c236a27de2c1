//! Simulated target for host-side testing
//!
//! [`SimPort`] stands in for a GPIO port: reads return whatever level the
//! test drove onto the pin (or the output latch for output pins), and all
//! register updates happen inside a critical section like they do on
//! hardware. [`ManualClock`] is a clock the test advances by hand.

use core::cell::{Cell, RefCell};

use critical_section::Mutex;

use crate::gpio::{PinMode, PinRegisters};
use crate::time::{Clock, Instant};

/// Largest port the simulator models
pub const MAX_SIM_PINS: u8 = 64;

struct PortState {
    /// Electrical level of each pin, bit n = pin n
    levels: u64,
    /// Configured mode of each pin
    modes: [PinMode; MAX_SIM_PINS as usize],
    /// Number of accepted low/high writes
    writes: u32,
}

/// Simulated GPIO port
pub struct SimPort {
    pin_count: u8,
    state: Mutex<RefCell<PortState>>,
}

impl SimPort {
    /// Create a port with `pin_count` pins, all low inputs
    ///
    /// Counts above [`MAX_SIM_PINS`] are clamped.
    pub const fn new(pin_count: u8) -> Self {
        let pin_count = if pin_count > MAX_SIM_PINS {
            MAX_SIM_PINS
        } else {
            pin_count
        };
        Self {
            pin_count,
            state: Mutex::new(RefCell::new(PortState {
                levels: 0,
                modes: [PinMode::Input; MAX_SIM_PINS as usize],
                writes: 0,
            })),
        }
    }

    /// Drive a pin from outside the chip (switch contact, bouncing signal)
    pub fn set_level(&self, pin: u8, high: bool) {
        if !self.is_valid_pin(pin) {
            return;
        }
        critical_section::with(|cs| {
            let mut state = self.state.borrow_ref_mut(cs);
            if high {
                state.levels |= 1 << pin;
            } else {
                state.levels &= !(1 << pin);
            }
        });
    }

    /// Electrical level currently on a pin
    pub fn level(&self, pin: u8) -> bool {
        self.read_pin(pin)
    }

    /// Mode a pin was last configured to, `None` for an invalid index
    pub fn mode(&self, pin: u8) -> Option<PinMode> {
        if !self.is_valid_pin(pin) {
            return None;
        }
        Some(critical_section::with(|cs| {
            self.state.borrow_ref(cs).modes[pin as usize]
        }))
    }

    /// Number of low/high writes that reached a valid pin
    pub fn write_count(&self) -> u32 {
        critical_section::with(|cs| self.state.borrow_ref(cs).writes)
    }

    fn write(&self, pin: u8, high: bool) {
        if !self.is_valid_pin(pin) {
            return;
        }
        critical_section::with(|cs| {
            let mut state = self.state.borrow_ref_mut(cs);
            if high {
                state.levels |= 1 << pin;
            } else {
                state.levels &= !(1 << pin);
            }
            state.writes = state.writes.wrapping_add(1);
        });
    }
}

impl PinRegisters for SimPort {
    fn pin_count(&self) -> u8 {
        self.pin_count
    }

    /// Switching to `InputPullUp` pulls the pin high, as an unconnected
    /// pulled-up input would read.
    fn set_pin_mode(&self, pin: u8, mode: PinMode) {
        if !self.is_valid_pin(pin) {
            return;
        }
        critical_section::with(|cs| {
            let mut state = self.state.borrow_ref_mut(cs);
            state.modes[pin as usize] = mode;
            if mode == PinMode::InputPullUp {
                state.levels |= 1 << pin;
            }
        });
    }

    fn read_pin(&self, pin: u8) -> bool {
        if !self.is_valid_pin(pin) {
            return false;
        }
        critical_section::with(|cs| self.state.borrow_ref(cs).levels & (1 << pin) != 0)
    }

    fn write_pin_low(&self, pin: u8) {
        self.write(pin, false);
    }

    fn write_pin_high(&self, pin: u8) {
        self.write(pin, true);
    }
}

/// Clock advanced explicitly by the test
pub struct ManualClock {
    now: Cell<Instant>,
}

impl ManualClock {
    /// Create a clock reading `start`
    pub const fn new(start: Instant) -> Self {
        Self {
            now: Cell::new(start),
        }
    }

    /// Jump to an absolute timestamp
    pub fn set(&self, now: Instant) {
        self.now.set(now);
    }

    /// Advance by `ms`, wrapping at `u32::MAX`
    pub fn advance(&self, ms: u32) {
        self.now.set(self.now.get().wrapping_add(ms));
    }
}

impl Clock for ManualClock {
    fn now_ms(&self) -> Instant {
        self.now.get()
    }
}
