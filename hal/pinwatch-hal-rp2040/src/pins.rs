//! GPIO register access by pin number
//!
//! The RP2040's GPIOs are distinct types in embassy-rp. [`PinBank`] owns all
//! of them as [`Flex`] pins so that `pinwatch-core` can address a pin by its
//! number, the way a configuration file names it.

use core::cell::RefCell;

use critical_section::Mutex;
use embassy_rp::gpio::{AnyPin, Flex, Pull};
use embassy_rp::Peri;
use pinwatch_hal::{PinMode, PinRegisters};

/// Number of GPIO pins on RP2040
pub const GPIO_COUNT: u8 = 30;

/// Build a [`PinBank`] from all 30 GPIOs of the peripherals struct
///
/// Only the `PIN_n` fields are moved out, the rest of the peripherals stay
/// usable.
///
/// Usage:
/// ```ignore
/// let p = embassy_rp::init(Default::default());
/// let bank = pin_bank!(p);
/// ```
#[macro_export]
macro_rules! pin_bank {
    ($p:ident) => {
        $crate::pins::PinBank::new([
            ::embassy_rp::Peri::<::embassy_rp::gpio::AnyPin>::from($p.PIN_0),
            ::embassy_rp::Peri::<::embassy_rp::gpio::AnyPin>::from($p.PIN_1),
            ::embassy_rp::Peri::<::embassy_rp::gpio::AnyPin>::from($p.PIN_2),
            ::embassy_rp::Peri::<::embassy_rp::gpio::AnyPin>::from($p.PIN_3),
            ::embassy_rp::Peri::<::embassy_rp::gpio::AnyPin>::from($p.PIN_4),
            ::embassy_rp::Peri::<::embassy_rp::gpio::AnyPin>::from($p.PIN_5),
            ::embassy_rp::Peri::<::embassy_rp::gpio::AnyPin>::from($p.PIN_6),
            ::embassy_rp::Peri::<::embassy_rp::gpio::AnyPin>::from($p.PIN_7),
            ::embassy_rp::Peri::<::embassy_rp::gpio::AnyPin>::from($p.PIN_8),
            ::embassy_rp::Peri::<::embassy_rp::gpio::AnyPin>::from($p.PIN_9),
            ::embassy_rp::Peri::<::embassy_rp::gpio::AnyPin>::from($p.PIN_10),
            ::embassy_rp::Peri::<::embassy_rp::gpio::AnyPin>::from($p.PIN_11),
            ::embassy_rp::Peri::<::embassy_rp::gpio::AnyPin>::from($p.PIN_12),
            ::embassy_rp::Peri::<::embassy_rp::gpio::AnyPin>::from($p.PIN_13),
            ::embassy_rp::Peri::<::embassy_rp::gpio::AnyPin>::from($p.PIN_14),
            ::embassy_rp::Peri::<::embassy_rp::gpio::AnyPin>::from($p.PIN_15),
            ::embassy_rp::Peri::<::embassy_rp::gpio::AnyPin>::from($p.PIN_16),
            ::embassy_rp::Peri::<::embassy_rp::gpio::AnyPin>::from($p.PIN_17),
            ::embassy_rp::Peri::<::embassy_rp::gpio::AnyPin>::from($p.PIN_18),
            ::embassy_rp::Peri::<::embassy_rp::gpio::AnyPin>::from($p.PIN_19),
            ::embassy_rp::Peri::<::embassy_rp::gpio::AnyPin>::from($p.PIN_20),
            ::embassy_rp::Peri::<::embassy_rp::gpio::AnyPin>::from($p.PIN_21),
            ::embassy_rp::Peri::<::embassy_rp::gpio::AnyPin>::from($p.PIN_22),
            ::embassy_rp::Peri::<::embassy_rp::gpio::AnyPin>::from($p.PIN_23),
            ::embassy_rp::Peri::<::embassy_rp::gpio::AnyPin>::from($p.PIN_24),
            ::embassy_rp::Peri::<::embassy_rp::gpio::AnyPin>::from($p.PIN_25),
            ::embassy_rp::Peri::<::embassy_rp::gpio::AnyPin>::from($p.PIN_26),
            ::embassy_rp::Peri::<::embassy_rp::gpio::AnyPin>::from($p.PIN_27),
            ::embassy_rp::Peri::<::embassy_rp::gpio::AnyPin>::from($p.PIN_28),
            ::embassy_rp::Peri::<::embassy_rp::gpio::AnyPin>::from($p.PIN_29),
        ])
    };
}

/// Pin bank that holds all GPIO pins and addresses them by number
///
/// Every access runs inside a critical section, which masks interrupts
/// (and takes the inter-core spinlock) and restores the previous state on
/// exit, so an interrupt handler can never observe a half-applied change.
pub struct PinBank {
    pins: Mutex<RefCell<[Option<Flex<'static>>; GPIO_COUNT as usize]>>,
}

impl PinBank {
    /// Create a pin bank owning every GPIO, indexed by pin number
    ///
    /// Prefer the [`pin_bank!`](crate::pin_bank) macro, which collects the
    /// pins from the peripherals struct.
    pub fn new(pins: [Peri<'static, AnyPin>; GPIO_COUNT as usize]) -> Self {
        Self {
            pins: Mutex::new(RefCell::new(pins.map(|pin| Some(Flex::new(pin))))),
        }
    }

    /// Run `f` on a pin, `None` if the number is out of range
    fn with_pin<T>(&self, pin: u8, f: impl FnOnce(&mut Flex<'static>) -> T) -> Option<T> {
        if !self.is_valid_pin(pin) {
            return None;
        }
        critical_section::with(|cs| {
            let mut pins = self.pins.borrow_ref_mut(cs);
            pins[pin as usize].as_mut().map(f)
        })
    }
}

impl PinRegisters for PinBank {
    fn pin_count(&self) -> u8 {
        GPIO_COUNT
    }

    fn set_pin_mode(&self, pin: u8, mode: PinMode) {
        self.with_pin(pin, |flex| match mode {
            PinMode::Input => {
                flex.set_pull(Pull::None);
                flex.set_as_input();
            }
            PinMode::InputPullUp => {
                flex.set_pull(Pull::Up);
                flex.set_as_input();
            }
            PinMode::Output => flex.set_as_output(),
        });
    }

    fn read_pin(&self, pin: u8) -> bool {
        self.with_pin(pin, |flex| flex.is_high()).unwrap_or(false)
    }

    fn write_pin_low(&self, pin: u8) {
        self.with_pin(pin, |flex| flex.set_low());
    }

    fn write_pin_high(&self, pin: u8) {
        self.with_pin(pin, |flex| flex.set_high());
    }
}
