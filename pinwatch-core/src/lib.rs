//! Board-agnostic pin tracking and debouncing
//!
//! This crate contains all logic that does not depend on a specific chip:
//!
//! - [`pin::DigitalPin`] - per-pin logical level tracking and change detection
//! - [`debounce::Debouncer`] - timer-based filtering of a pin's transitions
//! - [`config`] - inversion/retention policy and pin descriptors
//!
//! Hardware access goes through the [`pinwatch_hal::PinRegisters`] and
//! [`pinwatch_hal::Clock`] traits.
//!
//! # Polling
//!
//! ```ignore
//! let button = DigitalPin::new(&port, 15, PinMode::InputPullUp, config);
//! let mut debounced = Debouncer::new(&button, &clock, 30);
//!
//! loop {
//!     button.update();
//!     debounced.update();
//!     if debounced.changed() {
//!         led.write(debounced.state());
//!     }
//! }
//! ```

#![cfg_attr(not(test), no_std)]
#![deny(unsafe_code)]

pub mod config;
pub mod debounce;
pub mod pin;

pub use config::{parse_pin_string, IoConfig, PinConfig};
pub use debounce::{Debouncer, HISTORY_DEPTH};
pub use pin::DigitalPin;
pub use pinwatch_hal::{Clock, Instant, PinMode, PinRegisters};
