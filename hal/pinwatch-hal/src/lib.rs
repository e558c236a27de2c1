//! Pinwatch Hardware Abstraction Layer
//!
//! This crate defines the register-access capability and the timestamp
//! source that the pin tracking and debounce logic in `pinwatch-core` is
//! written against. Chip-specific crates implement these traits, so the
//! same polling code runs on different hardware and on the host.
//!
//! # Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────┐
//! │  Application (pinwatch-firmware, etc.)  │
//! └─────────────────────────────────────────┘
//!                     │
//!                     ▼
//! ┌─────────────────────────────────────────┐
//! │  pinwatch-core (DigitalPin, Debouncer)  │
//! └─────────────────────────────────────────┘
//!                     │
//!                     ▼
//! ┌─────────────────────────────────────────┐
//! │  pinwatch-hal (this crate - traits)     │
//! └─────────────────────────────────────────┘
//!                     │
//!         ┌───────────┴───────────┐
//!         ▼                       ▼
//! ┌───────────────┐       ┌───────────────┐
//! │ pinwatch-hal- │       │  sim (host    │
//! │    rp2040     │       │  tests)       │
//! └───────────────┘       └───────────────┘
//! ```
//!
//! # Traits
//!
//! - [`gpio::PinRegisters`] - Single-pin register access by index
//! - [`time::Clock`] - Free-running millisecond counter

#![no_std]
#![deny(unsafe_code)]

pub mod gpio;
#[cfg(feature = "sim")]
pub mod sim;
pub mod time;

// Re-export key traits at crate root for convenience
pub use gpio::{PinMode, PinRegisters};
pub use time::{Clock, Instant};
