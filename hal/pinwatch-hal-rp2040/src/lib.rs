//! RP2040-specific HAL for pinwatch
//!
//! This crate provides RP2040 implementations of the shared
//! `pinwatch-hal` traits:
//!
//! - [`pins::PinBank`] - register access to GPIO 0-29 by index
//! - [`clock::EmbassyClock`] - millisecond clock on the embassy time driver

#![no_std]

pub mod clock;
pub mod pins;

pub use clock::EmbassyClock;
pub use pins::{PinBank, GPIO_COUNT};

// Re-export shared traits from pinwatch-hal for convenience
pub use pinwatch_hal::{Clock, PinMode, PinRegisters};
