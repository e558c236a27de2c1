//! Pinwatch - debounced input demo firmware
//!
//! Polls a push button once per tick, debounces it and mirrors the
//! debounced level onto an LED. Pins and timing come from io.toml.

#![no_std]
#![no_main]

use defmt::*;
use embassy_executor::Spawner;
use static_cell::StaticCell;
use {defmt_rtt as _, panic_probe as _};

use pinwatch_hal_rp2040::{pin_bank, PinBank, GPIO_COUNT};

mod config;
mod tasks;

// Pin bank must live forever for task references
static PIN_BANK: StaticCell<PinBank> = StaticCell::new();

/// Main entry point
#[embassy_executor::main]
async fn main(spawner: Spawner) {
    info!("Pinwatch firmware starting...");

    // Initialize RP2040 peripherals
    let p = embassy_rp::init(Default::default());
    let bank: &'static PinBank = PIN_BANK.init(pin_bank!(p));
    info!("Pin bank initialized ({} GPIOs)", GPIO_COUNT);

    info!(
        "I/O config: invert_input={}, invert_output={}, retain_output={}",
        config::IO_CONFIG.invert_input,
        config::IO_CONFIG.invert_output,
        config::IO_CONFIG.retain_output_state
    );

    spawner.spawn(tasks::poll_task(bank)).unwrap();
}
