//! Polling task
//!
//! The superloop: once per tick, update the button pin, then its
//! debouncer, then act on a committed transition.

use defmt::*;
use embassy_time::{Duration, Ticker};
use pinwatch_core::{Debouncer, DigitalPin, PinMode};
use pinwatch_hal_rp2040::{EmbassyClock, PinBank};

use crate::config::{BUTTON, BUTTON_DEBOUNCE_MS, IO_CONFIG, LED, POLL_INTERVAL_MS};

/// Poll task - debounces the button and drives the LED from it
#[embassy_executor::task]
pub async fn poll_task(bank: &'static PinBank) {
    info!("Poll task started");

    let button = DigitalPin::new(
        bank,
        BUTTON.pin,
        BUTTON.input_mode(),
        BUTTON.apply_to(IO_CONFIG),
    );
    let led = DigitalPin::new(bank, LED.pin, PinMode::Output, LED.apply_to(IO_CONFIG));
    let mut debounced = Debouncer::new(&button, EmbassyClock, BUTTON_DEBOUNCE_MS);

    info!(
        "Button on gpio{} ({}ms debounce), LED on gpio{}",
        button.pin(),
        debounced.debounce_ms(),
        led.pin()
    );

    let mut ticker = Ticker::every(Duration::from_millis(POLL_INTERVAL_MS));
    let mut presses: u32 = 0;

    loop {
        ticker.next().await;

        // Order matters: the debouncer reads the history update() just wrote
        button.update();
        debounced.update();

        if debounced.changed() {
            let pressed = debounced.state();
            if pressed {
                presses = presses.wrapping_add(1);
                info!("Button pressed (count: {})", presses);
            } else {
                info!("Button released");
            }

            led.write(pressed);
            debug!("LED tracked level: {}", led.current_level());
        }
    }
}
