//! Millisecond clock backed by the embassy time driver

use embassy_time::Instant as EmbassyInstant;
use pinwatch_hal::{Clock, Instant};

/// Free-running millisecond counter
///
/// The 64-bit embassy tick count is truncated to 32 bits, so the value
/// wraps every ~49.7 days. Debounce timing tolerates that.
#[derive(Debug, Clone, Copy, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct EmbassyClock;

impl Clock for EmbassyClock {
    fn now_ms(&self) -> Instant {
        EmbassyInstant::now().as_millis() as Instant
    }
}
