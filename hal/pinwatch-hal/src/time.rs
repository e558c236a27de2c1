//! Timestamp source
//!
//! Debounce timing runs on a free-running millisecond counter that wraps
//! at `u32::MAX` (about 49.7 days). Elapsed time is always computed with
//! wrapping subtraction, so a single wraparound between two timestamps is
//! harmless.

/// Millisecond timestamp
pub type Instant = u32;

/// Milliseconds elapsed from `start` to `now`, tolerant of one wraparound
#[inline]
pub fn elapsed_ms(now: Instant, start: Instant) -> u32 {
    now.wrapping_sub(start)
}

/// Monotonic millisecond clock
pub trait Clock {
    /// Current timestamp in milliseconds
    fn now_ms(&self) -> Instant;

    /// Milliseconds elapsed since `start`
    fn elapsed_since(&self, start: Instant) -> u32 {
        elapsed_ms(self.now_ms(), start)
    }
}

impl<T: Clock + ?Sized> Clock for &T {
    fn now_ms(&self) -> Instant {
        (**self).now_ms()
    }
}
