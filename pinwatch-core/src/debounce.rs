//! Time-based debouncing
//!
//! A [`Debouncer`] watches the change detection of one [`DigitalPin`] and
//! only commits a new level once it has held for the configured duration.
//!
//! # Per-tick state machine
//!
//! 1. If the pin changed to a level this debouncer has not seen yet, toggle
//!    the stability timer: a running timer is cancelled (the change
//!    reversed before it settled, i.e. bounce), an idle timer is started at
//!    the current time.
//! 2. Shift the level history left by one tick.
//! 3. If the timer is running and the duration has elapsed, the change is
//!    accepted and the timer stops.
//! 4. Shift in the pin's level if the timer is idle, or its negation (the
//!    level still committed) while the timer runs.
//!
//! The debouncer never calls [`DigitalPin::update`]. The polling loop must
//! update the pin first and the debouncer second, once per tick.

use core::convert::Infallible;

use embedded_hal::digital::{ErrorType, InputPin};
use pinwatch_hal::{Clock, Instant, PinRegisters};

use crate::pin::DigitalPin;

/// Number of ticks of committed history kept
pub const HISTORY_DEPTH: u8 = 8;

/// Debounced view of a [`DigitalPin`]
pub struct Debouncer<'a, R, C> {
    pin: &'a DigitalPin<R>,
    clock: C,
    /// Minimum hold time before a change is accepted (ms)
    debounce_ms: u32,
    /// Start of the change being timed, if any
    timer: Option<Instant>,
    /// Committed levels, bit n = n ticks ago
    history: u8,
    /// Pin level as of the last update or setup
    seen: bool,
}

impl<'a, R: PinRegisters, C: Clock> Debouncer<'a, R, C> {
    /// Create a debouncer for `pin`
    ///
    /// The history is filled with the pin's current level, so the first
    /// tick never reports a transition.
    pub fn new(pin: &'a DigitalPin<R>, clock: C, debounce_ms: u32) -> Self {
        let mut debouncer = Self {
            pin,
            clock,
            debounce_ms,
            timer: None,
            history: 0,
            seen: false,
        };
        debouncer.setup(debounce_ms);
        debouncer
    }

    /// Create a debouncer using the pin configuration's default duration
    pub fn with_default_duration(pin: &'a DigitalPin<R>, clock: C) -> Self {
        let debounce_ms = pin.config().default_debounce_ms;
        Self::new(pin, clock, debounce_ms)
    }

    /// Change the debounce duration and resynchronise with the pin
    ///
    /// Any change being timed is discarded. A change the pin already
    /// recorded this tick is taken as the committed level, not as an edge.
    pub fn setup(&mut self, debounce_ms: u32) {
        let level = self.pin.current_level();
        self.debounce_ms = debounce_ms;
        self.timer = None;
        self.history = if level { u8::MAX } else { 0 };
        self.seen = level;
    }

    /// Debounced level as it was `ticks_elapsed` updates ago
    ///
    /// # Panics
    ///
    /// Panics if `ticks_elapsed >= HISTORY_DEPTH`. Asking for more history
    /// than is kept is a caller bug.
    pub fn state_at(&self, ticks_elapsed: u8) -> bool {
        assert!(
            ticks_elapsed < HISTORY_DEPTH,
            "debounce history holds {} ticks",
            HISTORY_DEPTH
        );
        self.history & (1 << ticks_elapsed) != 0
    }

    /// Current debounced level
    pub fn state(&self) -> bool {
        self.state_at(0)
    }

    /// Debounced level one tick ago
    pub fn last_state(&self) -> bool {
        self.state_at(1)
    }

    /// Check if the latest update committed a new level
    pub fn changed(&self) -> bool {
        self.state() != self.last_state()
    }

    /// Check if a change is currently being timed
    pub fn is_timing(&self) -> bool {
        self.timer.is_some()
    }

    /// Configured debounce duration (ms)
    pub fn debounce_ms(&self) -> u32 {
        self.debounce_ms
    }

    /// Pin this debouncer observes
    pub fn pin(&self) -> &'a DigitalPin<R> {
        self.pin
    }

    /// Run one tick of the state machine
    pub fn update(&mut self) {
        let level = self.pin.current_level();
        if self.pin.changed() && level != self.seen {
            self.toggle_timer();
        }
        self.seen = level;

        self.history <<= 1;

        if let Some(start) = self.timer {
            if self.clock.elapsed_since(start) >= self.debounce_ms {
                #[cfg(feature = "defmt")]
                defmt::trace!("pin {}: change accepted", self.pin.pin());
                self.timer = None;
            }
        }

        let committed = if self.timer.is_some() { !level } else { level };
        self.history |= committed as u8;
    }

    fn toggle_timer(&mut self) {
        self.timer = match self.timer {
            Some(_) => {
                // reversed before the duration elapsed
                #[cfg(feature = "defmt")]
                defmt::trace!("pin {}: bounce, timer cancelled", self.pin.pin());
                None
            }
            None => {
                #[cfg(feature = "defmt")]
                defmt::trace!("pin {}: change seen, timing", self.pin.pin());
                Some(self.clock.now_ms())
            }
        };
    }
}

impl<R: PinRegisters, C: Clock> ErrorType for Debouncer<'_, R, C> {
    type Error = Infallible;
}

impl<R: PinRegisters, C: Clock> InputPin for Debouncer<'_, R, C> {
    fn is_high(&mut self) -> Result<bool, Self::Error> {
        Ok(self.state())
    }

    fn is_low(&mut self) -> Result<bool, Self::Error> {
        Ok(!self.state())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::IoConfig;
    use pinwatch_hal::sim::{ManualClock, SimPort};
    use pinwatch_hal::PinMode;
    use proptest::prelude::*;

    const BUTTON: u8 = 7;
    const L: bool = false;
    const H: bool = true;

    /// Feed `levels` one per tick (1 ms apart, starting at `start_ms`) and
    /// collect `(state, changed)` after each tick.
    fn run(
        levels: &[bool],
        initial: bool,
        debounce_ms: u32,
        start_ms: u32,
    ) -> Vec<(bool, bool)> {
        run_every(levels, initial, debounce_ms, start_ms, 1)
    }

    /// Like [`run`], with ticks `tick_ms` apart
    fn run_every(
        levels: &[bool],
        initial: bool,
        debounce_ms: u32,
        start_ms: u32,
        tick_ms: u32,
    ) -> Vec<(bool, bool)> {
        let port = SimPort::new(20);
        let clock = ManualClock::new(start_ms);
        port.set_level(BUTTON, initial);

        let pin = DigitalPin::new(&port, BUTTON, PinMode::Input, IoConfig::new());
        let mut debouncer = Debouncer::new(&pin, &clock, debounce_ms);

        levels
            .iter()
            .enumerate()
            .map(|(tick, &level)| {
                clock.set(start_ms.wrapping_add(tick as u32 * tick_ms));
                port.set_level(BUTTON, level);
                pin.update();
                debouncer.update();
                (debouncer.state(), debouncer.changed())
            })
            .collect()
    }

    fn states(levels: &[bool], debounce_ms: u32) -> Vec<bool> {
        run(levels, L, debounce_ms, 0)
            .into_iter()
            .map(|(state, _)| state)
            .collect()
    }

    #[test]
    fn test_initial_state_follows_pin() {
        let port = SimPort::new(20);
        let clock = ManualClock::new(0);
        port.set_level(BUTTON, true);
        let pin = DigitalPin::new(&port, BUTTON, PinMode::Input, IoConfig::new());

        let debouncer = Debouncer::new(&pin, &clock, 10);
        for ticks in 0..HISTORY_DEPTH {
            assert!(debouncer.state_at(ticks));
        }
        assert!(!debouncer.changed());
        assert!(!debouncer.is_timing());
    }

    #[test]
    fn test_change_accepted_after_duration() {
        let levels = [L, L, H, H, H, H];
        assert_eq!(states(&levels, 3), [L, L, L, L, L, H]);
    }

    #[test]
    fn test_short_pulse_rejected() {
        let levels = [L, L, H, H, L, L, L, L];
        assert!(states(&levels, 3).iter().all(|&state| !state));
    }

    #[test]
    fn test_zero_duration_passes_changes_through() {
        let levels = [L, H, L, H, H, L];
        assert_eq!(states(&levels, 0), levels);
    }

    #[test]
    fn test_release_is_debounced_too() {
        let levels = [H, H, H, L, L, L];
        let result: Vec<bool> = run(&levels, H, 2, 0)
            .into_iter()
            .map(|(state, _)| state)
            .collect();
        assert_eq!(result, [H, H, H, H, H, L]);
    }

    #[test]
    fn test_changed_for_one_tick() {
        let levels = [L, H, H, H, H, H, H];
        let changed: Vec<bool> = run(&levels, L, 2, 0)
            .into_iter()
            .map(|(_, changed)| changed)
            .collect();
        assert_eq!(changed, [false, false, false, true, false, false, false]);
    }

    #[test]
    fn test_bouncing_keeps_last_stable_value() {
        // Accept HIGH, then bounce forever
        let mut levels = Vec::from([H, H, H, H]);
        for i in 0..40 {
            levels.push(i % 2 == 0);
        }
        let result = states(&levels, 3);
        assert!(result[4..].iter().all(|&state| state));
    }

    #[test]
    fn test_bounce_then_settle() {
        // Contact chatter, then a clean press
        let levels = [L, H, L, H, L, H, H, H, H, H];
        assert_eq!(states(&levels, 3), [L, L, L, L, L, L, L, L, H, H]);
    }

    #[test]
    fn test_timer_survives_clock_wrap() {
        let levels = [L, H, H, H, H, H];
        let start = u32::MAX - 2;
        let result: Vec<bool> = run(&levels, L, 3, start)
            .into_iter()
            .map(|(state, _)| state)
            .collect();
        assert_eq!(result, [L, L, L, L, H, H]);
    }

    #[test]
    fn test_history_lookback() {
        let port = SimPort::new(20);
        let clock = ManualClock::new(0);
        let pin = DigitalPin::new(&port, BUTTON, PinMode::Input, IoConfig::new());
        let mut debouncer = Debouncer::new(&pin, &clock, 0);

        port.set_level(BUTTON, true);
        for _ in 0..3 {
            clock.advance(1);
            pin.update();
            debouncer.update();
        }

        assert!(debouncer.state_at(0));
        assert!(debouncer.state_at(2));
        assert!(!debouncer.state_at(3));
        assert!(!debouncer.state_at(HISTORY_DEPTH - 1));
        assert!(debouncer.last_state());
    }

    #[test]
    #[should_panic]
    fn test_history_out_of_range_panics() {
        let port = SimPort::new(20);
        let clock = ManualClock::new(0);
        let pin = DigitalPin::new(&port, BUTTON, PinMode::Input, IoConfig::new());
        let debouncer = Debouncer::new(&pin, &clock, 10);

        debouncer.state_at(HISTORY_DEPTH);
    }

    #[test]
    fn test_setup_discards_timer() {
        let port = SimPort::new(20);
        let clock = ManualClock::new(0);
        let pin = DigitalPin::new(&port, BUTTON, PinMode::Input, IoConfig::new());
        let mut debouncer = Debouncer::new(&pin, &clock, 50);

        port.set_level(BUTTON, true);
        pin.update();
        debouncer.update();
        assert!(debouncer.is_timing());
        assert!(!debouncer.state());

        debouncer.setup(20);
        assert_eq!(debouncer.debounce_ms(), 20);
        assert!(!debouncer.is_timing());
        assert!(debouncer.state());
        assert!(debouncer.last_state());
        assert!(!debouncer.changed());
    }

    #[test]
    fn test_setup_after_pin_update_is_not_an_edge() {
        let port = SimPort::new(20);
        let clock = ManualClock::new(0);
        let pin = DigitalPin::new(&port, BUTTON, PinMode::Input, IoConfig::new());
        let mut debouncer = Debouncer::new(&pin, &clock, 5);

        port.set_level(BUTTON, true);
        pin.update();
        debouncer.setup(5);
        debouncer.update();
        assert!(debouncer.state());
        assert!(!debouncer.changed());
        assert!(!debouncer.is_timing());

        // A later reversal is still timed
        clock.advance(1);
        port.set_level(BUTTON, false);
        pin.update();
        debouncer.update();
        assert!(debouncer.is_timing());
        assert!(debouncer.state());
    }

    #[test]
    fn test_new_after_pin_update_holds_level() {
        let port = SimPort::new(20);
        let clock = ManualClock::new(0);
        let pin = DigitalPin::new(&port, BUTTON, PinMode::Input, IoConfig::new());

        port.set_level(BUTTON, true);
        pin.update();
        assert!(pin.changed());

        let mut debouncer = Debouncer::new(&pin, &clock, 5);
        for _ in 0..10 {
            debouncer.update();
            assert!(debouncer.state());
            assert!(!debouncer.changed());
            clock.advance(1);
            pin.update();
        }
    }

    #[test]
    fn test_acceptance_follows_elapsed_time() {
        // 10 ms ticks: the change at 10 ms is accepted at 40 ms (30 >= 25)
        let levels = [L, H, H, H, H, H];
        let states: Vec<bool> = run_every(&levels, L, 25, 0, 10)
            .into_iter()
            .map(|(state, _)| state)
            .collect();
        assert_eq!(states, [L, L, L, L, H, H]);

        // Exactly on the boundary: 20 ms elapsed at 30 ms
        let states: Vec<bool> = run_every(&levels, L, 20, 0, 10)
            .into_iter()
            .map(|(state, _)| state)
            .collect();
        assert_eq!(states, [L, L, L, H, H, H]);
    }

    #[test]
    fn test_default_duration_from_config() {
        let port = SimPort::new(20);
        let clock = ManualClock::new(0);
        let config = IoConfig::new().with_default_debounce_ms(42);
        let pin = DigitalPin::new(&port, BUTTON, PinMode::Input, config);

        let debouncer = Debouncer::with_default_duration(&pin, &clock);
        assert_eq!(debouncer.debounce_ms(), 42);
        assert_eq!(debouncer.pin().pin(), BUTTON);
    }

    #[test]
    fn test_active_low_button() {
        let port = SimPort::new(20);
        let clock = ManualClock::new(0);
        let config = IoConfig::new().with_inverted_input(true);
        let pin = DigitalPin::new(&port, BUTTON, PinMode::InputPullUp, config);
        let mut debouncer = Debouncer::new(&pin, &clock, 2);
        assert!(!debouncer.state());

        // Pressed: pin pulled to ground
        port.set_level(BUTTON, false);
        for _ in 0..3 {
            clock.advance(1);
            pin.update();
            debouncer.update();
        }
        assert!(debouncer.state());
        assert!(debouncer.is_high().unwrap());
    }

    /// Expected `state()` per tick for alternating runs of the given lengths
    fn model(initial: bool, debounce_ms: u32, runs: &[u32]) -> (Vec<bool>, Vec<bool>) {
        let mut levels = Vec::new();
        let mut expected = Vec::new();
        let mut committed = initial;
        let mut level = initial;

        for &len in runs {
            level = !level;
            for k in 0..len {
                levels.push(level);
                if level != committed && k >= debounce_ms {
                    expected.push(level);
                } else {
                    expected.push(committed);
                }
            }
            if level != committed && len > debounce_ms {
                committed = level;
            }
        }

        (levels, expected)
    }

    proptest! {
        #[test]
        fn prop_debouncer_matches_model(
            initial in any::<bool>(),
            debounce_ms in 0u32..8,
            runs in prop::collection::vec(1u32..12, 1..16),
            start_ms in any::<u32>(),
        ) {
            let (levels, expected) = model(initial, debounce_ms, &runs);
            let observed = run(&levels, initial, debounce_ms, start_ms);

            let mut previous = initial;
            let ticks = expected.iter().zip(observed.iter()).enumerate();
            for (tick, (&want, &(state, changed))) in ticks {
                prop_assert_eq!(state, want, "state at tick {}", tick);
                prop_assert_eq!(changed, want != previous, "changed at tick {}", tick);
                previous = want;
            }
        }

        #[test]
        fn prop_short_pulses_never_reported(
            debounce_ms in 2u32..10,
            pulses in prop::collection::vec(1u32..20, 1..10),
        ) {
            // Every HIGH pulse is shorter than the duration
            let mut levels = Vec::new();
            for &len in &pulses {
                for _ in 0..len.min(debounce_ms - 1) {
                    levels.push(H);
                }
                levels.push(L);
            }
            let observed = run(&levels, L, debounce_ms, 0);
            prop_assert!(observed.iter().all(|&(state, changed)| !state && !changed));
        }
    }
}
