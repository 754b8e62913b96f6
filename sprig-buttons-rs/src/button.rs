//! Single debounced push button.
//!
//! [`Button`] wraps one pull-up input line with a two-mode state machine:
//! edge-triggered with a time gate ([`DebounceMode::Debounced`]) or plain
//! level-triggered ([`DebounceMode::PassThrough`]).

use embassy_time::Instant;
use embedded_hal::digital::InputPin;
use telemetry::Clock;

use crate::constants::DEBOUNCE_WINDOW;

/// How [`Button::is_pressed()`] interprets the line.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum DebounceMode {
    /// One `true` per falling edge, at most once per [`DEBOUNCE_WINDOW`].
    #[default]
    Debounced,
    /// `true` on every query while the line is held low. A single hold
    /// reports repeated presses, which is what repeat-fire controls want.
    PassThrough,
}

/// Push button on a pull-up input line (idle high, pressed low).
///
/// # Example
///
/// ```no_run
/// use button_driver::Button;
/// use telemetry::SystemClock;
///
/// # fn example(pin: impl embedded_hal::digital::InputPin) {
/// let mut button = Button::new(pin, SystemClock);
/// if button.is_pressed() {
///     // handle one press
/// }
/// # }
/// ```
pub struct Button<P, C> {
    pin: P,
    clock: C,
    /// Line level seen by the previous query; `true` = high (released).
    last_level_high: bool,
    /// When the last press was accepted. Starts at the clock origin.
    last_press: Instant,
    mode: DebounceMode,
}

impl<P, C> Button<P, C>
where
    P: InputPin,
    C: Clock,
{
    /// Bind to an input line.
    ///
    /// The pin must already be configured with its pull-up enabled (on
    /// embassy-rp: `Input::new(pin, Pull::Up)`). The current level is
    /// sampled once so a button held at power-on does not register until it
    /// has been released.
    ///
    /// # Arguments
    /// * `pin`: pull-up input line (takes ownership)
    /// * `clock`: monotonic time source for the debounce window
    pub fn new(mut pin: P, clock: C) -> Self {
        let last_level_high = !read_pressed(&mut pin);
        Self {
            pin,
            clock,
            last_level_high,
            last_press: Instant::from_ticks(0),
            mode: DebounceMode::Debounced,
        }
    }

    /// Select debounced or pass-through behaviour. No effect on the pin.
    pub fn set_debounce_mode(&mut self, mode: DebounceMode) {
        self.mode = mode;
    }

    /// Current mode.
    pub fn debounce_mode(&self) -> DebounceMode {
        self.mode
    }

    /// Was a press just detected?
    ///
    /// In [`DebounceMode::Debounced`] this returns `true` exactly when the
    /// line is low now, was high on the previous query, and at least
    /// [`DEBOUNCE_WINDOW`] has passed since the last accepted press. It does
    /// not re-arm until a later query sees the line high again.
    ///
    /// In [`DebounceMode::PassThrough`] it returns `true` whenever the line
    /// is low, with no edge detection and no time gate.
    pub fn is_pressed(&mut self) -> bool {
        let pressed = read_pressed(&mut self.pin);

        match self.mode {
            DebounceMode::Debounced => {
                if pressed && self.last_level_high {
                    let now = self.clock.now();
                    if now.saturating_duration_since(self.last_press) >= DEBOUNCE_WINDOW {
                        self.last_press = now;
                        self.last_level_high = false;
                        return true;
                    }
                }
            }
            DebounceMode::PassThrough => {
                if pressed {
                    return true;
                }
            }
        }

        self.last_level_high = !pressed;
        false
    }

    /// Raw "is the line low right now", bypassing the state machine.
    pub fn is_held(&mut self) -> bool {
        read_pressed(&mut self.pin)
    }

    /// Release the pin and clock.
    pub fn release(self) -> (P, C) {
        (self.pin, self.clock)
    }
}

/// Sample the line; a read failure counts as released.
fn read_pressed<P: InputPin>(pin: &mut P) -> bool {
    match pin.is_low() {
        Ok(low) => low,
        Err(_e) => {
            #[cfg(feature = "defmt")]
            defmt::warn!("button read failed; treating as released");
            false
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use core::cell::Cell;
    use core::convert::Infallible;
    use embassy_time::Duration;
    use embedded_hal::digital::{ErrorKind, ErrorType};
    use telemetry::ManualClock;

    /// Input line whose level the test controls. `true` = pressed (low).
    struct FakePin<'a> {
        pressed: &'a Cell<bool>,
    }

    impl ErrorType for FakePin<'_> {
        type Error = Infallible;
    }

    impl InputPin for FakePin<'_> {
        fn is_high(&mut self) -> Result<bool, Self::Error> {
            Ok(!self.pressed.get())
        }

        fn is_low(&mut self) -> Result<bool, Self::Error> {
            Ok(self.pressed.get())
        }
    }

    /// Input line that always fails to read.
    struct BrokenPin;

    impl ErrorType for BrokenPin {
        type Error = ErrorKind;
    }

    impl InputPin for BrokenPin {
        fn is_high(&mut self) -> Result<bool, Self::Error> {
            Err(ErrorKind::Other)
        }

        fn is_low(&mut self) -> Result<bool, Self::Error> {
            Err(ErrorKind::Other)
        }
    }

    fn ms(n: u64) -> Duration {
        Duration::from_millis(n)
    }

    fn setup<'a>(
        line: &'a Cell<bool>,
        clock: &'a ManualClock,
    ) -> Button<FakePin<'a>, &'a ManualClock> {
        Button::new(FakePin { pressed: line }, clock)
    }

    // ── Debounced mode ───────────────────────────────────────────────

    #[test]
    fn debounced_is_default() {
        let line = Cell::new(false);
        let clock = ManualClock::new(Instant::from_millis(1_000));
        let button = setup(&line, &clock);
        assert_eq!(button.debounce_mode(), DebounceMode::Debounced);
    }

    #[test]
    fn falling_edge_reports_once() {
        let line = Cell::new(false);
        let clock = ManualClock::new(Instant::from_millis(1_000));
        let mut button = setup(&line, &clock);

        assert!(!button.is_pressed());
        line.set(true);
        assert!(button.is_pressed());

        // Still held: no repeat, regardless of how long.
        for _ in 0..10 {
            clock.advance(ms(100));
            assert!(!button.is_pressed());
        }
    }

    #[test]
    fn release_rearms() {
        let line = Cell::new(false);
        let clock = ManualClock::new(Instant::from_millis(1_000));
        let mut button = setup(&line, &clock);

        line.set(true);
        assert!(button.is_pressed());

        clock.advance(ms(100));
        line.set(false);
        assert!(!button.is_pressed());

        clock.advance(ms(100));
        line.set(true);
        assert!(button.is_pressed());
    }

    #[test]
    fn bounce_inside_window_is_ignored() {
        let line = Cell::new(false);
        let clock = ManualClock::new(Instant::from_millis(1_000));
        let mut button = setup(&line, &clock);

        line.set(true);
        assert!(button.is_pressed());

        // Contact bounce: high, low again 10 ms later.
        clock.advance(ms(5));
        line.set(false);
        assert!(!button.is_pressed());
        clock.advance(ms(5));
        line.set(true);
        assert!(!button.is_pressed());

        // Held low through the end of the window: still no second press,
        // because the previous query already saw it low.
        clock.advance(ms(60));
        assert!(!button.is_pressed());
    }

    #[test]
    fn press_exactly_at_window_boundary_is_accepted() {
        let line = Cell::new(false);
        let clock = ManualClock::new(Instant::from_millis(1_000));
        let mut button = setup(&line, &clock);

        line.set(true);
        assert!(button.is_pressed());

        clock.advance(ms(20));
        line.set(false);
        assert!(!button.is_pressed());

        clock.advance(ms(29));
        line.set(true);
        assert!(!button.is_pressed()); // 49 ms since the last press

        line.set(false);
        assert!(!button.is_pressed());
        clock.advance(ms(1));
        line.set(true);
        assert!(button.is_pressed()); // exactly 50 ms
    }

    #[test]
    fn press_within_window_after_boot_is_ignored() {
        // The last-press stamp starts at the clock origin.
        let line = Cell::new(false);
        let clock = ManualClock::new(Instant::from_millis(10));
        let mut button = setup(&line, &clock);

        line.set(true);
        assert!(!button.is_pressed());
    }

    #[test]
    fn held_at_construction_needs_release() {
        let line = Cell::new(true);
        let clock = ManualClock::new(Instant::from_millis(1_000));
        let mut button = setup(&line, &clock);

        assert!(!button.is_pressed());
        line.set(false);
        assert!(!button.is_pressed());
        line.set(true);
        assert!(button.is_pressed());
    }

    // ── Pass-through mode ────────────────────────────────────────────

    #[test]
    fn pass_through_reports_every_query_while_held() {
        let line = Cell::new(false);
        let clock = ManualClock::new(Instant::from_millis(1_000));
        let mut button = setup(&line, &clock);
        button.set_debounce_mode(DebounceMode::PassThrough);

        line.set(true);
        let results = [button.is_pressed(), button.is_pressed(), button.is_pressed()];
        assert_eq!(results, [true, true, true]);

        line.set(false);
        assert!(!button.is_pressed());
    }

    #[test]
    fn pass_through_ignores_time_gate() {
        let line = Cell::new(true);
        let clock = ManualClock::new(Instant::from_millis(1));
        let mut button = setup(&line, &clock);
        button.set_debounce_mode(DebounceMode::PassThrough);

        // 1 ms after boot, well inside the window.
        assert!(button.is_pressed());
    }

    #[test]
    fn switching_back_to_debounced_requires_a_fresh_edge() {
        let line = Cell::new(false);
        let clock = ManualClock::new(Instant::from_millis(1_000));
        let mut button = setup(&line, &clock);
        button.set_debounce_mode(DebounceMode::PassThrough);

        line.set(true);
        assert!(button.is_pressed());
        assert!(button.is_pressed());

        // Pass-through never recorded the low level, so the first debounced
        // query still sees a high-to-low edge.
        button.set_debounce_mode(DebounceMode::Debounced);
        assert!(button.is_pressed());
        assert!(!button.is_pressed());
    }

    // ── Raw level and failures ───────────────────────────────────────

    #[test]
    fn is_held_does_not_consume_the_edge() {
        let line = Cell::new(false);
        let clock = ManualClock::new(Instant::from_millis(1_000));
        let mut button = setup(&line, &clock);

        line.set(true);
        assert!(button.is_held());
        assert!(button.is_held());
        assert!(button.is_pressed());
    }

    #[test]
    fn read_failure_counts_as_released() {
        let clock = ManualClock::new(Instant::from_millis(1_000));
        let mut button = Button::new(BrokenPin, &clock);
        assert!(!button.is_pressed());
        assert!(!button.is_held());

        button.set_debounce_mode(DebounceMode::PassThrough);
        assert!(!button.is_pressed());
    }
}
