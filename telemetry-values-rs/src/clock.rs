//! Monotonic clock capability.
//!
//! Components that compare elapsed time (button debounce, periodic redraw)
//! take a [`Clock`] instead of calling [`Instant::now()`] directly, so the
//! same code runs against the embassy time driver on hardware and against a
//! [`ManualClock`] in host tests and simulators.

use core::cell::Cell;

use embassy_time::{Duration, Instant};

/// Source of monotonic timestamps.
pub trait Clock {
    /// Current monotonic time.
    fn now(&self) -> Instant;
}

impl<C: Clock + ?Sized> Clock for &C {
    fn now(&self) -> Instant {
        (**self).now()
    }
}

/// Clock backed by the embassy time driver.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    #[inline]
    fn now(&self) -> Instant {
        Instant::now()
    }
}

/// Clock that only moves when told to.
///
/// Interior mutability lets several components share one `&ManualClock`
/// while the test (or simulator) advances it between calls.
///
/// ```
/// use embassy_time::{Duration, Instant};
/// use telemetry::{Clock, ManualClock};
///
/// let clock = ManualClock::new(Instant::from_millis(1_000));
/// clock.advance(Duration::from_millis(50));
/// assert_eq!(clock.now(), Instant::from_millis(1_050));
/// ```
#[derive(Debug)]
pub struct ManualClock {
    now: Cell<Instant>,
}

impl ManualClock {
    /// Create a clock frozen at `start`.
    pub const fn new(start: Instant) -> Self {
        Self {
            now: Cell::new(start),
        }
    }

    /// Move the clock forward by `by`.
    pub fn advance(&self, by: Duration) {
        self.now.set(self.now.get() + by);
    }

    /// Jump to an absolute time. Callers keep it monotonic.
    pub fn set(&self, at: Instant) {
        self.now.set(at);
    }
}

impl Default for ManualClock {
    fn default() -> Self {
        Self::new(Instant::from_ticks(0))
    }
}

impl Clock for ManualClock {
    fn now(&self) -> Instant {
        self.now.get()
    }
}
