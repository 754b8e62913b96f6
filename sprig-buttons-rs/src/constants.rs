//! Fixed timing and layout constants.

use embassy_time::Duration;

/// Minimum time between two accepted presses on one button, in milliseconds.
pub const DEBOUNCE_WINDOW_MS: u64 = 50;

/// [`DEBOUNCE_WINDOW_MS`] as a [`Duration`].
pub const DEBOUNCE_WINDOW: Duration = Duration::from_millis(DEBOUNCE_WINDOW_MS);

/// Number of buttons on the Sprig pad.
pub const PAD_KEY_COUNT: usize = 8;
