//! Debounced push-button input for the Sprig.
//!
//! The crate is split into two layers:
//!
//! - **[`Button`]**: one pull-up input line behind a small time-gated state
//!   machine that reports each physical press once.
//! - **[`ButtonPad`]**: the Sprig's eight buttons (W A S D / I J K L)
//!   polled together into a [`PadEvents`] set.
//!
//! Both take an [`embedded_hal::digital::InputPin`] that the HAL has already
//! configured with a pull-up, so the idle level reads high and a press pulls
//! the line low.
//!
//! # Quick start
//!
//! ```ignore
//! use button_driver::Button;
//! use telemetry::SystemClock;
//!
//! let mut fire = Button::new(Input::new(p.PIN_5, Pull::Up), SystemClock);
//! loop {
//!     if fire.is_pressed() {
//!         // one event per physical press
//!     }
//! }
//! ```
//!
//! # Features
//!
//! - **`defmt`**: [`defmt::Format`] implementations and read-failure
//!   logging.

#![no_std]

pub use button::{Button, DebounceMode};
pub use constants::{DEBOUNCE_WINDOW, DEBOUNCE_WINDOW_MS, PAD_KEY_COUNT};
pub use pad::{ButtonPad, PadEvents, PadKey};

mod button;
mod constants;
mod pad;
