//! Flight telemetry state shared by the Sprig panel crates.
//!
//! - [`telemetry_values`]: the four-field [`TelemetrySnapshot`] mirrored
//!   from the flight computer, the closed [`TelemetryField`] selector and
//!   the [`TelemetryUpdate`] hand-off type used by the link layer.
//! - [`clock`]: the monotonic [`Clock`] capability used for debounce and
//!   redraw rate limiting.
//!
//! # Crate Features
//!
//! - **`defmt`**: [`defmt::Format`] implementations for public types.
//!
//! [`TelemetrySnapshot`]: telemetry_values::TelemetrySnapshot
//! [`TelemetryField`]: telemetry_values::TelemetryField
//! [`TelemetryUpdate`]: telemetry_values::TelemetryUpdate

#![no_std]

pub mod clock;
pub mod telemetry_values;

pub use clock::{Clock, ManualClock, SystemClock};
