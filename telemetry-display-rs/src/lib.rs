//! Flight telemetry display for a small colour TFT.
//!
//! This crate provides [`TelemetryDisplay`], a coordinator that owns the
//! current [`TelemetrySnapshot`], powers the panel up, redraws the stats
//! screen at a bounded rate and takes the screen over for fatal errors.
//! Every draw sequence runs inside a [`BusGuard`], so the panel can share
//! its bus with a second core.
//!
//! The panel is reached through [`TextPanel`]. [`GraphicsConsole`]
//! implements it for any `embedded-graphics` target that also implements
//! [`PanelDriver`] (an ST7735 driver, for example).
//!
//! # Quick Start
//!
//! ```ignore
//! use embassy_sync::blocking_mutex::{raw::CriticalSectionRawMutex, Mutex};
//! use embassy_time::Duration;
//! use telemetry::SystemClock;
//! use telemetry_display_rs::{DisplayConfig, GraphicsConsole, TelemetryDisplay};
//!
//! static DISPLAY_BUS: Mutex<CriticalSectionRawMutex, ()> = Mutex::new(());
//!
//! let panel = GraphicsConsole::new(tft);
//! let display = TelemetryDisplay::new(panel, backlight, &DISPLAY_BUS, SystemClock, DisplayConfig::default());
//! let mut display = display.initialize().map_err(|(_, e)| e)?;
//!
//! loop {
//!     display.periodic_sync(Duration::from_secs(1), secondary_controls)?;
//! }
//! ```
//!
//! # Crate Features
//!
//! - **`defmt`**: structured logging via [`defmt`] and `defmt::Format`
//!   for the public types.
//!
//! [`TelemetrySnapshot`]: telemetry::telemetry_values::TelemetrySnapshot

#![no_std]

pub mod coordinator;
pub mod driver;
pub mod error;
pub mod guard;
pub mod layout;

// ── Re-exports for convenience ───────────────────────────────────────────

pub use coordinator::{
    Active, CoordinatorError, DisplaySession, DisplayState, ErrorShown, TelemetryDisplay,
    Uninitialized,
};
pub use driver::{GraphicsConsole, PanelDriver, Rotation, TextPanel};
pub use error::DisplayError;
pub use guard::{BusGuard, Unshared};
pub use layout::{DisplayConfig, Palette, StatsFrame};
