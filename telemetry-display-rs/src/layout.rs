//! Display configuration, screen layouts and the draw sequences.
//!
//! This module defines [`DisplayConfig`], the [`StatsFrame`] text snapshot
//! and the functions that draw the three screens the coordinator shows:
//! startup, stats and error. All of them draw through [`TextPanel`] and
//! assume the caller already holds the bus guard.

use core::fmt::Write;

use embedded_graphics::{pixelcolor::Rgb565, prelude::*};
use heapless::String;
use telemetry::telemetry_values::{TelemetryField, TelemetrySnapshot, TELEMETRY_FIELD_COUNT};

use crate::driver::{Rotation, TextPanel};

/// Capacity of one formatted stats line.
pub const LINE_CAPACITY: usize = 48;

/// One formatted line of the stats screen.
pub type Line = String<LINE_CAPACITY>;

// ── Palette ──────────────────────────────────────────────────────────────

/// Colours used by the three screens.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Palette {
    /// Background of the startup and stats screens. Default: black.
    pub background: Rgb565,
    /// Text on the startup and stats screens. Default: white.
    pub text: Rgb565,
    /// Fill colour of the error screen. Default: red.
    pub alert_background: Rgb565,
    /// Text on the error screen. Default: white.
    pub alert_text: Rgb565,
}

impl Default for Palette {
    fn default() -> Self {
        Self {
            background: Rgb565::BLACK,
            text: Rgb565::WHITE,
            alert_background: Rgb565::RED,
            alert_text: Rgb565::WHITE,
        }
    }
}

// ── DisplayConfig ────────────────────────────────────────────────────────

/// Layout and appearance of the telemetry display.
///
/// [`DisplayConfig::default()`] reproduces the Sprig's look: landscape
/// (270°), white on black, text from the top-left corner, no banner.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DisplayConfig {
    /// Panel rotation applied at initialisation. Default: 270°.
    pub rotation: Rotation,
    /// Screen colours.
    pub palette: Palette,
    /// Where the first line of every screen starts. Default: (0, 0).
    pub text_origin: Point,
    /// Line printed once after initialisation. Default: none.
    pub banner: Option<&'static str>,
}

impl Default for DisplayConfig {
    fn default() -> Self {
        Self {
            rotation: Rotation::Deg270,
            palette: Palette::default(),
            text_origin: Point::zero(),
            banner: None,
        }
    }
}

// ── StatsFrame ───────────────────────────────────────────────────────────

/// Text content of one stats screen.
///
/// ```text
/// <message>
/// -12.5m/s vert velocity
/// 4520.0m above surface
/// 80210.5m Apoapsis
/// 0m Periapsis
/// Secondary ctrl: OFF
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct StatsFrame<'a> {
    /// Caller-supplied first line (blank for periodic redraws).
    pub message: &'a str,
    /// One line per field, value immediately followed by its unit label.
    pub fields: [Line; TELEMETRY_FIELD_COUNT],
    /// Secondary-controls status line.
    pub controls: Line,
}

impl<'a> StatsFrame<'a> {
    /// Format a snapshot.
    pub fn new(message: &'a str, snapshot: &TelemetrySnapshot, secondary_controls: bool) -> Self {
        Self {
            message,
            fields: TelemetryField::ALL.map(|field| field_line(snapshot, field)),
            controls: controls_line(secondary_controls),
        }
    }

    /// All lines in draw order.
    pub fn lines(&self) -> impl Iterator<Item = &str> {
        core::iter::once(self.message)
            .chain(self.fields.iter().map(|line| line.as_str()))
            .chain(core::iter::once(self.controls.as_str()))
    }
}

/// Format one field as `<value><unit label>`.
///
/// Periapsis at or below zero prints the literal `0`. Every other value
/// prints in full with a fractional part (`75000.0`, `-3.25`).
pub fn field_line(snapshot: &TelemetrySnapshot, field: TelemetryField) -> Line {
    let mut line = Line::new();
    let value = snapshot.get(field);
    // A full line never exceeds LINE_CAPACITY; overflow would only truncate.
    let _ = if field.floors_at_zero() && value <= 0.0 {
        write!(line, "0{}", field.unit_label())
    } else {
        write!(line, "{:?}{}", value, field.unit_label())
    };
    line
}

/// Format the secondary-controls status line.
pub fn controls_line(enabled: bool) -> Line {
    let mut line = Line::new();
    let _ = write!(line, "Secondary ctrl: {}", if enabled { "ON" } else { "OFF" });
    line
}

// ── Draw sequences ───────────────────────────────────────────────────────

/// Bring the panel up: init, clear, rotation, base text style, banner.
pub fn draw_startup<T: TextPanel>(panel: &mut T, config: &DisplayConfig) -> Result<(), T::Error> {
    let palette = &config.palette;
    panel.init()?;
    panel.fill_screen(palette.background)?;
    panel.set_rotation(config.rotation)?;
    panel.set_cursor(config.text_origin);
    panel.set_text_color(palette.text, palette.background);
    panel.set_text_wrap(true);
    if let Some(banner) = config.banner {
        panel.println(banner)?;
    }
    Ok(())
}

/// Clear the screen and draw a stats frame from the top.
pub fn draw_stats<T: TextPanel>(
    panel: &mut T,
    frame: &StatsFrame<'_>,
    config: &DisplayConfig,
) -> Result<(), T::Error> {
    let palette = &config.palette;
    panel.fill_screen(palette.background)?;
    panel.set_cursor(config.text_origin);
    panel.set_text_color(palette.text, palette.background);
    for line in frame.lines() {
        panel.println(line)?;
    }
    Ok(())
}

/// Flood the screen with the alert colour and print `message`.
pub fn draw_error<T: TextPanel>(
    panel: &mut T,
    message: &str,
    config: &DisplayConfig,
) -> Result<(), T::Error> {
    let palette = &config.palette;
    panel.fill_screen(palette.alert_background)?;
    panel.set_cursor(config.text_origin);
    panel.set_text_color(palette.alert_text, palette.alert_background);
    panel.println(message)
}

// ── Tests ────────────────────────────────────────────────────────────────
