//! Error types for the telemetry display.

use core::fmt;

/// Errors reported by the peripherals the coordinator drives.
///
/// Caller mistakes (unknown field, drawing before initialisation) are not
/// represented here: the field selector is a closed enum and the
/// coordinator's state is tracked in its type.
///
/// * `P`: error type of the [`TextPanel`](crate::TextPanel) (bus failures).
/// * `B`: error type of the backlight output pin.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DisplayError<P, B> {
    /// The panel rejected a command or the bus transfer failed.
    Panel(P),
    /// The backlight power line could not be driven.
    Backlight(B),
}

impl<P: fmt::Debug, B: fmt::Debug> fmt::Display for DisplayError<P, B> {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            DisplayError::Panel(e) => write!(f, "Panel error: {:?}", e),
            DisplayError::Backlight(e) => write!(f, "Backlight error: {:?}", e),
        }
    }
}

#[cfg(feature = "defmt")]
impl<P, B> defmt::Format for DisplayError<P, B> {
    fn format(&self, f: defmt::Formatter) {
        match self {
            DisplayError::Panel(_e) => defmt::write!(f, "Panel error"),
            DisplayError::Backlight(_e) => defmt::write!(f, "Backlight error"),
        }
    }
}
