use core::fmt;

/// Errors raised at the link boundary when raw selectors are converted.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum TelemetryError {
    /// Wire field index is out of range (must be < [`TELEMETRY_FIELD_COUNT`](super::TELEMETRY_FIELD_COUNT)).
    InvalidField(u8),
}

impl fmt::Display for TelemetryError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            TelemetryError::InvalidField(index) => {
                write!(f, "Invalid telemetry field index {} (must be 0-3)", index)
            }
        }
    }
}
