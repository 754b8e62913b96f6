use super::field::TelemetryField;

/// A single new value for one field, as delivered by the link layer.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct TelemetryUpdate {
    /// Field to overwrite.
    pub field: TelemetryField,
    /// New raw value (unclamped).
    pub value: f32,
}

impl TelemetryUpdate {
    /// Pair a field with its new value.
    pub const fn new(field: TelemetryField, value: f32) -> Self {
        Self { field, value }
    }
}
