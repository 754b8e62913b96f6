use super::error::TelemetryError;
use super::{TELEMETRY_FIELD_COUNT, UNIT_LABELS};

/// Selector for one of the four telemetry fields.
///
/// The set is closed: there is no "no field" variant and no sentinel value.
/// Raw wire indices go through [`TryFrom<u8>`] exactly once, at the link
/// boundary.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum TelemetryField {
    /// Vertical speed, positive when climbing.
    VerticalVelocity,
    /// Height above the terrain directly below the vessel.
    SurfaceAltitude,
    /// Highest point of the current orbit.
    Apoapsis,
    /// Lowest point of the current orbit. Negative while sub-orbital.
    Periapsis,
}

impl TelemetryField {
    /// All fields in display order.
    pub const ALL: [TelemetryField; TELEMETRY_FIELD_COUNT] = [
        TelemetryField::VerticalVelocity,
        TelemetryField::SurfaceAltitude,
        TelemetryField::Apoapsis,
        TelemetryField::Periapsis,
    ];

    /// Wire index of this field (0–3), also its display row.
    pub const fn index(self) -> usize {
        match self {
            TelemetryField::VerticalVelocity => 0,
            TelemetryField::SurfaceAltitude => 1,
            TelemetryField::Apoapsis => 2,
            TelemetryField::Periapsis => 3,
        }
    }

    /// Unit label printed after the value, e.g. `"m Apoapsis"`.
    pub const fn unit_label(self) -> &'static str {
        UNIT_LABELS[self.index()]
    }

    /// Whether the display floors negative values of this field to zero.
    ///
    /// Only periapsis is clamped: a negative periapsis just means the orbit
    /// intersects the surface, and the panel shows that as `0`.
    pub const fn floors_at_zero(self) -> bool {
        matches!(self, TelemetryField::Periapsis)
    }
}

impl TryFrom<u8> for TelemetryField {
    type Error = TelemetryError;

    fn try_from(index: u8) -> Result<Self, Self::Error> {
        match index {
            0 => Ok(TelemetryField::VerticalVelocity),
            1 => Ok(TelemetryField::SurfaceAltitude),
            2 => Ok(TelemetryField::Apoapsis),
            3 => Ok(TelemetryField::Periapsis),
            other => Err(TelemetryError::InvalidField(other)),
        }
    }
}

impl From<TelemetryField> for u8 {
    fn from(field: TelemetryField) -> Self {
        field.index() as u8
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn wire_indices_map_to_fields() {
        for (i, field) in TelemetryField::ALL.iter().enumerate() {
            assert_eq!(TelemetryField::try_from(i as u8), Ok(*field));
            assert_eq!(u8::from(*field), i as u8);
            assert_eq!(field.index(), i);
        }
    }

    #[test]
    fn out_of_range_index_is_rejected() {
        assert_eq!(
            TelemetryField::try_from(4),
            Err(TelemetryError::InvalidField(4))
        );
        assert_eq!(
            TelemetryField::try_from(255),
            Err(TelemetryError::InvalidField(255))
        );
    }

    #[test]
    fn unit_labels() {
        assert_eq!(TelemetryField::VerticalVelocity.unit_label(), "m/s vert velocity");
        assert_eq!(TelemetryField::SurfaceAltitude.unit_label(), "m above surface");
        assert_eq!(TelemetryField::Apoapsis.unit_label(), "m Apoapsis");
        assert_eq!(TelemetryField::Periapsis.unit_label(), "m Periapsis");
    }

    #[test]
    fn only_periapsis_floors() {
        assert!(TelemetryField::Periapsis.floors_at_zero());
        assert!(!TelemetryField::VerticalVelocity.floors_at_zero());
        assert!(!TelemetryField::SurfaceAltitude.floors_at_zero());
        assert!(!TelemetryField::Apoapsis.floors_at_zero());
    }
}
