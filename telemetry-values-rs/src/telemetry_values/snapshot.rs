use super::field::TelemetryField;
use super::update::TelemetryUpdate;
use super::TELEMETRY_FIELD_COUNT;

/// Latest value of every telemetry field.
///
/// A single current snapshot, not a time series: each field is overwritten
/// independently when new data arrives and nothing is kept from before.
/// All fields start at `0.0`.
///
/// Stored values are raw. Display rules (the periapsis floor) are applied by
/// [`display_value()`](Self::display_value) and never written back.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct TelemetrySnapshot {
    /// Vertical velocity.
    pub vertical_velocity: f32,
    /// Altitude above the surface.
    pub surface_altitude: f32,
    /// Apoapsis altitude.
    pub apoapsis: f32,
    /// Periapsis altitude, unclamped.
    pub periapsis: f32,
}

impl TelemetrySnapshot {
    /// All-zero snapshot.
    pub const fn new() -> Self {
        Self {
            vertical_velocity: 0.0,
            surface_altitude: 0.0,
            apoapsis: 0.0,
            periapsis: 0.0,
        }
    }

    /// Overwrite exactly one field.
    ///
    /// # Examples
    ///
    /// ```
    /// use telemetry::telemetry_values::{TelemetryField, TelemetrySnapshot};
    ///
    /// let mut snapshot = TelemetrySnapshot::new();
    /// snapshot.set(TelemetryField::Apoapsis, 80_000.0);
    /// assert_eq!(snapshot.get(TelemetryField::Apoapsis), 80_000.0);
    /// assert_eq!(snapshot.get(TelemetryField::Periapsis), 0.0);
    /// ```
    pub fn set(&mut self, field: TelemetryField, value: f32) {
        *self.slot_mut(field) = value;
    }

    /// Stored (raw) value of a field.
    ///
    /// This is the last value written, for presentation only.
    pub fn get(&self, field: TelemetryField) -> f32 {
        match field {
            TelemetryField::VerticalVelocity => self.vertical_velocity,
            TelemetryField::SurfaceAltitude => self.surface_altitude,
            TelemetryField::Apoapsis => self.apoapsis,
            TelemetryField::Periapsis => self.periapsis,
        }
    }

    /// Apply an update from the link layer.
    pub fn apply(&mut self, update: TelemetryUpdate) {
        self.set(update.field, update.value);
    }

    /// Value as the panel shows it.
    ///
    /// Periapsis at or below zero displays as `0.0`; every other value is
    /// returned unmodified.
    ///
    /// ```
    /// use telemetry::telemetry_values::{TelemetryField, TelemetrySnapshot};
    ///
    /// let mut snapshot = TelemetrySnapshot::new();
    /// snapshot.set(TelemetryField::Periapsis, -120.5);
    /// assert_eq!(snapshot.display_value(TelemetryField::Periapsis), 0.0);
    /// assert_eq!(snapshot.get(TelemetryField::Periapsis), -120.5);
    /// ```
    pub fn display_value(&self, field: TelemetryField) -> f32 {
        let value = self.get(field);
        if field.floors_at_zero() && value <= 0.0 {
            0.0
        } else {
            value
        }
    }

    /// Raw values in display order.
    pub fn values(&self) -> [f32; TELEMETRY_FIELD_COUNT] {
        TelemetryField::ALL.map(|field| self.get(field))
    }

    fn slot_mut(&mut self, field: TelemetryField) -> &mut f32 {
        match field {
            TelemetryField::VerticalVelocity => &mut self.vertical_velocity,
            TelemetryField::SurfaceAltitude => &mut self.surface_altitude,
            TelemetryField::Apoapsis => &mut self.apoapsis,
            TelemetryField::Periapsis => &mut self.periapsis,
        }
    }
}

// ── Unit Tests ───────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;

    // ── Default state ────────────────────────────────────────────────

    #[test]
    fn default_state_is_zero() {
        let snapshot = TelemetrySnapshot::default();
        assert_eq!(snapshot, TelemetrySnapshot::new());
        assert_eq!(snapshot.values(), [0.0; TELEMETRY_FIELD_COUNT]);
    }

    // ── Read-after-write ─────────────────────────────────────────────

    #[test]
    fn read_returns_last_written_value_for_every_field() {
        for field in TelemetryField::ALL {
            for value in [-120.5_f32, 0.0, 75_000.0] {
                let mut snapshot = TelemetrySnapshot::new();
                snapshot.set(field, value);
                assert_eq!(snapshot.get(field), value, "{:?} = {}", field, value);
            }
        }
    }

    #[test]
    fn set_touches_only_the_selected_field() {
        let mut snapshot = TelemetrySnapshot::new();
        snapshot.set(TelemetryField::SurfaceAltitude, 1_234.5);

        assert_eq!(snapshot.vertical_velocity, 0.0);
        assert_eq!(snapshot.surface_altitude, 1_234.5);
        assert_eq!(snapshot.apoapsis, 0.0);
        assert_eq!(snapshot.periapsis, 0.0);
    }

    #[test]
    fn later_write_overwrites() {
        let mut snapshot = TelemetrySnapshot::new();
        snapshot.set(TelemetryField::VerticalVelocity, 10.0);
        snapshot.set(TelemetryField::VerticalVelocity, -3.25);
        assert_eq!(snapshot.get(TelemetryField::VerticalVelocity), -3.25);
    }

    #[test]
    fn apply_update() {
        let mut snapshot = TelemetrySnapshot::new();
        snapshot.apply(TelemetryUpdate::new(TelemetryField::Apoapsis, 90_000.0));
        assert_eq!(snapshot.apoapsis, 90_000.0);
    }

    #[test]
    fn values_are_in_display_order() {
        let mut snapshot = TelemetrySnapshot::new();
        snapshot.set(TelemetryField::VerticalVelocity, 1.0);
        snapshot.set(TelemetryField::SurfaceAltitude, 2.0);
        snapshot.set(TelemetryField::Apoapsis, 3.0);
        snapshot.set(TelemetryField::Periapsis, 4.0);
        assert_eq!(snapshot.values(), [1.0, 2.0, 3.0, 4.0]);
    }

    // ── Display floor ────────────────────────────────────────────────

    #[test]
    fn negative_periapsis_displays_as_zero() {
        let mut snapshot = TelemetrySnapshot::new();
        snapshot.set(TelemetryField::Periapsis, -120.5);
        assert_eq!(snapshot.display_value(TelemetryField::Periapsis), 0.0);
        // Stored value stays raw.
        assert_eq!(snapshot.periapsis, -120.5);
    }

    #[test]
    fn positive_periapsis_displays_unmodified() {
        let mut snapshot = TelemetrySnapshot::new();
        snapshot.set(TelemetryField::Periapsis, 75_000.0);
        assert_eq!(snapshot.display_value(TelemetryField::Periapsis), 75_000.0);
    }

    #[test]
    fn negative_zero_periapsis_displays_as_positive_zero() {
        let mut snapshot = TelemetrySnapshot::new();
        snapshot.set(TelemetryField::Periapsis, -0.0);
        let shown = snapshot.display_value(TelemetryField::Periapsis);
        assert_eq!(shown, 0.0);
        assert!(shown.is_sign_positive());
    }

    #[test]
    fn other_fields_are_not_floored() {
        let mut snapshot = TelemetrySnapshot::new();
        snapshot.set(TelemetryField::VerticalVelocity, -45.0);
        snapshot.set(TelemetryField::SurfaceAltitude, -1.0);
        snapshot.set(TelemetryField::Apoapsis, -600_000.0);
        assert_eq!(snapshot.display_value(TelemetryField::VerticalVelocity), -45.0);
        assert_eq!(snapshot.display_value(TelemetryField::SurfaceAltitude), -1.0);
        assert_eq!(snapshot.display_value(TelemetryField::Apoapsis), -600_000.0);
    }
}
