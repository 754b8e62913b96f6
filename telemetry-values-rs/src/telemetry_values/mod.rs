//! Flight telemetry mirrored from the flight computer.
//!
//! This module provides the [`TelemetrySnapshot`] data structure that holds
//! the latest value of each telemetry field the panel displays. It is the
//! state the display coordinator owns and the link layer writes into.
//!
//! # Fields
//!
//! The snapshot has exactly four independent scalar fields, addressed by the
//! closed [`TelemetryField`] selector:
//!
//! ```text
//! index  field              unit label
//!   0    VerticalVelocity   "m/s vert velocity"
//!   1    SurfaceAltitude    "m above surface"
//!   2    Apoapsis           "m Apoapsis"
//!   3    Periapsis          "m Periapsis"
//! ```
//!
//! The numeric index is only used at the link boundary
//! ([`TelemetryField::try_from`]); everything past that boundary uses the
//! enum, so an out-of-range selector cannot reach the snapshot.
//!
//! # Presentation only
//!
//! Values reflect the last write, not a guaranteed-fresh measurement. Read
//! them for display; never drive control decisions from them.
//!
//! # `no_std` Compatibility
//!
//! No heap allocation. The optional `defmt` feature enables structured
//! logging for embedded targets.

mod error;
mod field;
mod snapshot;
mod update;

pub use error::TelemetryError;
pub use field::TelemetryField;
pub use snapshot::TelemetrySnapshot;
pub use update::TelemetryUpdate;

/// Number of telemetry fields in a snapshot.
pub const TELEMETRY_FIELD_COUNT: usize = 4;

/// Unit label printed directly after each field's value, indexed by
/// [`TelemetryField::index()`].
pub const UNIT_LABELS: [&str; TELEMETRY_FIELD_COUNT] = [
    "m/s vert velocity",
    "m above surface",
    "m Apoapsis",
    "m Periapsis",
];
