//! The telemetry display coordinator.
//!
//! [`TelemetryDisplay`] owns the telemetry snapshot, the panel, the
//! backlight line and the session state, and draws every screen inside the
//! injected [`BusGuard`]. Its lifecycle is tracked in the type:
//!
//! ```text
//! Uninitialized ──initialize()──▶ Active ──show_error()──▶ ErrorShown
//!                                   ▲                          │
//!                                   └───────initialize()───────┘
//! ```
//!
//! Drawing stats, periodic redraws and backlight toggles only exist on
//! [`Active`], so they cannot be called before the panel is up or while
//! an error screen is showing.

use core::marker::PhantomData;

use embassy_time::{Duration, Instant};
use embedded_hal::digital::OutputPin;
use telemetry::telemetry_values::{TelemetryField, TelemetrySnapshot, TelemetryUpdate};
use telemetry::Clock;

use crate::driver::TextPanel;
use crate::error::DisplayError;
use crate::guard::BusGuard;
use crate::layout::{draw_error, draw_startup, draw_stats, DisplayConfig, StatsFrame};

// ── States ───────────────────────────────────────────────────────────────

mod sealed {
    pub trait Sealed {}
}

/// Lifecycle state of a [`TelemetryDisplay`].
pub trait DisplayState: sealed::Sealed {}

/// Constructed, panel not yet brought up.
#[derive(Debug)]
pub enum Uninitialized {}

/// Panel up, stats screen in use.
#[derive(Debug)]
pub enum Active {}

/// Error screen showing. Only [`initialize()`](TelemetryDisplay::initialize)
/// leaves this state.
#[derive(Debug)]
pub enum ErrorShown {}

impl sealed::Sealed for Uninitialized {}
impl sealed::Sealed for Active {}
impl sealed::Sealed for ErrorShown {}
impl DisplayState for Uninitialized {}
impl DisplayState for Active {}
impl DisplayState for ErrorShown {}

// ── Session ──────────────────────────────────────────────────────────────

/// Backlight and redraw bookkeeping.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct DisplaySession {
    /// Whether the backlight line was last driven on.
    pub backlight_on: bool,
    /// When the last periodic redraw ran. Starts at the clock origin.
    pub last_sync: Instant,
}

impl Default for DisplaySession {
    fn default() -> Self {
        Self {
            backlight_on: false,
            last_sync: Instant::from_ticks(0),
        }
    }
}

// ── Coordinator ──────────────────────────────────────────────────────────

/// Error type of the fallible coordinator operations.
pub type CoordinatorError<T, BL> =
    DisplayError<<T as TextPanel>::Error, <BL as embedded_hal::digital::ErrorType>::Error>;

/// Telemetry display on a text panel with a switchable backlight.
///
/// * `T`: the panel ([`TextPanel`])
/// * `BL`: backlight power output line
/// * `G`: bus guard shared with the other execution context
/// * `C`: monotonic clock used for periodic redraws
/// * `S`: lifecycle state
///
/// # Example
///
/// ```no_run
/// use embassy_time::Duration;
/// use embedded_hal::digital::OutputPin;
/// use telemetry::{telemetry_values::TelemetryField, SystemClock};
/// use telemetry_display_rs::{DisplayConfig, TelemetryDisplay, TextPanel, Unshared};
///
/// # fn example<T: TextPanel, BL: OutputPin>(panel: T, backlight: BL) {
/// let display = TelemetryDisplay::new(panel, backlight, Unshared, SystemClock, DisplayConfig::default());
/// let Ok(mut display) = display.initialize() else { return };
///
/// display.update_telemetry(TelemetryField::Apoapsis, 80_000.0);
/// // Once per loop iteration; redraws at most once a second.
/// let _ = display.periodic_sync(Duration::from_secs(1), false);
/// # }
/// ```
pub struct TelemetryDisplay<T, BL, G, C, S = Uninitialized> {
    panel: T,
    backlight: BL,
    guard: G,
    clock: C,
    config: DisplayConfig,
    telemetry: TelemetrySnapshot,
    session: DisplaySession,
    _state: PhantomData<S>,
}

impl<T, BL, G, C, S: DisplayState> TelemetryDisplay<T, BL, G, C, S> {
    /// Overwrite one telemetry field. Takes effect on the next redraw.
    pub fn update_telemetry(&mut self, field: TelemetryField, value: f32) {
        self.telemetry.set(field, value);
    }

    /// Stored value of one field, exactly as last written.
    ///
    /// This is the value shown on screen, not a fresh measurement.
    pub fn read_telemetry(&self, field: TelemetryField) -> f32 {
        self.telemetry.get(field)
    }

    /// Apply an update handed over by the link layer.
    pub fn apply_update(&mut self, update: TelemetryUpdate) {
        self.telemetry.apply(update);
    }

    /// The whole snapshot.
    pub fn telemetry(&self) -> &TelemetrySnapshot {
        &self.telemetry
    }

    /// Whether the backlight was last driven on.
    pub fn backlight_on(&self) -> bool {
        self.session.backlight_on
    }

    /// Backlight and redraw bookkeeping.
    pub fn session(&self) -> &DisplaySession {
        &self.session
    }

    /// The configuration passed to [`new()`](TelemetryDisplay::new).
    pub fn config(&self) -> &DisplayConfig {
        &self.config
    }

    /// Borrow the panel.
    pub fn panel(&self) -> &T {
        &self.panel
    }

    /// Take the peripherals back.
    pub fn release(self) -> (T, BL, G, C) {
        (self.panel, self.backlight, self.guard, self.clock)
    }

    fn into_state<N: DisplayState>(self) -> TelemetryDisplay<T, BL, G, C, N> {
        TelemetryDisplay {
            panel: self.panel,
            backlight: self.backlight,
            guard: self.guard,
            clock: self.clock,
            config: self.config,
            telemetry: self.telemetry,
            session: self.session,
            _state: PhantomData,
        }
    }
}

impl<T, BL, G, C, S> TelemetryDisplay<T, BL, G, C, S>
where
    T: TextPanel,
    BL: OutputPin,
    G: BusGuard,
    C: Clock,
    S: DisplayState,
{
    /// Backlight on, then the startup sequence under the guard.
    fn bring_up(&mut self) -> Result<(), CoordinatorError<T, BL>> {
        self.backlight.set_high().map_err(DisplayError::Backlight)?;
        self.session.backlight_on = true;

        self.guard
            .exclusive(|| draw_startup(&mut self.panel, &self.config))
            .map_err(DisplayError::Panel)?;

        #[cfg(feature = "defmt")]
        defmt::info!("telemetry display initialised");
        Ok(())
    }

    /// Draw the error screen; failures are logged and dropped.
    fn take_over(&mut self, message: &str) {
        #[cfg(feature = "defmt")]
        defmt::error!("display error takeover: {=str}", message);

        let result = self
            .guard
            .exclusive(|| draw_error(&mut self.panel, message, &self.config));
        if result.is_err() {
            #[cfg(feature = "defmt")]
            defmt::warn!("error screen could not be drawn");
        }
    }

    #[allow(clippy::type_complexity)]
    fn initialize_from(
        mut self,
    ) -> Result<TelemetryDisplay<T, BL, G, C, Active>, (Self, CoordinatorError<T, BL>)> {
        match self.bring_up() {
            Ok(()) => Ok(self.into_state()),
            Err(e) => Err((self, e)),
        }
    }
}

impl<T, BL, G, C> TelemetryDisplay<T, BL, G, C, Uninitialized>
where
    T: TextPanel,
    BL: OutputPin,
    G: BusGuard,
    C: Clock,
{
    /// Take ownership of the peripherals. No I/O happens until
    /// [`initialize()`](TelemetryDisplay::initialize).
    ///
    /// # Arguments
    /// * `panel`: text panel the screens are drawn on
    /// * `backlight`: backlight power output line
    /// * `guard`: mutual exclusion shared with the other execution context
    /// * `clock`: time source for [`periodic_sync()`](TelemetryDisplay::periodic_sync)
    /// * `config`: layout and colours
    pub fn new(panel: T, backlight: BL, guard: G, clock: C, config: DisplayConfig) -> Self {
        Self {
            panel,
            backlight,
            guard,
            clock,
            config,
            telemetry: TelemetrySnapshot::new(),
            session: DisplaySession::default(),
            _state: PhantomData,
        }
    }

    /// Bring the panel up and move to [`Active`].
    ///
    /// Drives the backlight on, then, inside the guard: panel init, clear,
    /// rotation, cursor origin, base text colour, wrap on and the optional
    /// banner from [`DisplayConfig`].
    ///
    /// # Errors
    ///
    /// Gives the display back unchanged in type, together with
    /// [`DisplayError::Backlight`] or [`DisplayError::Panel`], so the caller
    /// can retry.
    #[allow(clippy::type_complexity)]
    pub fn initialize(
        self,
    ) -> Result<TelemetryDisplay<T, BL, G, C, Active>, (Self, CoordinatorError<T, BL>)> {
        self.initialize_from()
    }
}

impl<T, BL, G, C> TelemetryDisplay<T, BL, G, C, Active>
where
    T: TextPanel,
    BL: OutputPin,
    G: BusGuard,
    C: Clock,
{
    /// Flip the backlight and drive the line to match.
    ///
    /// Returns the new state. On a pin error the recorded state is left
    /// unchanged.
    pub fn toggle_backlight(&mut self) -> Result<bool, CoordinatorError<T, BL>> {
        let on = !self.session.backlight_on;
        let driven = if on {
            self.backlight.set_high()
        } else {
            self.backlight.set_low()
        };
        driven.map_err(DisplayError::Backlight)?;
        self.session.backlight_on = on;

        #[cfg(feature = "defmt")]
        defmt::debug!("backlight {=str}", if on { "on" } else { "off" });
        Ok(on)
    }

    /// Redraw the stats screen: `message`, the four fields and the
    /// secondary-controls line. The whole draw runs inside the guard.
    pub fn render_stats(
        &mut self,
        message: &str,
        secondary_controls: bool,
    ) -> Result<(), CoordinatorError<T, BL>> {
        let frame = StatsFrame::new(message, &self.telemetry, secondary_controls);
        self.guard
            .exclusive(|| draw_stats(&mut self.panel, &frame, &self.config))
            .map_err(DisplayError::Panel)
    }

    /// Redraw with a blank message if at least `interval` has passed since
    /// the last periodic redraw. Cheap otherwise; call it every iteration.
    ///
    /// Returns `Ok(true)` when a redraw ran. The redraw time is recorded
    /// even when the draw fails, so a broken bus is retried once per
    /// interval rather than on every call.
    pub fn periodic_sync(
        &mut self,
        interval: Duration,
        secondary_controls: bool,
    ) -> Result<bool, CoordinatorError<T, BL>> {
        let now = self.clock.now();
        if now.saturating_duration_since(self.session.last_sync) < interval {
            return Ok(false);
        }
        self.session.last_sync = now;

        match self.render_stats("", secondary_controls) {
            Ok(()) => Ok(true),
            Err(e) => {
                #[cfg(feature = "defmt")]
                defmt::warn!("periodic redraw failed");
                Err(e)
            }
        }
    }

    /// Take over the screen with `message` and move to [`ErrorShown`].
    ///
    /// Floods the screen with the alert colour and prints the message
    /// inside the guard, regardless of the redraw interval. Draw failures
    /// are logged and otherwise ignored.
    pub fn show_error(self, message: &str) -> TelemetryDisplay<T, BL, G, C, ErrorShown> {
        let mut shown = self.into_state::<ErrorShown>();
        shown.take_over(message);
        shown
    }
}

impl<T, BL, G, C> TelemetryDisplay<T, BL, G, C, ErrorShown>
where
    T: TextPanel,
    BL: OutputPin,
    G: BusGuard,
    C: Clock,
{
    /// Replace the error message on screen.
    pub fn show_error(&mut self, message: &str) {
        self.take_over(message);
    }

    /// Run the startup sequence again and return to [`Active`].
    ///
    /// # Errors
    ///
    /// As for the first initialisation; the display stays in
    /// [`ErrorShown`].
    #[allow(clippy::type_complexity)]
    pub fn initialize(
        self,
    ) -> Result<TelemetryDisplay<T, BL, G, C, Active>, (Self, CoordinatorError<T, BL>)> {
        self.initialize_from()
    }
}

// ── Tests ────────────────────────────────────────────────────────────────
