//! sprig-telemetry-fw
//!
//! Flight telemetry panel firmware for the Sprig (RP2040, ST7735 160×128
//! TFT, eight push buttons). Wires the three library crates into a live
//! loop:
//!
//! 1. Core 1 runs the telemetry link. Each frame carries raw
//!    `(field index, value)` pairs; valid ones are pushed onto
//!    `TELEMETRY_LINK` as `TelemetryUpdate`s. The link here is a simulated
//!    ascent profile standing in for the host connection.
//! 2. Core 0 polls the button pad, drains `TELEMETRY_LINK` into the
//!    display coordinator and calls `periodic_sync()` once per iteration.
//! 3. If no telemetry arrives for `LINK_TIMEOUT`, core 0 switches the
//!    display to its error screen and waits for the link to come back.
//!
//! Buttons: L toggles the backlight, K toggles secondary controls.

#![no_std]
#![no_main]

use core::cell::RefCell;

use defmt::*;
use embassy_embedded_hal::shared_bus::blocking::spi::SpiDevice;
use embassy_executor::Executor;
use embassy_rp::gpio::{Input, Level, Output, Pull};
use embassy_rp::multicore::{spawn_core1, Stack};
use embassy_rp::peripherals::SPI0;
use embassy_rp::spi::{self, Blocking, Spi};
use embassy_sync::blocking_mutex::raw::CriticalSectionRawMutex;
use embassy_sync::blocking_mutex::Mutex as BlockingMutex;
use embassy_sync::channel::Channel;
use embassy_time::{Delay, Duration, Instant, Timer};
use embedded_graphics::pixelcolor::Rgb565;
use embedded_graphics::prelude::*;
use embedded_graphics::primitives::Rectangle;
use st7735_lcd::{Orientation, ST7735};
use static_cell::StaticCell;
use {defmt_rtt as _, panic_probe as _};

use button_driver::{ButtonPad, PadKey, PAD_KEY_COUNT};
use telemetry::telemetry_values::{TelemetryField, TelemetryUpdate, TELEMETRY_FIELD_COUNT};
use telemetry::SystemClock;
use telemetry_display_rs::{
    Active, DisplayConfig, ErrorShown, GraphicsConsole, PanelDriver, Rotation, TelemetryDisplay,
    Uninitialized,
};

// ---------------------------------------------------------------------------
// Timing
// ---------------------------------------------------------------------------

/// Minimum time between two periodic stats redraws.
const SYNC_INTERVAL: Duration = Duration::from_millis(1_000);

/// Silence on the telemetry link after which the error screen is shown.
const LINK_TIMEOUT: Duration = Duration::from_secs(5);

/// Main loop period on core 0.
const POLL_PERIOD: Duration = Duration::from_millis(10);

/// Period of the simulated telemetry frames on core 1.
const FEED_PERIOD: Duration = Duration::from_millis(200);

// ---------------------------------------------------------------------------
// Static storage
// ---------------------------------------------------------------------------

const CORE1_STACK_SIZE: usize = 4096;

static mut CORE1_STACK: Stack<CORE1_STACK_SIZE> = Stack::new();
static EXECUTOR0: StaticCell<Executor> = StaticCell::new();
static EXECUTOR1: StaticCell<Executor> = StaticCell::new();

/// SPI0 shared by the TFT and the SD card slot.
static SPI_BUS: StaticCell<BlockingMutex<CriticalSectionRawMutex, RefCell<Spi0>>> = StaticCell::new();

/// Held for every display draw sequence, across both cores.
static DISPLAY_GUARD: BlockingMutex<CriticalSectionRawMutex, ()> = BlockingMutex::new(());

/// Telemetry updates from the link on core 1 to the display on core 0.
static TELEMETRY_LINK: Channel<CriticalSectionRawMutex, TelemetryUpdate, 16> = Channel::new();

// ---------------------------------------------------------------------------
// Type aliases
// ---------------------------------------------------------------------------

type Spi0 = Spi<'static, SPI0, Blocking>;

/// TFT device on the shared SPI0 bus, selected by its own CS line.
type TftSpi = SpiDevice<'static, CriticalSectionRawMutex, Spi0, Output<'static>>;

type SprigDisplay<S> = TelemetryDisplay<
    GraphicsConsole<SprigTft>,
    Output<'static>,
    &'static BlockingMutex<CriticalSectionRawMutex, ()>,
    SystemClock,
    S,
>;

type SprigPad = ButtonPad<Input<'static>, SystemClock>;

// ---------------------------------------------------------------------------
// ST7735 adapter
// ---------------------------------------------------------------------------

/// The Sprig's ST7735 as a [`PanelDriver`].
struct SprigTft {
    lcd: ST7735<TftSpi, Output<'static>, Output<'static>>,
    delay: Delay,
}

impl OriginDimensions for SprigTft {
    fn size(&self) -> Size {
        self.lcd.size()
    }
}

impl DrawTarget for SprigTft {
    type Color = Rgb565;
    type Error = ();

    fn draw_iter<I>(&mut self, pixels: I) -> Result<(), Self::Error>
    where
        I: IntoIterator<Item = Pixel<Self::Color>>,
    {
        self.lcd.draw_iter(pixels).map_err(|_| ())
    }

    fn fill_solid(&mut self, area: &Rectangle, color: Rgb565) -> Result<(), Self::Error> {
        self.lcd.fill_solid(area, color).map_err(|_| ())
    }

    fn clear(&mut self, color: Rgb565) -> Result<(), Self::Error> {
        self.lcd.clear(color).map_err(|_| ())
    }
}

impl PanelDriver for SprigTft {
    fn init_panel(&mut self) -> Result<(), Self::Error> {
        self.lcd.init(&mut self.delay).map_err(|_| ())
    }

    fn set_rotation(&mut self, rotation: Rotation) -> Result<(), Self::Error> {
        let orientation = match rotation {
            Rotation::Deg0 => Orientation::Portrait,
            Rotation::Deg90 => Orientation::Landscape,
            Rotation::Deg180 => Orientation::PortraitSwapped,
            Rotation::Deg270 => Orientation::LandscapeSwapped,
        };
        self.lcd.set_orientation(&orientation).map_err(|_| ())
    }
}

// ---------------------------------------------------------------------------
// Tasks
// ---------------------------------------------------------------------------

/// Simulated telemetry link: a vertical ascent with a rough apoapsis
/// estimate, sent as raw `(field index, value)` frames.
#[embassy_executor::task]
async fn telemetry_link_task() {
    info!("Telemetry link task started on core 1");

    const GRAVITY: f32 = 9.81;
    const THRUST: f32 = 14.0;
    let dt = FEED_PERIOD.as_millis() as f32 / 1_000.0;

    let mut altitude: f32 = 0.0;
    let mut velocity: f32 = 0.0;

    loop {
        velocity += (THRUST - GRAVITY) * dt;
        altitude += velocity * dt;
        let apoapsis = altitude + velocity * velocity / (2.0 * GRAVITY);
        let periapsis = apoapsis - 600_000.0;

        let frame: [(u8, f32); TELEMETRY_FIELD_COUNT] = [
            (0, velocity),
            (1, altitude),
            (2, apoapsis),
            (3, periapsis),
        ];

        for (index, value) in frame {
            match TelemetryField::try_from(index) {
                Ok(field) => TELEMETRY_LINK.send(TelemetryUpdate::new(field, value)).await,
                Err(e) => warn!("Dropping telemetry value: {}", e),
            }
        }

        Timer::after(FEED_PERIOD).await;
    }
}

/// Button pad, telemetry intake and display on core 0.
#[embassy_executor::task]
async fn panel_task(display: SprigDisplay<Uninitialized>, mut pad: SprigPad) {
    let mut display = match display.initialize() {
        Ok(active) => active,
        Err((_, e)) => {
            error!("Display initialisation failed: {}", e);
            return;
        }
    };
    info!("Display ready");

    loop {
        run_active(&mut display, &mut pad).await;

        let shown = display.show_error("Telemetry link lost");
        display = recover(shown).await;
    }
}

/// Normal operation. Returns when the telemetry link goes quiet.
async fn run_active(display: &mut SprigDisplay<Active>, pad: &mut SprigPad) {
    let mut secondary_controls = false;
    let mut last_rx = Instant::now();

    loop {
        let events = pad.poll();

        if events.contains(PadKey::L) {
            match display.toggle_backlight() {
                Ok(on) => debug!("Backlight on: {}", on),
                Err(e) => warn!("Backlight toggle failed: {}", e),
            }
        }

        if events.contains(PadKey::K) {
            secondary_controls = !secondary_controls;
            let message = if secondary_controls {
                "Secondary controls enabled"
            } else {
                "Secondary controls disabled"
            };
            if let Err(e) = display.render_stats(message, secondary_controls) {
                warn!("Stats redraw failed: {}", e);
            }
        }

        while let Ok(update) = TELEMETRY_LINK.try_receive() {
            display.apply_update(update);
            last_rx = Instant::now();
        }

        if last_rx.elapsed() >= LINK_TIMEOUT {
            warn!("No telemetry for {} ms", LINK_TIMEOUT.as_millis());
            return;
        }

        // Failures are logged by the coordinator and retried next interval.
        let _ = display.periodic_sync(SYNC_INTERVAL, secondary_controls);

        Timer::after(POLL_PERIOD).await;
    }
}

/// Wait for the link to return, then bring the display back up.
async fn recover(mut shown: SprigDisplay<ErrorShown>) -> SprigDisplay<Active> {
    let update = TELEMETRY_LINK.receive().await;
    shown.apply_update(update);
    info!("Telemetry link restored");

    loop {
        match shown.initialize() {
            Ok(active) => return active,
            Err((back, e)) => {
                error!("Display re-initialisation failed: {}", e);
                shown = back;
                shown.show_error("Display fault");
                Timer::after(SYNC_INTERVAL).await;
            }
        }
    }
}

// ---------------------------------------------------------------------------
// Main
// ---------------------------------------------------------------------------

#[cortex_m_rt::entry]
fn main() -> ! {
    let p = embassy_rp::init(Default::default());
    info!("sprig-telemetry-fw starting");

    // —— Pin assignments ————————————————————————————————————————————————————
    // SPI0 SCK   → GP18   SPI0 MOSI → GP19   SPI0 MISO → GP16
    // TFT CS     → GP20   TFT DC    → GP22   TFT RST   → GP26
    // TFT BL     → GP17
    // Buttons (pull-up, active-low):
    //   W GP5   A GP6   S GP7   D GP8   I GP12   J GP13   K GP14   L GP15
    // ———————————————————————————————————————————————————————————————————————

    let mut spi_config = spi::Config::default();
    spi_config.frequency = 16_000_000;
    let spi = Spi::new_blocking(p.SPI0, p.PIN_18, p.PIN_19, p.PIN_16, spi_config);
    let spi_bus = SPI_BUS.init(BlockingMutex::new(RefCell::new(spi)));

    let tft_cs = Output::new(p.PIN_20, Level::High);
    let tft_dc = Output::new(p.PIN_22, Level::Low);
    let tft_rst = Output::new(p.PIN_26, Level::High);
    let backlight = Output::new(p.PIN_17, Level::Low);

    // Native panel is 128×160; the coordinator rotates it to landscape.
    let lcd = ST7735::new(SpiDevice::new(spi_bus, tft_cs), tft_dc, tft_rst, true, false, 160, 128);
    let tft = SprigTft { lcd, delay: Delay };

    let display: SprigDisplay<_> = TelemetryDisplay::new(
        GraphicsConsole::new(tft),
        backlight,
        &DISPLAY_GUARD,
        SystemClock,
        DisplayConfig {
            banner: Some("Sprig telemetry"),
            ..DisplayConfig::default()
        },
    );

    let pins: [Input<'static>; PAD_KEY_COUNT] = [
        Input::new(p.PIN_5, Pull::Up),
        Input::new(p.PIN_6, Pull::Up),
        Input::new(p.PIN_7, Pull::Up),
        Input::new(p.PIN_8, Pull::Up),
        Input::new(p.PIN_12, Pull::Up),
        Input::new(p.PIN_13, Pull::Up),
        Input::new(p.PIN_14, Pull::Up),
        Input::new(p.PIN_15, Pull::Up),
    ];
    let pad = ButtonPad::new(pins, SystemClock);

    // —— Spawn ——————————————————————————————————————————————————————————————

    spawn_core1(
        p.CORE1,
        unsafe { &mut *core::ptr::addr_of_mut!(CORE1_STACK) },
        move || {
            let executor1 = EXECUTOR1.init(Executor::new());
            executor1.run(|spawner| {
                spawner.spawn(unwrap!(telemetry_link_task()));
            });
        },
    );

    let executor0 = EXECUTOR0.init(Executor::new());
    executor0.run(|spawner| {
        spawner.spawn(unwrap!(panel_task(display, pad)));
    });
}
