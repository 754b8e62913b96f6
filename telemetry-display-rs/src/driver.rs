//! Panel capabilities and the `embedded-graphics` text console.
//!
//! The coordinator draws through [`TextPanel`], a cursor-and-print
//! interface. [`GraphicsConsole`] implements it on top of any
//! [`PanelDriver`]: an `embedded-graphics` [`DrawTarget`] that can also run
//! its hardware init sequence and change rotation (an ST7735 driver, for
//! example).

use embedded_graphics::{
    mono_font::{ascii::FONT_6X10, MonoFont, MonoTextStyle, MonoTextStyleBuilder},
    pixelcolor::Rgb565,
    prelude::*,
    text::{Baseline, Text},
};

/// Monospace font used for every line of text.
const FONT: &MonoFont<'static> = &FONT_6X10;

/// Panel rotation in quarter turns.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Rotation {
    /// Native portrait orientation.
    Deg0,
    /// Landscape, rotated 90°.
    Deg90,
    /// Portrait, upside down.
    Deg180,
    /// Landscape, rotated 270°. The Sprig's natural orientation.
    #[default]
    Deg270,
}

impl Rotation {
    /// Rotation from a quarter-turn count, wrapping at four.
    pub const fn from_quarter_turns(turns: u8) -> Self {
        match turns % 4 {
            0 => Rotation::Deg0,
            1 => Rotation::Deg90,
            2 => Rotation::Deg180,
            _ => Rotation::Deg270,
        }
    }

    /// `true` for the two landscape rotations.
    pub const fn is_landscape(self) -> bool {
        matches!(self, Rotation::Deg90 | Rotation::Deg270)
    }
}

/// A colour TFT driver: an `embedded-graphics` target plus hardware control.
pub trait PanelDriver: DrawTarget<Color = Rgb565> {
    /// Send the controller's power-up/initialisation sequence.
    fn init_panel(&mut self) -> Result<(), Self::Error>;

    /// Change the scan direction so drawing appears in `rotation`.
    fn set_rotation(&mut self, rotation: Rotation) -> Result<(), Self::Error>;
}

/// Text-oriented display capability the coordinator draws through.
///
/// Mirrors what a small TFT library offers: fill, cursor, colour, wrap and
/// print. Every method that touches the bus is fallible.
pub trait TextPanel {
    /// Bus or controller error.
    type Error;

    /// Run the panel's hardware initialisation.
    fn init(&mut self) -> Result<(), Self::Error>;

    /// Set panel rotation.
    fn set_rotation(&mut self, rotation: Rotation) -> Result<(), Self::Error>;

    /// Fill the whole screen with one colour.
    fn fill_screen(&mut self, color: Rgb565) -> Result<(), Self::Error>;

    /// Move the text cursor (top-left of the next character cell).
    fn set_cursor(&mut self, position: Point);

    /// Colours for subsequent text.
    fn set_text_color(&mut self, foreground: Rgb565, background: Rgb565);

    /// Whether text continues on the next line at the right edge.
    fn set_text_wrap(&mut self, wrap: bool);

    /// Print text at the cursor. `'\n'` starts a new line.
    fn print(&mut self, text: &str) -> Result<(), Self::Error>;

    /// Print text followed by a newline.
    fn println(&mut self, text: &str) -> Result<(), Self::Error> {
        self.print(text)?;
        self.print("\n")
    }
}

/// [`TextPanel`] implemented on an `embedded-graphics` [`PanelDriver`].
///
/// Tracks a text cursor in pixels and draws each run of characters with
/// [`FONT_6X10`] using the configured foreground and background colours.
///
/// # Example
///
/// ```no_run
/// use embedded_graphics::pixelcolor::Rgb565;
/// use embedded_graphics::prelude::*;
/// use telemetry_display_rs::{GraphicsConsole, PanelDriver, TextPanel};
///
/// # fn example<D: PanelDriver>(tft: D) -> Result<(), D::Error> {
/// let mut console = GraphicsConsole::new(tft);
/// console.init()?;
/// console.fill_screen(Rgb565::BLACK)?;
/// console.set_text_color(Rgb565::WHITE, Rgb565::BLACK);
/// console.println("Hello")?;
/// # Ok(())
/// # }
/// ```
pub struct GraphicsConsole<D> {
    target: D,
    cursor: Point,
    style: MonoTextStyle<'static, Rgb565>,
    wrap: bool,
}

impl<D> GraphicsConsole<D>
where
    D: PanelDriver,
{
    /// Wrap a driver. Cursor at the origin, white on black, wrapping on.
    ///
    /// No bus traffic is generated; call [`init()`](TextPanel::init) first.
    pub fn new(target: D) -> Self {
        Self {
            target,
            cursor: Point::zero(),
            style: text_style(Rgb565::WHITE, Rgb565::BLACK),
            wrap: true,
        }
    }

    /// Current cursor position in pixels.
    pub fn cursor(&self) -> Point {
        self.cursor
    }

    /// Borrow the underlying driver.
    pub fn target(&self) -> &D {
        &self.target
    }

    /// Mutable access to the underlying driver, for direct
    /// `embedded-graphics` drawing.
    pub fn target_mut(&mut self) -> &mut D {
        &mut self.target
    }

    /// Give the driver back.
    pub fn release(self) -> D {
        self.target
    }

    fn advance(&self) -> i32 {
        (FONT.character_size.width + FONT.character_spacing) as i32
    }

    fn newline(&mut self) {
        self.cursor.x = 0;
        self.cursor.y += FONT.character_size.height as i32;
    }

    /// Draw one line's worth of text (no `'\n'`), wrapping at the right edge.
    fn draw_run(&mut self, mut run: &str) -> Result<(), D::Error> {
        let width = self.target.bounding_box().size.width as i32;
        let advance = self.advance();

        while !run.is_empty() {
            let columns = if self.wrap {
                let free = (width - self.cursor.x) / advance;
                if free <= 0 {
                    if self.cursor.x > 0 {
                        self.newline();
                        continue;
                    }
                    // Narrower than one glyph: draw a character per line.
                    1
                } else {
                    free as usize
                }
            } else {
                usize::MAX
            };

            let split = run
                .char_indices()
                .nth(columns)
                .map(|(i, _)| i)
                .unwrap_or(run.len());
            let (head, tail) = run.split_at(split);

            Text::with_baseline(head, self.cursor, self.style, Baseline::Top)
                .draw(&mut self.target)?;
            self.cursor.x += head.chars().count() as i32 * advance;

            run = tail;
            if !run.is_empty() {
                self.newline();
            }
        }
        Ok(())
    }
}

impl<D> TextPanel for GraphicsConsole<D>
where
    D: PanelDriver,
{
    type Error = D::Error;

    fn init(&mut self) -> Result<(), Self::Error> {
        self.target.init_panel()
    }

    fn set_rotation(&mut self, rotation: Rotation) -> Result<(), Self::Error> {
        self.target.set_rotation(rotation)
    }

    fn fill_screen(&mut self, color: Rgb565) -> Result<(), Self::Error> {
        self.target.clear(color)
    }

    fn set_cursor(&mut self, position: Point) {
        self.cursor = position;
    }

    fn set_text_color(&mut self, foreground: Rgb565, background: Rgb565) {
        self.style = text_style(foreground, background);
    }

    fn set_text_wrap(&mut self, wrap: bool) {
        self.wrap = wrap;
    }

    fn print(&mut self, text: &str) -> Result<(), Self::Error> {
        let mut lines = text.split('\n');
        if let Some(first) = lines.next() {
            self.draw_run(first)?;
        }
        for line in lines {
            self.newline();
            self.draw_run(line)?;
        }
        Ok(())
    }
}

fn text_style(foreground: Rgb565, background: Rgb565) -> MonoTextStyle<'static, Rgb565> {
    MonoTextStyleBuilder::new()
        .font(FONT)
        .text_color(foreground)
        .background_color(background)
        .build()
}

// ── Tests ────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;
    use core::convert::Infallible;

    /// 160×128 target that counts pixels instead of storing them.
    struct FakeTft {
        pixels: usize,
        out_of_bounds: usize,
        fills: usize,
        last_fill: Option<Rgb565>,
        inits: usize,
        rotation: Option<Rotation>,
    }

    impl FakeTft {
        fn new() -> Self {
            Self {
                pixels: 0,
                out_of_bounds: 0,
                fills: 0,
                last_fill: None,
                inits: 0,
                rotation: None,
            }
        }
    }

    impl OriginDimensions for FakeTft {
        fn size(&self) -> Size {
            Size::new(160, 128)
        }
    }

    impl DrawTarget for FakeTft {
        type Color = Rgb565;
        type Error = Infallible;

        fn draw_iter<I>(&mut self, pixels: I) -> Result<(), Self::Error>
        where
            I: IntoIterator<Item = Pixel<Self::Color>>,
        {
            let area = self.bounding_box();
            for Pixel(point, _) in pixels {
                if area.contains(point) {
                    self.pixels += 1;
                } else {
                    self.out_of_bounds += 1;
                }
            }
            Ok(())
        }

        fn clear(&mut self, color: Self::Color) -> Result<(), Self::Error> {
            self.fills += 1;
            self.last_fill = Some(color);
            Ok(())
        }
    }

    impl PanelDriver for FakeTft {
        fn init_panel(&mut self) -> Result<(), Self::Error> {
            self.inits += 1;
            Ok(())
        }

        fn set_rotation(&mut self, rotation: Rotation) -> Result<(), Self::Error> {
            self.rotation = Some(rotation);
            Ok(())
        }
    }

    #[test]
    fn rotation_from_quarter_turns() {
        assert_eq!(Rotation::from_quarter_turns(0), Rotation::Deg0);
        assert_eq!(Rotation::from_quarter_turns(3), Rotation::Deg270);
        assert_eq!(Rotation::from_quarter_turns(5), Rotation::Deg90);
        assert!(Rotation::Deg270.is_landscape());
        assert!(!Rotation::Deg180.is_landscape());
        assert_eq!(Rotation::default(), Rotation::Deg270);
    }

    #[test]
    fn hardware_calls_pass_through() {
        let mut console = GraphicsConsole::new(FakeTft::new());
        console.init().unwrap();
        console.set_rotation(Rotation::Deg90).unwrap();
        console.fill_screen(Rgb565::RED).unwrap();

        let tft = console.target();
        assert_eq!(tft.inits, 1);
        assert_eq!(tft.rotation, Some(Rotation::Deg90));
        assert_eq!(tft.fills, 1);
        assert_eq!(tft.last_fill, Some(Rgb565::RED));
    }

    #[test]
    fn print_advances_cursor_by_glyph_width() {
        let mut console = GraphicsConsole::new(FakeTft::new());
        console.print("abc").unwrap();
        assert_eq!(console.cursor(), Point::new(18, 0));
        assert!(console.target().pixels > 0);
        assert_eq!(console.target().out_of_bounds, 0);
    }

    #[test]
    fn println_moves_to_next_line() {
        let mut console = GraphicsConsole::new(FakeTft::new());
        console.println("abc").unwrap();
        assert_eq!(console.cursor(), Point::new(0, 10));
        console.println("").unwrap();
        assert_eq!(console.cursor(), Point::new(0, 20));
    }

    #[test]
    fn embedded_newlines_start_new_lines() {
        let mut console = GraphicsConsole::new(FakeTft::new());
        console.print("ab\ncd").unwrap();
        assert_eq!(console.cursor(), Point::new(12, 10));
    }

    #[test]
    fn long_text_wraps_at_right_edge() {
        let mut console = GraphicsConsole::new(FakeTft::new());
        // 160 px / 6 px = 26 columns.
        console.print("ABCDEFGHIJKLMNOPQRSTUVWXYZ1234").unwrap();
        assert_eq!(console.cursor(), Point::new(4 * 6, 10));
        assert_eq!(console.target().out_of_bounds, 0);
    }

    #[test]
    fn wrap_continues_from_mid_line_cursor() {
        let mut console = GraphicsConsole::new(FakeTft::new());
        console.set_cursor(Point::new(150, 0));
        console.print("xyz").unwrap();
        // One column left at x=150, then a new line for "yz".
        assert_eq!(console.cursor(), Point::new(12, 10));
    }

    #[test]
    fn wrap_disabled_keeps_one_line() {
        let mut console = GraphicsConsole::new(FakeTft::new());
        console.set_text_wrap(false);
        console.print("ABCDEFGHIJKLMNOPQRSTUVWXYZ1234").unwrap();
        assert_eq!(console.cursor(), Point::new(30 * 6, 0));
        assert!(console.target().out_of_bounds > 0);
    }

    #[test]
    fn cursor_past_edge_wraps_before_drawing() {
        let mut console = GraphicsConsole::new(FakeTft::new());
        console.set_cursor(Point::new(158, 0));
        console.print("a").unwrap();
        assert_eq!(console.cursor(), Point::new(6, 10));
        assert_eq!(console.target().out_of_bounds, 0);
    }
}
