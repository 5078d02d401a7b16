//! SSD1306 OLED implementation of [`MenuDisplay`].
//!
//! Wraps the buffered-graphics mode of the `ssd1306` driver and keeps
//! the two pieces of draw state the UI relies on: the current draw
//! color and the active clip window. Clipping is applied per draw call
//! through `embedded-graphics`' `clipped` adapter.

use embedded_graphics::mono_font::ascii::FONT_6X12;
use embedded_graphics::mono_font::MonoTextStyle;
use embedded_graphics::pixelcolor::BinaryColor;
use embedded_graphics::prelude::*;
use embedded_graphics::primitives::{
    Line, PrimitiveStyle, Rectangle, RoundedRectangle,
};
use embedded_graphics::text::Text;
use ssd1306::mode::BufferedGraphicsMode;
use ssd1306::prelude::*;
use ssd1306::I2CDisplayInterface;
use ssd1306::Ssd1306;

use crate::config::{SCREEN_HEIGHT, SCREEN_WIDTH};
use crate::display::MenuDisplay;
use crate::error::Error;

type Driver<I2C> =
    Ssd1306<I2CInterface<I2C>, DisplaySize128x32, BufferedGraphicsMode<DisplaySize128x32>>;

/// The 128x32 panel behind the [`MenuDisplay`] trait.
pub struct Oled<I2C> {
    driver: Driver<I2C>,
    color: BinaryColor,
    clip: Rectangle,
}

fn full_screen() -> Rectangle {
    Rectangle::new(
        Point::zero(),
        Size::new(SCREEN_WIDTH as u32, SCREEN_HEIGHT as u32),
    )
}

impl<I2C> Oled<I2C>
where
    I2C: embedded_hal::i2c::I2c,
{
    /// Initialise the panel and clear the screen.
    pub fn new(i2c: I2C) -> Result<Self, Error> {
        let interface = I2CDisplayInterface::new(i2c);
        let mut driver = Ssd1306::new(interface, DisplaySize128x32, DisplayRotation::Rotate0)
            .into_buffered_graphics_mode();
        driver.init().map_err(|_| Error::Display)?;
        driver.clear_buffer();
        driver.flush().map_err(|_| Error::Display)?;

        Ok(Self {
            driver,
            color: BinaryColor::On,
            clip: full_screen(),
        })
    }

    fn style(&self) -> PrimitiveStyle<BinaryColor> {
        PrimitiveStyle::with_fill(self.color)
    }
}

impl<I2C> MenuDisplay for Oled<I2C>
where
    I2C: embedded_hal::i2c::I2c,
{
    fn clear_buffer(&mut self) {
        self.driver.clear_buffer();
    }

    fn set_draw_color(&mut self, on: bool) {
        self.color = if on { BinaryColor::On } else { BinaryColor::Off };
    }

    fn set_clip_window(&mut self, x0: i32, y0: i32, x1: i32, y1: i32) {
        let w = (x1 - x0).max(0) as u32;
        let h = (y1 - y0).max(0) as u32;
        self.clip = Rectangle::new(Point::new(x0, y0), Size::new(w, h));
    }

    fn set_max_clip_window(&mut self) {
        self.clip = full_screen();
    }

    fn draw_text(&mut self, x: i32, y: i32, text: &str) {
        let style = MonoTextStyle::new(&FONT_6X12, self.color);
        let mut target = self.driver.clipped(&self.clip);
        // Text::new positions the string by its baseline, matching the
        // row arithmetic used throughout the menu renderer.
        let _ = Text::new(text, Point::new(x, y), style).draw(&mut target);
    }

    fn draw_frame(&mut self, x: i32, y: i32, w: i32, h: i32) {
        let style = PrimitiveStyle::with_stroke(self.color, 1);
        let rect = Rectangle::new(Point::new(x, y), Size::new(w.max(0) as u32, h.max(0) as u32));
        let mut target = self.driver.clipped(&self.clip);
        let _ = rect.into_styled(style).draw(&mut target);
    }

    fn draw_box(&mut self, x: i32, y: i32, w: i32, h: i32) {
        let style = self.style();
        let rect = Rectangle::new(Point::new(x, y), Size::new(w.max(0) as u32, h.max(0) as u32));
        let mut target = self.driver.clipped(&self.clip);
        let _ = rect.into_styled(style).draw(&mut target);
    }

    fn draw_rbox(&mut self, x: i32, y: i32, w: i32, h: i32, radius: i32) {
        let style = self.style();
        let rect = Rectangle::new(Point::new(x, y), Size::new(w.max(0) as u32, h.max(0) as u32));
        let rounded = RoundedRectangle::with_equal_corners(
            rect,
            Size::new(radius.max(0) as u32, radius.max(0) as u32),
        );
        let mut target = self.driver.clipped(&self.clip);
        let _ = rounded.into_styled(style).draw(&mut target);
    }

    fn draw_vline(&mut self, x: i32, y: i32, h: i32) {
        let style = PrimitiveStyle::with_stroke(self.color, 1);
        let line = Line::new(Point::new(x, y), Point::new(x, y + h.max(1) - 1));
        let mut target = self.driver.clipped(&self.clip);
        let _ = line.into_styled(style).draw(&mut target);
    }

    fn str_width(&self, text: &str) -> i32 {
        let advance = FONT_6X12.character_size.width + FONT_6X12.character_spacing;
        text.chars().count() as i32 * advance as i32
    }

    fn flush(&mut self) {
        let _ = self.driver.flush();
    }
}
