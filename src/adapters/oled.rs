//! Monochrome status display adapter.
//!
//! Renders a title line and a wrapped body on a 128×64 panel through any
//! `embedded-graphics` [`DrawTarget`].  Every update clears the panel
//! first and is flushed as a whole frame; there is no scrollback.
//!
//! ```text
//!  y=0   Motor Check
//!  y=12  M.G is ok, speed=90 r
//!  y=22  pm=2500
//! ```

use core::convert::Infallible;

use embedded_graphics::{
    Drawable, Pixel,
    mono_font::{MonoTextStyle, ascii::FONT_6X10},
    pixelcolor::BinaryColor,
    prelude::{DrawTarget, OriginDimensions, Point, Size},
    text::{Baseline, Text},
};
use heapless::String;
use log::warn;

use crate::app::message::CONTENT_CAP;
use crate::app::ports::DisplayPort;

pub const SCREEN_WIDTH: u32 = 128;
pub const SCREEN_HEIGHT: u32 = 64;

const LINE_HEIGHT: i32 = 10;
const BODY_TOP: i32 = 12;
/// Characters per row with the 6×10 font.
const COLUMNS: usize = (SCREEN_WIDTH / 6) as usize;

/// A monochrome draw target that may buffer until flushed.
pub trait Panel: DrawTarget<Color = BinaryColor> {
    /// Make everything drawn since the last flush visible.
    fn flush(&mut self) -> Result<(), Self::Error> {
        Ok(())
    }
}

pub struct OledStatus<D> {
    target: D,
    title: String<COLUMNS>,
    body: String<CONTENT_CAP>,
    failed_draws: u32,
}

impl<D: Panel> OledStatus<D> {
    pub fn new(target: D) -> Self {
        Self {
            target,
            title: String::new(),
            body: String::new(),
            failed_draws: 0,
        }
    }

    /// Title of the last update.
    pub fn title(&self) -> &str {
        &self.title
    }

    /// Body of the last update (truncated to one message's worth).
    pub fn body(&self) -> &str {
        &self.body
    }

    pub fn failed_draws(&self) -> u32 {
        self.failed_draws
    }

    pub fn target(&self) -> &D {
        &self.target
    }

    fn render(&mut self) -> Result<(), D::Error> {
        self.target.clear(BinaryColor::Off)?;
        let style = MonoTextStyle::new(&FONT_6X10, BinaryColor::On);

        Text::with_baseline(&self.title, Point::zero(), style, Baseline::Top)
            .draw(&mut self.target)?;

        let mut y = BODY_TOP;
        let mut rest = self.body.as_str();
        while !rest.is_empty() && y + LINE_HEIGHT <= SCREEN_HEIGHT as i32 {
            let split = rest
                .char_indices()
                .nth(COLUMNS)
                .map_or(rest.len(), |(i, _)| i);
            let (row, tail) = rest.split_at(split);
            Text::with_baseline(row, Point::new(0, y), style, Baseline::Top)
                .draw(&mut self.target)?;
            rest = tail;
            y += LINE_HEIGHT;
        }
        self.target.flush()
    }
}

fn copy_bounded<const N: usize>(dst: &mut String<N>, src: &str) {
    dst.clear();
    for c in src.chars() {
        if dst.push(c).is_err() {
            break;
        }
    }
}

impl<D: Panel> DisplayPort for OledStatus<D> {
    fn show(&mut self, title: &str, body: &str) {
        copy_bounded(&mut self.title, title);
        copy_bounded(&mut self.body, body);
        if self.render().is_err() {
            self.failed_draws = self.failed_draws.wrapping_add(1);
            warn!("Oled: draw failed for '{}'", title);
        }
    }
}

// ── In-memory panel ───────────────────────────────────────────

/// 1 bit-per-pixel frame buffer the size of the panel.
///
/// Serves as the draw target on the host, and as the back buffer that a
/// panel driver flushes on device.
pub struct FrameBuffer {
    bits: [u8; (SCREEN_WIDTH * SCREEN_HEIGHT / 8) as usize],
}

impl FrameBuffer {
    pub const fn new() -> Self {
        Self {
            bits: [0; (SCREEN_WIDTH * SCREEN_HEIGHT / 8) as usize],
        }
    }

    pub fn pixel(&self, x: u32, y: u32) -> bool {
        if x >= SCREEN_WIDTH || y >= SCREEN_HEIGHT {
            return false;
        }
        let idx = (y * SCREEN_WIDTH + x) as usize;
        self.bits[idx / 8] & (1 << (idx % 8)) != 0
    }

    /// Number of lit pixels.
    pub fn lit(&self) -> u32 {
        self.bits.iter().map(|b| b.count_ones()).sum()
    }

    /// True if any pixel in rows `[top, bottom)` is lit.
    pub fn rows_lit(&self, top: u32, bottom: u32) -> bool {
        (top..bottom.min(SCREEN_HEIGHT)).any(|y| (0..SCREEN_WIDTH).any(|x| self.pixel(x, y)))
    }
}

impl Default for FrameBuffer {
    fn default() -> Self {
        Self::new()
    }
}

impl Panel for FrameBuffer {}

impl OriginDimensions for FrameBuffer {
    fn size(&self) -> Size {
        Size::new(SCREEN_WIDTH, SCREEN_HEIGHT)
    }
}

impl DrawTarget for FrameBuffer {
    type Color = BinaryColor;
    type Error = Infallible;

    fn draw_iter<I>(&mut self, pixels: I) -> Result<(), Self::Error>
    where
        I: IntoIterator<Item = Pixel<Self::Color>>,
    {
        for Pixel(point, color) in pixels {
            let (Ok(x), Ok(y)) = (u32::try_from(point.x), u32::try_from(point.y)) else {
                continue;
            };
            if x >= SCREEN_WIDTH || y >= SCREEN_HEIGHT {
                continue;
            }
            let idx = (y * SCREEN_WIDTH + x) as usize;
            match color {
                BinaryColor::On => self.bits[idx / 8] |= 1 << (idx % 8),
                BinaryColor::Off => self.bits[idx / 8] &= !(1 << (idx % 8)),
            }
        }
        Ok(())
    }
}
