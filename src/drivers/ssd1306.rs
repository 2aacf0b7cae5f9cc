//! SSD1306 128×64 OLED panel over I²C.
//!
//! Drawing goes into an in-memory [`FrameBuffer`]; [`Ssd1306::flush`]
//! pushes the whole frame to the controller in horizontal addressing mode.
//! Generic over any `embedded-hal` 1.0 I²C bus (`I2cDriver` on ESP-IDF,
//! a recording mock in tests).

use embedded_graphics::{
    Pixel,
    pixelcolor::BinaryColor,
    prelude::{DrawTarget, OriginDimensions, Size},
};
use embedded_hal::i2c::I2c;

use crate::adapters::oled::{FrameBuffer, Panel, SCREEN_HEIGHT, SCREEN_WIDTH};

const CONTROL_COMMAND: u8 = 0x00;
const CONTROL_DATA: u8 = 0x40;

/// Data bytes per I²C write (plus one control byte).
const CHUNK: usize = 16;

/// Power-on sequence for a 128×64 panel with the internal charge pump.
const INIT_SEQUENCE: &[u8] = &[
    0xAE, // display off
    0xD5, 0x80, // clock divide
    0xA8, 0x3F, // multiplex 64
    0xD3, 0x00, // display offset 0
    0x40, // start line 0
    0x8D, 0x14, // charge pump on
    0x20, 0x00, // horizontal addressing
    0xA1, // segment remap
    0xC8, // COM scan descending
    0xDA, 0x12, // COM pins
    0x81, 0xCF, // contrast
    0xD9, 0xF1, // pre-charge
    0xDB, 0x40, // VCOMH deselect
    0xA4, // resume from RAM
    0xA6, // normal (not inverted)
    0x2E, // scroll off
    0xAF, // display on
];

pub struct Ssd1306<I> {
    i2c: I,
    address: u8,
    frame: FrameBuffer,
}

impl<I: I2c> Ssd1306<I> {
    pub fn new(i2c: I, address: u8) -> Self {
        Self {
            i2c,
            address,
            frame: FrameBuffer::new(),
        }
    }

    /// Send the power-on sequence and blank the panel.
    pub fn init(&mut self) -> Result<(), I::Error> {
        for cmd in INIT_SEQUENCE {
            self.command(*cmd)?;
        }
        self.frame = FrameBuffer::new();
        self.flush()
    }

    /// Push the frame buffer to display RAM.
    pub fn flush(&mut self) -> Result<(), I::Error> {
        for cmd in [0x21, 0, (SCREEN_WIDTH - 1) as u8, 0x22, 0, (SCREEN_HEIGHT / 8 - 1) as u8] {
            self.command(cmd)?;
        }

        // Display RAM is page-major: one byte covers 8 vertical pixels.
        let mut buf = [0u8; CHUNK + 1];
        buf[0] = CONTROL_DATA;
        let mut fill = 0;
        for page in 0..SCREEN_HEIGHT / 8 {
            for x in 0..SCREEN_WIDTH {
                let mut byte = 0u8;
                for bit in 0..8 {
                    if self.frame.pixel(x, page * 8 + bit) {
                        byte |= 1 << bit;
                    }
                }
                fill += 1;
                buf[fill] = byte;
                if fill == CHUNK {
                    self.i2c.write(self.address, &buf)?;
                    fill = 0;
                }
            }
        }
        Ok(())
    }

    pub fn frame(&self) -> &FrameBuffer {
        &self.frame
    }

    pub fn release(self) -> I {
        self.i2c
    }

    fn command(&mut self, cmd: u8) -> Result<(), I::Error> {
        self.i2c.write(self.address, &[CONTROL_COMMAND, cmd])
    }
}

impl<I> OriginDimensions for Ssd1306<I> {
    fn size(&self) -> Size {
        Size::new(SCREEN_WIDTH, SCREEN_HEIGHT)
    }
}

impl<I: I2c> DrawTarget for Ssd1306<I> {
    type Color = BinaryColor;
    type Error = I::Error;

    fn draw_iter<P>(&mut self, pixels: P) -> Result<(), Self::Error>
    where
        P: IntoIterator<Item = Pixel<Self::Color>>,
    {
        let Ok(()) = self.frame.draw_iter(pixels);
        Ok(())
    }
}

impl<I: I2c> Panel for Ssd1306<I> {
    fn flush(&mut self) -> Result<(), Self::Error> {
        Ssd1306::flush(self)
    }
}
