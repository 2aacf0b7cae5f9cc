//! Serial console log adapter.
//!
//! Implements [`LinePort`] over any [`std::io::Write`]: stdout on the host,
//! the UART console on device (ESP-IDF routes stdout there).  Each line
//! goes out in a single `write_all` followed by a flush.

use std::io::Write;

use log::warn;

use crate::app::ports::LinePort;

pub struct SerialLog<W: Write> {
    out: W,
    buf: Vec<u8>,
    lines: u32,
}

impl<W: Write> SerialLog<W> {
    pub fn new(out: W) -> Self {
        Self {
            out,
            buf: Vec::with_capacity(64),
            lines: 0,
        }
    }

    /// Lines successfully written since construction.
    pub fn lines_written(&self) -> u32 {
        self.lines
    }

    pub fn into_inner(self) -> W {
        self.out
    }
}

impl SerialLog<std::io::Stdout> {
    pub fn stdout() -> Self {
        Self::new(std::io::stdout())
    }
}

impl<W: Write> LinePort for SerialLog<W> {
    fn write_line(&mut self, line: &str) {
        self.buf.clear();
        self.buf.extend_from_slice(line.as_bytes());
        self.buf.push(b'\n');

        match self.out.write_all(&self.buf).and_then(|()| self.out.flush()) {
            Ok(()) => self.lines = self.lines.wrapping_add(1),
            Err(e) => warn!("SerialLog: write failed: {}", e),
        }
    }
}
