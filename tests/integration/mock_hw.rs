//! Mock adapters for integration tests.
//!
//! Every mock shares its record through an `Arc`, so a test can keep a
//! handle after moving the adapter into the output sink or a task.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex};
use std::time::{Duration as StdDuration, Instant};

use motordiag::app::output::OutputSink;
use motordiag::app::ports::{DisplayPort, FuelSensorPort, IndicatorPort, LinePort};
use motordiag::config::DiagConfig;
use motordiag::runtime::System;

// ── Log ───────────────────────────────────────────────────────

/// Records each log line with the instant it was written.
#[derive(Clone, Default)]
pub struct RecordingLog {
    lines: Arc<Mutex<Vec<(Instant, String)>>>,
}

#[allow(dead_code)]
impl RecordingLog {
    pub fn lines(&self) -> Vec<String> {
        self.lines.lock().unwrap().iter().map(|(_, l)| l.clone()).collect()
    }

    pub fn count(&self, line: &str) -> usize {
        self.lines.lock().unwrap().iter().filter(|(_, l)| l == line).count()
    }

    pub fn contains(&self, line: &str) -> bool {
        self.count(line) > 0
    }

    /// Instants at which `line` was written, oldest first.
    pub fn times_of(&self, line: &str) -> Vec<Instant> {
        self.lines
            .lock()
            .unwrap()
            .iter()
            .filter(|(_, l)| l == line)
            .map(|(t, _)| *t)
            .collect()
    }
}

impl LinePort for RecordingLog {
    fn write_line(&mut self, line: &str) {
        self.lines.lock().unwrap().push((Instant::now(), line.to_string()));
    }
}

/// Emits a line one character at a time, pausing between characters, into
/// a shared text buffer.  Unserialised writers would interleave.
#[derive(Clone, Default)]
pub struct TrickleLog {
    text: Arc<Mutex<String>>,
}

impl TrickleLog {
    pub fn lines(&self) -> Vec<String> {
        self.text.lock().unwrap().lines().map(str::to_string).collect()
    }
}

impl LinePort for TrickleLog {
    fn write_line(&mut self, line: &str) {
        for c in line.chars().chain(std::iter::once('\n')) {
            self.text.lock().unwrap().push(c);
            std::thread::sleep(StdDuration::from_micros(50));
        }
    }
}

/// Holds the caller (and therefore the output lock) for `stall` per line.
#[derive(Clone)]
pub struct StallingLog {
    pub stall: StdDuration,
    pub inner: RecordingLog,
}

impl LinePort for StallingLog {
    fn write_line(&mut self, line: &str) {
        std::thread::sleep(self.stall);
        self.inner.write_line(line);
    }
}

// ── Display ───────────────────────────────────────────────────

/// Records every `(title, body)` update.
#[derive(Clone, Default)]
pub struct RecordingDisplay {
    frames: Arc<Mutex<Vec<(String, String)>>>,
}

#[allow(dead_code)]
impl RecordingDisplay {
    pub fn frames(&self) -> Vec<(String, String)> {
        self.frames.lock().unwrap().clone()
    }

    pub fn shown(&self, title: &str, body: &str) -> bool {
        self.frames
            .lock()
            .unwrap()
            .iter()
            .any(|(t, b)| t == title && b == body)
    }
}

impl DisplayPort for RecordingDisplay {
    fn show(&mut self, title: &str, body: &str) {
        self.frames
            .lock()
            .unwrap()
            .push((title.to_string(), body.to_string()));
    }
}

// ── Fuel sensor + indicator ───────────────────────────────────

/// Returns whatever level the test last set.
#[derive(Clone)]
pub struct MockFuelSensor {
    level: Arc<Mutex<f32>>,
}

#[allow(dead_code)]
impl MockFuelSensor {
    pub fn new(level: f32) -> Self {
        Self {
            level: Arc::new(Mutex::new(level)),
        }
    }

    pub fn set(&self, level: f32) {
        *self.level.lock().unwrap() = level;
    }
}

impl FuelSensorPort for MockFuelSensor {
    fn read_fuel_percent(&mut self) -> f32 {
        *self.level.lock().unwrap()
    }
}

#[derive(Clone, Default)]
pub struct MockIndicator {
    lit: Arc<AtomicBool>,
    history: Arc<Mutex<Vec<bool>>>,
}

#[allow(dead_code)]
impl MockIndicator {
    pub fn is_lit(&self) -> bool {
        self.lit.load(Ordering::SeqCst)
    }

    pub fn history(&self) -> Vec<bool> {
        self.history.lock().unwrap().clone()
    }
}

impl IndicatorPort for MockIndicator {
    fn set_low_fuel(&mut self, on: bool) {
        self.lit.store(on, Ordering::SeqCst);
        self.history.lock().unwrap().push(on);
    }
}

// ── Fixture ───────────────────────────────────────────────────

pub struct Rig {
    pub system: System,
    pub log: RecordingLog,
    pub display: RecordingDisplay,
    pub sensor: MockFuelSensor,
    pub indicator: MockIndicator,
}

/// A system wired to recording mocks, with a half-full tank.
pub fn rig(config: DiagConfig) -> Rig {
    let log = RecordingLog::default();
    let display = RecordingDisplay::default();
    let output = OutputSink::new(log.clone(), display.clone(), config.output_lock_timeout());
    Rig {
        system: System::new(config, output).unwrap(),
        log,
        display,
        sensor: MockFuelSensor::new(50.0),
        indicator: MockIndicator::default(),
    }
}

/// Short timings so multi-cycle tests finish quickly.
#[allow(dead_code)]
pub fn fast_config() -> DiagConfig {
    DiagConfig {
        cycle_period_ms: 200,
        response_timeout_ms: 100,
        ..DiagConfig::default()
    }
}
