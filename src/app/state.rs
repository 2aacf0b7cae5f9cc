//! Shared subsystem state.
//!
//! Each cell is created once at boot, wrapped in an `Arc`, and handed to
//! the tasks that touch it.  Multi-field values are copied in and out
//! under a short-held blocking mutex, so a reader always sees a consistent
//! snapshot even while an external task is writing.

use core::cell::Cell;
use core::sync::atomic::{AtomicBool, Ordering};

use embassy_sync::blocking_mutex::Mutex;
use embassy_sync::blocking_mutex::raw::CriticalSectionRawMutex;

/// A point-in-time copy of the motor parameters.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct MotorSnapshot {
    pub speed: u32,
    pub rpm: u32,
}

impl MotorSnapshot {
    /// Healthy when both speed and rpm are positive.
    pub fn is_running(&self) -> bool {
        self.speed > 0 && self.rpm > 0
    }
}

/// Motor parameters held by the supervisor.
///
/// Read by the supervisor's self-check; written by an external actuator
/// task (not part of the diagnostic core) or by tests.
pub struct SharedMotorState {
    inner: Mutex<CriticalSectionRawMutex, Cell<MotorSnapshot>>,
}

impl SharedMotorState {
    pub fn new(initial: MotorSnapshot) -> Self {
        Self {
            inner: Mutex::new(Cell::new(initial)),
        }
    }

    pub fn snapshot(&self) -> MotorSnapshot {
        self.inner.lock(Cell::get)
    }

    pub fn set(&self, speed: u32, rpm: u32) {
        self.inner.lock(|c| c.set(MotorSnapshot { speed, rpm }));
    }
}

/// State of the two dependent subsystems.
pub struct SharedSubsystemState {
    /// Set externally, read by the ventilation responder.
    ventilation_ok: AtomicBool,
    /// Written only by the fuel responder, after every sample.
    fuel_level_percent: Mutex<CriticalSectionRawMutex, Cell<f32>>,
}

impl SharedSubsystemState {
    pub fn new(ventilation_ok: bool, fuel_level_percent: f32) -> Self {
        Self {
            ventilation_ok: AtomicBool::new(ventilation_ok),
            fuel_level_percent: Mutex::new(Cell::new(fuel_level_percent)),
        }
    }

    pub fn ventilation_ok(&self) -> bool {
        self.ventilation_ok.load(Ordering::Acquire)
    }

    pub fn set_ventilation_ok(&self, ok: bool) {
        self.ventilation_ok.store(ok, Ordering::Release);
    }

    pub fn fuel_level_percent(&self) -> f32 {
        self.fuel_level_percent.lock(Cell::get)
    }

    pub(crate) fn record_fuel_level(&self, percent: f32) {
        self.fuel_level_percent.lock(|c| c.set(percent));
    }
}

impl Default for SharedSubsystemState {
    /// Ventilation healthy, tank half full.
    fn default() -> Self {
        Self::new(true, 50.0)
    }
}
