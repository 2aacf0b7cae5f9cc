//! Unified error types for the diagnostic supervisor.
//!
//! Two families live here:
//!
//! - [`Error`] covers start-up failures (bad configuration, peripheral init,
//!   task spawn).  These are the only errors that ever propagate with `?`.
//! - [`DiagnosticFault`] is the fixed fault-code taxonomy of the monitored
//!   subsystems.  Faults are *observations*: they are written to the output
//!   sink and carried in response messages, never returned as `Err`.
//!
//! All variants are `Copy` so they can be passed between tasks freely.

use core::fmt;

use crate::drivers::hw_init::HwInitError;

// ---------------------------------------------------------------------------
// Start-up errors
// ---------------------------------------------------------------------------

/// Every fallible start-up operation funnels into this type.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Error {
    /// Configuration failed validation.
    Config(&'static str),
    /// Peripheral initialisation failed.
    Init(HwInitError),
    /// A task thread could not be created.
    Spawn(&'static str),
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Config(msg) => write!(f, "config: {msg}"),
            Self::Init(e) => write!(f, "init: {e}"),
            Self::Spawn(task) => write!(f, "spawn: could not start {task}"),
        }
    }
}

impl core::error::Error for Error {}

impl From<HwInitError> for Error {
    fn from(e: HwInitError) -> Self {
        Self::Init(e)
    }
}

// ---------------------------------------------------------------------------
// Subsystem faults
// ---------------------------------------------------------------------------

/// Faults detected by the self-check and the two responders.
///
/// Each fault has a fixed textual code that appears verbatim in the log,
/// on the display and in the `content` of fault responses.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DiagnosticFault {
    /// Motor speed or rpm is not positive.
    MotorCheck,
    /// Ventilation reported unhealthy.
    Ventilation,
    /// Fuel sample fell below the low-fuel threshold.
    LowFuel,
}

impl DiagnosticFault {
    /// The fixed fault code string.
    pub const fn code(self) -> &'static str {
        match self {
            Self::MotorCheck => "x01:Error: M.||Gb.",
            Self::Ventilation => "x02:Error: Vent",
            Self::LowFuel => "0x3: low fuel",
        }
    }
}

impl fmt::Display for DiagnosticFault {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}

// ---------------------------------------------------------------------------
// Convenience Result alias
// ---------------------------------------------------------------------------

/// Crate-wide `Result` alias.
pub type Result<T> = core::result::Result<T, Error>;
