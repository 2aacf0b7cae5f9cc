//! Port traits: the hexagonal boundary between the diagnostic core and the outside world.
//!
//! ```text
//!   Adapter ──▶ Port trait ──▶ Supervisor / Responders (domain)
//! ```
//!
//! Driven adapters (fuel sensor, warning LED, console log, status display)
//! implement these traits.  The tasks receive them at construction, so the
//! core never touches hardware directly and tests can substitute fakes.

// ───────────────────────────────────────────────────────────────
// Sensor port (driven adapter: hardware → domain)
// ───────────────────────────────────────────────────────────────

/// Read-side port for the fuel level sensor.
pub trait FuelSensorPort {
    /// Sample the tank level as a percentage in [0, 100].
    fn read_fuel_percent(&mut self) -> f32;
}

// ───────────────────────────────────────────────────────────────
// Indicator port (driven adapter: domain → hardware)
// ───────────────────────────────────────────────────────────────

/// Write-side port for the low-fuel warning indicator.
pub trait IndicatorPort {
    /// Assert (`true`) or clear (`false`) the low-fuel warning.
    fn set_low_fuel(&mut self, on: bool);
}

// ───────────────────────────────────────────────────────────────
// Output ports (driven adapters: domain → presentation)
// ───────────────────────────────────────────────────────────────

/// Line-oriented text log (serial console).
///
/// Implementations must emit the whole line in one go; the caller already
/// holds the output lock, so no other task can write in between.
pub trait LinePort {
    fn write_line(&mut self, line: &str);
}

/// Small status display.  Each call replaces the full content; there is
/// no history.
pub trait DisplayPort {
    fn show(&mut self, title: &str, body: &str);
}
