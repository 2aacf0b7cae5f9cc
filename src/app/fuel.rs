//! Fuel responder task.
//!
//! Samples the tank level once per request, drives the low-fuel warning
//! and answers with a low/good classification.

use core::fmt::Write as _;
use std::sync::Arc;

use heapless::String;
use log::{info, warn};

use crate::error::DiagnosticFault;

use super::channels::Bus;
use super::message::{DiagnosticMessage, Subsystem};
use super::output::OutputSink;
use super::ports::{FuelSensorPort, IndicatorPort};
use super::state::SharedSubsystemState;

/// Samples strictly below this level are low.
pub const LOW_FUEL_THRESHOLD_PERCENT: f32 = 10.0;

/// Reply text when the level is at or above the threshold.
pub const GOOD_FUEL: &str = "0x4: good fuel";
/// Display body when the level is low.
pub const LOW_FUEL_BANNER: &str = "Low Fuel!";
/// Log marker for a low-fuel reply.
pub const MARKER_LOW: &str = "U$U$";
/// Log marker for a good-fuel reply.
pub const MARKER_GOOD: &str = "h$h$";

/// `true` when `percent` is below [`LOW_FUEL_THRESHOLD_PERCENT`].
pub fn is_low(percent: f32) -> bool {
    percent < LOW_FUEL_THRESHOLD_PERCENT
}

/// Display body for a good reading, e.g. `"Fuel: 42.00%"`.
pub fn level_text(percent: f32) -> String<20> {
    let mut text = String::new();
    let _ = write!(text, "Fuel: {percent:.2}%");
    text
}

/// Clamp a raw sample to [0, 100].  NaN reads as empty.
fn sanitize(sample: f32) -> f32 {
    if sample.is_nan() {
        warn!("Fuel: sensor returned NaN, treating as 0%");
        return 0.0;
    }
    if !(0.0..=100.0).contains(&sample) {
        let clamped = sample.clamp(0.0, 100.0);
        warn!("Fuel: sample {sample} out of range, clamped to {clamped}");
        return clamped;
    }
    sample
}

pub struct FuelResponder<S, I> {
    bus: Arc<Bus>,
    subsystems: Arc<SharedSubsystemState>,
    output: Arc<OutputSink>,
    sensor: S,
    indicator: I,
}

impl<S: FuelSensorPort, I: IndicatorPort> FuelResponder<S, I> {
    pub fn new(
        bus: Arc<Bus>,
        subsystems: Arc<SharedSubsystemState>,
        output: Arc<OutputSink>,
        sensor: S,
        indicator: I,
    ) -> Self {
        Self {
            bus,
            subsystems,
            output,
            sensor,
            indicator,
        }
    }

    /// Answer requests forever.
    pub async fn run(&mut self) {
        info!("Fuel: waiting for requests");
        loop {
            let request = self.bus.fuel.receive().await;
            self.handle(&request).await;
        }
    }

    /// Sample, classify and answer one request.
    pub async fn handle(&mut self, _request: &DiagnosticMessage) -> DiagnosticMessage {
        let level = sanitize(self.sensor.read_fuel_percent());
        self.subsystems.record_fuel_level(level);

        let low = is_low(level);
        self.indicator.set_low_fuel(low);

        let reply = if low {
            DiagnosticMessage::fault(Subsystem::Fuel, DiagnosticFault::LowFuel.code())
        } else {
            DiagnosticMessage::ok(Subsystem::Fuel, GOOD_FUEL)
        };
        self.bus.responses.send(reply.clone()).await;

        let title = Subsystem::Fuel.display_title();
        if low {
            self.output.append_line(MARKER_LOW).await;
            self.output.show_status(title, LOW_FUEL_BANNER).await;
        } else {
            self.output.append_line(MARKER_GOOD).await;
            self.output.show_status(title, &level_text(level)).await;
        }
        reply
    }
}
