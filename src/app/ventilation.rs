//! Ventilation responder task.
//!
//! Idle until a request arrives, then answers with the current
//! ventilation health.  The request content is not inspected.

use std::sync::Arc;

use log::info;

use crate::error::DiagnosticFault;

use super::channels::Bus;
use super::message::{DiagnosticMessage, Subsystem};
use super::output::OutputSink;
use super::state::SharedSubsystemState;

/// Reply text when ventilation is healthy.
pub const VENTILATION_OK: &str = "Vent. Is ok";
/// Log marker for a healthy reply.
pub const MARKER_OK: &str = "Y*Y*";
/// Log marker for a fault reply.
pub const MARKER_FAULT: &str = "N*N*";

pub struct VentilationResponder {
    bus: Arc<Bus>,
    subsystems: Arc<SharedSubsystemState>,
    output: Arc<OutputSink>,
}

impl VentilationResponder {
    pub fn new(
        bus: Arc<Bus>,
        subsystems: Arc<SharedSubsystemState>,
        output: Arc<OutputSink>,
    ) -> Self {
        Self {
            bus,
            subsystems,
            output,
        }
    }

    /// Answer requests forever.
    pub async fn run(&mut self) {
        info!("Ventilation: waiting for requests");
        loop {
            let request = self.bus.ventilation.receive().await;
            self.handle(&request).await;
        }
    }

    /// Answer one request; the reply is enqueued before any output.
    pub async fn handle(&mut self, _request: &DiagnosticMessage) -> DiagnosticMessage {
        let (reply, marker) = if self.subsystems.ventilation_ok() {
            (DiagnosticMessage::ok(Subsystem::Ventilation, VENTILATION_OK), MARKER_OK)
        } else {
            (
                DiagnosticMessage::fault(Subsystem::Ventilation, DiagnosticFault::Ventilation.code()),
                MARKER_FAULT,
            )
        };

        self.bus.responses.send(reply.clone()).await;
        self.output.append_line(marker).await;
        self.output
            .show_status(Subsystem::Ventilation.display_title(), &reply.content)
            .await;
        reply
    }
}
