//! Supervisor task (motor).
//!
//! Owns the periodic diagnostic cycle:
//!
//! ```text
//!  ┌────────────┐   ┌──────────┐   ┌───────────────────────┐   ┌──────┐
//!  │ Self-check │──▶│ Fan-out  │──▶│ Collect (≤2 × 500 ms) │──▶│ Idle │──┐
//!  └────────────┘   └──────────┘   └───────────────────────┘   └──────┘  │
//!        ▲                                                               │
//!        └───────────────────────────────────────────────────────────────┘
//! ```
//!
//! Collection is best effort: a timed-out attempt is counted and skipped,
//! never retried within the cycle.  Fan-out is bounded the same way: a
//! request whose mailbox stays full for a whole response timeout is
//! dropped and counted, so a dead responder cannot wedge the cycle.  Responses are not correlated with the
//! request that produced them; whatever arrives is forwarded.

use core::fmt::Write as _;
use std::sync::Arc;

use embassy_time::{Duration, Timer};
use heapless::{String, Vec};
use log::{debug, info, warn};

use crate::config::DiagConfig;
use crate::error::DiagnosticFault;

use super::channels::Bus;
use super::message::{CONTENT_CAP, DiagnosticMessage, Subsystem};
use super::output::OutputSink;
use super::state::{MotorSnapshot, SharedMotorState};

/// Upper bound on receive attempts per cycle.
pub const MAX_RESPONSES: usize = 2;

/// Request text sent to the ventilation responder.
pub const VENTILATION_REQUEST: &str = "Checking vent.";
/// Request text sent to the fuel responder.
pub const FUEL_REQUEST: &str = "Checking fuel";

/// Outcome of one supervisor cycle (steps 1–3).
#[derive(Debug, Clone)]
pub struct CycleReport {
    /// 1-based cycle number.
    pub cycle: u64,
    pub motor_healthy: bool,
    /// Responses received, in arrival order.
    pub responses: Vec<DiagnosticMessage, MAX_RESPONSES>,
    /// Receive attempts that hit the deadline.
    pub timeouts: u8,
}

/// Cumulative counters since boot.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SupervisorStats {
    pub cycles: u64,
    pub responses: u64,
    pub timeouts: u64,
    /// Requests dropped because the responder's mailbox stayed full.
    pub requests_dropped: u64,
    /// Failed self-checks plus responses with `status == false`.
    pub faults_seen: u64,
}

/// Format the self-check line for a motor snapshot.
pub fn motor_status_line(snap: MotorSnapshot) -> String<CONTENT_CAP> {
    let mut line = String::new();
    if snap.is_running() {
        let _ = write!(line, "M.G is ok, speed={} rpm={}", snap.speed, snap.rpm);
    } else {
        let _ = line.push_str(DiagnosticFault::MotorCheck.code());
    }
    line
}

pub struct Supervisor {
    motor: Arc<SharedMotorState>,
    bus: Arc<Bus>,
    output: Arc<OutputSink>,
    response_timeout: Duration,
    cycle_period: Duration,
    expected_responses: usize,
    stats: SupervisorStats,
}

impl Supervisor {
    pub fn new(
        config: &DiagConfig,
        motor: Arc<SharedMotorState>,
        bus: Arc<Bus>,
        output: Arc<OutputSink>,
    ) -> Self {
        Self {
            motor,
            bus,
            output,
            response_timeout: config.response_timeout(),
            cycle_period: config.cycle_period(),
            expected_responses: usize::from(config.expected_responses).min(MAX_RESPONSES),
            stats: SupervisorStats::default(),
        }
    }

    /// Run forever: cycle, idle, repeat.
    pub async fn run(&mut self) {
        info!(
            "Supervisor: running (period={}ms, response timeout={}ms)",
            self.cycle_period.as_millis(),
            self.response_timeout.as_millis()
        );
        loop {
            self.run_cycle().await;
            self.idle().await;
        }
    }

    /// Self-check, fan-out and collect.
    pub async fn run_cycle(&mut self) -> CycleReport {
        self.stats.cycles += 1;

        let motor_healthy = self.self_check().await;
        self.fan_out().await;
        let (responses, timeouts) = self.collect().await;

        CycleReport {
            cycle: self.stats.cycles,
            motor_healthy,
            responses,
            timeouts,
        }
    }

    /// Fixed inter-cycle sleep, independent of how long collection took.
    pub async fn idle(&self) {
        Timer::after(self.cycle_period).await;
    }

    pub fn stats(&self) -> SupervisorStats {
        self.stats
    }

    // ── Cycle steps ───────────────────────────────────────────

    async fn self_check(&mut self) -> bool {
        self.output.append_line("Checking motor...").await;

        let snap = self.motor.snapshot();
        let healthy = snap.is_running();
        if !healthy {
            self.stats.faults_seen += 1;
        }

        let line = motor_status_line(snap);
        self.output.append_line(&line).await;
        self.output
            .show_status(Subsystem::Motor.display_title(), &line)
            .await;
        healthy
    }

    async fn fan_out(&mut self) {
        let requests = [
            (&self.bus.ventilation, Subsystem::Ventilation, VENTILATION_REQUEST),
            (&self.bus.fuel, Subsystem::Fuel, FUEL_REQUEST),
        ];
        for (mailbox, target, text) in requests {
            let msg = DiagnosticMessage::ok(Subsystem::Motor, text);
            if !mailbox.send_within(msg, self.response_timeout).await {
                self.stats.requests_dropped += 1;
                warn!(
                    "Supervisor: {} request dropped, mailbox full for {}ms",
                    target.name(),
                    self.response_timeout.as_millis()
                );
            }
        }
    }

    async fn collect(&mut self) -> (Vec<DiagnosticMessage, MAX_RESPONSES>, u8) {
        let mut responses = Vec::new();
        let mut timeouts = 0u8;

        for attempt in 0..self.expected_responses {
            match self.bus.responses.receive_within(self.response_timeout).await {
                Some(resp) => {
                    self.stats.responses += 1;
                    if !resp.status {
                        self.stats.faults_seen += 1;
                    }
                    self.output.append_line(&resp.content).await;
                    let _ = responses.push(resp);
                }
                None => {
                    timeouts += 1;
                    self.stats.timeouts += 1;
                    debug!(
                        "Supervisor: cycle {} attempt {} timed out after {}ms",
                        self.stats.cycles,
                        attempt + 1,
                        self.response_timeout.as_millis()
                    );
                }
            }
        }

        (responses, timeouts)
    }
}
