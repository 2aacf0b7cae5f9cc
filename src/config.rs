//! System configuration parameters
//!
//! Timing policy for the diagnostic cycle.  Values are compiled-in
//! defaults; the host simulator can override them with a JSON document.

use embassy_time::Duration;
use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};

/// How the three diagnostic tasks are scheduled.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Scheduling {
    /// One thread per task (FreeRTOS task on device).
    Threaded,
    /// All tasks on a single cooperative executor thread.
    Cooperative,
}

/// Core system configuration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct DiagConfig {
    // --- Timing ---
    /// Idle time between supervisor cycles (milliseconds)
    pub cycle_period_ms: u32,
    /// Deadline for each response receive attempt (milliseconds)
    pub response_timeout_ms: u32,
    /// Deadline for acquiring the output lock (milliseconds)
    pub output_lock_timeout_ms: u32,

    // --- Protocol ---
    /// Receive attempts per cycle (one per responder)
    pub expected_responses: u8,

    // --- Boot state ---
    /// Motor speed at power-on
    pub boot_speed: u32,
    /// Motor rpm at power-on
    pub boot_rpm: u32,

    // --- Tasks ---
    pub scheduling: Scheduling,
    /// Stack per task thread (KiB)
    pub task_stack_kb: usize,
    /// Priority for all three tasks
    pub task_priority: u8,
}

impl Default for DiagConfig {
    fn default() -> Self {
        Self {
            cycle_period_ms: 1000,
            response_timeout_ms: 500,
            output_lock_timeout_ms: 100,

            expected_responses: 2,

            boot_speed: 90,
            boot_rpm: 2500,

            scheduling: Scheduling::Threaded,
            task_stack_kb: 8,
            task_priority: 1,
        }
    }
}

impl DiagConfig {
    /// Parse a (possibly partial) JSON document; missing fields take defaults.
    pub fn from_json(json: &str) -> Result<Self> {
        let config: Self =
            serde_json::from_str(json).map_err(|_| Error::Config("malformed JSON"))?;
        config.validate()?;
        Ok(config)
    }

    /// Reject values that would break the cycle timing.
    pub fn validate(&self) -> Result<()> {
        if self.cycle_period_ms == 0 {
            return Err(Error::Config("cycle_period_ms must be > 0"));
        }
        if self.response_timeout_ms == 0 {
            return Err(Error::Config("response_timeout_ms must be > 0"));
        }
        if self.output_lock_timeout_ms == 0 {
            return Err(Error::Config("output_lock_timeout_ms must be > 0"));
        }
        if self.response_timeout_ms >= self.cycle_period_ms {
            return Err(Error::Config(
                "response_timeout_ms must be shorter than cycle_period_ms",
            ));
        }
        if self.expected_responses == 0 || self.expected_responses > 2 {
            return Err(Error::Config("expected_responses must be 1 or 2"));
        }
        if self.task_stack_kb == 0 {
            return Err(Error::Config("task_stack_kb must be > 0"));
        }
        Ok(())
    }

    pub fn cycle_period(&self) -> Duration {
        Duration::from_millis(u64::from(self.cycle_period_ms))
    }

    pub fn response_timeout(&self) -> Duration {
        Duration::from_millis(u64::from(self.response_timeout_ms))
    }

    pub fn output_lock_timeout(&self) -> Duration {
        Duration::from_millis(u64::from(self.output_lock_timeout_ms))
    }
}
