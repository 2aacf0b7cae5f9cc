//! Bootstrap: owns the shared resources and starts the three tasks.
//!
//! ```text
//!   System::new ──▶ Bus + shared state + output sink (Arc'd once)
//!        │
//!        ├── Threaded:    motor ─┐  ventilation ─┐  fuel ─┐   (one thread each)
//!        │                block_on        block_on       block_on
//!        │
//!        └── Cooperative: LocalExecutor { motor, ventilation, fuel } on one thread
//! ```
//!
//! Resources are created before any task starts and live for the whole
//! program; tasks never terminate.

use std::sync::Arc;
use std::thread::JoinHandle;

use futures_lite::future::block_on;
use log::info;

use crate::app::channels::Bus;
use crate::app::fuel::FuelResponder;
use crate::app::output::OutputSink;
use crate::app::ports::{FuelSensorPort, IndicatorPort};
use crate::app::state::{MotorSnapshot, SharedMotorState, SharedSubsystemState};
use crate::app::supervisor::Supervisor;
use crate::app::ventilation::VentilationResponder;
use crate::config::{DiagConfig, Scheduling};
use crate::drivers::task_pin::{Core, spawn_on_core};
use crate::error::Result;

pub struct System {
    config: DiagConfig,
    bus: Arc<Bus>,
    motor: Arc<SharedMotorState>,
    subsystems: Arc<SharedSubsystemState>,
    output: Arc<OutputSink>,
}

impl System {
    /// Validate `config` and create the channels and shared state.
    pub fn new(config: DiagConfig, output: OutputSink) -> Result<Self> {
        config.validate()?;
        let motor = SharedMotorState::new(MotorSnapshot {
            speed: config.boot_speed,
            rpm: config.boot_rpm,
        });
        Ok(Self {
            config,
            bus: Arc::new(Bus::new()),
            motor: Arc::new(motor),
            subsystems: Arc::new(SharedSubsystemState::default()),
            output: Arc::new(output),
        })
    }

    pub fn config(&self) -> &DiagConfig {
        &self.config
    }

    pub fn bus(&self) -> &Arc<Bus> {
        &self.bus
    }

    /// Handle for the external actuator that owns speed and rpm.
    pub fn motor(&self) -> &Arc<SharedMotorState> {
        &self.motor
    }

    pub fn subsystems(&self) -> &Arc<SharedSubsystemState> {
        &self.subsystems
    }

    pub fn output(&self) -> &Arc<OutputSink> {
        &self.output
    }

    // ── Task construction ─────────────────────────────────────

    pub fn supervisor(&self) -> Supervisor {
        Supervisor::new(
            &self.config,
            self.motor.clone(),
            self.bus.clone(),
            self.output.clone(),
        )
    }

    pub fn ventilation(&self) -> VentilationResponder {
        VentilationResponder::new(
            self.bus.clone(),
            self.subsystems.clone(),
            self.output.clone(),
        )
    }

    pub fn fuel<S, I>(&self, sensor: S, indicator: I) -> FuelResponder<S, I>
    where
        S: FuelSensorPort,
        I: IndicatorPort,
    {
        FuelResponder::new(
            self.bus.clone(),
            self.subsystems.clone(),
            self.output.clone(),
            sensor,
            indicator,
        )
    }

    // ── Start-up ──────────────────────────────────────────────

    /// Start all three tasks according to `config.scheduling`.
    pub fn start<S, I>(&self, sensor: S, indicator: I) -> Result<Vec<JoinHandle<()>>>
    where
        S: FuelSensorPort + Send + 'static,
        I: IndicatorPort + Send + 'static,
    {
        match self.config.scheduling {
            Scheduling::Threaded => self.start_threaded(sensor, indicator),
            Scheduling::Cooperative => Ok(vec![self.start_cooperative(sensor, indicator)?]),
        }
    }

    /// One thread per task, each driving its future with `block_on`.
    pub fn start_threaded<S, I>(&self, sensor: S, indicator: I) -> Result<Vec<JoinHandle<()>>>
    where
        S: FuelSensorPort + Send + 'static,
        I: IndicatorPort + Send + 'static,
    {
        let prio = self.config.task_priority;
        let stack = self.config.task_stack_kb;

        let mut supervisor = self.supervisor();
        let mut ventilation = self.ventilation();
        let mut fuel = self.fuel(sensor, indicator);

        let handles = vec![
            spawn_on_core(Core::App, prio, stack, "motor\0", move || {
                block_on(supervisor.run());
            })?,
            spawn_on_core(Core::App, prio, stack, "ventilation\0", move || {
                block_on(ventilation.run());
            })?,
            spawn_on_core(Core::App, prio, stack, "fuel\0", move || {
                block_on(fuel.run());
            })?,
        ];

        info!("Runtime: 3 diagnostic tasks started (threaded)");
        Ok(handles)
    }

    /// All three tasks interleaved on a single executor thread.
    pub fn start_cooperative<S, I>(&self, sensor: S, indicator: I) -> Result<JoinHandle<()>>
    where
        S: FuelSensorPort + Send + 'static,
        I: IndicatorPort + Send + 'static,
    {
        let mut supervisor = self.supervisor();
        let mut ventilation = self.ventilation();
        let mut fuel = self.fuel(sensor, indicator);

        let handle = spawn_on_core(
            Core::App,
            self.config.task_priority,
            self.config.task_stack_kb,
            "diag\0",
            move || {
                let executor: edge_executor::LocalExecutor<'_, 4> =
                    edge_executor::LocalExecutor::new();
                executor
                    .spawn(async move { supervisor.run().await })
                    .detach();
                executor
                    .spawn(async move { ventilation.run().await })
                    .detach();
                executor.spawn(async move { fuel.run().await }).detach();
                block_on(executor.run(core::future::pending::<()>()));
            },
        )?;

        info!("Runtime: 3 diagnostic tasks started (cooperative)");
        Ok(handle)
    }
}
