//! MotorDiag firmware entry point
//!
//! ```text
//! ┌────────────────────────────────────────────────────────────────┐
//! │                      Adapters (outer ring)                     │
//! │                                                                │
//! │  FuelGauge        LedIndicator     SerialLog     OledStatus    │
//! │  (FuelSensorPort) (IndicatorPort)  (LinePort)    (DisplayPort) │
//! │                                                                │
//! │  ──────────────── Port Trait Boundary ───────────────────      │
//! │                                                                │
//! │  ┌────────────────────────────────────────────────────────┐    │
//! │  │   Supervisor ──▶ {Ventilation, Fuel} ──▶ Supervisor     │    │
//! │  │   bounded channels · shared output lock                │    │
//! │  └────────────────────────────────────────────────────────┘    │
//! │                                                                │
//! │  runtime::System (threaded or cooperative scheduling)          │
//! └────────────────────────────────────────────────────────────────┘
//! ```
#![deny(unused_must_use)]

use anyhow::Result;
use log::info;

use motordiag::adapters::indicator::LedIndicator;
use motordiag::adapters::oled::OledStatus;
use motordiag::adapters::serial_log::SerialLog;
use motordiag::app::output::OutputSink;
use motordiag::config::DiagConfig;
use motordiag::drivers::hw_init::{self, GpioPin};
use motordiag::pins;
use motordiag::runtime::System;
use motordiag::sensors::fuel_gauge::FuelGauge;

/// Host builds read a JSON configuration override from this variable.
#[cfg(not(target_os = "espidf"))]
const CONFIG_ENV: &str = "MOTORDIAG_CONFIG";

fn main() -> Result<()> {
    // ── 1. Runtime bootstrap ──────────────────────────────────
    #[cfg(target_os = "espidf")]
    {
        esp_idf_svc::sys::link_patches();
        esp_idf_logger::init()?;
    }
    #[cfg(not(target_os = "espidf"))]
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    info!("╔══════════════════════════════════════╗");
    info!("║  MotorDiag v{}                       ║", env!("CARGO_PKG_VERSION"));
    info!("╚══════════════════════════════════════╝");

    // ── 2. Configuration ──────────────────────────────────────
    let config = load_config()?;

    // ── 3. Peripherals ────────────────────────────────────────
    if let Err(e) = hw_init::init_peripherals() {
        log::error!("HAL init failed, halting: {}", e);
        halt();
    }
    let panel = match display::init() {
        Ok(p) => p,
        Err(e) => {
            log::error!("Display init failed, halting: {}", e);
            halt();
        }
    };

    // ── 4. Output sink + shared state ─────────────────────────
    let output = OutputSink::new(
        SerialLog::stdout(),
        OledStatus::new(panel),
        config.output_lock_timeout(),
    );
    let system = System::new(config, output)?;
    let config = system.config();
    info!(
        "Config: period={}ms timeout={}ms lock={}ms scheduling={:?}",
        config.cycle_period_ms,
        config.response_timeout_ms,
        config.output_lock_timeout_ms,
        config.scheduling
    );

    // ── 5. Tasks ──────────────────────────────────────────────
    let _tasks = system.start(
        FuelGauge::new(),
        LedIndicator::new(GpioPin::new(pins::FUEL_LED_GPIO)),
    )?;

    info!("System ready.");

    // ── 6. Idle ───────────────────────────────────────────────
    let mut ticks: u32 = 0;
    loop {
        std::thread::sleep(std::time::Duration::from_secs(1));
        ticks = ticks.wrapping_add(1);

        #[cfg(not(target_os = "espidf"))]
        sim::drain_tank();

        if ticks % 60 == 0 {
            info!(
                "Uptime {}s, fuel {:.1}%, dropped output writes: {}",
                ticks,
                system.subsystems().fuel_level_percent(),
                system.output().dropped_writes()
            );
        }
    }
}

#[cfg(not(target_os = "espidf"))]
fn load_config() -> Result<DiagConfig> {
    match std::env::var(CONFIG_ENV) {
        Ok(json) => {
            info!("Config: applying {} override", CONFIG_ENV);
            Ok(DiagConfig::from_json(&json)?)
        }
        Err(_) => Ok(DiagConfig::default()),
    }
}

#[cfg(target_os = "espidf")]
fn load_config() -> Result<DiagConfig> {
    let config = DiagConfig::default();
    config.validate()?;
    Ok(config)
}

fn halt() -> ! {
    loop {
        std::thread::sleep(std::time::Duration::from_secs(1));
    }
}

// ── Status panel ──────────────────────────────────────────────

#[cfg(target_os = "espidf")]
mod display {
    use esp_idf_hal::i2c::{I2cConfig, I2cDriver};
    use esp_idf_hal::peripherals::Peripherals;
    use esp_idf_hal::units::Hertz;

    use motordiag::drivers::hw_init::HwInitError;
    use motordiag::drivers::ssd1306::Ssd1306;
    use motordiag::pins;

    /// Bring up I2C0 on GPIO21/22 and power on the SSD1306.
    pub fn init() -> Result<Ssd1306<I2cDriver<'static>>, HwInitError> {
        let p = Peripherals::take().map_err(|e| HwInitError::I2cInitFailed(e.code()))?;
        let i2c = I2cDriver::new(
            p.i2c0,
            p.pins.gpio21,
            p.pins.gpio22,
            &I2cConfig::new().baudrate(Hertz(400_000)),
        )
        .map_err(|e| HwInitError::I2cInitFailed(e.code()))?;

        let mut panel = Ssd1306::new(i2c, pins::OLED_I2C_ADDR);
        panel.init().map_err(|_| HwInitError::DisplayInitFailed)?;
        log::info!(
            "Display: SSD1306 at 0x{:02X} (SDA={}, SCL={})",
            pins::OLED_I2C_ADDR,
            pins::OLED_SDA_GPIO,
            pins::OLED_SCL_GPIO
        );
        Ok(panel)
    }
}

#[cfg(not(target_os = "espidf"))]
mod display {
    use motordiag::adapters::oled::FrameBuffer;
    use motordiag::drivers::hw_init::HwInitError;

    /// The host has no panel; frames land in memory.
    pub fn init() -> Result<FrameBuffer, HwInitError> {
        Ok(FrameBuffer::new())
    }
}

// ── Host simulation ───────────────────────────────────────────

#[cfg(not(target_os = "espidf"))]
mod sim {
    use motordiag::sensors::fuel_gauge::{ADC_FULL_SCALE, sim_fuel_adc, sim_set_fuel_adc};

    /// Raw counts consumed per second (~1 %).
    const BURN_PER_TICK: u16 = 41;

    /// Burn fuel steadily; refill once the tank runs dry.
    pub fn drain_tank() {
        let raw = sim_fuel_adc();
        let next = if raw < BURN_PER_TICK {
            ADC_FULL_SCALE
        } else {
            raw - BURN_PER_TICK
        };
        sim_set_fuel_adc(next);
    }
}
