//! Fuel level potentiometer driver.
//!
//! The tank float drives a potentiometer wired to ADC1.  A 12-bit sample
//! maps linearly onto 0–100 %.
//!
//! ## Dual-target design
//!
//! On ESP-IDF: reads ADC1_CH4 via the oneshot API (initialised by hw_init).
//! On host/test: reads from a static `AtomicU16` for injection.

use core::sync::atomic::{AtomicU16, Ordering};

#[cfg(target_os = "espidf")]
use crate::drivers::hw_init;
#[cfg(target_os = "espidf")]
use crate::pins;

use crate::app::ports::FuelSensorPort;

/// Full-scale reading of the 12-bit ADC.
pub const ADC_FULL_SCALE: u16 = 4095;

/// Boots at half a tank.
static SIM_FUEL_ADC: AtomicU16 = AtomicU16::new(ADC_FULL_SCALE / 2);

#[cfg(not(target_os = "espidf"))]
pub fn sim_set_fuel_adc(raw: u16) {
    SIM_FUEL_ADC.store(raw.min(ADC_FULL_SCALE), Ordering::Relaxed);
}

#[cfg(not(target_os = "espidf"))]
pub fn sim_fuel_adc() -> u16 {
    SIM_FUEL_ADC.load(Ordering::Relaxed)
}

/// Convert a raw 12-bit sample into a fuel percentage in [0, 100].
pub fn adc_to_percent(raw: u16) -> f32 {
    f32::from(raw.min(ADC_FULL_SCALE)) * (100.0 / f32::from(ADC_FULL_SCALE))
}

pub struct FuelGauge;

impl FuelGauge {
    pub fn new() -> Self {
        Self
    }

    #[cfg(target_os = "espidf")]
    fn read_adc(&self) -> u16 {
        hw_init::adc1_read(pins::FUEL_SENSOR_ADC_CHANNEL)
    }

    #[cfg(not(target_os = "espidf"))]
    fn read_adc(&self) -> u16 {
        SIM_FUEL_ADC.load(Ordering::Relaxed)
    }
}

impl Default for FuelGauge {
    fn default() -> Self {
        Self::new()
    }
}

impl FuelSensorPort for FuelGauge {
    fn read_fuel_percent(&mut self) -> f32 {
        adc_to_percent(self.read_adc())
    }
}
