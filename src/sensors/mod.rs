//! Sensor drivers.
//!
//! Only the fuel gauge is hardware-backed; ventilation health and the motor
//! parameters are shared state written by external tasks.

pub mod fuel_gauge;
