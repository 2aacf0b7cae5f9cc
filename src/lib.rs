//! MotorDiag firmware library.
//!
//! Exposes the diagnostic core and its adapters for the binary and for
//! integration testing. All ESP-IDF-specific code is guarded by
//! `#[cfg(target_os = "espidf")]` within each module.

#![deny(unused_must_use)]

#[cfg(all(target_os = "espidf", not(feature = "espidf")))]
compile_error!("ESP-IDF targets need the `espidf` feature: build with `--features espidf`");

pub mod app;
pub mod config;
pub mod error;
pub mod pins;
pub mod runtime;

pub mod adapters;
pub mod drivers;
pub mod sensors;

#[cfg(target_os = "espidf")]
mod platform;
