//! Adapters: concrete implementations of the hexagonal port traits.
//!
//! | Adapter      | Implements     | Connects to                      |
//! |--------------|----------------|----------------------------------|
//! | `serial_log` | LinePort       | UART console / host stdout       |
//! | `oled`       | DisplayPort    | 128×64 panel via embedded-graphics |
//! | `indicator`  | IndicatorPort  | Low-fuel LED (embedded-hal pin)  |
//!
//! The fuel sensor adapter lives with the other drivers in
//! [`crate::sensors::fuel_gauge`].

pub mod indicator;
pub mod oled;
pub mod serial_log;
