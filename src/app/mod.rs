//! Application core: the diagnostic protocol, zero hardware access.
//!
//! A supervisor task checks the motor, fans requests out to the
//! ventilation and fuel responders, and collects their replies.  All
//! interaction with hardware happens through **port traits** defined in
//! [`ports`], keeping this layer fully testable without real peripherals.

pub mod channels;
pub mod fuel;
pub mod message;
pub mod output;
pub mod ports;
pub mod state;
pub mod supervisor;
pub mod ventilation;
