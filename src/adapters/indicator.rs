//! Low-fuel warning LED adapter.
//!
//! Implements [`IndicatorPort`] over any `embedded-hal` output pin.  The
//! LED is active-high.

use embedded_hal::digital::OutputPin;
use log::warn;

use crate::app::ports::IndicatorPort;

pub struct LedIndicator<P> {
    pin: P,
    lit: bool,
}

impl<P: OutputPin> LedIndicator<P> {
    pub fn new(pin: P) -> Self {
        Self { pin, lit: false }
    }

    /// Last state successfully driven onto the pin.
    pub fn is_lit(&self) -> bool {
        self.lit
    }

    pub fn release(self) -> P {
        self.pin
    }
}

impl<P: OutputPin> IndicatorPort for LedIndicator<P> {
    fn set_low_fuel(&mut self, on: bool) {
        let res = if on {
            self.pin.set_high()
        } else {
            self.pin.set_low()
        };
        match res {
            Ok(()) => self.lit = on,
            Err(_) => warn!("LedIndicator: failed to drive pin"),
        }
    }
}
