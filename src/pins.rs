//! GPIO / peripheral pin assignments for the diagnostic controller board.
//!
//! Single source of truth: every driver references this module rather than
//! hard-coding pin numbers.

// ---------------------------------------------------------------------------
// Fuel level potentiometer
// ---------------------------------------------------------------------------

/// Analog input: fuel level potentiometer wiper.
pub const FUEL_SENSOR_GPIO: i32 = 32;
/// ADC1 channel wired to [`FUEL_SENSOR_GPIO`] (GPIO32 = ADC1_CH4).
pub const FUEL_SENSOR_ADC_CHANNEL: u32 = 4;

// ---------------------------------------------------------------------------
// Warning indicators
// ---------------------------------------------------------------------------

/// Digital output: low-fuel warning LED, active HIGH.
pub const FUEL_LED_GPIO: i32 = 5;

// ---------------------------------------------------------------------------
// Status display (SSD1306, I2C0)
// ---------------------------------------------------------------------------

pub const OLED_I2C_ADDR: u8 = 0x3C;
pub const OLED_SDA_GPIO: i32 = 21;
pub const OLED_SCL_GPIO: i32 = 22;

// ---------------------------------------------------------------------------
// Motor
// ---------------------------------------------------------------------------

/// PWM output to the motor servo.  Driven by the actuator firmware, not by
/// the diagnostic tasks; reserved here so nothing else claims it.
pub const MOTOR_SERVO_GPIO: i32 = 18;
