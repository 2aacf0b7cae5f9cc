pub mod hw_init;
pub mod ssd1306;
pub mod task_pin;
