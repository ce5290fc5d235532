//! Control loops, hardware initialisation, and peripheral helpers.

pub mod button;
pub mod hw_init;
pub mod led_patterns;
pub mod lighting;
pub mod status_led;
pub mod task_pin;
pub mod watchdog;
