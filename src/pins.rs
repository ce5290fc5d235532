//! GPIO / peripheral pin assignments for the Glowline board.
//!
//! Single source of truth: every driver references this module rather than
//! hard-coding pin numbers.

// ---------------------------------------------------------------------------
// Status LED
// ---------------------------------------------------------------------------

/// Digital output for the on-board status LED.
pub const STATUS_LED_GPIO: i32 = 2;
/// The status LED sinks current: driving the pin LOW lights it.
pub const STATUS_LED_ACTIVE_LOW: bool = true;

// ---------------------------------------------------------------------------
// User input
// ---------------------------------------------------------------------------

/// Momentary push-button, active-low with internal pull-up.
pub const BUTTON_GPIO: i32 = 4;

// ---------------------------------------------------------------------------
// Light output (LEDC)
// ---------------------------------------------------------------------------

/// MOSFET gate driving the light string.
pub const LIGHT_PWM_GPIO: i32 = 14;
/// PWM carrier frequency.
pub const LIGHT_PWM_FREQ_HZ: u32 = 1000;
/// Upper bound of the duty range written by the lighting engine.
pub const LIGHT_DUTY_MAX: u16 = 1000;
