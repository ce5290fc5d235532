//! Unified error types for the Glowline firmware.
//!
//! The control loops never surface errors to a user: dropped messages are
//! tolerated, out-of-range brightness is clamped, and a stalled loop is
//! fatal.  What remains is hardware bring-up, adapter writes, configuration
//! validation, and the watchdog stall report.  All variants are `Copy` so
//! they can be logged from any loop without allocation.

use core::fmt;

// ---------------------------------------------------------------------------
// Top-level firmware error
// ---------------------------------------------------------------------------

/// Every fallible operation in the firmware funnels into this type.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Error {
    /// A peripheral write or read failed.
    Hardware(HardwareError),
    /// Configuration is invalid.
    Config(ConfigError),
    /// Peripheral initialisation failed.
    Init(&'static str),
    /// A supervised loop missed its heartbeat deadline.
    Stalled(&'static str),
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Hardware(e) => write!(f, "hardware: {e}"),
            Self::Config(e) => write!(f, "config: {e}"),
            Self::Init(msg) => write!(f, "init: {msg}"),
            Self::Stalled(name) => write!(f, "loop '{name}' stalled"),
        }
    }
}

impl core::error::Error for Error {}

// ---------------------------------------------------------------------------
// Hardware errors
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HardwareError {
    /// LEDC duty write returned a non-OK code.
    PwmWriteFailed(i32),
    /// GPIO level write returned a non-OK code.
    GpioWriteFailed(i32),
}

impl fmt::Display for HardwareError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::PwmWriteFailed(rc) => write!(f, "PWM write failed (rc={rc})"),
            Self::GpioWriteFailed(rc) => write!(f, "GPIO write failed (rc={rc})"),
        }
    }
}

impl embedded_hal::pwm::Error for HardwareError {
    fn kind(&self) -> embedded_hal::pwm::ErrorKind {
        embedded_hal::pwm::ErrorKind::Other
    }
}

impl embedded_hal::digital::Error for HardwareError {
    fn kind(&self) -> embedded_hal::digital::ErrorKind {
        embedded_hal::digital::ErrorKind::Other
    }
}

impl From<HardwareError> for Error {
    fn from(e: HardwareError) -> Self {
        Self::Hardware(e)
    }
}

// ---------------------------------------------------------------------------
// Configuration errors
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConfigError {
    /// A period or timeout that drives a loop is zero.
    ZeroPeriod(&'static str),
    /// The LED command wait must be shorter than the LED render tick.
    LedWaitTooLong,
    /// The watchdog timeout must exceed the slowest loop period.
    WatchdogTooShort,
    /// The configuration document is not valid JSON for `LightConfig`.
    Malformed,
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::ZeroPeriod(field) => write!(f, "{field} must be non-zero"),
            Self::LedWaitTooLong => write!(f, "LED command wait must be shorter than the LED tick"),
            Self::WatchdogTooShort => {
                write!(f, "watchdog timeout must exceed the slowest loop period")
            }
            Self::Malformed => write!(f, "malformed configuration document"),
        }
    }
}

impl From<ConfigError> for Error {
    fn from(e: ConfigError) -> Self {
        Self::Config(e)
    }
}

// ---------------------------------------------------------------------------
// Convenience Result alias
// ---------------------------------------------------------------------------

/// Firmware-wide `Result` alias.
pub type Result<T> = core::result::Result<T, Error>;
