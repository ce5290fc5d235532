//! System configuration parameters
//!
//! All tunable timing parameters for the Glowline controller.  Defaults
//! reproduce the behaviour of the shipped firmware; the portal that edits
//! them lives outside this crate.

use serde::{Deserialize, Serialize};

use crate::error::ConfigError;

/// Core controller configuration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct LightConfig {
    // --- Button ---
    /// How long the button monitor waits for an edge before counting a quiet cycle (ms)
    pub button_poll_ms: u32,
    /// Minimum time spent in the current poll cycle before a release counts as `Next` (ms)
    pub release_min_hold_ms: u32,

    // --- Status LED ---
    /// Render period of the status LED pattern (ms per phase)
    pub led_tick_ms: u32,
    /// Maximum wait for an LED command inside one render tick (ms)
    pub led_command_wait_ms: u32,

    // --- Lighting ---
    /// Lighting engine tick period (ms)
    pub output_tick_ms: u32,
    /// Breathing period of the dynamic mode, in lighting ticks
    pub dynamic_period_ticks: u32,

    // --- Queues / liveness ---
    /// Bounded wait applied by producers before dropping a command (ms)
    pub submit_wait_ms: u32,
    /// Heartbeat deadline for every supervised loop (ms)
    pub watchdog_timeout_ms: u32,
}

impl Default for LightConfig {
    fn default() -> Self {
        Self {
            // Button
            button_poll_ms: 3000,
            release_min_hold_ms: 3,

            // Status LED
            led_tick_ms: 100,
            led_command_wait_ms: 5,

            // Lighting
            output_tick_ms: 10,
            dynamic_period_ticks: 1000, // 10 s breathing cycle

            // Queues / liveness
            submit_wait_ms: 5,
            watchdog_timeout_ms: 10_000,
        }
    }
}

impl LightConfig {
    /// Parse a JSON document over the defaults and validate the result.
    /// Absent fields keep their default values.
    pub fn from_json(doc: &str) -> Result<Self, ConfigError> {
        let config: Self = serde_json::from_str(doc).map_err(|e| {
            log::warn!("config: {}", e);
            ConfigError::Malformed
        })?;
        config.validate()?;
        Ok(config)
    }

    /// Reject values that would stall or starve a loop.
    pub fn validate(&self) -> Result<(), ConfigError> {
        let periods = [
            ("button_poll_ms", self.button_poll_ms),
            ("led_tick_ms", self.led_tick_ms),
            ("output_tick_ms", self.output_tick_ms),
            ("dynamic_period_ticks", self.dynamic_period_ticks),
            ("watchdog_timeout_ms", self.watchdog_timeout_ms),
        ];
        if let Some((field, _)) = periods.iter().find(|(_, v)| *v == 0) {
            return Err(ConfigError::ZeroPeriod(field));
        }
        if self.led_command_wait_ms >= self.led_tick_ms {
            return Err(ConfigError::LedWaitTooLong);
        }
        let slowest = self
            .button_poll_ms
            .max(self.led_tick_ms)
            .max(self.output_tick_ms);
        if self.watchdog_timeout_ms <= slowest {
            return Err(ConfigError::WatchdogTooShort);
        }
        Ok(())
    }
}
