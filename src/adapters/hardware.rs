//! Hardware adapter: bridges real peripherals to the `embedded-hal` traits
//! and the device-level port traits.
//!
//! This is the only module besides [`hw_init`](crate::drivers::hw_init)
//! that touches actual hardware.  On non-espidf targets the underlying
//! calls are cfg-gated simulation stubs.

use embedded_hal::digital::{self, OutputPin};
use embedded_hal::pwm::{self, SetDutyCycle};
use log::{info, warn};

use crate::app::ports::{EntropySource, SystemPort};
use crate::drivers::hw_init;
use crate::error::HardwareError;
use crate::pins;

// ── Light PWM ─────────────────────────────────────────────────

/// LEDC channel exposed as a duty sink over `0..=LIGHT_DUTY_MAX`.
pub struct LedcOutput {
    channel: u32,
    max_duty: u16,
}

impl Default for LedcOutput {
    fn default() -> Self {
        Self::new()
    }
}

impl LedcOutput {
    pub fn new() -> Self {
        Self {
            channel: hw_init::LEDC_CH_LIGHT,
            max_duty: pins::LIGHT_DUTY_MAX,
        }
    }
}

impl pwm::ErrorType for LedcOutput {
    type Error = HardwareError;
}

impl SetDutyCycle for LedcOutput {
    fn max_duty_cycle(&self) -> u16 {
        self.max_duty
    }

    fn set_duty_cycle(&mut self, duty: u16) -> Result<(), HardwareError> {
        hw_init::ledc_set(self.channel, u32::from(duty.min(self.max_duty)))
    }
}

// ── Status LED pin ────────────────────────────────────────────

/// Raw GPIO output.  Polarity is handled by the LED indicator.
pub struct StatusLedPin {
    gpio: i32,
}

impl Default for StatusLedPin {
    fn default() -> Self {
        Self::new()
    }
}

impl StatusLedPin {
    pub fn new() -> Self {
        Self {
            gpio: pins::STATUS_LED_GPIO,
        }
    }
}

impl digital::ErrorType for StatusLedPin {
    type Error = HardwareError;
}

impl OutputPin for StatusLedPin {
    fn set_low(&mut self) -> Result<(), HardwareError> {
        hw_init::gpio_write(self.gpio, false)
    }

    fn set_high(&mut self) -> Result<(), HardwareError> {
        hw_init::gpio_write(self.gpio, true)
    }
}

// ── Entropy ───────────────────────────────────────────────────

/// Hardware RNG on ESP-IDF (RF noise once the radio is up); the OS RNG
/// on the host.
#[derive(Debug, Default, Clone, Copy)]
pub struct HwEntropy;

impl EntropySource for HwEntropy {
    #[cfg(target_os = "espidf")]
    fn seed(&mut self) -> u64 {
        // SAFETY: esp_random is a register read with no preconditions.
        let (hi, lo) = unsafe { (esp_idf_svc::sys::esp_random(), esp_idf_svc::sys::esp_random()) };
        (u64::from(hi) << 32) | u64::from(lo)
    }

    #[cfg(not(target_os = "espidf"))]
    fn seed(&mut self) -> u64 {
        rand::random()
    }
}

// ── System control ────────────────────────────────────────────

/// Settings erase and restart.
#[derive(Debug, Default)]
pub struct EspSystem {
    #[cfg(not(target_os = "espidf"))]
    restarts: u32,
}

impl EspSystem {
    pub fn new() -> Self {
        Self::default()
    }

    /// Simulated restarts so far.
    #[cfg(not(target_os = "espidf"))]
    pub fn restarts(&self) -> u32 {
        self.restarts
    }
}

impl SystemPort for EspSystem {
    #[cfg(target_os = "espidf")]
    fn factory_reset(&mut self) {
        warn!("System: erasing settings");
        // SAFETY: NVS is not in use by any other task at this point; the
        // device restarts immediately after.
        let ret = unsafe { esp_idf_svc::sys::nvs_flash_erase() };
        if ret != esp_idf_svc::sys::ESP_OK as i32 {
            warn!("System: NVS erase failed ({}), restarting anyway", ret);
        }
        self.restart();
    }

    #[cfg(not(target_os = "espidf"))]
    fn factory_reset(&mut self) {
        warn!("System(sim): erasing settings");
        self.restart();
    }

    #[cfg(target_os = "espidf")]
    fn restart(&mut self) {
        info!("System: restarting");
        // SAFETY: esp_restart does not return.
        unsafe { esp_idf_svc::sys::esp_restart() };
    }

    #[cfg(not(target_os = "espidf"))]
    fn restart(&mut self) {
        info!("System(sim): restart requested");
        self.restarts += 1;
    }
}
