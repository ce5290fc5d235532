//! Loop liveness supervision.
//!
//! Every control loop owns a [`Heartbeat`] and beats it once per iteration.
//! The [`Watchdog`] supervisor runs on its own thread, checks that every
//! registered heartbeat is younger than the timeout, and feeds the ESP-IDF
//! Task Watchdog Timer ([`TaskWatchdog`]) while they are.  A stalled loop
//! stops the feeding and triggers a restart through [`SystemPort`].
//!
//! Heartbeats are `u32` milliseconds: the Xtensa target has no 64-bit
//! atomics, and ages are computed with wrapping arithmetic.

use core::time::Duration;
use std::sync::Arc;
use std::sync::atomic::{AtomicU32, Ordering};

#[cfg(target_os = "espidf")]
use esp_idf_svc::sys::*;
use log::{error, info};

use crate::adapters::time::MonotonicClock;
use crate::app::ports::SystemPort;
use crate::error::{Error, Result};

/// Lower bound on the supervisor's polling interval.
const MIN_SUPERVISE_INTERVAL: Duration = Duration::from_millis(10);

/// Liveness token held by one control loop.
#[derive(Debug, Clone)]
pub struct Heartbeat {
    name: &'static str,
    last_beat_ms: Arc<AtomicU32>,
    clock: MonotonicClock,
}

impl Heartbeat {
    pub fn beat(&self) {
        self.last_beat_ms
            .store(self.clock.uptime_ms(), Ordering::Release);
    }

    pub fn name(&self) -> &'static str {
        self.name
    }

    pub fn last_beat_ms(&self) -> u32 {
        self.last_beat_ms.load(Ordering::Acquire)
    }
}

/// Supervisor over a fixed set of heartbeats.
pub struct Watchdog {
    timeout_ms: u32,
    clock: MonotonicClock,
    loops: Vec<Heartbeat>,
}

impl Watchdog {
    pub fn new(timeout: Duration, clock: MonotonicClock) -> Self {
        Self {
            timeout_ms: u32::try_from(timeout.as_millis()).unwrap_or(u32::MAX),
            clock,
            loops: Vec::new(),
        }
    }

    pub fn timeout(&self) -> Duration {
        Duration::from_millis(u64::from(self.timeout_ms))
    }

    /// Register a loop.  The returned heartbeat counts as fresh.
    pub fn register(&mut self, name: &'static str) -> Heartbeat {
        let heartbeat = Heartbeat {
            name,
            last_beat_ms: Arc::new(AtomicU32::new(self.clock.uptime_ms())),
            clock: self.clock,
        };
        self.loops.push(heartbeat.clone());
        heartbeat
    }

    /// `Err(Stalled)` naming the first loop whose last beat is older than
    /// the timeout at `now_ms`.
    pub fn check(&self, now_ms: u32) -> Result<()> {
        for hb in &self.loops {
            let age = now_ms.wrapping_sub(hb.last_beat_ms());
            if age > self.timeout_ms {
                return Err(Error::Stalled(hb.name));
            }
        }
        Ok(())
    }

    /// Feed `task_wdt` while every loop is alive.  On the first stall, log
    /// it, restart through `system`, and return the stall.
    pub fn supervise<S: SystemPort>(&self, system: &mut S, task_wdt: &TaskWatchdog) -> Error {
        let interval = (self.timeout() / 4).max(MIN_SUPERVISE_INTERVAL);
        info!(
            "Watchdog: supervising {} loops (timeout={}ms)",
            self.loops.len(),
            self.timeout_ms
        );
        loop {
            std::thread::sleep(interval);
            match self.check(self.clock.uptime_ms()) {
                Ok(()) => task_wdt.feed(),
                Err(e) => {
                    error!("Watchdog: {}, restarting", e);
                    system.restart();
                    return e;
                }
            }
        }
    }
}

// ── Task Watchdog Timer ───────────────────────────────────────

/// ESP-IDF TWDT subscription for the supervisor thread.  If the
/// supervisor itself hangs, the TWDT panics the chip.
pub struct TaskWatchdog {
    #[cfg(target_os = "espidf")]
    subscribed: bool,
}

impl TaskWatchdog {
    /// Subscribe the calling thread with the given timeout.
    pub fn subscribe(timeout: Duration) -> Self {
        #[cfg(target_os = "espidf")]
        {
            unsafe {
                let cfg = esp_task_wdt_config_t {
                    timeout_ms: u32::try_from(timeout.as_millis()).unwrap_or(u32::MAX),
                    idle_core_mask: 0,
                    trigger_panic: true,
                };
                let ret = esp_task_wdt_reconfigure(&cfg);
                if ret != ESP_OK as i32 {
                    log::warn!(
                        "TWDT reconfigure returned {} (may already be configured)",
                        ret
                    );
                }

                let ret = esp_task_wdt_add(core::ptr::null_mut());
                let subscribed = ret == ESP_OK as i32;
                if subscribed {
                    info!(
                        "TWDT: subscribed ({}ms timeout, panic on trigger)",
                        timeout.as_millis()
                    );
                } else {
                    log::warn!("TWDT: failed to subscribe ({})", ret);
                }

                Self { subscribed }
            }
        }

        #[cfg(not(target_os = "espidf"))]
        {
            info!("TWDT(sim): no-op ({}ms)", timeout.as_millis());
            Self {}
        }
    }

    pub fn feed(&self) {
        #[cfg(target_os = "espidf")]
        {
            if self.subscribed {
                unsafe {
                    esp_task_wdt_reset();
                }
            }
        }
    }
}
