//! Glowline firmware entry point.
//!
//! Three perpetual control loops joined by bounded queues, with the
//! controller as the only component that talks to the outside world.
//!
//! ```text
//! ┌──────────────────────────────────────────────────────────────┐
//! │                    Adapters (outer ring)                     │
//! │  LedcOutput   StatusLedPin   HwEntropy   EspSystem           │
//! │  LogPublisher MonotonicClock                                 │
//! │                                                              │
//! │  ─────────────── Port Trait Boundary ───────────────         │
//! │                                                              │
//! │   ButtonMonitor ──▶ Controller ──▶ LIGHTING_COMMANDS         │
//! │        ▲                 ▲    └──▶ LED_COMMANDS              │
//! │   BUTTON_EDGES           │              │                    │
//! │        ▲          LightingEngine ◀──────┘  LedIndicator      │
//! │   button ISR                                                 │
//! │                                                              │
//! │  Watchdog supervisor (main thread) · TWDT                    │
//! └──────────────────────────────────────────────────────────────┘
//! ```
#![deny(unused_must_use)]

use std::sync::Arc;
use std::time::Duration;

use anyhow::{Context, Result};
use log::{error, info};
use rand::SeedableRng;
use rand::rngs::SmallRng;

use glowline::adapters::hardware::{EspSystem, HwEntropy, LedcOutput, StatusLedPin};
use glowline::adapters::log_sink::LogPublisher;
use glowline::adapters::time::MonotonicClock;
use glowline::animation::default_modes;
use glowline::app::controller::Controller;
use glowline::app::ports::EntropySource;
use glowline::channels::{BUTTON_EDGES, LED_COMMANDS, LIGHTING_COMMANDS, QueueSink};
use glowline::config::LightConfig;
use glowline::drivers::button::ButtonMonitor;
use glowline::drivers::hw_init;
use glowline::drivers::lighting::LightingEngine;
use glowline::drivers::status_led::LedIndicator;
use glowline::drivers::task_pin::spawn_loop;
use glowline::drivers::watchdog::{TaskWatchdog, Watchdog};
use glowline::error::Error;
use glowline::pins;

fn ms(v: u32) -> Duration {
    Duration::from_millis(u64::from(v))
}

fn main() -> Result<()> {
    // ── 1. ESP-IDF bootstrap ──────────────────────────────────
    esp_idf_svc::sys::link_patches();
    esp_idf_logger::init()?;

    info!("╔══════════════════════════════════════╗");
    info!("║  Glowline v{}                         ║", env!("CARGO_PKG_VERSION"));
    info!("╚══════════════════════════════════════╝");

    // ── 2. Configuration ──────────────────────────────────────
    // Optional build-time overrides, e.g. GLOWLINE_CONFIG='{"button_poll_ms":2000}'.
    let config = match option_env!("GLOWLINE_CONFIG") {
        Some(doc) => LightConfig::from_json(doc).map_err(Error::from)?,
        None => {
            let config = LightConfig::default();
            config.validate().map_err(Error::from)?;
            config
        }
    };
    info!("Config: {:?}", config);

    // ── 3. Peripherals ────────────────────────────────────────
    hw_init::init_peripherals().context("peripheral init")?;

    // ── 4. Supervision + controller ───────────────────────────
    let clock = MonotonicClock::new();
    let mut watchdog = Watchdog::new(ms(config.watchdog_timeout_ms), clock);
    let button_hb = watchdog.register("button");
    let led_hb = watchdog.register("led");
    let lighting_hb = watchdog.register("lighting");

    let controller = Arc::new(Controller::new(
        QueueSink::global(ms(config.submit_wait_ms)),
        LogPublisher::new(),
        EspSystem::new(),
    ));

    // ── 5. Control loops ──────────────────────────────────────
    let seed = HwEntropy.seed();
    info!("Animation seed: {:#018x}", seed);
    let engine = LightingEngine::new(
        default_modes(config.dynamic_period_ticks),
        SmallRng::seed_from_u64(seed),
        LedcOutput::new(),
    );
    let output_cb = Arc::clone(&controller);
    let output_tick = ms(config.output_tick_ms);
    spawn_loop("lighting\0", move || {
        engine.run(&LIGHTING_COMMANDS, output_cb, output_tick, &lighting_hb);
    })?;

    let indicator = LedIndicator::new(
        StatusLedPin::new(),
        &LED_COMMANDS,
        ms(config.led_command_wait_ms),
        pins::STATUS_LED_ACTIVE_LOW,
    );
    let led_tick = ms(config.led_tick_ms);
    spawn_loop("led\0", move || {
        indicator.run(led_tick, &led_hb);
    })?;

    let monitor = ButtonMonitor::new(
        &BUTTON_EDGES,
        ms(config.button_poll_ms),
        ms(config.release_min_hold_ms),
        Arc::clone(&controller),
    );
    spawn_loop("button\0", move || {
        monitor.run(&button_hb);
    })?;

    hw_init::init_isr_service().context("ISR service init")?;

    // The network adapter reports link changes from here on; until then
    // the device counts as connecting.
    controller.on_link_down();

    info!("System ready. Supervising control loops.");

    // ── 6. Supervisor ─────────────────────────────────────────
    let task_wdt = TaskWatchdog::subscribe(ms(config.watchdog_timeout_ms));
    let mut system = EspSystem::new();
    let stall = watchdog.supervise(&mut system, &task_wdt);
    error!("Supervisor exited: {}", stall);
    Err(stall.into())
}
