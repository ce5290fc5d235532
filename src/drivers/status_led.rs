//! Status LED indicator loop.
//!
//! Single digital output driven through `embedded_hal::digital::OutputPin`.
//! Each render tick waits briefly for a command from
//! [`LED_COMMANDS`](crate::channels::LED_COMMANDS), then renders one phase
//! of the current pattern.
//!
//! ## Dual-target design
//!
//! On ESP-IDF the pin is a GPIO output from [`hw_init`](super::hw_init).
//! On host/test any `OutputPin` mock works.

use core::time::Duration;

use embedded_hal::digital::OutputPin;
use log::{debug, info, warn};

use crate::channels::LedMailbox;
use crate::drivers::led_patterns::LedRenderer;
use crate::drivers::watchdog::Heartbeat;
use crate::ticker::Ticker;

pub struct LedIndicator<'a, P> {
    renderer: LedRenderer,
    pin: P,
    inbox: &'a LedMailbox,
    command_wait: Duration,
    active_low: bool,
}

impl<'a, P: OutputPin> LedIndicator<'a, P> {
    pub fn new(pin: P, inbox: &'a LedMailbox, command_wait: Duration, active_low: bool) -> Self {
        Self {
            renderer: LedRenderer::new(),
            pin,
            inbox,
            command_wait,
            active_low,
        }
    }

    pub fn renderer(&self) -> &LedRenderer {
        &self.renderer
    }

    pub fn pin(&self) -> &P {
        &self.pin
    }

    /// Take at most one command, render one phase.  Returns whether the
    /// LED is lit.
    pub fn tick_once(&mut self) -> bool {
        if let Some(cmd) = self.inbox.recv_timeout(self.command_wait) {
            debug!("Status LED: {:?}", cmd);
            self.renderer.apply(cmd);
        }
        let lit = self.renderer.tick();
        self.drive(lit);
        lit
    }

    fn drive(&mut self, lit: bool) {
        let result = if lit != self.active_low {
            self.pin.set_high()
        } else {
            self.pin.set_low()
        };
        if let Err(e) = result {
            warn!("Status LED: write failed: {:?}", e);
        }
    }

    /// Run forever at `tick` per phase.
    pub fn run(mut self, tick: Duration, heartbeat: &Heartbeat) -> ! {
        info!("Status LED started (tick={}ms)", tick.as_millis());
        let mut ticker = Ticker::new(tick);
        loop {
            heartbeat.beat();
            self.tick_once();
            ticker.wait();
        }
    }
}
