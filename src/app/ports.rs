//! Port traits: the boundary between the control core and the outside world.
//!
//! ```text
//!   ButtonMonitor ──▶ ButtonCallback ──▶ Controller ──▶ CommandSink ──▶ mailboxes
//!   LightingEngine ─▶ OutputCallback ──▶ Controller ──▶ StatePublisher (MQTT)
//!                                                   └─▶ SystemPort (erase / restart)
//! ```
//!
//! Callbacks take `&self`: they are invoked from the button loop and the
//! lighting loop concurrently, so implementations keep their own interior
//! synchronisation.  The PWM sink and the status LED pin use the
//! `embedded-hal` traits directly and need no port of their own.

use std::sync::Arc;

use super::commands::{LedCommand, LightingCommand};
use super::events::{ButtonEvent, LightingState};

// ───────────────────────────────────────────────────────────────
// Callbacks fired by the control loops
// ───────────────────────────────────────────────────────────────

/// Receives the semantic intents produced by the button monitor.
pub trait ButtonCallback {
    fn on_toggle(&self);
    fn on_next(&self);
    fn on_reset_window_begin(&self);
    fn on_reset_window_end(&self);
    fn on_reset(&self);

    /// Route an event to the matching handler.
    fn dispatch(&self, event: ButtonEvent) {
        match event {
            ButtonEvent::Toggle => self.on_toggle(),
            ButtonEvent::Next => self.on_next(),
            ButtonEvent::ResetWindowBegin => self.on_reset_window_begin(),
            ButtonEvent::ResetWindowEnd => self.on_reset_window_end(),
            ButtonEvent::Reset => self.on_reset(),
        }
    }
}

/// Receives the lighting state after every applied command.
pub trait OutputCallback {
    fn on_output_changed(&self, state: LightingState);
}

impl<T: ButtonCallback + ?Sized> ButtonCallback for Arc<T> {
    fn on_toggle(&self) {
        (**self).on_toggle();
    }
    fn on_next(&self) {
        (**self).on_next();
    }
    fn on_reset_window_begin(&self) {
        (**self).on_reset_window_begin();
    }
    fn on_reset_window_end(&self) {
        (**self).on_reset_window_end();
    }
    fn on_reset(&self) {
        (**self).on_reset();
    }
}

impl<T: OutputCallback + ?Sized> OutputCallback for Arc<T> {
    fn on_output_changed(&self, state: LightingState) {
        (**self).on_output_changed(state);
    }
}

// ───────────────────────────────────────────────────────────────
// Command submission (controller → loops)
// ───────────────────────────────────────────────────────────────

/// Non-blocking, bounded command submission.
///
/// Both methods return `false` when the command was dropped because the
/// destination queue stayed full for the whole bounded wait.
pub trait CommandSink {
    fn submit_lighting(&self, cmd: LightingCommand) -> bool;
    fn submit_led(&self, cmd: LedCommand) -> bool;
}

// ───────────────────────────────────────────────────────────────
// Driven adapters (controller → outside world)
// ───────────────────────────────────────────────────────────────

/// Publishes the lighting state word to remote observers (MQTT adapter).
pub trait StatePublisher {
    fn publish_state(&mut self, label: &'static str);
}

/// Device-level actions that end the current boot.
pub trait SystemPort {
    /// Erase stored settings, then restart.
    fn factory_reset(&mut self);

    /// Restart the device immediately.
    fn restart(&mut self);
}

/// One-shot seed source for the animation PRNG.
pub trait EntropySource {
    fn seed(&mut self) -> u64;
}
