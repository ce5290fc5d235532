//! The controller: glue between the control loops and the outside world.
//!
//! - Button intents become lighting commands, reset-window LED signals, or
//!   a factory reset.
//! - Every reported lighting state is published (while the link is up)
//!   and announced on the status LED with the active mode's pattern.
//! - Network lifecycle notifications set the status LED baseline.
//! - Remote text commands are parsed and forwarded.
//!
//! Callbacks arrive concurrently from the button loop, the lighting loop
//! and the network stack, so mutable collaborators sit behind mutexes and
//! the link flag is atomic.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Mutex, MutexGuard, PoisonError};

use log::{info, warn};

use super::commands::{LedCommand, LightingCommand, UnknownCommand};
use super::events::{LightingState, ModeId};
use super::ports::{ButtonCallback, CommandSink, OutputCallback, StatePublisher, SystemPort};

pub struct Controller<S, P, Y> {
    sink: S,
    publisher: Mutex<P>,
    system: Mutex<Y>,
    connected: AtomicBool,
}

/// Lock, ignoring poisoning.
fn lock<T>(m: &Mutex<T>) -> MutexGuard<'_, T> {
    m.lock().unwrap_or_else(PoisonError::into_inner)
}

impl<S: CommandSink, P: StatePublisher, Y: SystemPort> Controller<S, P, Y> {
    /// Starts disconnected.
    pub fn new(sink: S, publisher: P, system: Y) -> Self {
        Self {
            sink,
            publisher: Mutex::new(publisher),
            system: Mutex::new(system),
            connected: AtomicBool::new(false),
        }
    }

    pub fn is_connected(&self) -> bool {
        self.connected.load(Ordering::Acquire)
    }

    /// No network configured; the device is waiting for provisioning.
    pub fn on_provisioning(&self) {
        info!("Controller: provisioning");
        self.sink.submit_led(LedCommand::Connecting);
    }

    /// Remote channel subscribed; state reports will be published.
    pub fn on_link_up(&self) {
        info!("Controller: link up");
        self.connected.store(true, Ordering::Release);
        self.sink.submit_led(LedCommand::Off);
    }

    /// Network or remote channel lost (also the state while connecting).
    pub fn on_link_down(&self) {
        info!("Controller: link down");
        self.connected.store(false, Ordering::Release);
        self.sink.submit_led(LedCommand::On);
    }

    /// Parse a remote command word and submit it to the lighting engine.
    pub fn on_remote_command(&self, text: &str) -> Result<LightingCommand, UnknownCommand> {
        match text.parse::<LightingCommand>() {
            Ok(cmd) => {
                info!("Controller: remote {:?}", cmd);
                self.sink.submit_lighting(cmd);
                Ok(cmd)
            }
            Err(e) => {
                warn!("Controller: {}", e);
                Err(e)
            }
        }
    }
}

impl<S: CommandSink, P: StatePublisher, Y: SystemPort> ButtonCallback for Controller<S, P, Y> {
    fn on_toggle(&self) {
        self.sink.submit_lighting(LightingCommand::Toggle);
    }

    fn on_next(&self) {
        self.sink.submit_lighting(LightingCommand::Next);
    }

    fn on_reset_window_begin(&self) {
        self.sink.submit_led(LedCommand::ResetArming);
    }

    fn on_reset_window_end(&self) {
        self.sink.submit_led(LedCommand::ResetArmed);
    }

    fn on_reset(&self) {
        warn!("Controller: factory reset requested");
        lock(&self.system).factory_reset();
    }
}

impl<S: CommandSink, P: StatePublisher, Y: SystemPort> OutputCallback for Controller<S, P, Y> {
    fn on_output_changed(&self, state: LightingState) {
        if self.is_connected() {
            lock(&self.publisher).publish_state(state.label());
        }
        if state.is_on {
            if let Some(mode) = ModeId::from_index(state.active_mode) {
                self.sink.submit_led(LedCommand::for_mode(mode));
            }
        }
    }
}
