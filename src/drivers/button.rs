//! ISR-fed button monitor with hold-to-toggle and tap-to-reset detection.
//!
//! ## Hardware
//!
//! Active-low momentary switch with internal pull-up.  The GPIO fires on
//! any edge; the ISR samples the level and pushes it into
//! [`BUTTON_EDGES`](crate::channels::BUTTON_EDGES).  Nothing else happens in
//! interrupt context.
//!
//! ## Gesture detection
//!
//! The monitor waits up to one poll period (default 3 s) per cycle.
//!
//! | Gesture                                  | Event              |
//! |------------------------------------------|--------------------|
//! | Press and release inside one poll period | `Next`             |
//! | Hold through a whole poll period         | `Toggle`           |
//! | …then two more quiet periods             | `ResetWindowBegin` |
//! | …then one more quiet period              | `ResetWindowEnd`   |
//! | Tap right after `ResetWindowEnd`         | `Reset`            |
//!
//! The reset tap must land while exactly four quiet cycles have elapsed.
//! A fifth quiet cycle closes the window until the next toggle restarts
//! the count.

use core::time::Duration;
use std::time::Instant;

use log::{debug, info};

use crate::app::events::ButtonEvent;
use crate::app::ports::ButtonCallback;
use crate::channels::{BUTTON_EDGES, EdgeQueue};
use crate::drivers::watchdog::Heartbeat;

/// Quiet cycles after a toggle at which the reset window opens.
pub const RESET_WINDOW_BEGIN: u32 = 3;
/// Quiet cycles after a toggle at which a tap confirms the reset.
pub const RESET_WINDOW_END: u32 = 4;

/// Debounce and combo state machine.  Pure: the caller supplies edges,
/// timeouts and the time spent waiting in the current cycle.
#[derive(Debug, Clone)]
pub struct ButtonMachine {
    pressed: bool,
    quiet_cycles: u32,
    min_hold: Duration,
}

impl ButtonMachine {
    /// `min_hold` is the minimum wait inside the current poll cycle before
    /// a release counts as `Next`.
    pub fn new(min_hold: Duration) -> Self {
        Self {
            pressed: false,
            quiet_cycles: 0,
            min_hold,
        }
    }

    pub fn is_pressed(&self) -> bool {
        self.pressed
    }

    pub fn quiet_cycles(&self) -> u32 {
        self.quiet_cycles
    }

    /// An edge arrived after waiting `waited` in this cycle.
    pub fn on_edge(&mut self, pressed: bool, waited: Duration) -> Option<ButtonEvent> {
        let reset = self.quiet_cycles == RESET_WINDOW_END;
        self.quiet_cycles = 0;

        let next = if pressed {
            self.pressed = true;
            false
        } else {
            let released_after_hold = self.pressed && waited >= self.min_hold;
            self.pressed = false;
            released_after_hold
        };

        // A pending press always zeroes the quiet count, so a reset tap
        // and a `Next` release never coincide.
        if reset {
            Some(ButtonEvent::Reset)
        } else if next {
            Some(ButtonEvent::Next)
        } else {
            None
        }
    }

    /// A full poll period passed without an edge.
    pub fn on_timeout(&mut self) -> Option<ButtonEvent> {
        let mut event = None;

        if self.quiet_cycles > 0 {
            self.quiet_cycles = self.quiet_cycles.saturating_add(1);
            event = match self.quiet_cycles {
                RESET_WINDOW_BEGIN => Some(ButtonEvent::ResetWindowBegin),
                RESET_WINDOW_END => Some(ButtonEvent::ResetWindowEnd),
                _ => None,
            };
        }

        if self.pressed {
            self.pressed = false;
            self.quiet_cycles = 1;
            event = Some(ButtonEvent::Toggle);
        }

        event
    }
}

/// The button control loop: edge queue in, callbacks out.
pub struct ButtonMonitor<'a, C> {
    machine: ButtonMachine,
    edges: &'a EdgeQueue,
    poll: Duration,
    callback: C,
}

impl<'a, C: ButtonCallback> ButtonMonitor<'a, C> {
    pub fn new(edges: &'a EdgeQueue, poll: Duration, min_hold: Duration, callback: C) -> Self {
        Self {
            machine: ButtonMachine::new(min_hold),
            edges,
            poll,
            callback,
        }
    }

    pub fn machine(&self) -> &ButtonMachine {
        &self.machine
    }

    /// One poll cycle: wait for an edge or the timeout, then dispatch.
    pub fn poll_once(&mut self) -> Option<ButtonEvent> {
        let started = Instant::now();
        let event = match self.edges.recv_timeout(self.poll) {
            Some(pressed) => {
                debug!("Button: edge pressed={}", pressed);
                self.machine.on_edge(pressed, started.elapsed())
            }
            None => self.machine.on_timeout(),
        };

        if let Some(event) = event {
            info!("Button: {:?}", event);
            self.callback.dispatch(event);
        }
        event
    }

    /// Run forever, beating `heartbeat` once per cycle.
    pub fn run(mut self, heartbeat: &Heartbeat) -> ! {
        info!("Button monitor started (poll={}ms)", self.poll.as_millis());
        loop {
            heartbeat.beat();
            self.poll_once();
        }
    }
}

/// ISR handler, registered on the button GPIO for both edges.
/// Lock-free; drops the edge silently when the queue is full.
pub fn button_isr_handler(pressed: bool) {
    let _ = BUTTON_EDGES.try_push(pressed);
}
