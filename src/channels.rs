//! Bounded queues between the interrupt handler, the controller and the
//! three control loops.
//!
//! ```text
//! ┌────────────┐ bool  ┌──────────────┐ ButtonEvent ┌────────────┐
//! │ Button ISR │──────▶│ ButtonMonitor│────────────▶│ Controller │
//! └────────────┘ Edge  └──────────────┘             └─────┬──────┘
//!               Queue                                     │
//!            ┌────────────────────────────────────────────┤
//!            ▼ LightingCommand                  LedCommand ▼
//!   ┌────────────────┐                          ┌──────────────┐
//!   │ LightingEngine │                          │ LedIndicator │
//!   └────────────────┘                          └──────────────┘
//! ```
//!
//! Every queue is lossy by policy: a full queue drops the new message and
//! the producer gets no backpressure beyond its bounded wait.
//!
//! The ISR side uses a lock-free heapless queue because an interrupt may
//! neither lock nor wake a thread.  Task-to-task mailboxes use
//! `embassy-sync` channels; their bounded waits race the channel future
//! against an `async-io-mini` timer under `futures-lite`'s `block_on`.

use core::time::Duration;
use std::time::Instant;

use async_io_mini::Timer;
use embassy_sync::blocking_mutex::raw::CriticalSectionRawMutex;
use embassy_sync::channel::{Channel, TrySendError};
use futures_lite::future;
use heapless::mpmc::MpMcQueue;
use log::warn;

use crate::app::commands::{LedCommand, LightingCommand};
use crate::app::ports::CommandSink;

/// Depth of the ISR edge queue (power of two for the lock-free ring).
pub const EDGE_QUEUE_DEPTH: usize = 8;

/// Depth of each command mailbox.
pub const COMMAND_QUEUE_DEPTH: usize = 6;

/// Sleep slice used while waiting on the edge queue.
const EDGE_POLL_SLICE: Duration = Duration::from_millis(2);

// ── ISR edge queue ────────────────────────────────────────────

/// Raw button levels (`true` = pressed) written from interrupt context.
pub struct EdgeQueue {
    ring: MpMcQueue<bool, EDGE_QUEUE_DEPTH>,
}

impl Default for EdgeQueue {
    fn default() -> Self {
        Self::new()
    }
}

impl EdgeQueue {
    pub const fn new() -> Self {
        Self {
            ring: MpMcQueue::new(),
        }
    }

    /// Lock-free push.  Safe from ISR context; returns `false` if the edge
    /// was dropped because the queue is full.
    pub fn try_push(&self, pressed: bool) -> bool {
        self.ring.enqueue(pressed).is_ok()
    }

    /// Wait up to `timeout` for the next edge.
    pub fn recv_timeout(&self, timeout: Duration) -> Option<bool> {
        let deadline = Instant::now() + timeout;
        loop {
            if let Some(edge) = self.ring.dequeue() {
                return Some(edge);
            }
            let now = Instant::now();
            if now >= deadline {
                return None;
            }
            std::thread::sleep(EDGE_POLL_SLICE.min(deadline - now));
        }
    }
}

// ── Task mailboxes ────────────────────────────────────────────

/// Bounded FIFO of commands consumed by exactly one control loop.
pub struct Mailbox<T, const N: usize> {
    name: &'static str,
    channel: Channel<CriticalSectionRawMutex, T, N>,
}

impl<T, const N: usize> Mailbox<T, N> {
    pub const fn new(name: &'static str) -> Self {
        Self {
            name,
            channel: Channel::new(),
        }
    }

    /// Enqueue `msg`, waiting at most `wait` for space.  Returns `false`
    /// (and logs) if the message was dropped.
    pub fn send_timeout(&self, msg: T, wait: Duration) -> bool {
        let msg = match self.channel.try_send(msg) {
            Ok(()) => return true,
            Err(TrySendError::Full(msg)) => msg,
        };

        let delivered = !wait.is_zero()
            && future::block_on(future::or(
                async {
                    self.channel.send(msg).await;
                    true
                },
                async {
                    Timer::after(wait).await;
                    false
                },
            ));

        if !delivered {
            warn!("{}: mailbox full, dropping command", self.name);
        }
        delivered
    }

    /// Take the oldest pending message without waiting.
    pub fn try_recv(&self) -> Option<T> {
        self.channel.try_receive().ok()
    }

    /// Take the oldest pending message, waiting at most `wait`.
    pub fn recv_timeout(&self, wait: Duration) -> Option<T> {
        if let Some(msg) = self.try_recv() {
            return Some(msg);
        }
        if wait.is_zero() {
            return None;
        }
        future::block_on(future::or(
            async { Some(self.channel.receive().await) },
            async {
                Timer::after(wait).await;
                None
            },
        ))
    }

    /// Number of queued messages.
    pub fn len(&self) -> usize {
        self.channel.len()
    }

    pub fn is_empty(&self) -> bool {
        self.channel.is_empty()
    }
}

pub type LightingMailbox = Mailbox<LightingCommand, COMMAND_QUEUE_DEPTH>;
pub type LedMailbox = Mailbox<LedCommand, COMMAND_QUEUE_DEPTH>;

// ── Static instances ──────────────────────────────────────────

/// Button ISR → button monitor.
pub static BUTTON_EDGES: EdgeQueue = EdgeQueue::new();

/// Controller → lighting engine.
pub static LIGHTING_COMMANDS: LightingMailbox = Mailbox::new("lighting");

/// Controller → status LED.
pub static LED_COMMANDS: LedMailbox = Mailbox::new("led");

/// Submit a lighting command to the running engine.
pub fn submit_lighting_command(cmd: LightingCommand, wait: Duration) -> bool {
    LIGHTING_COMMANDS.send_timeout(cmd, wait)
}

/// Submit a status LED command to the running indicator.
pub fn submit_led_command(cmd: LedCommand, wait: Duration) -> bool {
    LED_COMMANDS.send_timeout(cmd, wait)
}

/// [`CommandSink`] over a pair of mailboxes.
#[derive(Clone, Copy)]
pub struct QueueSink {
    lighting: &'static LightingMailbox,
    led: &'static LedMailbox,
    wait: Duration,
}

impl QueueSink {
    pub fn new(lighting: &'static LightingMailbox, led: &'static LedMailbox, wait: Duration) -> Self {
        Self { lighting, led, wait }
    }

    /// Sink feeding the process-wide mailboxes.
    pub fn global(wait: Duration) -> Self {
        Self::new(&LIGHTING_COMMANDS, &LED_COMMANDS, wait)
    }
}

impl CommandSink for QueueSink {
    fn submit_lighting(&self, cmd: LightingCommand) -> bool {
        self.lighting.send_timeout(cmd, self.wait)
    }

    fn submit_led(&self, cmd: LedCommand) -> bool {
        self.led.send_timeout(cmd, self.wait)
    }
}
