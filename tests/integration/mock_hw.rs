//! Mock peripherals and ports for integration tests.
//!
//! Every mock records what it was asked to do so tests can assert on the
//! full history without touching real GPIO/LEDC registers.  Mocks shared
//! between threads keep their history behind `Arc<Mutex<..>>`.

use std::convert::Infallible;
use std::sync::{Arc, Mutex};

use glowline::app::commands::{LedCommand, LightingCommand};
use glowline::app::events::{ButtonEvent, LightingState};
use glowline::app::ports::{ButtonCallback, OutputCallback, StatePublisher, SystemPort};
use glowline::channels::{LedMailbox, LightingMailbox, Mailbox};

// ── PWM sink ──────────────────────────────────────────────────

pub const MOCK_DUTY_MAX: u16 = 1000;

#[derive(Default)]
pub struct MockPwm {
    pub duties: Vec<u16>,
}

impl embedded_hal::pwm::ErrorType for MockPwm {
    type Error = Infallible;
}

impl embedded_hal::pwm::SetDutyCycle for MockPwm {
    fn max_duty_cycle(&self) -> u16 {
        MOCK_DUTY_MAX
    }

    fn set_duty_cycle(&mut self, duty: u16) -> Result<(), Infallible> {
        self.duties.push(duty);
        Ok(())
    }
}

// ── Status LED pin ────────────────────────────────────────────

/// Electrical levels written to the pin (`true` = high).
#[derive(Default)]
pub struct MockPin {
    pub levels: Vec<bool>,
}

impl embedded_hal::digital::ErrorType for MockPin {
    type Error = Infallible;
}

impl embedded_hal::digital::OutputPin for MockPin {
    fn set_low(&mut self) -> Result<(), Infallible> {
        self.levels.push(false);
        Ok(())
    }

    fn set_high(&mut self) -> Result<(), Infallible> {
        self.levels.push(true);
        Ok(())
    }
}

// ── Callbacks ─────────────────────────────────────────────────

#[derive(Default)]
pub struct RecordingOutput {
    pub states: Mutex<Vec<LightingState>>,
}

impl OutputCallback for RecordingOutput {
    fn on_output_changed(&self, state: LightingState) {
        self.states.lock().unwrap().push(state);
    }
}

#[derive(Default)]
pub struct RecordingButtons {
    pub events: Mutex<Vec<ButtonEvent>>,
}

impl ButtonCallback for RecordingButtons {
    fn on_toggle(&self) {
        self.events.lock().unwrap().push(ButtonEvent::Toggle);
    }
    fn on_next(&self) {
        self.events.lock().unwrap().push(ButtonEvent::Next);
    }
    fn on_reset_window_begin(&self) {
        self.events.lock().unwrap().push(ButtonEvent::ResetWindowBegin);
    }
    fn on_reset_window_end(&self) {
        self.events.lock().unwrap().push(ButtonEvent::ResetWindowEnd);
    }
    fn on_reset(&self) {
        self.events.lock().unwrap().push(ButtonEvent::Reset);
    }
}

// ── Driven ports ──────────────────────────────────────────────

#[derive(Default, Clone)]
pub struct MockPublisher {
    pub labels: Arc<Mutex<Vec<&'static str>>>,
}

impl StatePublisher for MockPublisher {
    fn publish_state(&mut self, label: &'static str) {
        self.labels.lock().unwrap().push(label);
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SystemCall {
    FactoryReset,
    Restart,
}

#[derive(Default, Clone)]
pub struct MockSystem {
    pub calls: Arc<Mutex<Vec<SystemCall>>>,
}

impl SystemPort for MockSystem {
    fn factory_reset(&mut self) {
        self.calls.lock().unwrap().push(SystemCall::FactoryReset);
    }

    fn restart(&mut self) {
        self.calls.lock().unwrap().push(SystemCall::Restart);
    }
}

// ── Queues ────────────────────────────────────────────────────

/// Fresh `'static` mailboxes so tests never share the global ones.
pub fn leaked_mailboxes() -> (&'static LightingMailbox, &'static LedMailbox) {
    (
        Box::leak(Box::new(Mailbox::new("lighting-test"))),
        Box::leak(Box::new(Mailbox::new("led-test"))),
    )
}

pub fn drain_lighting(mb: &LightingMailbox) -> Vec<LightingCommand> {
    std::iter::from_fn(|| mb.try_recv()).collect()
}

pub fn drain_led(mb: &LedMailbox) -> Vec<LedCommand> {
    std::iter::from_fn(|| mb.try_recv()).collect()
}
