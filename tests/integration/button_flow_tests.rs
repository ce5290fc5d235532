//! Integration tests: edge queue → ButtonMonitor → Controller → queues.
//!
//! Poll periods are shortened to a few milliseconds; gesture timing is
//! counted in poll cycles, so the sequences are the same as on hardware.

use std::sync::Arc;
use std::time::Duration;

use glowline::app::commands::{LedCommand, LightingCommand};
use glowline::app::controller::Controller;
use glowline::app::events::ButtonEvent;
use glowline::channels::{EDGE_QUEUE_DEPTH, EdgeQueue, QueueSink};
use glowline::drivers::button::ButtonMonitor;

use crate::mock_hw::{
    MockPublisher, MockSystem, RecordingButtons, SystemCall, drain_led, drain_lighting,
    leaked_mailboxes,
};

const POLL: Duration = Duration::from_millis(5);

#[test]
fn tap_is_next_and_hold_is_toggle() {
    let edges = EdgeQueue::new();
    let buttons = Arc::new(RecordingButtons::default());
    let mut monitor = ButtonMonitor::new(&edges, POLL, Duration::ZERO, Arc::clone(&buttons));

    edges.try_push(true);
    edges.try_push(false);
    assert_eq!(monitor.poll_once(), None);
    assert_eq!(monitor.poll_once(), Some(ButtonEvent::Next));

    edges.try_push(true);
    assert_eq!(monitor.poll_once(), None);
    assert_eq!(monitor.poll_once(), Some(ButtonEvent::Toggle));

    assert_eq!(
        *buttons.events.lock().unwrap(),
        [ButtonEvent::Next, ButtonEvent::Toggle]
    );
}

#[test]
fn quick_release_is_treated_as_bounce() {
    let edges = EdgeQueue::new();
    let buttons = Arc::new(RecordingButtons::default());
    let mut monitor = ButtonMonitor::new(
        &edges,
        POLL,
        Duration::from_millis(500),
        Arc::clone(&buttons),
    );

    edges.try_push(true);
    edges.try_push(false);
    monitor.poll_once();
    monitor.poll_once();
    assert!(buttons.events.lock().unwrap().is_empty());
    assert!(!monitor.machine().is_pressed());
}

#[test]
fn hold_then_tap_in_window_factory_resets() {
    let (lighting, led) = leaked_mailboxes();
    let system = MockSystem::default();
    let controller = Arc::new(Controller::new(
        QueueSink::new(lighting, led, Duration::ZERO),
        MockPublisher::default(),
        system.clone(),
    ));
    let edges = EdgeQueue::new();
    let mut monitor = ButtonMonitor::new(&edges, POLL, Duration::ZERO, Arc::clone(&controller));

    edges.try_push(true);
    let events: Vec<_> = (0..5).map(|_| monitor.poll_once()).collect();
    assert_eq!(
        events,
        [
            None,
            Some(ButtonEvent::Toggle),
            None,
            Some(ButtonEvent::ResetWindowBegin),
            Some(ButtonEvent::ResetWindowEnd),
        ]
    );

    edges.try_push(true);
    assert_eq!(monitor.poll_once(), Some(ButtonEvent::Reset));

    assert_eq!(drain_lighting(lighting), [LightingCommand::Toggle]);
    assert_eq!(
        drain_led(led),
        [LedCommand::ResetArming, LedCommand::ResetArmed]
    );
    assert_eq!(*system.calls.lock().unwrap(), [SystemCall::FactoryReset]);
}

#[test]
fn window_closes_after_one_more_quiet_cycle() {
    let edges = EdgeQueue::new();
    let buttons = Arc::new(RecordingButtons::default());
    let mut monitor = ButtonMonitor::new(&edges, POLL, Duration::ZERO, Arc::clone(&buttons));

    edges.try_push(true);
    for _ in 0..6 {
        monitor.poll_once();
    }
    edges.try_push(true);
    assert_eq!(monitor.poll_once(), None);
    assert!(!buttons.events.lock().unwrap().contains(&ButtonEvent::Reset));
}

#[test]
fn isr_burst_beyond_depth_is_dropped() {
    let edges = EdgeQueue::new();
    let accepted = (0..EDGE_QUEUE_DEPTH + 4)
        .filter(|i| edges.try_push(i % 2 == 0))
        .count();
    assert_eq!(accepted, EDGE_QUEUE_DEPTH);
}
