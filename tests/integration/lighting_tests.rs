//! Integration tests: commands → LightingEngine → PWM duty and reports.

use std::sync::Arc;
use std::time::Duration;

use glowline::animation::{Animation, default_modes};
use glowline::app::commands::{LedCommand, LightingCommand};
use glowline::app::controller::Controller;
use glowline::app::events::{LightingState, ModeId};
use glowline::channels::{COMMAND_QUEUE_DEPTH, QueueSink};
use glowline::drivers::lighting::LightingEngine;
use rand::SeedableRng;
use rand::rngs::StdRng;

use crate::mock_hw::{
    MOCK_DUTY_MAX, MockPublisher, MockPwm, MockSystem, RecordingOutput, drain_led,
    leaked_mailboxes,
};

fn engine(seed: u64) -> LightingEngine<MockPwm, StdRng, Animation> {
    LightingEngine::new(default_modes(1000), StdRng::seed_from_u64(seed), MockPwm::default())
}

#[test]
fn select_fireplace_then_fifty_ticks_in_range() {
    let (lighting, _) = leaked_mailboxes();
    let out = RecordingOutput::default();
    let mut e = engine(1);

    assert!(lighting.send_timeout(LightingCommand::SelectMode(2), Duration::ZERO));
    for _ in 0..50 {
        e.process(lighting.try_recv(), &out);
    }

    let states = out.states.lock().unwrap();
    assert_eq!(*states, [LightingState { is_on: true, active_mode: 2 }]);
    assert_eq!(e.pwm().duties.len(), 50);
    assert!(e.pwm().duties.iter().all(|&d| d <= MOCK_DUTY_MAX));
    // Every octave starts with zero slopes, so the first segment sits at
    // the bias, roughly 0.7² of full scale.
    let first = e.pwm().duties[0];
    assert!((489..=490).contains(&first), "{first}");
    assert!(e.pwm().duties[..30].iter().all(|&d| d == first));
}

#[test]
fn off_writes_zero() {
    let out = RecordingOutput::default();
    let mut e = engine(2);
    e.process(Some(LightingCommand::On), &out);
    assert_eq!(e.pwm().duties.last(), Some(&MOCK_DUTY_MAX));
    e.process(Some(LightingCommand::Off), &out);
    for _ in 0..20 {
        e.process(None, &out);
    }
    assert!(e.pwm().duties[1..].iter().all(|&d| d == 0));
}

#[test]
fn every_mode_respects_duty_range_over_long_runs() {
    let out = RecordingOutput::default();
    for mode in ModeId::ALL {
        let mut e = engine(mode.index() as u64 + 10);
        e.process(Some(LightingCommand::SelectMode(mode.index())), &out);
        for _ in 0..20_000 {
            e.process(None, &out);
        }
        assert!(
            e.pwm().duties.iter().all(|&d| d <= MOCK_DUTY_MAX),
            "{mode:?} exceeded duty range"
        );
    }
}

#[test]
fn candle_flickers() {
    let out = RecordingOutput::default();
    let mut e = engine(3);
    e.process(Some(LightingCommand::SelectMode(ModeId::Candle.index())), &out);
    for _ in 0..5_000 {
        e.process(None, &out);
    }
    let duties = &e.pwm().duties;
    let min = duties.iter().min().copied().unwrap_or(0);
    let max = duties.iter().max().copied().unwrap_or(0);
    assert!(max > min, "candle output never moved");
}

#[test]
fn one_command_per_tick_and_one_report_per_command() {
    let (lighting, _) = leaked_mailboxes();
    let out = RecordingOutput::default();
    let mut e = engine(4);

    for cmd in [LightingCommand::On, LightingCommand::On, LightingCommand::Next] {
        assert!(lighting.send_timeout(cmd, Duration::ZERO));
    }
    e.process(lighting.try_recv(), &out);
    assert_eq!(out.states.lock().unwrap().len(), 1);
    assert_eq!(lighting.len(), 2);

    e.process(lighting.try_recv(), &out);
    e.process(lighting.try_recv(), &out);
    e.process(lighting.try_recv(), &out);

    // Repeated On still reports; the idle tick does not.
    let states = out.states.lock().unwrap();
    assert_eq!(states.len(), 3);
    assert_eq!(states[2], LightingState { is_on: true, active_mode: 1 });
}

#[test]
fn full_mailbox_drops_newest() {
    let (lighting, _) = leaked_mailboxes();
    for _ in 0..COMMAND_QUEUE_DEPTH {
        assert!(lighting.send_timeout(LightingCommand::Toggle, Duration::ZERO));
    }
    assert!(!lighting.send_timeout(LightingCommand::Off, Duration::from_millis(5)));
    assert_eq!(lighting.len(), COMMAND_QUEUE_DEPTH);
}

#[test]
fn remote_word_reaches_engine_and_status_led() {
    let (lighting, led) = leaked_mailboxes();
    let publisher = MockPublisher::default();
    let controller = Arc::new(Controller::new(
        QueueSink::new(lighting, led, Duration::ZERO),
        publisher.clone(),
        MockSystem::default(),
    ));
    controller.on_link_up();
    let mut e = engine(5);

    controller.on_remote_command("candle").unwrap();
    e.process(lighting.try_recv(), &controller);

    assert_eq!(e.state(), LightingState { is_on: true, active_mode: 3 });
    assert_eq!(*publisher.labels.lock().unwrap(), ["candle"]);
    assert_eq!(drain_led(led), [LedCommand::Off, LedCommand::Candle]);

    controller.on_remote_command("off").unwrap();
    e.process(lighting.try_recv(), &controller);
    assert_eq!(*publisher.labels.lock().unwrap(), ["candle", "off"]);
    assert!(drain_led(led).is_empty());
}
