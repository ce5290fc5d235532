//! Integration tests: LED mailbox → LedIndicator → GPIO levels.

use std::time::Duration;

use glowline::app::commands::LedCommand;
use glowline::drivers::led_patterns::pattern;
use glowline::drivers::status_led::LedIndicator;

use crate::mock_hw::{MockPin, leaked_mailboxes};

fn word_bits(word: u16) -> Vec<bool> {
    (0..16).map(|i| word & (0x8000 >> i) != 0).collect()
}

#[test]
fn connecting_blinks_on_active_low_pin() {
    let (_, led) = leaked_mailboxes();
    let mut ind = LedIndicator::new(MockPin::default(), led, Duration::ZERO, true);

    led.send_timeout(LedCommand::Connecting, Duration::ZERO);
    let lit: Vec<bool> = (0..32).map(|_| ind.tick_once()).collect();

    let mut expected = word_bits(0xff00);
    expected.extend(word_bits(0xff00));
    assert_eq!(lit, expected);

    // Active-low: the pin is the inverse of the lit state.
    let inverted: Vec<bool> = expected.iter().map(|b| !b).collect();
    assert_eq!(ind.pin().levels, inverted);
}

#[test]
fn mode_announcement_on_lit_baseline_blips_dark() {
    let (_, led) = leaked_mailboxes();
    let mut ind = LedIndicator::new(MockPin::default(), led, Duration::ZERO, false);

    led.send_timeout(LedCommand::On, Duration::ZERO);
    ind.tick_once();
    led.send_timeout(LedCommand::Fireplace, Duration::ZERO);
    let lit: Vec<bool> = (0..20).map(|_| ind.tick_once()).collect();

    let word = pattern(LedCommand::Fireplace).unwrap();
    let mut expected: Vec<bool> = word_bits(word).into_iter().map(|b| !b).collect();
    expected.extend([true; 4]);
    assert_eq!(lit, expected);
}

#[test]
fn reset_signals_play_once() {
    let (_, led) = leaked_mailboxes();
    let mut ind = LedIndicator::new(MockPin::default(), led, Duration::ZERO, false);

    led.send_timeout(LedCommand::ResetArming, Duration::ZERO);
    let first: Vec<bool> = (0..16).map(|_| ind.tick_once()).collect();
    assert_eq!(first, word_bits(0xaaaa));

    led.send_timeout(LedCommand::ResetArmed, Duration::ZERO);
    let second: Vec<bool> = (0..16).map(|_| ind.tick_once()).collect();
    assert_eq!(second, word_bits(0xf0f0));

    assert!((0..16).all(|_| !ind.tick_once()));
}

#[test]
fn idle_tick_waits_at_most_command_wait() {
    let (_, led) = leaked_mailboxes();
    let mut ind = LedIndicator::new(MockPin::default(), led, Duration::from_millis(5), false);
    let start = std::time::Instant::now();
    ind.tick_once();
    let took = start.elapsed();
    assert!(took >= Duration::from_millis(5));
    assert!(took < Duration::from_millis(100));
}
