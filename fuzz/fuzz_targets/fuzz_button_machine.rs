//! Fuzz target: `ButtonMachine` driven by arbitrary edge/timeout streams
//!
//! Each input byte is one step: bit 7 selects timeout vs edge, bit 6 the
//! edge level, and the low bits the time waited in the cycle.
//!
//! Invariants checked:
//! - No panics under any byte sequence
//! - `Reset` fires only when exactly four quiet cycles preceded the edge
//! - Any edge zeroes the quiet count
//!
//! cargo fuzz run fuzz_button_machine

#![no_main]

use core::time::Duration;

use glowline::app::events::ButtonEvent;
use glowline::drivers::button::{ButtonMachine, RESET_WINDOW_END};
use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: &[u8]| {
    let mut machine = ButtonMachine::new(Duration::from_millis(3));

    for &b in data {
        let quiet = machine.quiet_cycles();
        if b & 0x80 != 0 {
            let ev = machine.on_timeout();
            assert_ne!(ev, Some(ButtonEvent::Reset));
            assert!(!machine.is_pressed());
        } else {
            let pressed = b & 0x40 != 0;
            let waited = Duration::from_millis(u64::from(b & 0x3f));
            let ev = machine.on_edge(pressed, waited);
            if ev == Some(ButtonEvent::Reset) {
                assert_eq!(quiet, RESET_WINDOW_END);
            }
            assert_eq!(machine.quiet_cycles(), 0);
        }
    }
});
