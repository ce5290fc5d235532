//! Fuzz target: remote text commands into the lighting engine
//!
//! Parses arbitrary UTF-8 as a `LightingCommand` and applies whatever
//! parses to a live engine, then renders a few ticks.
//!
//! Invariants checked:
//! - No panics under any input
//! - A parsed `SelectMode` index always names a built-in mode
//! - The active mode index stays in range and duty never exceeds the maximum
//!
//! cargo fuzz run fuzz_remote_command

#![no_main]

use core::convert::Infallible;

use glowline::animation::default_modes;
use glowline::app::commands::LightingCommand;
use glowline::app::events::ModeId;
use glowline::drivers::lighting::LightingEngine;
use libfuzzer_sys::fuzz_target;
use rand::SeedableRng;
use rand::rngs::SmallRng;

const MAX_DUTY: u16 = 1023;

struct NullPwm;

impl embedded_hal::pwm::ErrorType for NullPwm {
    type Error = Infallible;
}

impl embedded_hal::pwm::SetDutyCycle for NullPwm {
    fn max_duty_cycle(&self) -> u16 {
        MAX_DUTY
    }
    fn set_duty_cycle(&mut self, _duty: u16) -> Result<(), Infallible> {
        Ok(())
    }
}

fuzz_target!(|data: &[u8]| {
    let Ok(text) = core::str::from_utf8(data) else {
        return;
    };

    let mut engine = LightingEngine::new(default_modes(1000), SmallRng::seed_from_u64(0), NullPwm);

    // Each line is one remote command.
    for line in text.lines() {
        let Ok(cmd) = line.parse::<LightingCommand>() else {
            continue;
        };
        if let LightingCommand::SelectMode(i) = cmd {
            assert!(i < ModeId::ALL.len(), "parser produced index {i}");
        }
        engine.apply(cmd);
        for _ in 0..4 {
            assert!(engine.render() <= MAX_DUTY);
        }
        assert!(engine.state().active_mode < engine.mode_count());
    }
});
