//! Lighting engine: on/off and mode state plus the PWM render tick.
//!
//! Every tick (10 ms by default) the engine takes at most one pending
//! [`LightingCommand`], applies it, reports the resulting state through
//! [`OutputCallback`], then advances the active mode by one sample and
//! writes the duty.
//!
//! Brightness is clamped to `[0, 1]` and squared before scaling to the
//! sink's `max_duty_cycle()`, which gives a roughly linear perceived
//! response.  While off, the duty is 0 and no mode advances.
//!
//! The sink is any `embedded_hal::pwm::SetDutyCycle`; on ESP-IDF it is the
//! LEDC channel from [`hw_init`](super::hw_init).

use core::time::Duration;

use embedded_hal::pwm::SetDutyCycle;
use log::{info, warn};
use rand::Rng;

use crate::animation::{Animate, Animation};
use crate::app::commands::LightingCommand;
use crate::app::events::LightingState;
use crate::app::ports::OutputCallback;
use crate::channels::LightingMailbox;
use crate::drivers::watchdog::Heartbeat;
use crate::ticker::Ticker;

/// Clamp, square and scale a brightness sample.  NaN renders dark.
pub fn brightness_to_duty(value: f64, max_duty: u16) -> u16 {
    let v = if value.is_nan() {
        0.0
    } else {
        value.clamp(0.0, 1.0)
    };
    (v * v * f64::from(max_duty)) as u16
}

pub struct LightingEngine<P, R, M = Animation> {
    modes: Vec<M>,
    state: LightingState,
    rng: R,
    pwm: P,
}

impl<P: SetDutyCycle, R: Rng, M: Animate> LightingEngine<P, R, M> {
    /// Starts off, on mode 0.
    ///
    /// # Panics
    ///
    /// If `modes` is empty.
    pub fn new(modes: Vec<M>, rng: R, pwm: P) -> Self {
        assert!(!modes.is_empty(), "lighting engine needs at least one mode");
        Self {
            modes,
            state: LightingState::default(),
            rng,
            pwm,
        }
    }

    pub fn state(&self) -> LightingState {
        self.state
    }

    pub fn mode_count(&self) -> usize {
        self.modes.len()
    }

    pub fn pwm(&self) -> &P {
        &self.pwm
    }

    /// Apply one command.  Returns the new state, or `None` if the command
    /// was rejected.
    pub fn apply(&mut self, cmd: LightingCommand) -> Option<LightingState> {
        match cmd {
            LightingCommand::On => self.state.is_on = true,
            LightingCommand::Off => self.state.is_on = false,
            LightingCommand::Toggle => self.state.is_on = !self.state.is_on,
            LightingCommand::Next => {
                // Next from off only turns the light on.
                if self.state.is_on {
                    self.state.active_mode = (self.state.active_mode + 1) % self.modes.len();
                } else {
                    self.state.is_on = true;
                }
            }
            LightingCommand::SelectMode(index) => {
                if index >= self.modes.len() {
                    warn!(
                        "Lighting: mode {} out of range ({} modes), ignored",
                        index,
                        self.modes.len()
                    );
                    return None;
                }
                self.state.active_mode = index;
                self.state.is_on = true;
            }
        }
        info!(
            "Lighting: {:?} -> on={} mode={}",
            cmd, self.state.is_on, self.state.active_mode
        );
        Some(self.state)
    }

    /// Advance the active mode (when on) and write the duty.
    pub fn render(&mut self) -> u16 {
        let duty = if self.state.is_on {
            let value = self.modes[self.state.active_mode].step(&mut self.rng);
            brightness_to_duty(value, self.pwm.max_duty_cycle())
        } else {
            0
        };
        if let Err(e) = self.pwm.set_duty_cycle(duty) {
            warn!("Lighting: duty write failed: {:?}", e);
        }
        duty
    }

    /// One engine tick: apply `cmd` if any, report it, render.
    pub fn process<C: OutputCallback + ?Sized>(
        &mut self,
        cmd: Option<LightingCommand>,
        callback: &C,
    ) -> u16 {
        if let Some(state) = cmd.and_then(|c| self.apply(c)) {
            callback.on_output_changed(state);
        }
        self.render()
    }

    /// Run forever at `tick`, draining one command per tick.
    pub fn run<C: OutputCallback>(
        mut self,
        inbox: &LightingMailbox,
        callback: C,
        tick: Duration,
        heartbeat: &Heartbeat,
    ) -> ! {
        info!(
            "Lighting engine started ({} modes, tick={}ms)",
            self.modes.len(),
            tick.as_millis()
        );
        let mut ticker = Ticker::new(tick);
        loop {
            heartbeat.beat();
            self.process(inbox.try_recv(), &callback);
            ticker.wait();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::animation::{Static, default_modes};
    use core::cell::RefCell;
    use core::convert::Infallible;
    use embedded_hal::pwm::ErrorType;
    use rand::SeedableRng;
    use rand::rngs::StdRng;

    #[derive(Default)]
    struct Pwm {
        duty: u16,
    }

    impl ErrorType for Pwm {
        type Error = Infallible;
    }

    impl SetDutyCycle for Pwm {
        fn max_duty_cycle(&self) -> u16 {
            1000
        }
        fn set_duty_cycle(&mut self, duty: u16) -> Result<(), Infallible> {
            self.duty = duty;
            Ok(())
        }
    }

    #[derive(Default)]
    struct Reports(RefCell<Vec<LightingState>>);

    impl OutputCallback for Reports {
        fn on_output_changed(&self, state: LightingState) {
            self.0.borrow_mut().push(state);
        }
    }

    fn engine() -> LightingEngine<Pwm, StdRng> {
        LightingEngine::new(default_modes(1000), StdRng::seed_from_u64(0), Pwm::default())
    }

    #[test]
    fn duty_curve() {
        assert_eq!(brightness_to_duty(0.0, 1000), 0);
        assert_eq!(brightness_to_duty(0.5, 1000), 250);
        assert_eq!(brightness_to_duty(1.0, 1000), 1000);
        assert_eq!(brightness_to_duty(1.7, 1000), 1000);
        assert_eq!(brightness_to_duty(-0.3, 1000), 0);
        assert_eq!(brightness_to_duty(f64::NAN, 1000), 0);
    }

    #[test]
    fn starts_off_and_dark() {
        let mut e = engine();
        assert_eq!(e.state(), LightingState::default());
        assert_eq!(e.render(), 0);
    }

    #[test]
    fn static_on_is_full_duty() {
        let mut e = engine();
        e.apply(LightingCommand::On);
        assert_eq!(e.render(), 1000);
        assert_eq!(e.pwm().duty, 1000);
    }

    #[test]
    fn next_from_off_only_turns_on() {
        let mut e = engine();
        let s = e.apply(LightingCommand::Next).unwrap();
        assert!(s.is_on);
        assert_eq!(s.active_mode, 0);
    }

    #[test]
    fn next_cycles_modes() {
        let mut e = engine();
        e.apply(LightingCommand::On);
        let seen: Vec<usize> = (0..5)
            .map(|_| e.apply(LightingCommand::Next).unwrap().active_mode)
            .collect();
        assert_eq!(seen, [1, 2, 3, 0, 1]);
    }

    #[test]
    fn toggle_twice_restores() {
        let mut e = engine();
        e.apply(LightingCommand::SelectMode(2));
        let before = e.state();
        e.apply(LightingCommand::Toggle);
        assert!(!e.state().is_on);
        e.apply(LightingCommand::Toggle);
        assert_eq!(e.state(), before);
    }

    #[test]
    fn select_mode_turns_on() {
        let mut e = engine();
        let s = e.apply(LightingCommand::SelectMode(3)).unwrap();
        assert!(s.is_on);
        assert_eq!(s.active_mode, 3);
    }

    #[test]
    fn out_of_range_mode_is_rejected_silently() {
        let mut e = engine();
        let reports = Reports::default();
        e.process(Some(LightingCommand::SelectMode(9)), &reports);
        assert!(reports.0.borrow().is_empty());
        assert_eq!(e.state(), LightingState::default());
    }

    #[test]
    fn each_command_reports_once() {
        let mut e = engine();
        let reports = Reports::default();
        e.process(Some(LightingCommand::On), &reports);
        e.process(None, &reports);
        e.process(Some(LightingCommand::Off), &reports);
        e.process(None, &reports);
        let r = reports.0.borrow();
        assert_eq!(r.len(), 2);
        assert!(r[0].is_on);
        assert!(!r[1].is_on);
    }

    #[test]
    fn off_freezes_animation() {
        let mut e: LightingEngine<Pwm, StdRng, Animation> = engine();
        e.apply(LightingCommand::SelectMode(1));
        for _ in 0..10 {
            e.render();
        }
        e.apply(LightingCommand::Off);
        for _ in 0..100 {
            assert_eq!(e.render(), 0);
        }
        match &e.modes[1] {
            Animation::Dynamic(d) => assert_eq!(d.phase(), 10),
            other => panic!("unexpected mode {:?}", other.id()),
        }
    }

    #[test]
    fn custom_modes_are_accepted() {
        let mut e = LightingEngine::new(vec![Static, Static], StdRng::seed_from_u64(0), Pwm::default());
        e.apply(LightingCommand::On);
        assert_eq!(e.apply(LightingCommand::Next).unwrap().active_mode, 1);
        assert!(e.apply(LightingCommand::SelectMode(2)).is_none());
    }
}
