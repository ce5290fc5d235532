//! Deterministic modes: constant and sinusoidal breathing.

use core::f64::consts::TAU;

use rand::Rng;

use super::Animate;

/// Full brightness, always.
#[derive(Debug, Clone, Copy, Default)]
pub struct Static;

impl Animate for Static {
    fn step<R: Rng + ?Sized>(&mut self, _rng: &mut R) -> f64 {
        1.0
    }
}

/// Sine wave between 0 and 1 with a period of `period` ticks.
#[derive(Debug, Clone)]
pub struct Dynamic {
    phase: u32,
    period: u32,
}

impl Dynamic {
    /// A zero period is treated as one tick.
    pub fn new(period: u32) -> Self {
        Self {
            phase: 0,
            period: period.max(1),
        }
    }

    pub fn phase(&self) -> u32 {
        self.phase
    }
}

impl Animate for Dynamic {
    fn step<R: Rng + ?Sized>(&mut self, _rng: &mut R) -> f64 {
        self.phase += 1;
        if self.phase == self.period {
            self.phase = 0;
        }
        let x = f64::from(self.phase) / f64::from(self.period);
        0.5 * (TAU * x).sin() + 0.5
    }
}
