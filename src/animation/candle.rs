//! Candle: a pair of stochastic second-order filters whose tuning switches
//! between five flame regimes.
//!
//! Each filter is a damped spring driven by Gaussian noise:
//!
//! ```text
//! velocity += N(0,1)·S − D·velocity − P·value
//! value    += velocity
//! ```
//!
//! The fast filter carries flicker, the slow one carries drift.  Every
//! [`REGIME_HOLD_TICKS`] ticks the regime takes one step of a Markov chain
//! ([`TRANSITIONS`]), and both filters are re-tuned from their preset rows.
//! Regime 0 is a still flame, regime 4 a guttering one.

use rand::Rng;
use rand_distr::StandardNormal;

use super::Animate;

pub const REGIMES: usize = 5;

/// Ticks between regime draws.
pub const REGIME_HOLD_TICKS: u32 = 100;

const BIAS: f64 = 0.6;

/// Row `i` holds the weights (summing to 100) of moving from regime `i` to
/// each regime.
pub const TRANSITIONS: [[u32; REGIMES]; REGIMES] = [
    [70, 17, 9, 3, 1],
    [30, 55, 10, 4, 1],
    [7, 15, 70, 6, 2],
    [7, 18, 20, 50, 5],
    [20, 30, 28, 20, 2],
];

/// Filter tuning as (P, D, S).
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Tuning {
    pub proportional: f64,
    pub differential: f64,
    pub scale: f64,
}

const fn tuning(proportional: f64, differential: f64, scale: f64) -> Tuning {
    Tuning {
        proportional,
        differential,
        scale,
    }
}

pub const FAST_PRESETS: [Tuning; REGIMES] = [
    tuning(0.001, 0.08, 0.0),
    tuning(0.008, 0.06, 0.0003),
    tuning(0.02, 0.04, 0.001),
    tuning(0.05, 0.02, 0.002),
    tuning(0.2, 0.01, 0.01),
];

pub const SLOW_PRESETS: [Tuning; REGIMES] = [
    tuning(0.000_01, 0.01, 0.000_005),
    tuning(0.0001, 0.01, 0.000_03),
    tuning(0.0003, 0.01, 0.000_05),
    tuning(0.0005, 0.01, 0.000_07),
    tuning(0.001, 0.01, 0.0001),
];

/// Noise-driven damped spring.
#[derive(Debug, Clone)]
pub struct NoiseFilter {
    tuning: Tuning,
    velocity: f64,
    value: f64,
}

impl NoiseFilter {
    pub fn new(tuning: Tuning) -> Self {
        Self {
            tuning,
            velocity: 0.0,
            value: 0.0,
        }
    }

    /// Swap gains; the filter keeps its momentum.
    pub fn retune(&mut self, tuning: Tuning) {
        self.tuning = tuning;
    }

    pub fn value(&self) -> f64 {
        self.value
    }

    pub fn step<R: Rng + ?Sized>(&mut self, rng: &mut R) -> f64 {
        let noise: f64 = rng.sample(StandardNormal);
        let Tuning {
            proportional,
            differential,
            scale,
        } = self.tuning;
        self.velocity += noise * scale - differential * self.velocity - proportional * self.value;
        self.value += self.velocity;
        self.value
    }
}

#[derive(Debug, Clone)]
pub struct Candle {
    regime: usize,
    hold: u32,
    fast: NoiseFilter,
    slow: NoiseFilter,
}

impl Default for Candle {
    fn default() -> Self {
        Self::new()
    }
}

impl Candle {
    /// Starts in the still regime.
    pub fn new() -> Self {
        Self {
            regime: 0,
            hold: 0,
            fast: NoiseFilter::new(FAST_PRESETS[0]),
            slow: NoiseFilter::new(SLOW_PRESETS[0]),
        }
    }

    pub fn regime(&self) -> usize {
        self.regime
    }

    /// Draw the regime following `from`.
    pub fn next_regime<R: Rng + ?Sized>(from: usize, rng: &mut R) -> usize {
        let row = &TRANSITIONS[from.min(REGIMES - 1)];
        let mut draw = rng.gen_range(0..100u32);
        for (to, &weight) in row.iter().enumerate() {
            if draw < weight {
                return to;
            }
            draw -= weight;
        }
        0
    }

    fn enter_regime(&mut self, regime: usize) {
        self.regime = regime;
        self.fast.retune(FAST_PRESETS[regime]);
        self.slow.retune(SLOW_PRESETS[regime]);
    }
}

impl Animate for Candle {
    fn step<R: Rng + ?Sized>(&mut self, rng: &mut R) -> f64 {
        self.hold += 1;
        if self.hold == REGIME_HOLD_TICKS {
            self.hold = 0;
            let next = Self::next_regime(self.regime, rng);
            self.enter_regime(next);
        }
        self.fast.step(rng) + self.slow.step(rng) + BIAS
    }
}
