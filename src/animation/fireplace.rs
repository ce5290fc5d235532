//! Fireplace: layered 1-D gradient noise.
//!
//! Each [`GradientNoise`] octave blends two random slopes with a quartic
//! that passes through zero at both ends of its period, so consecutive
//! segments join without a jump.  Three octaves at 120, 60 and 30 ticks
//! are summed around a 0.7 bias.

use rand::Rng;
use rand_distr::StandardNormal;

use super::Animate;

const SLOW_PERIOD: u32 = 120;
const MEDIUM_PERIOD: u32 = 60;
const FAST_PERIOD: u32 = 30;

const OCTAVE_WEIGHT: f64 = 0.12;
const BIAS: f64 = 0.7;

/// One noise octave.  `start` and `stop` are the slopes at the two ends of
/// the current segment; a new `stop` is drawn from N(0, 1) at every wrap.
#[derive(Debug, Clone)]
pub struct GradientNoise {
    start: f64,
    stop: f64,
    duration: u32,
    period: u32,
}

impl GradientNoise {
    pub fn new(period: u32) -> Self {
        Self::with_slopes(period, 0.0, 0.0)
    }

    /// Octave seeded with explicit end slopes.
    pub fn with_slopes(period: u32, start: f64, stop: f64) -> Self {
        Self {
            start,
            stop,
            duration: 0,
            period: period.max(1),
        }
    }

    pub fn start(&self) -> f64 {
        self.start
    }

    pub fn stop(&self) -> f64 {
        self.stop
    }

    /// Segment polynomial at `x ∈ [0, 1]`.
    ///
    /// f(0) = f(1) = 0, f'(0) = start, f'(1) = stop.
    pub fn blend(start: f64, stop: f64, x: f64) -> f64 {
        let x2 = x * x;
        let x3 = x2 * x;
        let x4 = x3 * x;
        2.0 * (start - stop) * x4 - (3.0 * start - 5.0 * stop) * x3 - 3.0 * stop * x2 + start * x
    }

    pub fn step<R: Rng + ?Sized>(&mut self, rng: &mut R) -> f64 {
        self.duration += 1;
        let x = f64::from(self.duration) / f64::from(self.period);
        let value = Self::blend(self.start, self.stop, x);
        if self.duration >= self.period {
            self.duration -= self.period;
            self.start = self.stop;
            self.stop = rng.sample(StandardNormal);
        }
        value
    }
}

#[derive(Debug, Clone)]
pub struct Fireplace {
    slow: GradientNoise,
    medium: GradientNoise,
    fast: GradientNoise,
}

impl Default for Fireplace {
    fn default() -> Self {
        Self::new()
    }
}

impl Fireplace {
    pub fn new() -> Self {
        Self {
            slow: GradientNoise::new(SLOW_PERIOD),
            medium: GradientNoise::new(MEDIUM_PERIOD),
            fast: GradientNoise::new(FAST_PERIOD),
        }
    }
}

impl Animate for Fireplace {
    fn step<R: Rng + ?Sized>(&mut self, rng: &mut R) -> f64 {
        let layers = self.slow.step(rng) + self.medium.step(rng) + self.fast.step(rng);
        layers * OCTAVE_WEIGHT + BIAS
    }
}
