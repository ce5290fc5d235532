//! Brightness animation modes.
//!
//! Every mode produces one brightness sample per lighting tick through the
//! [`Animate`] trait.  The engine holds the closed set as [`Animation`] and
//! dispatches with a single `match`; tests can drive the engine with any
//! other `Animate` implementation instead.
//!
//! | Mode      | Character                                       |
//! |-----------|-------------------------------------------------|
//! | Static    | constant full brightness                        |
//! | Dynamic   | slow sinusoidal breathing                       |
//! | Fireplace | three layered gradient-noise octaves            |
//! | Candle    | two coupled noise filters with regime switching |
//!
//! Samples are nominally in `[0, 1]` but may overshoot; clamping is the
//! engine's job.

pub mod breathing;
pub mod candle;
pub mod fireplace;

use rand::Rng;

pub use breathing::{Dynamic, Static};
pub use candle::Candle;
pub use fireplace::Fireplace;

use crate::app::events::ModeId;

/// A brightness generator advanced once per tick.
pub trait Animate {
    fn step<R: Rng + ?Sized>(&mut self, rng: &mut R) -> f64;
}

/// The built-in modes.
#[derive(Debug, Clone)]
pub enum Animation {
    Static(Static),
    Dynamic(Dynamic),
    Fireplace(Fireplace),
    Candle(Candle),
}

impl Animation {
    /// Fresh state for `mode`.
    pub fn new(mode: ModeId, dynamic_period: u32) -> Self {
        match mode {
            ModeId::Static => Self::Static(Static),
            ModeId::Dynamic => Self::Dynamic(Dynamic::new(dynamic_period)),
            ModeId::Fireplace => Self::Fireplace(Fireplace::new()),
            ModeId::Candle => Self::Candle(Candle::new()),
        }
    }

    pub fn id(&self) -> ModeId {
        match self {
            Self::Static(_) => ModeId::Static,
            Self::Dynamic(_) => ModeId::Dynamic,
            Self::Fireplace(_) => ModeId::Fireplace,
            Self::Candle(_) => ModeId::Candle,
        }
    }
}

impl Animate for Animation {
    fn step<R: Rng + ?Sized>(&mut self, rng: &mut R) -> f64 {
        match self {
            Self::Static(m) => m.step(rng),
            Self::Dynamic(m) => m.step(rng),
            Self::Fireplace(m) => m.step(rng),
            Self::Candle(m) => m.step(rng),
        }
    }
}

/// One instance of every built-in mode, in [`ModeId`] index order.
pub fn default_modes(dynamic_period: u32) -> Vec<Animation> {
    ModeId::ALL
        .iter()
        .map(|&id| Animation::new(id, dynamic_period))
        .collect()
}
