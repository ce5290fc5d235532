//! Outbound events and reported state.
//!
//! [`ButtonEvent`]s leave the button monitor; [`LightingState`] leaves the
//! lighting engine after every applied command.  Neither is persisted.

/// Semantic button intents produced by the debounce machine.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ButtonEvent {
    /// Held through one full poll period.
    Toggle,
    /// Pressed and released inside a poll period.
    Next,
    /// Second quiet cycle after a toggle: the reset window is opening.
    ResetWindowBegin,
    /// Third quiet cycle after a toggle: a tap now confirms the reset.
    ResetWindowEnd,
    /// Tap while the reset window was open.
    Reset,
}

/// Identity of the built-in lighting modes, in engine index order.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ModeId {
    Static = 0,
    Dynamic = 1,
    Fireplace = 2,
    Candle = 3,
}

impl ModeId {
    pub const ALL: [ModeId; 4] = [Self::Static, Self::Dynamic, Self::Fireplace, Self::Candle];

    pub const fn index(self) -> usize {
        self as usize
    }

    pub fn from_index(index: usize) -> Option<Self> {
        Self::ALL.get(index).copied()
    }

    /// Command word selecting this mode.
    pub const fn name(self) -> &'static str {
        match self {
            Self::Static => "static",
            Self::Dynamic => "dynamic",
            Self::Fireplace => "fireplace",
            Self::Candle => "candle",
        }
    }
}

/// Snapshot reported by the lighting engine after each command.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct LightingState {
    pub is_on: bool,
    pub active_mode: usize,
}

impl LightingState {
    /// State word published to remote observers.
    ///
    /// The static mode reports plain `on`, matching the command that
    /// produces it.
    pub fn label(&self) -> &'static str {
        if !self.is_on {
            return "off";
        }
        match ModeId::from_index(self.active_mode) {
            Some(ModeId::Static) | None => "on",
            Some(mode) => mode.name(),
        }
    }
}
