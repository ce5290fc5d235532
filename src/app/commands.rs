//! Inbound commands for the lighting engine and the status LED.
//!
//! Both enums are `Copy` and travel through the bounded mailboxes in
//! [`channels`](crate::channels).  Remote text commands (MQTT payloads,
//! serial console) are parsed with [`LightingCommand::from_str`].

use core::fmt;
use core::str::FromStr;

use super::events::ModeId;

/// Commands understood by the lighting engine.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LightingCommand {
    On,
    Off,
    Toggle,
    /// Turn on if off, otherwise advance to the next mode.
    Next,
    /// Turn on in the mode at this index.
    SelectMode(usize),
}

/// A text command that matched no known word.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UnknownCommand(pub String);

impl fmt::Display for UnknownCommand {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "unknown command '{}'", self.0)
    }
}

impl core::error::Error for UnknownCommand {}

impl FromStr for LightingCommand {
    type Err = UnknownCommand;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let word = s.trim();
        match word {
            "on" | "true" | "1" => Ok(Self::On),
            "off" | "false" | "0" => Ok(Self::Off),
            "toggle" => Ok(Self::Toggle),
            "next" => Ok(Self::Next),
            _ => ModeId::ALL
                .iter()
                .find(|m| m.name() == word)
                .map(|m| Self::SelectMode(m.index()))
                .ok_or_else(|| UnknownCommand(word.to_owned())),
        }
    }
}

/// Commands understood by the status LED indicator.
///
/// `On`, `Off` and `Connecting` are baselines: they persist until replaced.
/// Every other command plays its 16-phase pattern once and then falls back
/// to the baseline.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LedCommand {
    On,
    Off,
    /// Repeating blink while the device has no configured network.
    Connecting,
    Static,
    Dynamic,
    Fireplace,
    Candle,
    /// The reset confirmation window is about to open.
    ResetArming,
    /// The reset confirmation window is open.
    ResetArmed,
}

impl LedCommand {
    /// True for the three commands that replace the persistent baseline.
    pub const fn is_baseline(self) -> bool {
        matches!(self, Self::On | Self::Off | Self::Connecting)
    }

    /// The one-shot pattern announcing a lighting mode.
    pub const fn for_mode(mode: ModeId) -> Self {
        match mode {
            ModeId::Static => Self::Static,
            ModeId::Dynamic => Self::Dynamic,
            ModeId::Fireplace => Self::Fireplace,
            ModeId::Candle => Self::Candle,
        }
    }
}
