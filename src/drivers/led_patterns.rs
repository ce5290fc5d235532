//! Status LED pattern renderer.
//!
//! Every non-trivial indication is a 16-bit word rendered MSB-first, one
//! bit per render tick (100 ms by default, so one pass is 1.6 s).  The
//! renderer keeps two commands:
//!
//! - the **persistent** baseline, set by `On`, `Off` or `Connecting`;
//! - the **transient** command actually being shown.
//!
//! A one-shot pattern plays once and then reverts to the baseline.
//! `Connecting` never reverts on its own.  A pattern bit is XOR-ed with the
//! baseline, so the same word reads as a few dark blips on a lit LED and
//! as a few lit blips on a dark one.
//!
//! | Command       | Word     |
//! |---------------|----------|
//! | `Connecting`  | `0xff00` |
//! | `Static`      | `0x8000` |
//! | `Dynamic`     | `0xb800` |
//! | `Fireplace`   | `0xbb80` |
//! | `Candle`      | `0xbbb8` |
//! | `ResetArming` | `0xaaaa` |
//! | `ResetArmed`  | `0xf0f0` |

use crate::app::commands::LedCommand;

/// Bits per pattern word.
pub const PATTERN_PHASES: u8 = 16;

/// The blink word for `cmd`, or `None` for the solid levels.
pub const fn pattern(cmd: LedCommand) -> Option<u16> {
    match cmd {
        LedCommand::On | LedCommand::Off => None,
        LedCommand::Connecting => Some(0xff00),
        LedCommand::Static => Some(0x8000),
        LedCommand::Dynamic => Some(0xb800),
        LedCommand::Fireplace => Some(0xbb80),
        LedCommand::Candle => Some(0xbbb8),
        LedCommand::ResetArming => Some(0xaaaa),
        LedCommand::ResetArmed => Some(0xf0f0),
    }
}

/// Baseline plus one-shot state machine.  Stack-allocated, no heap.
#[derive(Debug, Clone)]
pub struct LedRenderer {
    persistent: LedCommand,
    transient: LedCommand,
    phase: u8,
}

impl Default for LedRenderer {
    fn default() -> Self {
        Self::new()
    }
}

impl LedRenderer {
    /// Starts dark.
    pub fn new() -> Self {
        Self {
            persistent: LedCommand::Off,
            transient: LedCommand::Off,
            phase: 0,
        }
    }

    pub fn persistent(&self) -> LedCommand {
        self.persistent
    }

    pub fn transient(&self) -> LedCommand {
        self.transient
    }

    pub fn phase(&self) -> u8 {
        self.phase
    }

    /// Accept a command.  Baseline commands also replace the baseline.
    /// Either way the pattern restarts from its first bit.
    pub fn apply(&mut self, cmd: LedCommand) {
        if cmd.is_baseline() {
            self.persistent = cmd;
        }
        self.transient = cmd;
        self.phase = 0;
    }

    /// Render one phase and advance.  Returns whether the LED is lit.
    pub fn tick(&mut self) -> bool {
        let lit = match pattern(self.transient) {
            None => self.transient == LedCommand::On,
            Some(word) => {
                let bit = word & (0x8000 >> self.phase) != 0;
                bit != (self.persistent == LedCommand::On)
            }
        };

        self.phase += 1;
        if self.phase == PATTERN_PHASES {
            self.phase = 0;
            if self.transient != LedCommand::Connecting {
                self.transient = self.persistent;
            }
        }
        lit
    }
}
