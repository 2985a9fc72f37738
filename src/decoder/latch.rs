//! Decode output register: the pipeline latch between decode and execute.
//!
//! # Signal polarity
//!
//! Hardware drives the control inputs active-low (`n_reset`, `n_irdy`,
//! `n_stall`: electrical low means asserted). [`ActiveLowSignals`] models those
//! wires and converts once into the positive-logic [`Signals`] the latch
//! consumes:
//!
//! | wire      | low (`false`)        | positive field          |
//! |-----------|----------------------|-------------------------|
//! | `n_reset` | reset asserted       | `reset_active = true`   |
//! | `n_irdy`  | upstream word ready  | `input_valid = true`    |
//! | `n_stall` | downstream stalls    | `stall_active = true`   |

use serde::Serialize;

use crate::config::IsaConfig;
use crate::decoder::{DecodedBundle, decode};

/// Positive-logic control inputs for one cycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
pub struct Signals {
    /// Clear the latch unconditionally.
    pub reset_active: bool,
    /// Upstream presents a word this cycle.
    pub input_valid: bool,
    /// Downstream asks for the current output to be held.
    pub stall_active: bool,
}

impl Signals {
    /// A word is presented and nothing stalls.
    #[must_use]
    pub const fn accept() -> Self {
        Self {
            reset_active: false,
            input_valid: true,
            stall_active: false,
        }
    }

    /// Downstream stall with a word presented.
    #[must_use]
    pub const fn stall() -> Self {
        Self {
            reset_active: false,
            input_valid: true,
            stall_active: true,
        }
    }

    /// No word presented.
    #[must_use]
    pub const fn idle() -> Self {
        Self {
            reset_active: false,
            input_valid: false,
            stall_active: false,
        }
    }

    /// Reset asserted.
    #[must_use]
    pub const fn reset() -> Self {
        Self {
            reset_active: true,
            input_valid: false,
            stall_active: false,
        }
    }
}

/// Control inputs as driven on active-low wires.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ActiveLowSignals {
    /// Reset, low when asserted.
    pub n_reset: bool,
    /// Input ready, low when a word is present.
    pub n_irdy: bool,
    /// Stall, low when downstream stalls.
    pub n_stall: bool,
}

impl From<ActiveLowSignals> for Signals {
    fn from(wires: ActiveLowSignals) -> Self {
        Self {
            reset_active: !wires.n_reset,
            input_valid: !wires.n_irdy,
            stall_active: !wires.n_stall,
        }
    }
}

/// What the latch did in the most recent cycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
pub enum LatchState {
    /// Cleared to the no-op bundle.
    #[default]
    Reset,
    /// Output unchanged.
    Hold,
    /// A freshly decoded bundle was accepted.
    Update,
}

impl LatchState {
    /// Transition for one cycle. Reset dominates; a word is accepted only
    /// when valid and not stalled.
    #[must_use]
    pub const fn next(signals: Signals) -> Self {
        if signals.reset_active {
            LatchState::Reset
        } else if signals.input_valid && !signals.stall_active {
            LatchState::Update
        } else {
            LatchState::Hold
        }
    }
}

/// Pipeline register holding the last accepted bundle.
///
/// The latch has a single writer, [`DecodeLatch::step`]; readers take a copy
/// of [`DecodeLatch::output`] before the next step.
#[allow(missing_copy_implementations)] // stepped in place, never duplicated implicitly
#[derive(Debug, Clone)]
pub struct DecodeLatch {
    config: IsaConfig,
    state: LatchState,
    bundle: DecodedBundle,
    cycle: u64,
}

impl DecodeLatch {
    /// Create a latch in the reset state.
    #[must_use]
    pub fn new(config: IsaConfig) -> Self {
        Self {
            config,
            state: LatchState::Reset,
            bundle: DecodedBundle::NOP,
            cycle: 0,
        }
    }

    /// Advance one clock cycle with `word` on the input and return the new
    /// state.
    pub fn step(&mut self, word: u32, signals: Signals) -> LatchState {
        let state = LatchState::next(signals);
        match state {
            LatchState::Reset => self.bundle = DecodedBundle::NOP,
            LatchState::Update => self.bundle = decode(word, &self.config),
            LatchState::Hold => {}
        }
        log::trace!(
            "cycle {}: {:?} word={word:#010x} illegal={}",
            self.cycle,
            state,
            self.bundle.illegal
        );
        self.state = state;
        self.cycle += 1;
        state
    }

    /// The latched bundle.
    #[must_use]
    pub fn output(&self) -> &DecodedBundle {
        &self.bundle
    }

    /// State reached by the last step.
    #[must_use]
    pub fn state(&self) -> LatchState {
        self.state
    }

    /// Whether the last step consumed the input word, so upstream may
    /// advance.
    #[must_use]
    pub fn accepted(&self) -> bool {
        self.state == LatchState::Update
    }

    /// Number of cycles stepped so far.
    #[must_use]
    pub fn cycle(&self) -> u64 {
        self.cycle
    }

    /// The ISA configuration used for decoding.
    #[must_use]
    pub fn config(&self) -> &IsaConfig {
        &self.config
    }
}

impl Default for DecodeLatch {
    fn default() -> Self {
        Self::new(IsaConfig::default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const ADDI: u32 = 0x00A5_8513; // addi x10, x11, 10
    const ADD: u32 = 0x0020_81B3; // add x3, x1, x2

    #[test]
    fn test_starts_in_reset() {
        let latch = DecodeLatch::default();
        assert_eq!(latch.state(), LatchState::Reset);
        assert_eq!(*latch.output(), DecodedBundle::NOP);
        assert_eq!(latch.cycle(), 0);
        assert_eq!(*latch.config(), IsaConfig::rv32g());
    }

    #[test]
    fn test_keeps_config() {
        let mut latch = DecodeLatch::new(IsaConfig::rv32i());
        assert_eq!(*latch.config(), IsaConfig::rv32i());
        // mul x3, x1, x2 is rejected under the latch's own config
        latch.step(0x0220_81B3, Signals::accept());
        assert!(latch.output().illegal);
        assert_eq!(latch.config().to_string(), "rv32i");
    }

    #[test]
    fn test_transition_table() {
        for bits in 0..8u8 {
            let signals = Signals {
                reset_active: bits & 1 != 0,
                input_valid: bits & 2 != 0,
                stall_active: bits & 4 != 0,
            };
            let expected = if signals.reset_active {
                LatchState::Reset
            } else if signals.input_valid && !signals.stall_active {
                LatchState::Update
            } else {
                LatchState::Hold
            };
            assert_eq!(LatchState::next(signals), expected, "{signals:?}");
        }
    }

    #[test]
    fn test_update_then_hold() {
        let mut latch = DecodeLatch::default();
        assert_eq!(latch.step(ADDI, Signals::accept()), LatchState::Update);
        assert!(latch.accepted());
        let held = *latch.output();
        assert_eq!(held.reg_d, 10);

        assert_eq!(latch.step(ADD, Signals::stall()), LatchState::Hold);
        assert!(!latch.accepted());
        assert_eq!(*latch.output(), held);

        assert_eq!(latch.step(ADD, Signals::idle()), LatchState::Hold);
        assert_eq!(*latch.output(), held);

        assert_eq!(latch.step(ADD, Signals::accept()), LatchState::Update);
        assert_eq!(latch.output().reg_d, 3);
        assert_eq!(latch.cycle(), 4);
    }

    #[test]
    fn test_reset_dominates() {
        let mut latch = DecodeLatch::default();
        latch.step(ADDI, Signals::accept());
        let signals = Signals {
            reset_active: true,
            input_valid: true,
            stall_active: false,
        };
        assert_eq!(latch.step(ADD, signals), LatchState::Reset);
        assert_eq!(*latch.output(), DecodedBundle::NOP);
    }

    #[test]
    fn test_illegal_word_is_latched() {
        let mut latch = DecodeLatch::default();
        latch.step(0xFFFF_FFFF, Signals::accept());
        assert_eq!(*latch.output(), DecodedBundle::ILLEGAL);
    }

    #[test]
    fn test_active_low_mapping() {
        let wires = ActiveLowSignals {
            n_reset: true,
            n_irdy: false,
            n_stall: true,
        };
        assert_eq!(Signals::from(wires), Signals::accept());

        let stalled = ActiveLowSignals {
            n_reset: true,
            n_irdy: false,
            n_stall: false,
        };
        assert_eq!(Signals::from(stalled), Signals::stall());

        let reset = ActiveLowSignals {
            n_reset: false,
            n_irdy: true,
            n_stall: true,
        };
        assert_eq!(Signals::from(reset), Signals::reset());
    }
}
