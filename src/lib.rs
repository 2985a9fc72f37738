// Allow unwrap and unreadable literals in tests (test code is not production)
#![cfg_attr(test, allow(clippy::unwrap_used))]
#![cfg_attr(test, allow(clippy::unreadable_literal))]
//! rvdecode: the decode stage of an RV32G pipeline.
//!
//! A 32-bit instruction word is split into fields, classified, checked for
//! legality and turned into a [`DecodedBundle`] of control fields for the
//! integer ALU, FPU and load/store unit. A [`DecodeLatch`] holds the bundle
//! between cycles under reset/stall control.
//!
//! # Architecture
//!
//! ```text
//!            ┌──────────────┐
//!  word ───▶ │ Fields       │──┬──▶ classify ──┐
//!            └──────────────┘  └──▶ legality ──┼──▶ immediate ──▶ bundle
//!                                              │
//!  reset/valid/stall ─────────────────────▶ DecodeLatch ──▶ execute units
//! ```
//!
//! Compressed (RVC) instructions must be expanded upstream.

pub mod config;
pub mod decoder;
pub mod elf;
pub mod error;
pub mod isa;
pub mod scan;
pub mod trace;

pub use config::IsaConfig;
pub use decoder::{
    ActiveLowSignals, DecodeLatch, DecodedBundle, LatchState, RegConf, Signals, decode,
    decode_checked,
};
pub use error::{ConfigError, DecodeError, Extension};
pub use isa::{Category, Format};

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_reexports_decode() {
        let bundle = decode(0x00A5_8513, &IsaConfig::default());
        assert_eq!(bundle.category, Some(Category::AluImmediate));
        let debug = format!("{bundle:?}");
        assert!(debug.contains("AluImmediate"));
    }
}
