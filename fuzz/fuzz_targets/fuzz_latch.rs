#![no_main]

//! Pipeline latch fuzzer.
//!
//! Drives the decode output register through arbitrary cycle sequences and
//! checks each transition against a reference model of the three states.

use arbitrary::Arbitrary;
use libfuzzer_sys::fuzz_target;
use rvdecode::{ActiveLowSignals, DecodeLatch, DecodedBundle, IsaConfig, LatchState, decode};

/// One clock cycle as seen on the wires.
#[derive(Arbitrary, Debug, Clone, Copy)]
struct FuzzCycle {
    word: u32,
    n_reset: bool,
    n_irdy: bool,
    n_stall: bool,
}

fuzz_target!(|cycles: Vec<FuzzCycle>| {
    let config = IsaConfig::rv32g();
    let mut latch = DecodeLatch::new(config);
    let mut expected = DecodedBundle::NOP;

    for (i, c) in cycles.iter().enumerate() {
        let wires = ActiveLowSignals {
            n_reset: c.n_reset,
            n_irdy: c.n_irdy,
            n_stall: c.n_stall,
        };
        let state = latch.step(c.word, wires.into());

        if !c.n_reset {
            assert_eq!(state, LatchState::Reset);
            expected = DecodedBundle::NOP;
        } else if !c.n_irdy && c.n_stall {
            assert_eq!(state, LatchState::Update);
            expected = decode(c.word, &config);
        } else {
            assert_eq!(state, LatchState::Hold);
        }

        assert_eq!(*latch.output(), expected);
        assert_eq!(latch.cycle(), i as u64 + 1);
    }
});
