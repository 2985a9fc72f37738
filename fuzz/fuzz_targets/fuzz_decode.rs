#![no_main]

//! Decoder fuzzer.
//!
//! Any 32-bit word must decode without panicking, and the bundle must be
//! internally consistent:
//! 1. Illegal bundles carry no routing flags
//! 2. ALU and FPU flags are exclusive
//! 3. `decode` and `decode_checked` agree
//! 4. A narrower ISA never accepts what rv32g rejects

use arbitrary::Arbitrary;
use libfuzzer_sys::fuzz_target;
use rvdecode::{DecodedBundle, IsaConfig, decode, decode_checked};

/// Structured input: a word plus an enabled extension set.
#[derive(Arbitrary, Debug)]
struct DecodeInput {
    word: u32,
    m: bool,
    f: bool,
    d: bool,
}

fuzz_target!(|input: DecodeInput| {
    let full = IsaConfig::rv32g();
    let sub = IsaConfig {
        m: input.m,
        f: input.f || input.d,
        d: input.d,
    };

    let bundle = decode(input.word, &full);
    match decode_checked(input.word, &full) {
        Ok(checked) => assert_eq!(checked, bundle),
        Err(_) => assert_eq!(bundle, DecodedBundle::ILLEGAL),
    }

    if bundle.illegal {
        assert!(!bundle.is_alu_op && !bundle.is_fpu_op && !bundle.fpu_is_double);
        assert!(decode(input.word, &sub).illegal);
    } else {
        assert!(bundle.format.is_some() && bundle.category.is_some());
        assert!(!(bundle.is_alu_op && bundle.is_fpu_op));
        assert!(!bundle.fpu_is_double || bundle.is_fpu_op);
    }

    let narrow = decode(input.word, &sub);
    if !narrow.illegal {
        assert_eq!(narrow, bundle);
    }
});
