//! Benchmarks for the decode stage.

#![allow(missing_docs)] // Benchmark macros generate undocumented functions
#![allow(clippy::unreadable_literal)] // Instruction encodings are standard hex

use std::hint::black_box;

use criterion::{Criterion, criterion_group, criterion_main};
use rvdecode::{DecodeLatch, IsaConfig, Signals, decode, decode_checked};

// Sample instructions
const INSTRUCTIONS: [u32; 8] = [
    0x00108093, // addi x1, x1, 1
    0x002081B3, // add x3, x1, x2
    0x00208463, // beq x1, x2, 8
    0x0000006F, // jal x0, 0
    0x0220C1B3, // div x3, x1, x2
    0x023170D3, // fadd.d f1, f2, f3, dyn
    0x203100C3, // fmadd.s f1, f2, f3, f4
    0xFFFFFFFF, // illegal
];

fn bench_decode(c: &mut Criterion) {
    let config = IsaConfig::rv32g();

    c.bench_function("decode_1000", |b| {
        b.iter(|| {
            for _ in 0..125 {
                for inst in &INSTRUCTIONS {
                    let _ = black_box(decode(black_box(*inst), &config));
                }
            }
        });
    });

    c.bench_function("decode_checked_1000", |b| {
        b.iter(|| {
            for _ in 0..125 {
                for inst in &INSTRUCTIONS {
                    let _ = black_box(decode_checked(black_box(*inst), &config));
                }
            }
        });
    });
}

fn bench_latch(c: &mut Criterion) {
    let mut latch = DecodeLatch::default();
    let pattern = [
        Signals::accept(),
        Signals::stall(),
        Signals::accept(),
        Signals::idle(),
    ];

    c.bench_function("latch_step_1000", |b| {
        b.iter(|| {
            for i in 0..1000usize {
                let word = INSTRUCTIONS[i % INSTRUCTIONS.len()];
                let _ = black_box(latch.step(word, pattern[i % pattern.len()]));
            }
        });
    });
}

fn bench_sweep(c: &mut Criterion) {
    let config = IsaConfig::rv32g();

    // Spread of words across every opcode.
    c.bench_function("decode_sweep_64k", |b| {
        b.iter(|| {
            let mut legal = 0u32;
            for i in 0..65536u32 {
                let word = i.wrapping_mul(0x9E37_79B1);
                if !decode(word, &config).illegal {
                    legal += 1;
                }
            }
            black_box(legal)
        });
    });
}

criterion_group!(benches, bench_decode, bench_latch, bench_sweep);
criterion_main!(benches);
