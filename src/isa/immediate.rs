//! Immediate assembly for each instruction format.
//!
//! Sign extension reinterprets the assembled bits as `i32`.

#![allow(clippy::cast_possible_wrap)]

use crate::isa::opcode::Format;

/// Build the sign-extended immediate of `word` for `format`.
///
/// R and R4 carry no immediate and yield 0.
#[must_use]
pub fn build_immediate(format: Format, word: u32) -> i32 {
    match format {
        Format::I => i_imm(word),
        Format::S => s_imm(word),
        Format::B => b_imm(word),
        Format::U => u_imm(word),
        Format::J => j_imm(word),
        Format::R | Format::R4 => 0,
    }
}

/// imm[11:0] = inst[31:20]
fn i_imm(word: u32) -> i32 {
    (word as i32) >> 20
}

/// imm[11:5] = inst[31:25], imm[4:0] = inst[11:7]
fn s_imm(word: u32) -> i32 {
    let imm11_5 = (word >> 25) & 0x7F;
    let imm4_0 = (word >> 7) & 0x1F;
    let imm = (imm11_5 << 5) | imm4_0;
    // Sign-extend from bit 11
    ((imm as i32) << 20) >> 20
}

/// imm[12|10:5|4:1|11] = inst[31|30:25|11:8|7]
fn b_imm(word: u32) -> i32 {
    let imm12 = (word >> 31) & 0x1;
    let imm11 = (word >> 7) & 0x1;
    let imm10_5 = (word >> 25) & 0x3F;
    let imm4_1 = (word >> 8) & 0xF;
    let imm = (imm12 << 12) | (imm11 << 11) | (imm10_5 << 5) | (imm4_1 << 1);
    // Sign-extend from bit 12
    ((imm as i32) << 19) >> 19
}

/// imm[31:12] = inst[31:12]
fn u_imm(word: u32) -> i32 {
    (word & 0xFFFF_F000) as i32
}

/// imm[20|10:1|11|19:12] = inst[31|30:21|20|19:12]
fn j_imm(word: u32) -> i32 {
    let imm20 = (word >> 31) & 0x1;
    let imm19_12 = (word >> 12) & 0xFF;
    let imm11 = (word >> 20) & 0x1;
    let imm10_1 = (word >> 21) & 0x3FF;
    let imm = (imm20 << 20) | (imm19_12 << 12) | (imm11 << 11) | (imm10_1 << 1);
    // Sign-extend from bit 20
    ((imm as i32) << 11) >> 11
}
