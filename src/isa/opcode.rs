//! Opcode table and format classification.

use serde::Serialize;

use crate::error::DecodeError;

// Major opcodes of RV32G.
pub(crate) const LOAD: u8 = 0b000_0011;
pub(crate) const LOAD_FP: u8 = 0b000_0111;
pub(crate) const MISC_MEM: u8 = 0b000_1111;
pub(crate) const OP_IMM: u8 = 0b001_0011;
pub(crate) const AUIPC: u8 = 0b001_0111;
pub(crate) const STORE: u8 = 0b010_0011;
pub(crate) const STORE_FP: u8 = 0b010_0111;
pub(crate) const OP: u8 = 0b011_0011;
pub(crate) const LUI: u8 = 0b011_0111;
pub(crate) const MADD: u8 = 0b100_0011;
pub(crate) const MSUB: u8 = 0b100_0111;
pub(crate) const NMSUB: u8 = 0b100_1011;
pub(crate) const NMADD: u8 = 0b100_1111;
pub(crate) const OP_FP: u8 = 0b101_0011;
pub(crate) const BRANCH: u8 = 0b110_0011;
pub(crate) const JALR: u8 = 0b110_0111;
pub(crate) const JAL: u8 = 0b110_1111;
pub(crate) const SYSTEM: u8 = 0b111_0011;

// funct7 bands under OP.
pub(crate) const FUNCT7_BASE: u8 = 0b000_0000;
pub(crate) const FUNCT7_ALT: u8 = 0b010_0000;
pub(crate) const FUNCT7_MULDIV: u8 = 0b000_0001;

// F/D `fmt` field values.
pub(crate) const FMT_S: u8 = 0b00;
pub(crate) const FMT_D: u8 = 0b01;

/// Instruction encoding format.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
pub enum Format {
    /// Register-register.
    R,
    /// 12-bit immediate.
    I,
    /// Store.
    S,
    /// Conditional branch.
    B,
    /// Upper immediate.
    U,
    /// Jump.
    J,
    /// Three-source fused multiply-add.
    R4,
}

/// Operation category, used to route the instruction to a functional unit.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
pub enum Category {
    /// Integer load.
    Load,
    /// Integer store.
    Store,
    /// Integer ALU with immediate operand.
    AluImmediate,
    /// Integer ALU register-register, including M-extension ops.
    AluRegister,
    /// Conditional branch.
    Branch,
    /// JAL and JALR.
    Jump,
    /// LUI and AUIPC.
    UpperImmediate,
    /// FLW/FLD.
    FpuLoad,
    /// FSW/FSD.
    FpuStore,
    /// OP-FP arithmetic, compare, convert and move.
    FpuRegister,
    /// FMADD/FMSUB/FNMSUB/FNMADD.
    FpuFused,
    /// ECALL/EBREAK and CSR access.
    System,
    /// FENCE and FENCE.I.
    Fence,
}

/// Opcode to `(Format, Category)`, indexed by the 7-bit opcode.
pub static OPCODE_TABLE: [Option<(Format, Category)>; 128] = build_table();

const fn build_table() -> [Option<(Format, Category)>; 128] {
    let mut t: [Option<(Format, Category)>; 128] = [None; 128];
    t[LOAD as usize] = Some((Format::I, Category::Load));
    t[STORE as usize] = Some((Format::S, Category::Store));
    t[OP_IMM as usize] = Some((Format::I, Category::AluImmediate));
    t[OP as usize] = Some((Format::R, Category::AluRegister));
    t[BRANCH as usize] = Some((Format::B, Category::Branch));
    t[JAL as usize] = Some((Format::J, Category::Jump));
    t[JALR as usize] = Some((Format::I, Category::Jump));
    t[LUI as usize] = Some((Format::U, Category::UpperImmediate));
    t[AUIPC as usize] = Some((Format::U, Category::UpperImmediate));
    t[LOAD_FP as usize] = Some((Format::I, Category::FpuLoad));
    t[STORE_FP as usize] = Some((Format::S, Category::FpuStore));
    t[OP_FP as usize] = Some((Format::R, Category::FpuRegister));
    t[MADD as usize] = Some((Format::R4, Category::FpuFused));
    t[MSUB as usize] = Some((Format::R4, Category::FpuFused));
    t[NMSUB as usize] = Some((Format::R4, Category::FpuFused));
    t[NMADD as usize] = Some((Format::R4, Category::FpuFused));
    t[SYSTEM as usize] = Some((Format::I, Category::System));
    t[MISC_MEM as usize] = Some((Format::I, Category::Fence));
    t
}

/// Classify an instruction by opcode.
///
/// Under OP, funct7 must select the base, alternate (SUB/SRA) or M-extension
/// band; under OP-FP and the fused opcodes, the `fmt` bits must select S or D.
/// Finer funct3/funct7 combinations are left to the legality checker.
///
/// # Errors
///
/// [`DecodeError::UnknownOpcode`] for opcodes outside the table and
/// [`DecodeError::UndefinedFunctSelector`] for a reserved funct7 band.
pub fn classify(opcode: u8, funct3: u8, funct7: u8) -> Result<(Format, Category), DecodeError> {
    let Some(class) = OPCODE_TABLE.get(usize::from(opcode)).copied().flatten() else {
        return Err(DecodeError::UnknownOpcode { opcode });
    };

    let selector_ok = match class.1 {
        Category::AluRegister => matches!(funct7, FUNCT7_BASE | FUNCT7_ALT | FUNCT7_MULDIV),
        Category::FpuRegister | Category::FpuFused => matches!(funct7 & 0b11, FMT_S | FMT_D),
        _ => true,
    };

    if selector_ok {
        Ok(class)
    } else {
        Err(DecodeError::UndefinedFunctSelector {
            opcode,
            funct3,
            funct7,
        })
    }
}
