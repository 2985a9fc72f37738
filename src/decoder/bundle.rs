//! The decoded bundle handed to execution units.

use serde::Serialize;

use crate::isa::Fields;
use crate::isa::legality::{FP_ADD, FP_CMP, FP_DIV, FP_MINMAX, FP_MUL, FP_SGNJ, FP_SUB};
use crate::isa::opcode::{Category, Format, JAL};

/// Which register fields of a bundle are meaningful.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
pub enum RegConf {
    /// No register operands (illegal, reset, ECALL/EBREAK, FENCE).
    #[default]
    None,
    /// `rd` only.
    RdOnly,
    /// `rd` and `rs1`.
    RdRs1,
    /// `rd`, `rs1` and `rs2`.
    RdRs1Rs2,
    /// `rs1` and `rs2`, no destination.
    Rs1Rs2NoRd,
    /// `rd`, `rs1`, `rs2` and `rs3`.
    RdRs1Rs2Rs3,
}

impl RegConf {
    /// Register configuration of a legal instruction.
    #[must_use]
    pub fn for_instruction(fields: Fields, category: Category) -> Self {
        match category {
            Category::UpperImmediate => RegConf::RdOnly,
            Category::Jump => {
                if fields.opcode == JAL {
                    RegConf::RdOnly
                } else {
                    RegConf::RdRs1
                }
            }
            Category::Load | Category::FpuLoad | Category::AluImmediate => RegConf::RdRs1,
            Category::AluRegister => RegConf::RdRs1Rs2,
            Category::Store | Category::FpuStore | Category::Branch => RegConf::Rs1Rs2NoRd,
            Category::FpuRegister => match fields.funct5() {
                FP_ADD | FP_SUB | FP_MUL | FP_DIV | FP_SGNJ | FP_MINMAX | FP_CMP => {
                    RegConf::RdRs1Rs2
                }
                // Unary ops: rs2 is a sub-selector.
                _ => RegConf::RdRs1,
            },
            Category::FpuFused => RegConf::RdRs1Rs2Rs3,
            Category::System => match fields.funct3 {
                0b001..=0b011 => RegConf::RdRs1,
                // CSR immediate forms keep a zero-extended uimm in rs1.
                0b101..=0b111 => RegConf::RdOnly,
                _ => RegConf::None,
            },
            Category::Fence => RegConf::None,
        }
    }

    /// Whether `rd` is meaningful.
    #[must_use]
    pub const fn has_rd(self) -> bool {
        matches!(
            self,
            RegConf::RdOnly | RegConf::RdRs1 | RegConf::RdRs1Rs2 | RegConf::RdRs1Rs2Rs3
        )
    }

    /// Whether `rs1` is meaningful.
    #[must_use]
    pub const fn has_rs1(self) -> bool {
        matches!(
            self,
            RegConf::RdRs1 | RegConf::RdRs1Rs2 | RegConf::Rs1Rs2NoRd | RegConf::RdRs1Rs2Rs3
        )
    }

    /// Whether `rs2` is meaningful.
    #[must_use]
    pub const fn has_rs2(self) -> bool {
        matches!(
            self,
            RegConf::RdRs1Rs2 | RegConf::Rs1Rs2NoRd | RegConf::RdRs1Rs2Rs3
        )
    }

    /// Whether `rs3` is meaningful.
    #[must_use]
    pub const fn has_rs3(self) -> bool {
        matches!(self, RegConf::RdRs1Rs2Rs3)
    }
}

/// Control fields produced by one decode.
///
/// # Field Conventions
/// - `reg_d`, `reg_sa`, `reg_sb`, `reg_sc`: rd, rs1, rs2, rs3 (0-31); only
///   those named by `reg_conf` are meaningful
/// - `immediate`: sign-extended, 0 for R/R4
/// - `funct3`, `funct7`: sub-operation selectors forwarded to the
///   functional unit
#[allow(clippy::struct_excessive_bools)] // one flag per hardware control line
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
pub struct DecodedBundle {
    /// The word is not a defined RV32G instruction.
    pub illegal: bool,
    /// Destination register.
    pub reg_d: u8,
    /// First source register.
    pub reg_sa: u8,
    /// Second source register.
    pub reg_sb: u8,
    /// Third source register (fused multiply-add).
    pub reg_sc: u8,
    /// Which register fields are valid.
    pub reg_conf: RegConf,
    /// Sign-extended immediate.
    pub immediate: i32,
    /// Route to the integer ALU.
    pub is_alu_op: bool,
    /// Route to the FPU.
    pub is_fpu_op: bool,
    /// FPU operation works on doubles.
    pub fpu_is_double: bool,
    /// Encoding format.
    pub format: Option<Format>,
    /// Operation category.
    pub category: Option<Category>,
    /// funct3 subcode.
    pub funct3: u8,
    /// funct7 subcode.
    pub funct7: u8,
}

impl DecodedBundle {
    /// All-clear bundle latched on reset; executes as a no-op.
    pub const NOP: Self = Self {
        illegal: false,
        reg_d: 0,
        reg_sa: 0,
        reg_sb: 0,
        reg_sc: 0,
        reg_conf: RegConf::None,
        immediate: 0,
        is_alu_op: false,
        is_fpu_op: false,
        fpu_is_double: false,
        format: None,
        category: None,
        funct3: 0,
        funct7: 0,
    };

    /// Bundle for an illegal word: the no-op with `illegal` raised.
    pub const ILLEGAL: Self = Self {
        illegal: true,
        ..Self::NOP
    };

    /// Whether this bundle performs no work downstream.
    #[must_use]
    pub fn is_nop(&self) -> bool {
        *self == Self::NOP || *self == Self::ILLEGAL
    }
}
