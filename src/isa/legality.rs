//! funct3/funct7 legality tables per category.

use crate::config::IsaConfig;
use crate::error::{DecodeError, Extension};
use crate::isa::fields::Fields;
use crate::isa::opcode::{Category, FMT_D, FMT_S, FUNCT7_ALT, FUNCT7_BASE, FUNCT7_MULDIV, JAL};

// OP-FP funct5 selectors (bits[31:27]).
pub(crate) const FP_ADD: u8 = 0b00000;
pub(crate) const FP_SUB: u8 = 0b00001;
pub(crate) const FP_MUL: u8 = 0b00010;
pub(crate) const FP_DIV: u8 = 0b00011;
pub(crate) const FP_SGNJ: u8 = 0b00100;
pub(crate) const FP_MINMAX: u8 = 0b00101;
pub(crate) const FP_CVT_FMT: u8 = 0b01000;
pub(crate) const FP_SQRT: u8 = 0b01011;
pub(crate) const FP_CMP: u8 = 0b10100;
pub(crate) const FP_CVT_TO_INT: u8 = 0b11000;
pub(crate) const FP_CVT_FROM_INT: u8 = 0b11010;
pub(crate) const FP_MV_TO_INT: u8 = 0b11100;
pub(crate) const FP_MV_FROM_INT: u8 = 0b11110;

// Memory widths (funct3) shared by integer and FP loads/stores.
const WIDTH_W: u8 = 0b010;
const WIDTH_D: u8 = 0b011;

/// Check that the sub-selectors of `fields` are defined for `category`.
///
/// # Errors
///
/// [`DecodeError::UndefinedFunctSelector`] for reserved combinations and
/// [`DecodeError::ExtensionDisabled`] for encodings `config` turns off.
pub fn check(fields: Fields, category: Category, config: IsaConfig) -> Result<(), DecodeError> {
    let f3 = fields.funct3;
    let f7 = fields.funct7;

    let defined = match category {
        Category::AluRegister => {
            if f7 == FUNCT7_MULDIV && !config.m {
                return Err(DecodeError::ExtensionDisabled {
                    extension: Extension::M,
                });
            }
            match f7 {
                FUNCT7_BASE | FUNCT7_MULDIV => true,
                // SUB, SRA
                FUNCT7_ALT => matches!(f3, 0b000 | 0b101),
                _ => false,
            }
        }
        Category::AluImmediate => match f3 {
            // SLLI
            0b001 => f7 == FUNCT7_BASE,
            // SRLI, SRAI
            0b101 => matches!(f7, FUNCT7_BASE | FUNCT7_ALT),
            _ => true,
        },
        // LB, LH, LW, LBU, LHU
        Category::Load => matches!(f3, 0b000..=0b010 | 0b100 | 0b101),
        // SB, SH, SW
        Category::Store => matches!(f3, 0b000..=0b010),
        Category::Branch => !matches!(f3, 0b010 | 0b011),
        // JAL has no selector; JALR needs funct3 = 000.
        Category::Jump => fields.opcode == JAL || f3 == 0,
        Category::UpperImmediate => true,
        Category::FpuLoad | Category::FpuStore => {
            require_fp(config)?;
            match f3 {
                WIDTH_W => true,
                WIDTH_D => {
                    require_d(config)?;
                    true
                }
                _ => false,
            }
        }
        Category::FpuRegister => {
            require_fp(config)?;
            if fields.fmt() == FMT_D {
                require_d(config)?;
            }
            fp_register_defined(fields, config)?
        }
        Category::FpuFused => {
            require_fp(config)?;
            if fields.fmt() == FMT_D {
                require_d(config)?;
            }
            fields.fmt() <= FMT_D && rounding_mode_ok(f3)
        }
        // CSR and privileged encodings are only checked at the funct3 level.
        Category::System => f3 != 0b100,
        // FENCE, FENCE.I
        Category::Fence => matches!(f3, 0b000 | 0b001),
    };

    if defined {
        Ok(())
    } else {
        Err(DecodeError::UndefinedFunctSelector {
            opcode: fields.opcode,
            funct3: f3,
            funct7: f7,
        })
    }
}

fn require_fp(config: IsaConfig) -> Result<(), DecodeError> {
    if config.f {
        Ok(())
    } else {
        Err(DecodeError::ExtensionDisabled {
            extension: Extension::F,
        })
    }
}

fn require_d(config: IsaConfig) -> Result<(), DecodeError> {
    if config.d {
        Ok(())
    } else {
        Err(DecodeError::ExtensionDisabled {
            extension: Extension::D,
        })
    }
}

/// Static rounding modes 000..100 plus dynamic 111; 101 and 110 are reserved.
fn rounding_mode_ok(funct3: u8) -> bool {
    matches!(funct3, 0b000..=0b100 | 0b111)
}

/// OP-FP: funct5 picks the operation, funct3 is a rounding mode or a
/// sub-selector, and rs2 selects among conversion variants.
fn fp_register_defined(fields: Fields, config: IsaConfig) -> Result<bool, DecodeError> {
    let f3 = fields.funct3;
    let fmt = fields.fmt();
    let rs2 = fields.rs2;

    let defined = match fields.funct5() {
        FP_ADD | FP_SUB | FP_MUL | FP_DIV => rounding_mode_ok(f3),
        FP_SQRT => rs2 == 0 && rounding_mode_ok(f3),
        // FSGNJ, FSGNJN, FSGNJX and FLE, FLT, FEQ
        FP_SGNJ | FP_CMP => matches!(f3, 0b000..=0b010),
        // FMIN, FMAX
        FP_MINMAX => matches!(f3, 0b000 | 0b001),
        // FCVT.S.D (fmt S, rs2 = D) and FCVT.D.S (fmt D, rs2 = S)
        FP_CVT_FMT => match (fmt, rs2) {
            (FMT_S, 0b00001) => {
                require_d(config)?;
                rounding_mode_ok(f3)
            }
            (FMT_D, 0b00000) => rounding_mode_ok(f3),
            _ => false,
        },
        // FCVT.W.*, FCVT.WU.* and FCVT.*.W, FCVT.*.WU
        FP_CVT_TO_INT | FP_CVT_FROM_INT => rs2 <= 1 && rounding_mode_ok(f3),
        // FMV.X.W (single only on RV32) and FCLASS
        FP_MV_TO_INT => rs2 == 0 && (f3 == 0b001 || (f3 == 0b000 && fmt == FMT_S)),
        // FMV.W.X (single only on RV32)
        FP_MV_FROM_INT => rs2 == 0 && f3 == 0b000 && fmt == FMT_S,
        _ => false,
    };
    Ok(defined)
}
