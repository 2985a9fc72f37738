//! Combinational decode and the output latch.

mod bundle;
mod latch;

pub use bundle::{DecodedBundle, RegConf};
pub use latch::{ActiveLowSignals, DecodeLatch, LatchState, Signals};

use crate::config::IsaConfig;
use crate::error::DecodeError;
use crate::isa::opcode::{Category, FMT_D};
use crate::isa::{Fields, build_immediate, check, classify};

/// Decode `word` into a bundle. Illegal words yield
/// [`DecodedBundle::ILLEGAL`].
#[must_use]
pub fn decode(word: u32, config: &IsaConfig) -> DecodedBundle {
    match decode_checked(word, config) {
        Ok(bundle) => bundle,
        Err(err) => {
            log::debug!("illegal instruction {word:#010x}: {err}");
            DecodedBundle::ILLEGAL
        }
    }
}

/// Decode `word`, keeping the reason when it is illegal.
///
/// # Errors
///
/// Returns the [`DecodeError`] that makes `word` illegal under `config`.
pub fn decode_checked(word: u32, config: &IsaConfig) -> Result<DecodedBundle, DecodeError> {
    let fields = Fields::extract(word);
    let (format, category) = classify(fields.opcode, fields.funct3, fields.funct7)?;
    check(fields, category, *config)?;

    let is_fpu_op = matches!(category, Category::FpuRegister | Category::FpuFused);

    Ok(DecodedBundle {
        illegal: false,
        reg_d: fields.rd,
        reg_sa: fields.rs1,
        reg_sb: fields.rs2,
        reg_sc: fields.rs3,
        reg_conf: RegConf::for_instruction(fields, category),
        immediate: build_immediate(format, word),
        is_alu_op: matches!(category, Category::AluImmediate | Category::AluRegister),
        is_fpu_op,
        fpu_is_double: is_fpu_op && fields.fmt() == FMT_D,
        format: Some(format),
        category: Some(category),
        funct3: fields.funct3,
        funct7: fields.funct7,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::isa::Format;

    fn rv32g(word: u32) -> DecodedBundle {
        decode(word, &IsaConfig::rv32g())
    }

    #[test]
    fn test_decode_addi() {
        // addi x10, x11, 10
        let b = rv32g(0x00A5_8513);
        assert!(!b.illegal);
        assert_eq!(b.format, Some(Format::I));
        assert_eq!(b.category, Some(Category::AluImmediate));
        assert_eq!(b.reg_d, 10);
        assert_eq!(b.reg_sa, 11);
        assert_eq!(b.immediate, 10);
        assert_eq!(b.reg_conf, RegConf::RdRs1);
        assert!(b.is_alu_op);
        assert!(!b.is_fpu_op);
    }

    #[test]
    fn test_decode_add() {
        // add x3, x1, x2
        let b = rv32g(0x0020_81B3);
        assert_eq!(b.category, Some(Category::AluRegister));
        assert_eq!((b.reg_d, b.reg_sa, b.reg_sb), (3, 1, 2));
        assert_eq!(b.reg_conf, RegConf::RdRs1Rs2);
        assert_eq!(b.immediate, 0);
        assert!(b.is_alu_op);
    }

    #[test]
    fn test_decode_mul_subcode() {
        // mul x3, x1, x2
        let b = rv32g(0x0220_81B3);
        assert!(b.is_alu_op);
        assert_eq!(b.funct7, 0b000_0001);
        assert_eq!(b.funct3, 0);
    }

    #[test]
    fn test_decode_undefined_opcode() {
        assert_eq!(rv32g(0x0000_007F), DecodedBundle::ILLEGAL);
        assert_eq!(rv32g(0xFFFF_FFFF), DecodedBundle::ILLEGAL);
        assert_eq!(
            decode_checked(0x0000_007F, &IsaConfig::rv32g()),
            Err(DecodeError::UnknownOpcode { opcode: 0x7F })
        );
    }

    #[test]
    fn test_decode_reserved_funct7() {
        // opcode OP, funct3 000, funct7 0000010
        let b = rv32g(0x0420_81B3);
        assert!(b.illegal);
        assert_eq!(b.reg_conf, RegConf::None);
    }

    #[test]
    fn test_decode_store_and_branch() {
        // sw x2, 8(x1)
        let sw = rv32g(0x0020_A423);
        assert_eq!(sw.category, Some(Category::Store));
        assert_eq!(sw.reg_conf, RegConf::Rs1Rs2NoRd);
        assert_eq!(sw.immediate, 8);
        assert!(!sw.is_alu_op && !sw.is_fpu_op);

        // beq x1, x2, 8
        let beq = rv32g(0x0020_8463);
        assert_eq!(beq.category, Some(Category::Branch));
        assert_eq!(beq.format, Some(Format::B));
        assert_eq!(beq.immediate, 8);
    }

    #[test]
    fn test_decode_jumps() {
        let jal = rv32g(0x0000_00EF); // jal x1, 0
        assert_eq!(jal.reg_conf, RegConf::RdOnly);
        assert_eq!(jal.format, Some(Format::J));
        let jalr = rv32g(0x0000_8067); // jalr x0, 0(x1)
        assert_eq!(jalr.reg_conf, RegConf::RdRs1);
        assert_eq!(jalr.format, Some(Format::I));
        assert!(!jal.is_alu_op && !jalr.is_alu_op);
    }

    #[test]
    fn test_decode_lui() {
        let b = rv32g(0x1234_50B7); // lui x1, 0x12345
        assert_eq!(b.category, Some(Category::UpperImmediate));
        assert_eq!(b.reg_conf, RegConf::RdOnly);
        assert_eq!(b.immediate, 0x1234_5000);
    }

    #[test]
    fn test_decode_fp() {
        let fadd_d = rv32g(0x0231_70D3); // fadd.d f1, f2, f3, dyn
        assert!(fadd_d.is_fpu_op);
        assert!(fadd_d.fpu_is_double);
        assert!(!fadd_d.is_alu_op);
        assert_eq!(fadd_d.reg_conf, RegConf::RdRs1Rs2);

        let fadd_s = rv32g(0x0031_00D3);
        assert!(fadd_s.is_fpu_op);
        assert!(!fadd_s.fpu_is_double);

        let fmadd = rv32g(0x2231_00C3); // fmadd.d f1, f2, f3, f4
        assert_eq!(fmadd.format, Some(Format::R4));
        assert_eq!(fmadd.reg_conf, RegConf::RdRs1Rs2Rs3);
        assert_eq!(fmadd.reg_sc, 4);
        assert!(fmadd.fpu_is_double);
        assert_eq!(fmadd.immediate, 0);

        let fld = rv32g(0x0080_B087); // fld f1, 8(x1)
        assert_eq!(fld.category, Some(Category::FpuLoad));
        assert!(!fld.is_fpu_op && !fld.fpu_is_double);
        assert_eq!(fld.immediate, 8);
    }

    #[test]
    fn test_decode_respects_config() {
        let rv32i = IsaConfig::rv32i();
        assert!(decode(0x0220_81B3, &rv32i).illegal);
        assert!(decode(0x0031_00D3, &rv32i).illegal);
        assert!(!decode(0x0020_81B3, &rv32i).illegal);
    }
}
