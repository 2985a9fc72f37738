//! Output formatting utilities for CLI.

use rvdecode::scan::ScanReport;
use rvdecode::trace::CycleReport;
use rvdecode::{DecodeError, DecodedBundle, RegConf};
use serde::Serialize;
use std::fmt::Write;

/// JSON-serializable decode result.
#[derive(Debug, Serialize)]
pub(super) struct JsonDecode {
    /// Instruction word as hex.
    pub(super) word: String,
    /// Decoded bundle.
    pub(super) bundle: DecodedBundle,
    /// Reason the word is illegal (null if legal).
    pub(super) error: Option<String>,
}

impl JsonDecode {
    /// Create from a decode result.
    pub(super) fn new(word: u32, result: &Result<DecodedBundle, DecodeError>) -> Self {
        Self {
            word: format!("{word:#010x}"),
            bundle: result.unwrap_or(DecodedBundle::ILLEGAL),
            error: result.err().map(|e| e.to_string()),
        }
    }
}

/// Register operands named by `reg_conf`, e.g. `rd=x10 rs1=x11`.
fn format_registers(bundle: &DecodedBundle) -> String {
    let conf = bundle.reg_conf;
    let mut regs = Vec::new();
    if conf.has_rd() {
        regs.push(format!("rd={}", bundle.reg_d));
    }
    if conf.has_rs1() {
        regs.push(format!("rs1={}", bundle.reg_sa));
    }
    if conf.has_rs2() {
        regs.push(format!("rs2={}", bundle.reg_sb));
    }
    if conf.has_rs3() {
        regs.push(format!("rs3={}", bundle.reg_sc));
    }
    if conf == RegConf::None {
        regs.push("-".to_string());
    }
    regs.join(" ")
}

/// Routing flags, e.g. `alu` or `fpu.d`.
fn format_unit(bundle: &DecodedBundle) -> &'static str {
    match (bundle.is_alu_op, bundle.is_fpu_op, bundle.fpu_is_double) {
        (true, _, _) => "alu",
        (_, true, true) => "fpu.d",
        (_, true, false) => "fpu.s",
        _ => "-",
    }
}

/// One-line description of a bundle.
pub(super) fn format_bundle(bundle: &DecodedBundle) -> String {
    if bundle.illegal {
        return "ILLEGAL".to_string();
    }
    let (Some(format), Some(category)) = (bundle.format, bundle.category) else {
        return "NOP".to_string();
    };
    format!(
        "{category:?} ({format:?}) {} imm={} unit={} funct3={:#05b} funct7={:#09b}",
        format_registers(bundle),
        bundle.immediate,
        format_unit(bundle),
        bundle.funct3,
        bundle.funct7
    )
}

/// Text line for a decode result.
pub(super) fn format_decode(word: u32, result: &Result<DecodedBundle, DecodeError>) -> String {
    match result {
        Ok(bundle) => format!("{word:#010x}  {}", format_bundle(bundle)),
        Err(e) => format!("{word:#010x}  ILLEGAL ({e})"),
    }
}

/// Text line for a traced cycle.
pub(super) fn format_cycle(report: &CycleReport) -> String {
    let word = report
        .word
        .map_or_else(|| "-".to_string(), |w| format!("{w:#010x}"));
    format!(
        "{:>6}  {word:<10}  {:<6}  {}",
        report.cycle,
        format!("{:?}", report.state),
        format_bundle(&report.bundle)
    )
}

/// Text summary of a scan.
pub(super) fn format_scan(report: &ScanReport, isa: &str) -> String {
    let mut output = String::new();

    let _ = writeln!(output, "Scan ({isa})");
    let _ = writeln!(output, "  Words:   {}", report.total);
    let _ = writeln!(
        output,
        "  Illegal: {} ({:.2}% legal)",
        report.illegal,
        report.legal_ratio() * 100.0
    );
    let _ = writeln!(
        output,
        "  Double-precision FPU ops: {}",
        report.double_precision
    );
    output.push('\n');

    for (category, count) in &report.by_category {
        let _ = writeln!(output, "  {:<16} {count}", format!("{category:?}"));
    }

    if !report.first_illegal.is_empty() {
        output.push('\n');
        let _ = writeln!(output, "  First illegal words:");
        for w in &report.first_illegal {
            let _ = writeln!(
                output,
                "    {:#010x}: {:#010x}  {}",
                w.addr, w.word, w.reason
            );
        }
    }

    output
}

#[cfg(test)]
mod tests {
    use super::*;
    use rvdecode::{IsaConfig, decode_checked};

    #[test]
    fn test_format_decode_legal() {
        let result = decode_checked(0x00A5_8513, &IsaConfig::rv32g());
        let line = format_decode(0x00A5_8513, &result);
        assert!(line.starts_with("0x00a58513"));
        assert!(line.contains("AluImmediate (I)"));
        assert!(line.contains("rd=10 rs1=11"));
        assert!(line.contains("imm=10"));
        assert!(line.contains("unit=alu"));
    }

    #[test]
    fn test_format_decode_illegal() {
        let result = decode_checked(0x0000_007F, &IsaConfig::rv32g());
        let line = format_decode(0x0000_007F, &result);
        assert!(line.contains("ILLEGAL (unknown opcode"));
    }

    #[test]
    fn test_format_bundle_nop() {
        assert_eq!(format_bundle(&DecodedBundle::NOP), "NOP");
        assert_eq!(format_bundle(&DecodedBundle::ILLEGAL), "ILLEGAL");
    }

    #[test]
    fn test_json_decode() {
        let result = decode_checked(0xFFFF_FFFF, &IsaConfig::rv32g());
        let json = serde_json::to_string(&JsonDecode::new(0xFFFF_FFFF, &result)).unwrap();
        assert!(json.contains("\"word\":\"0xffffffff\""));
        assert!(json.contains("\"illegal\":true"));
        assert!(json.contains("unknown opcode"));
    }
}
