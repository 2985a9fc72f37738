//! Cycle traces: scripted inputs for driving a [`DecodeLatch`].
//!
//! One cycle per line, `#` starts a comment:
//!
//! ```text
//! 0x00a58513          # accepted
//! 0x002081b3 stall    # held
//! -                   # no word presented
//! 0x002081b3 reset    # cleared
//! ```

use std::fmt;

use serde::Serialize;

use crate::decoder::{DecodeLatch, DecodedBundle, LatchState, Signals};

/// Inputs for one cycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Cycle {
    /// Word on the input, `None` when upstream has nothing ready.
    pub word: Option<u32>,
    /// Reset asserted.
    pub reset: bool,
    /// Stall asserted.
    pub stall: bool,
}

impl Cycle {
    /// Positive-logic signals for this cycle.
    #[must_use]
    pub fn signals(&self) -> Signals {
        Signals {
            reset_active: self.reset,
            input_valid: self.word.is_some(),
            stall_active: self.stall,
        }
    }
}

/// Result of one traced cycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct CycleReport {
    /// Cycle number, starting at 0.
    pub cycle: u64,
    /// Word presented this cycle.
    pub word: Option<u32>,
    /// State the latch entered.
    pub state: LatchState,
    /// Whether the word was consumed.
    pub accepted: bool,
    /// Latched output after the cycle.
    pub bundle: DecodedBundle,
}

/// Error for malformed trace lines.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TraceError {
    /// 1-based line number.
    pub line: usize,
    /// Description of the error.
    pub reason: String,
}

impl fmt::Display for TraceError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "trace line {}: {}", self.line, self.reason)
    }
}

impl std::error::Error for TraceError {}

/// Parse a hex instruction word, with or without `0x`.
///
/// # Errors
///
/// Returns a description if `text` is not a 32-bit hex number.
pub fn parse_word(text: &str) -> Result<u32, String> {
    let digits = text
        .strip_prefix("0x")
        .or_else(|| text.strip_prefix("0X"))
        .unwrap_or(text)
        .replace('_', "");
    // from_str_radix takes a leading sign; a word is bare hex digits only.
    if digits.is_empty() || !digits.bytes().all(|b| b.is_ascii_hexdigit()) {
        return Err(format!("bad word `{text}`: expected hex digits"));
    }
    u32::from_str_radix(&digits, 16).map_err(|e| format!("bad word `{text}`: {e}"))
}

/// Parse a whole trace.
///
/// # Errors
///
/// Returns the first malformed line.
pub fn parse_trace(text: &str) -> Result<Vec<Cycle>, TraceError> {
    let mut cycles = Vec::new();

    for (idx, raw) in text.lines().enumerate() {
        let line = raw.split('#').next().unwrap_or_default().trim();
        if line.is_empty() {
            continue;
        }

        let mut tokens = line.split_whitespace();
        let Some(first) = tokens.next() else {
            continue;
        };
        let word = if first == "-" {
            None
        } else {
            Some(parse_word(first).map_err(|reason| TraceError {
                line: idx + 1,
                reason,
            })?)
        };

        let mut cycle = Cycle {
            word,
            reset: false,
            stall: false,
        };
        for flag in tokens {
            match flag.to_ascii_lowercase().as_str() {
                "reset" => cycle.reset = true,
                "stall" => cycle.stall = true,
                other => {
                    return Err(TraceError {
                        line: idx + 1,
                        reason: format!("unknown flag `{other}`"),
                    });
                }
            }
        }
        cycles.push(cycle);
    }

    Ok(cycles)
}

/// Drive `latch` through `cycles`, reporting the output after each one.
pub fn run_trace(latch: &mut DecodeLatch, cycles: &[Cycle]) -> Vec<CycleReport> {
    cycles
        .iter()
        .map(|c| {
            let cycle = latch.cycle();
            let state = latch.step(c.word.unwrap_or(0), c.signals());
            CycleReport {
                cycle,
                word: c.word,
                state,
                accepted: latch.accepted(),
                bundle: *latch.output(),
            }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_word() {
        assert_eq!(parse_word("0x00a58513"), Ok(0x00A5_8513));
        assert_eq!(parse_word("00A58513"), Ok(0x00A5_8513));
        assert_eq!(parse_word("0x00a5_8513"), Ok(0x00A5_8513));
        assert!(parse_word("0x1_0000_0000").is_err());
        assert!(parse_word("xyz").is_err());
        assert!(parse_word("+13").is_err());
        assert!(parse_word("0x+13").is_err());
        assert!(parse_word("-1").is_err());
        assert!(parse_word("0x").is_err());
    }

    #[test]
    fn test_parse_trace() {
        let text = "# header\n0x00a58513\n\n0x002081b3 stall # held\n-\n0x002081b3 RESET\n";
        let cycles = parse_trace(text).unwrap();
        assert_eq!(cycles.len(), 4);
        assert_eq!(cycles[0].word, Some(0x00A5_8513));
        assert!(!cycles[0].stall && !cycles[0].reset);
        assert!(cycles[1].stall);
        assert_eq!(cycles[2].word, None);
        assert!(cycles[3].reset);
    }

    #[test]
    fn test_parse_trace_errors() {
        let err = parse_trace("0x13\n0x13 flush\n").unwrap_err();
        assert_eq!(err.line, 2);
        assert!(err.reason.contains("flush"));

        let err = parse_trace("zz\n").unwrap_err();
        assert_eq!(err.line, 1);
    }

    #[test]
    fn test_run_trace() {
        let cycles = parse_trace("0x00a58513\n0x002081b3 stall\n-\n0x002081b3\n- reset\n").unwrap();
        let mut latch = DecodeLatch::default();
        let reports = run_trace(&mut latch, &cycles);

        let states: Vec<_> = reports.iter().map(|r| r.state).collect();
        assert_eq!(
            states,
            vec![
                LatchState::Update,
                LatchState::Hold,
                LatchState::Hold,
                LatchState::Update,
                LatchState::Reset
            ]
        );
        assert_eq!(reports[1].bundle, reports[0].bundle);
        assert_eq!(reports[2].bundle, reports[0].bundle);
        assert_eq!(reports[3].bundle.reg_d, 3);
        assert_eq!(reports[4].bundle, DecodedBundle::NOP);
        assert_eq!(reports[4].cycle, 4);
        assert!(reports[0].accepted && !reports[1].accepted);
    }
}
