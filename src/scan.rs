//! Bulk decoding of code images.
//!
//! Decode is pure, so words are decoded in parallel with rayon and tallied
//! in address order afterwards.

use std::collections::BTreeMap;

use rayon::prelude::*;
use serde::Serialize;

use crate::config::IsaConfig;
use crate::decoder::decode_checked;
use crate::elf::CodeWord;
use crate::isa::Category;

/// An illegal word found by a scan.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct IllegalWord {
    /// Virtual address.
    pub addr: u32,
    /// Instruction word.
    pub word: u32,
    /// Why it is illegal.
    pub reason: String,
}

/// Summary of a scan.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ScanReport {
    /// Words decoded.
    pub total: u64,
    /// Words that decoded illegal.
    pub illegal: u64,
    /// Legal words per category.
    pub by_category: BTreeMap<Category, u64>,
    /// Legal FPU words operating on doubles.
    pub double_precision: u64,
    /// The first illegal words in address order.
    pub first_illegal: Vec<IllegalWord>,
}

impl ScanReport {
    /// Fraction of words that decoded legal, 1.0 for an empty scan.
    #[must_use]
    #[allow(clippy::cast_precision_loss)]
    pub fn legal_ratio(&self) -> f64 {
        if self.total == 0 {
            1.0
        } else {
            (self.total - self.illegal) as f64 / self.total as f64
        }
    }
}

/// Decode every word under `config`, keeping at most `limit` illegal
/// examples.
#[must_use]
pub fn scan_words(words: &[CodeWord], config: &IsaConfig, limit: usize) -> ScanReport {
    let decoded: Vec<_> = words
        .par_iter()
        .map(|cw| (cw, decode_checked(cw.word, config)))
        .collect();

    let mut report = ScanReport::default();
    for (cw, result) in decoded {
        report.total += 1;
        match result {
            Ok(bundle) => {
                if let Some(category) = bundle.category {
                    *report.by_category.entry(category).or_insert(0) += 1;
                }
                if bundle.fpu_is_double {
                    report.double_precision += 1;
                }
            }
            Err(err) => {
                report.illegal += 1;
                if report.first_illegal.len() < limit {
                    report.first_illegal.push(IllegalWord {
                        addr: cw.addr,
                        word: cw.word,
                        reason: err.to_string(),
                    });
                }
            }
        }
    }

    log::debug!("scanned {} words, {} illegal", report.total, report.illegal);
    report
}
