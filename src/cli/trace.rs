//! Trace command implementation.

use super::output::format_cycle;
use super::{CliError, OutputFormat};
use rvdecode::trace::{parse_trace, run_trace};
use rvdecode::{DecodeLatch, IsaConfig, LatchState};
use std::fs;
use std::path::Path;

/// Execute the trace command.
///
/// # Errors
///
/// Returns an error if the trace cannot be read or parsed.
pub(crate) fn execute(file: &Path, isa: IsaConfig, format: OutputFormat) -> Result<(), CliError> {
    let text = fs::read_to_string(file)
        .map_err(|e| CliError::new(format!("Failed to read {}: {e}", file.display())))?;
    let cycles = parse_trace(&text)?;

    let mut latch = DecodeLatch::new(isa);
    let reports = run_trace(&mut latch, &cycles);

    match format {
        OutputFormat::Text => {
            println!("# {} ({} cycles)", latch.config(), cycles.len());
            println!("{:>6}  {:<10}  {:<6}  output", "cycle", "word", "state");
            for report in &reports {
                println!("{}", format_cycle(report));
            }
            let accepted = reports
                .iter()
                .filter(|r| r.state == LatchState::Update)
                .count();
            let illegal = reports
                .iter()
                .filter(|r| r.state == LatchState::Update && r.bundle.illegal)
                .count();
            println!();
            println!(
                "{} cycles, {accepted} accepted, {illegal} illegal",
                reports.len()
            );
        }
        OutputFormat::Json => {
            // One object per line.
            for report in &reports {
                println!("{}", serde_json::to_string(report)?);
            }
        }
    }

    Ok(())
}
