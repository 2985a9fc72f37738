//! Scan command implementation.

use super::output::format_scan;
use super::{CliError, OutputFormat};
use rvdecode::IsaConfig;
use rvdecode::elf::load_code;
use rvdecode::scan::scan_words;
use std::fs;
use std::path::Path;
use std::time::Instant;

/// Execute the scan command.
///
/// # Errors
///
/// Returns an error if the ELF cannot be read or is not RV32.
pub(crate) fn execute(
    elf: &Path,
    isa: IsaConfig,
    limit: usize,
    threads: Option<usize>,
    format: OutputFormat,
) -> Result<(), CliError> {
    let elf_bytes = fs::read(elf)
        .map_err(|e| CliError::new(format!("Failed to read {}: {e}", elf.display())))?;
    let image = load_code(&elf_bytes)?;

    // Set thread pool size if specified
    if let Some(num_threads) = threads {
        rayon::ThreadPoolBuilder::new()
            .num_threads(num_threads)
            .build_global()
            .ok(); // Ignore error if already initialized
    }

    let start = Instant::now();
    let report = scan_words(&image.words, &isa, limit);
    log::debug!("scan took {:?}", start.elapsed());

    match format {
        OutputFormat::Text => {
            println!("{}: entry {:#010x}", elf.display(), image.entry);
            if image.rvc {
                println!("  warning: object uses compressed instructions");
            }
            print!("{}", format_scan(&report, &isa.to_string()));
        }
        OutputFormat::Json => {
            println!("{}", serde_json::to_string_pretty(&report)?);
        }
    }

    Ok(())
}
