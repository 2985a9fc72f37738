//! CLI command implementations for rvdecode.

pub(crate) mod decode;
pub(crate) mod scan;
pub(crate) mod trace;

mod output;

use clap::ValueEnum;
use log::LevelFilter;
use std::error::Error;
use std::fmt;

/// Output format shared by all commands.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub(crate) enum OutputFormat {
    /// Human-readable text output.
    Text,
    /// Machine-readable JSON output.
    Json,
}

/// Set up `env_logger` on stderr. `RUST_LOG` refines the level chosen by
/// `-v`.
pub(crate) fn init_logger(verbose: u8) {
    let level = match verbose {
        0 => LevelFilter::Warn,
        1 => LevelFilter::Debug,
        _ => LevelFilter::Trace,
    };
    let mut builder = env_logger::Builder::new();
    builder
        .format_timestamp(None)
        .format_level(true)
        .format_target(false)
        .filter_level(level);
    if let Ok(filters) = std::env::var("RUST_LOG") {
        builder.parse_filters(&filters);
    }
    builder.init();
}

/// CLI error type.
#[derive(Debug)]
pub(crate) struct CliError {
    message: String,
}

impl CliError {
    /// Create a new CLI error.
    pub(crate) fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}

impl fmt::Display for CliError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.message)
    }
}

impl Error for CliError {}

impl From<serde_json::Error> for CliError {
    fn from(e: serde_json::Error) -> Self {
        Self::new(format!("JSON output failed: {e}"))
    }
}

impl From<rvdecode::trace::TraceError> for CliError {
    fn from(e: rvdecode::trace::TraceError) -> Self {
        Self::new(e.to_string())
    }
}

impl From<rvdecode::elf::ElfError> for CliError {
    fn from(e: rvdecode::elf::ElfError) -> Self {
        Self::new(e.to_string())
    }
}
