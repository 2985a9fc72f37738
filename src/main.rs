//! rvdecode CLI - decode RV32G instruction words, replay pipeline traces and
//! scan ELF code.

// Allow print in the CLI binary
#![allow(clippy::print_stdout, clippy::print_stderr)]
#![cfg_attr(test, allow(clippy::unwrap_used))]

mod cli;

use clap::{Parser, Subcommand};
use rvdecode::IsaConfig;
use std::process::ExitCode;

/// rvdecode - RV32G instruction decode stage
#[derive(Parser, Debug)]
#[command(name = "rvdecode")]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Increase log verbosity (-v debug, -vv trace)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    #[command(subcommand)]
    command: Commands,
}

/// Available commands
#[derive(Subcommand, Debug)]
enum Commands {
    /// Decode one or more hex instruction words
    Decode {
        /// Instruction words (hex, `0x` optional)
        #[arg(required = true)]
        words: Vec<String>,

        /// Enabled ISA (e.g. rv32g, rv32im, rv32imf)
        #[arg(long, default_value = "rv32g")]
        isa: IsaConfig,

        /// Output format: text or json
        #[arg(short, long, default_value = "text")]
        format: cli::OutputFormat,
    },

    /// Replay a cycle trace through the decode output register
    Trace {
        /// Trace file (one `<word|-> [reset] [stall]` per line)
        #[arg(required = true)]
        file: std::path::PathBuf,

        /// Enabled ISA (e.g. rv32g, rv32im, rv32imf)
        #[arg(long, default_value = "rv32g")]
        isa: IsaConfig,

        /// Output format: text or json
        #[arg(short, long, default_value = "text")]
        format: cli::OutputFormat,
    },

    /// Decode every word of an ELF's executable sections
    Scan {
        /// RV32 ELF file
        #[arg(required = true)]
        elf: std::path::PathBuf,

        /// Enabled ISA (e.g. rv32g, rv32im, rv32imf)
        #[arg(long, default_value = "rv32g")]
        isa: IsaConfig,

        /// Maximum illegal words to list (default: 16)
        #[arg(short, long, default_value = "16")]
        limit: usize,

        /// Parallel threads (default: CPU count)
        #[arg(short = 'j', long)]
        threads: Option<usize>,

        /// Output format: text or json
        #[arg(short, long, default_value = "text")]
        format: cli::OutputFormat,
    },
}

fn main() -> ExitCode {
    let args = Args::parse();
    cli::init_logger(args.verbose);

    let result = match args.command {
        Commands::Decode { words, isa, format } => cli::decode::execute(&words, isa, format),

        Commands::Trace { file, isa, format } => cli::trace::execute(&file, isa, format),

        Commands::Scan {
            elf,
            isa,
            limit,
            threads,
            format,
        } => cli::scan::execute(&elf, isa, limit, threads, format),
    };

    match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("Error: {e}");
            ExitCode::FAILURE
        }
    }
}
