//! Decode command implementation.

use super::output::{JsonDecode, format_decode};
use super::{CliError, OutputFormat};
use rvdecode::trace::parse_word;
use rvdecode::{IsaConfig, decode_checked};

/// Execute the decode command.
///
/// # Errors
///
/// Returns an error if a word is not valid hex.
pub(crate) fn execute(
    words: &[String],
    isa: IsaConfig,
    format: OutputFormat,
) -> Result<(), CliError> {
    let parsed = words
        .iter()
        .map(|w| parse_word(w).map_err(CliError::new))
        .collect::<Result<Vec<_>, _>>()?;

    log::debug!("decoding {} words as {isa}", parsed.len());

    match format {
        OutputFormat::Text => {
            for word in parsed {
                let result = decode_checked(word, &isa);
                println!("{}", format_decode(word, &result));
            }
        }
        OutputFormat::Json => {
            let results: Vec<_> = parsed
                .iter()
                .map(|&word| JsonDecode::new(word, &decode_checked(word, &isa)))
                .collect();
            println!("{}", serde_json::to_string_pretty(&results)?);
        }
    }

    Ok(())
}
