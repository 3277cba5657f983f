//! The `encrypt` and `attack` commands.
//!
//! Each command takes already-read input text and returns what should be
//! printed on stdout, so the binary stays a thin wrapper around file access.

use serde::Serialize;
use tracing::info;

use crate::config::{Config, OutputFormat};
use crate::error::CliError;
use enigma_core::alphabet::sanitize;
use enigma_core::{HillClimbAttack, RotorPositionSearch, SearchOutcome, TrigramTable};

/// Encrypt (or decrypt) `text` with the configured machine.
pub fn encrypt(config: &Config, text: &str) -> Result<String, CliError> {
    let plaintext = sanitize(text);
    let mut machine = config.machine_config()?.build()?;
    let ciphertext = machine.encode_text(&plaintext)?;
    info!(letters = ciphertext.len(), windows = %machine.windows(), "Encrypted");

    Ok(match config.output {
        OutputFormat::Text => ciphertext,
        OutputFormat::Json => serde_json::to_string_pretty(&EncryptOutput {
            ciphertext: &ciphertext,
        })?,
    })
}

/// Recover rotor choice, starting positions and plugboard from `text`.
///
/// Only surrounding whitespace is stripped; any other byte outside A-Z fails
/// the search with `InvalidSymbol`.
pub fn attack(config: &Config, trigrams: &TrigramTable, text: &str) -> Result<String, CliError> {
    let ciphertext = text.trim();
    let space = config.search_space()?;
    info!(
        letters = ciphertext.len(),
        candidates = space.candidate_count(),
        "Starting rotor and position search"
    );

    let search = RotorPositionSearch::new(space, HillClimbAttack::new(trigrams));
    let outcome = search.run(ciphertext)?;
    format_outcome(&outcome, config.output)
}

/// Render a search result for stdout.
///
/// Text output is three lines: rotor ids, starting letters, plugboard pairs.
pub fn format_outcome(outcome: &SearchOutcome, format: OutputFormat) -> Result<String, CliError> {
    match format {
        OutputFormat::Text => {
            let positions: Vec<String> = outcome.positions.iter().map(char::to_string).collect();
            Ok(format!(
                "{}\n{}\n{}",
                outcome.rotors.join(" "),
                positions.join(" "),
                outcome.plugboard.to_pairs_string()
            ))
        }
        OutputFormat::Json => Ok(serde_json::to_string_pretty(outcome)?),
    }
}

#[derive(Serialize)]
struct EncryptOutput<'a> {
    ciphertext: &'a str,
}
