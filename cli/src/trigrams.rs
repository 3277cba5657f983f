//! Trigram frequency file loading.

use std::path::Path;

use crate::error::CliError;
use enigma_core::TrigramTable;
use tracing::debug;

/// Read and parse a `<TRIGRAM> <count>` file into log-probabilities.
pub fn load(path: &Path) -> Result<TrigramTable, CliError> {
    let text = std::fs::read_to_string(path).map_err(|source| CliError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    let table = TrigramTable::parse(&text)?;
    debug!(path = %path.display(), entries = table.len(), "Loaded trigram table");
    Ok(table)
}
