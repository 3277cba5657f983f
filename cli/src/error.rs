//! Errors surfaced by the command-line front end.

use std::path::PathBuf;

/// Anything that can stop a command.
#[derive(Debug, thiserror::Error)]
pub enum CliError {
    /// Machine, scoring or search failure.
    #[error(transparent)]
    Core(#[from] enigma_core::Error),

    /// A file could not be read.
    #[error("cannot read {path}: {source}")]
    Io {
        /// File that failed.
        path: PathBuf,
        /// Underlying I/O error.
        #[source]
        source: std::io::Error,
    },

    /// Bad command line.
    #[error("{0}")]
    Usage(String),

    /// Result could not be rendered as JSON.
    #[error("cannot encode result: {0}")]
    Json(#[from] serde_json::Error),

    /// The parallel scoring pool could not be configured.
    #[error("cannot configure thread pool: {0}")]
    ThreadPool(#[from] rayon::ThreadPoolBuildError),
}

impl CliError {
    /// Process exit code for this error.
    pub fn exit_code(&self) -> i32 {
        match self {
            CliError::Usage(_) => 2,
            CliError::Core(e) if e.is_configuration() => 3,
            _ => 1,
        }
    }
}
