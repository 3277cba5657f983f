//! # Enigma CLI
//!
//! Command-line front end for `enigma_core`.
//!
//! ## Commands
//!
//! | Command | Description |
//! |---------|-------------|
//! | `enigma encrypt <file>` | Encrypt (or decrypt) the file with the configured machine |
//! | `enigma attack <file>` | Recover rotors, positions and plugboard from ciphertext |
//!
//! Plaintext for `encrypt` is sanitized first: trimmed, uppercased, spaces
//! removed, any other non-letter replaced by `X`. Ciphertext for `attack` is
//! only trimmed and must otherwise be A-Z. Machine and search settings come from
//! `ENIGMA_*` environment variables, see [`Config`].

pub mod commands;
pub mod config;
pub mod error;
pub mod trigrams;

pub use config::{Config, OutputFormat};
pub use error::CliError;

use std::path::{Path, PathBuf};

/// Usage text printed on a bad command line.
pub const USAGE: &str = "usage: enigma <encrypt|attack> <file>";

/// A parsed command line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    /// Encrypt the file with the configured machine.
    Encrypt(PathBuf),
    /// Search for the settings that produced the file.
    Attack(PathBuf),
}

impl Command {
    /// Parse arguments, excluding the program name.
    pub fn parse<I, S>(args: I) -> Result<Self, CliError>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let args: Vec<String> = args.into_iter().map(Into::into).collect();
        match args.as_slice() {
            [cmd, file] if cmd == "encrypt" => Ok(Command::Encrypt(PathBuf::from(file))),
            [cmd, file] if cmd == "attack" => Ok(Command::Attack(PathBuf::from(file))),
            _ => Err(CliError::Usage(USAGE.to_string())),
        }
    }

    /// Input file named on the command line.
    pub fn input(&self) -> &Path {
        match self {
            Command::Encrypt(path) | Command::Attack(path) => path,
        }
    }
}

/// Read the input file and run `command`, returning what to print.
pub fn run(command: &Command, config: &Config) -> Result<String, CliError> {
    let path = command.input();
    let text = std::fs::read_to_string(path).map_err(|source| CliError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    match command {
        Command::Encrypt(_) => commands::encrypt(config, &text),
        Command::Attack(_) => {
            let table = trigrams::load(&config.trigrams_path)?;
            commands::attack(config, &table, &text)
        }
    }
}
