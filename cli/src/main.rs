//! enigma - rotor machine encryption and ciphertext-only settings recovery
//!
//! - `enigma encrypt <file>` prints the file encrypted with the configured machine
//! - `enigma attack <file>` prints the recovered rotors, positions and plugboard
//!
//! Logs go to stderr; stdout carries only the result.

use std::process::ExitCode;

use enigma_cli::{CliError, Command, Config};
use tracing::{error, info};

fn main() -> ExitCode {
    // Load environment variables from .env file if present
    let _ = dotenvy::dotenv();

    // Initialize structured logging
    init_tracing();

    let config = Config::from_env();
    match run(&config) {
        Ok(output) => {
            println!("{output}");
            ExitCode::SUCCESS
        }
        Err(err) => {
            error!(error = %err, "Command failed");
            eprintln!("enigma: {err}");
            ExitCode::from(u8::try_from(err.exit_code()).unwrap_or(1))
        }
    }
}

fn run(config: &Config) -> Result<String, CliError> {
    let command = Command::parse(std::env::args().skip(1))?;
    log_startup_info(&command, config);

    if let Some(threads) = config.threads {
        rayon::ThreadPoolBuilder::new()
            .num_threads(threads)
            .build_global()?;
    }

    enigma_cli::run(&command, config)
}

/// Initialize tracing with environment-based log levels.
fn init_tracing() {
    use tracing_subscriber::{fmt, prelude::*, EnvFilter};

    tracing_subscriber::registry()
        .with(fmt::layer().with_writer(std::io::stderr))
        .with(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new("enigma_cli=info,enigma_core=info")),
        )
        .init();
}

/// Log the effective settings.
fn log_startup_info(command: &Command, config: &Config) {
    info!(
        command = ?command,
        reflector = %config.reflector,
        rotors = %config.rotors,
        positions = %config.positions,
        rings = %config.rings,
        trigrams = %config.trigrams_path.display(),
        threads = ?config.threads,
        "Starting enigma"
    );
}
