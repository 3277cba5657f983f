//! Configuration for the enigma command.
//!
//! All configuration is loaded from environment variables (optionally via a
//! `.env` file). The same rotor settings serve two purposes: `encrypt` uses
//! them as the machine, `attack` keeps their right-hand rotors fixed and
//! searches the two leftmost slots.

use std::path::PathBuf;

use crate::error::CliError;
use enigma_core::{MachineConfig, Plugboard, RotorSetting, SearchSpace};

/// Default trigram frequency file.
pub const DEFAULT_TRIGRAMS: &str = "english_trigrams.txt";

/// How results are printed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputFormat {
    /// Plain lines, one field per line.
    Text,
    /// A single JSON document.
    Json,
}

/// Command configuration
#[derive(Debug, Clone)]
pub struct Config {
    /// Trigram frequency table (`<TRIGRAM> <count>` per line)
    pub trigrams_path: PathBuf,

    // === Machine ===
    /// Reflector id (default: C-thin)
    pub reflector: String,

    /// Rotor ids, leftmost first (default: I II IV III)
    pub rotors: String,

    /// Starting letters, leftmost first (default: A A B Q)
    pub positions: String,

    /// Ring settings 1-26, leftmost first (default: 1 1 1 16)
    pub rings: String,

    /// Plugboard as pairs or 26-letter permutation (default: identity)
    pub plugboard: String,

    // === Search ===
    /// Rotor ids tried in the two searched slots
    pub rotor_pool: String,

    /// Starting letters tried in the two searched slots
    pub search_letters: String,

    // === Runtime ===
    /// Output format (default: text)
    pub output: OutputFormat,

    /// Worker threads for candidate scoring (default: rayon's choice)
    pub threads: Option<usize>,
}

impl Config {
    /// Load configuration from environment variables
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Load configuration through an arbitrary key lookup.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let var = |key: &str, default: &str| lookup(key).unwrap_or_else(|| default.to_string());
        Self {
            trigrams_path: PathBuf::from(var("ENIGMA_TRIGRAMS", DEFAULT_TRIGRAMS)),

            reflector: var("ENIGMA_REFLECTOR", "C-thin"),
            rotors: var("ENIGMA_ROTORS", "I II IV III"),
            positions: var("ENIGMA_POSITIONS", "A A B Q"),
            rings: var("ENIGMA_RINGS", "1 1 1 16"),
            plugboard: var("ENIGMA_PLUGBOARD", "ABCDEFGHIJKLMNOPQRSTUVWXYZ"),

            rotor_pool: var("ENIGMA_ROTOR_POOL", "I II V VI Beta Gamma"),
            search_letters: var("ENIGMA_SEARCH_LETTERS", "ABCDEFGHIJKLMNOPQRSTUVWXYZ"),

            output: match lookup("ENIGMA_OUTPUT").as_deref() {
                Some("json") => OutputFormat::Json,
                _ => OutputFormat::Text,
            },
            threads: lookup("ENIGMA_THREADS")
                .and_then(|s| s.parse().ok())
                .filter(|&n| n > 0),
        }
    }

    /// Rotor settings assembled from the id, position and ring lists.
    pub fn rotor_settings(&self) -> Result<Vec<RotorSetting>, CliError> {
        let ids: Vec<&str> = self.rotors.split_whitespace().collect();
        let positions = self
            .positions
            .split_whitespace()
            .map(|p| {
                let mut chars = p.chars();
                match (chars.next(), chars.next()) {
                    (Some(letter), None) => Ok(letter),
                    _ => Err(CliError::Usage(format!(
                        "starting position {p:?} is not a single letter"
                    ))),
                }
            })
            .collect::<Result<Vec<_>, _>>()?;
        let rings = self
            .rings
            .split_whitespace()
            .map(|r| {
                r.parse::<u8>()
                    .map_err(|_| CliError::Usage(format!("ring setting {r:?} is not a number")))
            })
            .collect::<Result<Vec<_>, _>>()?;

        if positions.len() != ids.len() || rings.len() != ids.len() {
            return Err(CliError::Usage(format!(
                "{} rotors, {} positions and {} ring settings configured",
                ids.len(),
                positions.len(),
                rings.len()
            )));
        }

        Ok(ids
            .into_iter()
            .zip(positions)
            .zip(rings)
            .map(|((id, start), ring)| RotorSetting::new(id, start, ring))
            .collect())
    }

    /// The machine used for encryption.
    pub fn machine_config(&self) -> Result<MachineConfig, CliError> {
        Ok(MachineConfig {
            rotors: self.rotor_settings()?,
            reflector: self.reflector.clone(),
            plugboard: Plugboard::parse(&self.plugboard)?,
        })
    }

    /// The search space used by `attack`: the two leftmost slots are searched,
    /// the rest of the configured machine stays fixed.
    pub fn search_space(&self) -> Result<SearchSpace, CliError> {
        let settings = self.rotor_settings()?;
        if settings.len() < 3 {
            return Err(enigma_core::Error::TooFewRotors {
                count: settings.len(),
                minimum: 3,
            }
            .into());
        }
        Ok(SearchSpace {
            pool: self.rotor_pool.split_whitespace().map(String::from).collect(),
            letters: self.search_letters.chars().filter(|c| !c.is_whitespace()).collect(),
            searched_rings: [settings[0].ring, settings[1].ring],
            fixed: settings[2..].to_vec(),
            reflector: self.reflector.clone(),
        })
    }
}

impl Default for Config {
    fn default() -> Self {
        Self::from_lookup(|_| None)
    }
}
