//! Error types for enigma-core.
//!
//! # Error Categories
//!
//! - **Configuration errors**: `UnknownRotor`, `UnknownReflector`, `InvalidPosition`,
//!   `InvalidRingSetting`, `TooFewRotors`, `InvalidPlugPair`, `DuplicatePlug`,
//!   `InvalidPermutation`, `EmptyRotorPool`, `EmptyLetterSet`
//! - **Data errors**: `InsufficientData`, `DataFormat`, `InvalidSymbol`
//! - **Control**: `Cancelled`

/// Result type alias for enigma-core operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur while configuring, running or attacking a machine.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum Error {
    // ==================== Configuration Errors ====================
    /// No rotor wiring is registered under this identifier.
    #[error("unknown rotor: {id}")]
    UnknownRotor {
        /// The identifier that was looked up.
        id: String,
    },

    /// No reflector wiring is registered under this identifier.
    #[error("unknown reflector: {id}")]
    UnknownReflector {
        /// The identifier that was looked up.
        id: String,
    },

    /// Rotor starting position is not a letter A-Z.
    #[error("invalid rotor position: {letter:?}")]
    InvalidPosition {
        /// The rejected character.
        letter: char,
    },

    /// Ring setting outside 1..=26.
    #[error("invalid ring setting: {ring}, expected 1-26")]
    InvalidRingSetting {
        /// The rejected ring setting.
        ring: u8,
    },

    /// The stepping mechanism needs at least three rotors.
    #[error("too few rotors: got {count}, minimum is {minimum}")]
    TooFewRotors {
        /// Number of rotors supplied.
        count: usize,
        /// Minimum number of rotors.
        minimum: usize,
    },

    /// Plug pair is not two distinct letters A-Z.
    #[error("invalid plug pair: {pair:?}")]
    InvalidPlugPair {
        /// The rejected pair as written.
        pair: String,
    },

    /// A letter appears in more than one plug pair.
    #[error("letter {letter} is plugged more than once")]
    DuplicatePlug {
        /// The reused letter.
        letter: char,
    },

    /// Permutation string does not describe a valid plugboard.
    #[error("invalid plugboard permutation: {reason}")]
    InvalidPermutation {
        /// Description of what's wrong.
        reason: String,
    },

    /// Rotor search was given fewer than two distinct rotors to choose from.
    #[error("rotor pool needs at least two distinct rotors")]
    EmptyRotorPool,

    /// Rotor search was given no starting letters to try.
    #[error("search needs at least one starting letter")]
    EmptyLetterSet,

    // ==================== Data Errors ====================
    /// Text too short for the requested statistic.
    #[error("insufficient data: {len} symbols, minimum is {minimum}")]
    InsufficientData {
        /// Actual text length.
        len: usize,
        /// Minimum required length.
        minimum: usize,
    },

    /// Malformed trigram table line.
    #[error("malformed trigram table at line {line}: {reason}")]
    DataFormat {
        /// 1-based line number (0 when the table as a whole is at fault).
        line: usize,
        /// Description of what's wrong.
        reason: String,
    },

    /// Byte outside A-Z where a letter was required.
    #[error("invalid symbol {byte:#04x} at position {position}")]
    InvalidSymbol {
        /// The offending byte.
        byte: u8,
        /// Index of the byte in its input.
        position: usize,
    },

    // ==================== Control ====================
    /// The search was stopped through its cancellation token.
    #[error("search cancelled")]
    Cancelled,
}

impl Error {
    /// Whether this error stems from an invalid machine or search configuration.
    pub fn is_configuration(&self) -> bool {
        matches!(
            self,
            Error::UnknownRotor { .. }
                | Error::UnknownReflector { .. }
                | Error::InvalidPosition { .. }
                | Error::InvalidRingSetting { .. }
                | Error::TooFewRotors { .. }
                | Error::InvalidPlugPair { .. }
                | Error::DuplicatePlug { .. }
                | Error::InvalidPermutation { .. }
                | Error::EmptyRotorPool
                | Error::EmptyLetterSet
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::error::Error as StdError;

    #[test]
    fn error_display_messages() {
        let err = Error::UnknownRotor { id: "IX".into() };
        assert_eq!(err.to_string(), "unknown rotor: IX");

        let err = Error::InsufficientData { len: 1, minimum: 2 };
        assert_eq!(err.to_string(), "insufficient data: 1 symbols, minimum is 2");

        let err = Error::InvalidSymbol {
            byte: b'!',
            position: 4,
        };
        assert_eq!(err.to_string(), "invalid symbol 0x21 at position 4");

        let err = Error::DuplicatePlug { letter: 'Q' };
        assert_eq!(err.to_string(), "letter Q is plugged more than once");
    }

    #[test]
    fn error_implements_std_error() {
        let err = Error::Cancelled;
        let _: &dyn StdError = &err;
    }

    #[test]
    fn configuration_classification() {
        assert!(Error::UnknownReflector { id: "Z".into() }.is_configuration());
        assert!(Error::EmptyRotorPool.is_configuration());
        assert!(Error::EmptyLetterSet.is_configuration());
        assert_eq!(
            Error::EmptyLetterSet.to_string(),
            "search needs at least one starting letter"
        );
        assert!(!Error::Cancelled.is_configuration());
        assert!(!Error::DataFormat {
            line: 3,
            reason: "x".into()
        }
        .is_configuration());
    }
}
