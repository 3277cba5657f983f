//! The rotor machine: stepping mechanism and signal path.
//!
//! ```text
//! key ─▶ plugboard ─▶ rotors (right → left) ─▶ reflector
//!                                                  │
//! lamp ◀─ plugboard ◀─ rotors (left → right) ◀─────┘
//! ```
//!
//! Rotors are ordered leftmost (slowest) first. Only the three rightmost
//! rotors take part in stepping; a fourth "thin" rotor stays where it was set.

use crate::alphabet;
use crate::catalog::{self, Reflector};
use crate::error::{Error, Result};
use crate::plugboard::Plugboard;
use crate::rotor::{Rotor, RotorSetting};
use serde::{Deserialize, Serialize};

/// Minimum number of rotors for the stepping mechanism.
pub const MIN_ROTORS: usize = 3;

/// Full operator configuration of a machine.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MachineConfig {
    /// Rotors from leftmost to rightmost.
    pub rotors: Vec<RotorSetting>,
    /// Reflector catalog id.
    pub reflector: String,
    /// Plugboard wiring.
    pub plugboard: Plugboard,
}

impl MachineConfig {
    /// Validate and build a ready-to-use machine.
    pub fn build(&self) -> Result<EnigmaMachine> {
        Ok(MachineTemplate::new(&self.rotors, &self.reflector)?.machine(self.plugboard))
    }
}

/// Validated rotor stack and reflector, without a plugboard.
///
/// The template is the unit a search varies the plugboard over: every call
/// to [`MachineTemplate::machine`] yields an independent machine at the
/// starting positions.
#[derive(Debug, Clone)]
pub struct MachineTemplate {
    rotors: Vec<Rotor>,
    reflector: &'static Reflector,
}

impl MachineTemplate {
    /// Validate rotor settings and look up the reflector.
    ///
    /// # Errors
    ///
    /// - `Error::TooFewRotors` for fewer than three rotors
    /// - any rotor setting error from [`Rotor::from_setting`]
    /// - `Error::UnknownReflector`
    pub fn new(settings: &[RotorSetting], reflector: &str) -> Result<Self> {
        if settings.len() < MIN_ROTORS {
            return Err(Error::TooFewRotors {
                count: settings.len(),
                minimum: MIN_ROTORS,
            });
        }
        let rotors = settings
            .iter()
            .map(Rotor::from_setting)
            .collect::<Result<Vec<_>>>()?;
        Ok(Self {
            rotors,
            reflector: catalog::reflector_wiring(reflector)?,
        })
    }

    /// Mint a fresh machine with the given plugboard.
    pub fn machine(&self, plugboard: Plugboard) -> EnigmaMachine {
        EnigmaMachine {
            start: self.rotors.iter().map(Rotor::offset).collect(),
            rotors: self.rotors.clone(),
            reflector: self.reflector,
            plugboard,
        }
    }

    /// Decode already-validated letter indices with a fresh machine.
    ///
    /// # Panics
    ///
    /// If any index is 26 or more. Use [`alphabet::to_indices`] to validate.
    pub fn decode(&self, plugboard: Plugboard, indices: &[u8]) -> Vec<u8> {
        self.machine(plugboard).encode_indices(indices)
    }

    /// Rotor ids from leftmost to rightmost.
    pub fn rotor_ids(&self) -> Vec<&'static str> {
        self.rotors.iter().map(Rotor::id).collect()
    }

    /// Starting window letters from leftmost to rightmost.
    pub fn positions(&self) -> Vec<char> {
        self.rotors.iter().map(Rotor::window).collect()
    }

    /// Reflector id.
    pub fn reflector_id(&self) -> &'static str {
        self.reflector.id
    }
}

/// A configured machine. Encoding mutates the rotor offsets.
#[derive(Debug, Clone)]
pub struct EnigmaMachine {
    rotors: Vec<Rotor>,
    start: Vec<u8>,
    reflector: &'static Reflector,
    plugboard: Plugboard,
}

impl EnigmaMachine {
    /// Advance the rotors for one key press.
    ///
    /// The middle rotor steps when the right rotor is at its notch, and also
    /// when it sits on its own notch (carrying the left rotor with it). That
    /// second case makes it move on two consecutive presses: the double step.
    pub fn step_rotors(&mut self) {
        let n = self.rotors.len();
        let (right, middle, left) = (n - 1, n - 2, n - 3);
        let right_turnover = self.rotors[right].at_notch();
        let middle_turnover = self.rotors[middle].at_notch();

        if middle_turnover {
            if !right_turnover {
                self.rotors[middle].advance();
            }
            self.rotors[left].advance();
        }
        if right_turnover {
            self.rotors[middle].advance();
        }
        self.rotors[right].advance();
    }

    /// Step, then pass one letter index through the machine.
    ///
    /// # Panics
    ///
    /// If `index` is 26 or more.
    #[inline]
    pub fn encode_index(&mut self, index: u8) -> u8 {
        self.step_rotors();
        let mut signal = self.plugboard.map(index);
        for rotor in self.rotors.iter().rev() {
            signal = rotor.forward(signal);
        }
        signal = self.reflector.reflect(signal);
        for rotor in &self.rotors {
            signal = rotor.backward(signal);
        }
        self.plugboard.map(signal)
    }

    /// Encode a single uppercase letter.
    ///
    /// # Errors
    ///
    /// Returns `Error::InvalidSymbol` for anything outside A-Z; rotors are
    /// left untouched in that case.
    pub fn encode_char(&mut self, letter: u8) -> Result<u8> {
        let index = alphabet::index_of(letter).ok_or(Error::InvalidSymbol {
            byte: letter,
            position: 0,
        })?;
        Ok(alphabet::letter_of(self.encode_index(index)))
    }

    /// Encode text letter by letter. Output length equals input length.
    ///
    /// The input is validated up front, so a rejected text leaves the rotors
    /// where they were.
    ///
    /// # Example
    ///
    /// ```
    /// use enigma_core::{MachineConfig, Plugboard, RotorSetting};
    ///
    /// let config = MachineConfig {
    ///     rotors: vec![
    ///         RotorSetting::new("I", 'A', 1),
    ///         RotorSetting::new("II", 'A', 1),
    ///         RotorSetting::new("III", 'A', 1),
    ///     ],
    ///     reflector: "B".into(),
    ///     plugboard: Plugboard::identity(),
    /// };
    /// let mut machine = config.build().unwrap();
    /// assert_eq!(machine.encode_text("AAAAA").unwrap(), "BDZGO");
    /// ```
    pub fn encode_text(&mut self, text: &str) -> Result<String> {
        let indices = alphabet::to_indices(text.as_bytes())?;
        Ok(alphabet::to_text(&self.encode_indices(&indices)))
    }

    /// Encode letter indices.
    ///
    /// # Panics
    ///
    /// If any index is 26 or more; [`EnigmaMachine::encode_text`] is the
    /// checked entry point.
    pub fn encode_indices(&mut self, indices: &[u8]) -> Vec<u8> {
        indices.iter().map(|&i| self.encode_index(i)).collect()
    }

    /// Return every rotor to its starting position.
    pub fn reset(&mut self) {
        for (rotor, &offset) in self.rotors.iter_mut().zip(&self.start) {
            rotor.set_offset(offset);
        }
    }

    /// Current rotor offsets from leftmost to rightmost.
    pub fn offsets(&self) -> Vec<u8> {
        self.rotors.iter().map(Rotor::offset).collect()
    }

    /// Current window letters from leftmost to rightmost.
    pub fn windows(&self) -> String {
        self.rotors.iter().map(Rotor::window).collect()
    }

    /// The machine's plugboard.
    pub fn plugboard(&self) -> &Plugboard {
        &self.plugboard
    }
}
