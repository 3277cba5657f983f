//! Rotors: a shared catalog wiring plus per-machine rotation state.

use crate::alphabet::{self, ALPHABET_LEN};
use crate::catalog::{self, RotorWiring};
use crate::error::{Error, Result};
use serde::{Deserialize, Serialize};

const LEN: u8 = ALPHABET_LEN as u8;

/// A rotor as configured by the operator: catalog id, starting letter and
/// ring setting (1-26).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RotorSetting {
    /// Catalog identifier.
    pub id: String,
    /// Letter shown in the window before the first key press.
    pub start: char,
    /// Ringstellung, 1-based.
    pub ring: u8,
}

impl RotorSetting {
    /// Create a setting. Validation happens in [`Rotor::from_setting`].
    pub fn new(id: impl Into<String>, start: char, ring: u8) -> Self {
        Self {
            id: id.into(),
            start,
            ring,
        }
    }
}

/// One rotor inside one machine.
///
/// The wiring is borrowed from the static catalog; `offset` and `ring` are
/// owned by this value, so cloning a rotor never shares rotation state.
#[derive(Debug, Clone, Copy)]
pub struct Rotor {
    wiring: &'static RotorWiring,
    offset: u8,
    ring: u8,
}

impl Rotor {
    /// Build a rotor from an operator setting.
    ///
    /// # Errors
    ///
    /// - `Error::UnknownRotor` if the id is not in the catalog
    /// - `Error::InvalidPosition` if `start` is not A-Z
    /// - `Error::InvalidRingSetting` if `ring` is outside 1-26
    pub fn from_setting(setting: &RotorSetting) -> Result<Self> {
        let wiring = catalog::rotor_wiring(&setting.id)?;
        let offset = u8::try_from(setting.start)
            .ok()
            .and_then(alphabet::index_of)
            .ok_or(Error::InvalidPosition {
                letter: setting.start,
            })?;
        if !(1..=LEN).contains(&setting.ring) {
            return Err(Error::InvalidRingSetting { ring: setting.ring });
        }
        Ok(Self {
            wiring,
            offset,
            ring: setting.ring - 1,
        })
    }

    /// Catalog identifier of the wiring.
    pub fn id(&self) -> &'static str {
        self.wiring.id
    }

    /// Current rotation, 0-based.
    pub fn offset(&self) -> u8 {
        self.offset
    }

    /// Ring setting, 0-based.
    pub fn ring(&self) -> u8 {
        self.ring
    }

    /// Letter currently visible in the window.
    pub fn window(&self) -> char {
        alphabet::letter_of(self.offset) as char
    }

    pub(crate) fn set_offset(&mut self, offset: u8) {
        self.offset = offset % LEN;
    }

    /// Whether the rotor sits on one of its turnover notches.
    #[inline]
    pub fn at_notch(&self) -> bool {
        self.wiring.is_notch(self.offset)
    }

    /// Rotate by one position.
    #[inline]
    pub fn advance(&mut self) {
        self.offset = (self.offset + 1) % LEN;
    }

    #[inline]
    fn shift(&self) -> u8 {
        (self.offset + LEN - self.ring) % LEN
    }

    /// Pass a signal right-to-left through the rotor.
    #[inline]
    pub fn forward(&self, index: u8) -> u8 {
        let shift = self.shift();
        let out = self.wiring.forward[((index + shift) % LEN) as usize];
        (out + LEN - shift) % LEN
    }

    /// Pass a signal left-to-right (after the reflector) through the rotor.
    #[inline]
    pub fn backward(&self, index: u8) -> u8 {
        let shift = self.shift();
        let out = self.wiring.inverse[((index + shift) % LEN) as usize];
        (out + LEN - shift) % LEN
    }
}
