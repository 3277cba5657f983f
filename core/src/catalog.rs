//! Historic rotor and reflector wirings.
//!
//! Both catalogs are immutable `static` tables generated at compile time.
//! Lookups hand out `&'static` references; per-machine state (offset, ring)
//! lives in [`crate::rotor::Rotor`], never in the catalog.

use crate::alphabet::ALPHABET_LEN;
use crate::error::{Error, Result};

/// Immutable wiring of one rotor type.
#[derive(Debug, PartialEq, Eq)]
pub struct RotorWiring {
    /// Catalog identifier ("I", "Beta", ...).
    pub id: &'static str,
    /// Contact mapping right-to-left.
    pub forward: [u8; ALPHABET_LEN],
    /// Inverse of `forward`, used on the return path.
    pub inverse: [u8; ALPHABET_LEN],
    /// Offsets at which this rotor carries its left neighbour.
    pub notches: &'static [u8],
}

impl RotorWiring {
    /// Whether `offset` is one of this wiring's turnover offsets.
    #[inline]
    pub fn is_notch(&self, offset: u8) -> bool {
        self.notches.contains(&offset)
    }
}

/// Immutable wiring of one reflector type.
#[derive(Debug, PartialEq, Eq)]
pub struct Reflector {
    /// Catalog identifier ("B", "C-thin", ...).
    pub id: &'static str,
    /// Involutive mapping without fixed points.
    pub wiring: [u8; ALPHABET_LEN],
}

impl Reflector {
    /// Reflect a letter index.
    #[inline]
    pub fn reflect(&self, index: u8) -> u8 {
        self.wiring[index as usize]
    }
}

const fn parse_wiring(letters: &[u8; ALPHABET_LEN]) -> [u8; ALPHABET_LEN] {
    let mut out = [0u8; ALPHABET_LEN];
    let mut i = 0;
    while i < ALPHABET_LEN {
        out[i] = letters[i] - b'A';
        i += 1;
    }
    out
}

const fn invert(wiring: &[u8; ALPHABET_LEN]) -> [u8; ALPHABET_LEN] {
    let mut out = [0u8; ALPHABET_LEN];
    let mut i = 0;
    while i < ALPHABET_LEN {
        out[wiring[i] as usize] = i as u8;
        i += 1;
    }
    out
}

const fn rotor(
    id: &'static str,
    letters: &[u8; ALPHABET_LEN],
    notches: &'static [u8],
) -> RotorWiring {
    let forward = parse_wiring(letters);
    RotorWiring {
        id,
        forward,
        inverse: invert(&forward),
        notches,
    }
}

const fn reflector(id: &'static str, letters: &[u8; ALPHABET_LEN]) -> Reflector {
    Reflector {
        id,
        wiring: parse_wiring(letters),
    }
}

// Turnover letters as offsets: E=4 J=9 M=12 Q=16 V=21 Z=25.
static ROTORS: [RotorWiring; 10] = [
    rotor("I", b"EKMFLGDQVZNTOWYHXUSPAIBRCJ", &[16]),
    rotor("II", b"AJDKSIRUXBLHWTMCQGZNPYFVOE", &[4]),
    rotor("III", b"BDFHJLCPRTXVZNYEIWGAKMUSQO", &[21]),
    rotor("IV", b"ESOVPZJAYQUIRHXLNFTGKDCMWB", &[9]),
    rotor("V", b"VZBRGITYUPSDNHLXAWMJQOFECK", &[25]),
    rotor("VI", b"JPGVOUMFYQBENHZRDKASXLICTW", &[25, 12]),
    rotor("VII", b"NZJHGRCXMYSWBOUFAIVLPEKQDT", &[25, 12]),
    rotor("VIII", b"FKQHTLXOCBJSPDZRAMEWNIUYGV", &[25, 12]),
    rotor("Beta", b"LEYJVCNIXWPBQMDRTAKZGFUHOS", &[]),
    rotor("Gamma", b"FSOKANUERHMBTIJYCWLQPZXVGD", &[]),
];

static REFLECTORS: [Reflector; 5] = [
    reflector("A", b"EJMZALYXVBWFCRQUONTSPIKHGD"),
    reflector("B", b"YRUHQSLDPXNGOKMIEBFZCWVJAT"),
    reflector("C", b"FVPJIAOYEDRZXWGCTKUQSBNMHL"),
    reflector("B-thin", b"ENKQAUYWJICOPBLMDXZVFTHRGS"),
    reflector("C-thin", b"RDOBJNTKVEHMLFCWZAXGYIPSUQ"),
];

/// Look up a rotor wiring by identifier.
///
/// # Errors
///
/// Returns `Error::UnknownRotor` for identifiers not in the catalog.
pub fn rotor_wiring(id: &str) -> Result<&'static RotorWiring> {
    ROTORS
        .iter()
        .find(|w| w.id == id)
        .ok_or_else(|| Error::UnknownRotor { id: id.to_string() })
}

/// Look up a reflector by identifier.
///
/// # Errors
///
/// Returns `Error::UnknownReflector` for identifiers not in the catalog.
pub fn reflector_wiring(id: &str) -> Result<&'static Reflector> {
    REFLECTORS
        .iter()
        .find(|r| r.id == id)
        .ok_or_else(|| Error::UnknownReflector { id: id.to_string() })
}

/// Identifiers of every catalog rotor, in catalog order.
pub fn rotor_ids() -> impl Iterator<Item = &'static str> {
    ROTORS.iter().map(|w| w.id)
}

/// Identifiers of every catalog reflector, in catalog order.
pub fn reflector_ids() -> impl Iterator<Item = &'static str> {
    REFLECTORS.iter().map(|r| r.id)
}
