//! The plugboard (Steckerbrett): a symmetric letter-swap layer.
//!
//! A plugboard is stored as a 26-entry permutation `p` with the invariant
//! `p[p[i]] == i`. It can be written two ways, both accepted by [`Plugboard::parse`]:
//!
//! - pairs: `"AQ BJ CH"` (each letter in at most one pair)
//! - permutation: `"QJHDEFGCIBKLMNOPARSTUVWXYZ"` (character `i` is the image of letter `i`)

use std::fmt;
use std::str::FromStr;

use crate::alphabet::{self, ALPHABET_LEN};
use crate::error::{Error, Result};
use serde::{Deserialize, Serialize};

/// Involutive letter mapping applied on entry to and exit from the rotors.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(into = "String", try_from = "String")]
pub struct Plugboard([u8; ALPHABET_LEN]);

impl Plugboard {
    /// The plugboard with no cables engaged.
    pub const fn identity() -> Self {
        let mut map = [0u8; ALPHABET_LEN];
        let mut i = 0;
        while i < ALPHABET_LEN {
            map[i] = i as u8;
            i += 1;
        }
        Self(map)
    }

    /// Build a plugboard from two-letter pairs.
    ///
    /// # Errors
    ///
    /// - `Error::InvalidPlugPair` if a pair is not two distinct letters A-Z
    /// - `Error::DuplicatePlug` if a letter is used by two pairs
    ///
    /// # Example
    ///
    /// ```
    /// use enigma_core::Plugboard;
    ///
    /// let pb = Plugboard::from_pairs(["AQ", "BJ"]).unwrap();
    /// assert_eq!(pb.map(0), 16);
    /// assert_eq!(pb.map(16), 0);
    /// assert!(Plugboard::from_pairs(["AQ", "QB"]).is_err());
    /// ```
    pub fn from_pairs<I, S>(pairs: I) -> Result<Self>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut board = Self::identity();
        for pair in pairs {
            let pair = pair.as_ref();
            let invalid = || Error::InvalidPlugPair {
                pair: pair.to_string(),
            };
            let &[a, b] = pair.as_bytes() else {
                return Err(invalid());
            };
            let (a, b) = match (alphabet::index_of(a), alphabet::index_of(b)) {
                (Some(a), Some(b)) if a != b => (a, b),
                _ => return Err(invalid()),
            };
            for letter in [a, b] {
                if !board.is_fixed(letter) {
                    return Err(Error::DuplicatePlug {
                        letter: alphabet::letter_of(letter) as char,
                    });
                }
            }
            board.0[a as usize] = b;
            board.0[b as usize] = a;
        }
        Ok(board)
    }

    /// Build a plugboard from its 26-letter permutation form.
    ///
    /// # Errors
    ///
    /// Returns `Error::InvalidPermutation` if the string is not 26 letters
    /// A-Z forming an involution.
    pub fn from_permutation(permutation: &str) -> Result<Self> {
        let bytes = permutation.as_bytes();
        if bytes.len() != ALPHABET_LEN {
            return Err(Error::InvalidPermutation {
                reason: format!("expected {} letters, got {}", ALPHABET_LEN, bytes.len()),
            });
        }
        let mut map = [0u8; ALPHABET_LEN];
        for (slot, &byte) in map.iter_mut().zip(bytes) {
            *slot = alphabet::index_of(byte).ok_or_else(|| Error::InvalidPermutation {
                reason: format!("{:?} is not a letter A-Z", byte as char),
            })?;
        }
        let board = Self(map);
        if let Some(i) = (0..ALPHABET_LEN).find(|&i| map[map[i] as usize] as usize != i) {
            return Err(Error::InvalidPermutation {
                reason: format!(
                    "{} maps to {} but not back",
                    alphabet::letter_of(i as u8) as char,
                    alphabet::letter_of(map[i]) as char
                ),
            });
        }
        Ok(board)
    }

    /// Parse either boundary form.
    ///
    /// A single 26-letter token is read as a permutation; anything else is
    /// read as whitespace-separated pairs. The empty string is the identity.
    pub fn parse(text: &str) -> Result<Self> {
        let text = text.trim();
        if text.len() == ALPHABET_LEN && !text.contains(char::is_whitespace) {
            Self::from_permutation(text)
        } else {
            Self::from_pairs(text.split_whitespace())
        }
    }

    /// Image of a letter index.
    #[inline]
    pub fn map(&self, index: u8) -> u8 {
        self.0[index as usize]
    }

    /// The raw permutation.
    pub fn as_array(&self) -> &[u8; ALPHABET_LEN] {
        &self.0
    }

    /// Whether `index` has no cable attached.
    #[inline]
    pub fn is_fixed(&self, index: u8) -> bool {
        self.0[index as usize] == index
    }

    /// Whether no cables are engaged.
    pub fn is_identity(&self) -> bool {
        *self == Self::identity()
    }

    /// Whether `p[p[i]] == i` holds for every letter.
    pub fn is_involution(&self) -> bool {
        (0..ALPHABET_LEN).all(|i| self.0[self.0[i] as usize] as usize == i)
    }

    /// Engaged cables as letter pairs, each pair in alphabetical order.
    pub fn pairs(&self) -> Vec<(char, char)> {
        (0..ALPHABET_LEN as u8)
            .filter(|&i| self.map(i) > i)
            .map(|i| {
                (
                    alphabet::letter_of(i) as char,
                    alphabet::letter_of(self.map(i)) as char,
                )
            })
            .collect()
    }

    /// Space-separated pair form, e.g. `"AQ BJ"`.
    pub fn to_pairs_string(&self) -> String {
        self.pairs()
            .iter()
            .map(|&(a, b)| format!("{a}{b}"))
            .collect::<Vec<_>>()
            .join(" ")
    }

    /// 26-letter permutation form.
    pub fn to_permutation_string(&self) -> String {
        alphabet::to_text(&self.0)
    }

    /// Compact set key: the permutation read as a 26-digit base-26 number.
    ///
    /// 26^26 < 2^128, so distinct permutations never collide.
    #[inline]
    pub fn key(&self) -> u128 {
        self.0
            .iter()
            .fold(0u128, |acc, &d| acc * ALPHABET_LEN as u128 + d as u128)
    }

    /// Exchange the positions holding values `a` and `b`.
    ///
    /// On an involution this plugs two free letters together, or unplugs
    /// `a` from `b` when they are partners. Callers must only use it in those
    /// two situations (or with `a == b`, which is a no-op).
    #[inline]
    pub(crate) fn swap_letters(&mut self, a: u8, b: u8) {
        let (pa, pb) = (self.0[a as usize] as usize, self.0[b as usize] as usize);
        self.0.swap(pa, pb);
    }
}

impl Default for Plugboard {
    fn default() -> Self {
        Self::identity()
    }
}

impl fmt::Display for Plugboard {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_pairs_string())
    }
}

impl fmt::Debug for Plugboard {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Plugboard({})", self.to_permutation_string())
    }
}

impl FromStr for Plugboard {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        Self::parse(s)
    }
}

impl From<Plugboard> for String {
    fn from(board: Plugboard) -> Self {
        board.to_pairs_string()
    }
}

impl TryFrom<String> for Plugboard {
    type Error = Error;

    fn try_from(value: String) -> Result<Self> {
        Self::parse(&value)
    }
}
