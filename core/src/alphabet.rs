//! Letter/index conversion for the 26-letter machine alphabet.
//!
//! Internally every letter is an index in `0..26`; bytes `b'A'..=b'Z'` are
//! the only accepted external form.

use crate::error::{Error, Result};

/// Number of letters handled by the machine.
pub const ALPHABET_LEN: usize = 26;

/// The alphabet in index order.
pub const ALPHABET: &[u8; ALPHABET_LEN] = b"ABCDEFGHIJKLMNOPQRSTUVWXYZ";

/// Convert an uppercase ASCII letter to its alphabet index.
#[inline]
pub fn index_of(byte: u8) -> Option<u8> {
    byte.is_ascii_uppercase().then(|| byte - b'A')
}

/// Convert an alphabet index back to its uppercase letter.
#[inline]
pub fn letter_of(index: u8) -> u8 {
    debug_assert!((index as usize) < ALPHABET_LEN);
    b'A' + index
}

/// Convert text to alphabet indices, rejecting anything outside A-Z.
///
/// # Errors
///
/// Returns `Error::InvalidSymbol` naming the first offending byte.
pub fn to_indices(text: &[u8]) -> Result<Vec<u8>> {
    text.iter()
        .enumerate()
        .map(|(position, &byte)| index_of(byte).ok_or(Error::InvalidSymbol { byte, position }))
        .collect()
}

/// Convert alphabet indices to an uppercase string.
pub fn to_text(indices: &[u8]) -> String {
    indices.iter().map(|&i| letter_of(i) as char).collect()
}

/// Prepare free text for the machine.
///
/// Surrounding whitespace and inner spaces are dropped, letters are
/// uppercased and every other character becomes `X`.
///
/// ```
/// use enigma_core::alphabet::sanitize;
///
/// assert_eq!(sanitize("  Attack at 0600! "), "ATTACKATXXXXX");
/// ```
pub fn sanitize(text: &str) -> String {
    text.trim()
        .chars()
        .filter(|&c| c != ' ')
        .flat_map(char::to_uppercase)
        .map(|c| if c.is_ascii_uppercase() { c } else { 'X' })
        .collect()
}
