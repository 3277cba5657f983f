//! Fitness functions for candidate decryptions.
//!
//! Both scores work on letter indices (`0..26`) so the search never
//! round-trips through strings.

use crate::alphabet::{self, ALPHABET_LEN};
use crate::error::{Error, Result};

/// Number of distinct trigrams.
pub const TRIGRAM_COUNT: usize = ALPHABET_LEN * ALPHABET_LEN * ALPHABET_LEN;

/// Index of coincidence: Σ f(c)(f(c)−1) / (n(n−1)).
///
/// Uniform random text tends to 1/26 ≈ 0.0385; English sits near 0.066.
///
/// # Errors
///
/// Returns `Error::InsufficientData` for fewer than two symbols.
pub fn index_of_coincidence(indices: &[u8]) -> Result<f64> {
    if indices.len() < 2 {
        return Err(Error::InsufficientData {
            len: indices.len(),
            minimum: 2,
        });
    }
    Ok(ioc_unchecked(indices))
}

#[inline]
fn ioc_unchecked(indices: &[u8]) -> f64 {
    let mut counts = [0u64; ALPHABET_LEN];
    for &i in indices {
        counts[i as usize] += 1;
    }
    let n = indices.len() as f64;
    let coincidences: u64 = counts.iter().map(|&f| f * f.saturating_sub(1)).sum();
    coincidences as f64 / (n * (n - 1.0))
}

/// Log-probabilities of every trigram; absent trigrams score 0.
#[derive(Clone)]
pub struct TrigramTable {
    scores: Vec<f64>,
    present: Vec<bool>,
    entries: usize,
}

#[inline]
fn trigram_slot(a: u8, b: u8, c: u8) -> usize {
    (a as usize * ALPHABET_LEN + b as usize) * ALPHABET_LEN + c as usize
}

fn parse_trigram(text: &str) -> Option<usize> {
    match text.as_bytes() {
        &[a, b, c] => Some(trigram_slot(
            alphabet::index_of(a)?,
            alphabet::index_of(b)?,
            alphabet::index_of(c)?,
        )),
        _ => None,
    }
}

impl TrigramTable {
    /// Parse a frequency table of `<TRIGRAM> <count>` lines.
    ///
    /// Counts are normalised by their total and stored as natural logs.
    /// Blank lines are ignored; a repeated trigram accumulates its counts.
    ///
    /// # Errors
    ///
    /// Returns `Error::DataFormat` for a malformed line (naming its 1-based
    /// number) or a table whose counts sum to zero.
    ///
    /// # Example
    ///
    /// ```
    /// use enigma_core::TrigramTable;
    ///
    /// let table = TrigramTable::parse("THE 3\nAND 1\n").unwrap();
    /// assert!((table.get("THE").unwrap() - 0.75f64.ln()).abs() < 1e-12);
    /// assert!(TrigramTable::parse("THE three").is_err());
    /// ```
    pub fn parse(text: &str) -> Result<Self> {
        let mut counts = Vec::new();
        for (number, line) in text.lines().enumerate() {
            let line = line.trim();
            if line.is_empty() {
                continue;
            }
            let malformed = |reason: String| Error::DataFormat {
                line: number + 1,
                reason,
            };
            let mut fields = line.split_whitespace();
            let (Some(trigram), Some(count), None) = (fields.next(), fields.next(), fields.next())
            else {
                return Err(malformed(format!("expected \"<TRIGRAM> <count>\", got {line:?}")));
            };
            let slot = parse_trigram(trigram)
                .ok_or_else(|| malformed(format!("{trigram:?} is not three letters A-Z")))?;
            let count: u64 = count
                .parse()
                .map_err(|_| malformed(format!("unparsable frequency {count:?}")))?;
            counts.push((slot, count));
        }
        Self::from_slot_counts(counts)
    }

    /// Build a table from raw counts.
    ///
    /// # Errors
    ///
    /// `Error::DataFormat` if a key is not three letters A-Z, or the counts sum
    /// to zero or overflow.
    pub fn from_counts<I, S>(counts: I) -> Result<Self>
    where
        I: IntoIterator<Item = (S, u64)>,
        S: AsRef<str>,
    {
        let slots = counts
            .into_iter()
            .map(|(trigram, count)| {
                let trigram = trigram.as_ref();
                parse_trigram(trigram)
                    .map(|slot| (slot, count))
                    .ok_or_else(|| Error::DataFormat {
                        line: 0,
                        reason: format!("{trigram:?} is not three letters A-Z"),
                    })
            })
            .collect::<Result<Vec<_>>>()?;
        Self::from_slot_counts(slots)
    }

    fn from_slot_counts(counts: Vec<(usize, u64)>) -> Result<Self> {
        let overflow = || Error::DataFormat {
            line: 0,
            reason: "trigram counts overflow".into(),
        };
        let mut totals = vec![0u64; TRIGRAM_COUNT];
        let mut total = 0u64;
        for (slot, count) in counts {
            totals[slot] = totals[slot].checked_add(count).ok_or_else(overflow)?;
            total = total.checked_add(count).ok_or_else(overflow)?;
        }
        if total == 0 {
            return Err(Error::DataFormat {
                line: 0,
                reason: "trigram counts sum to zero".into(),
            });
        }
        let total = total as f64;
        let present: Vec<bool> = totals.iter().map(|&count| count > 0).collect();
        let scores = totals
            .iter()
            .map(|&count| {
                if count == 0 {
                    0.0
                } else {
                    (count as f64 / total).ln()
                }
            })
            .collect();
        Ok(Self {
            scores,
            entries: present.iter().filter(|&&p| p).count(),
            present,
        })
    }

    /// Build a table from precomputed log-probabilities.
    pub fn from_log_probabilities<I, S>(entries: I) -> Result<Self>
    where
        I: IntoIterator<Item = (S, f64)>,
        S: AsRef<str>,
    {
        let mut scores = vec![0.0; TRIGRAM_COUNT];
        let mut present = vec![false; TRIGRAM_COUNT];
        for (trigram, score) in entries {
            let trigram = trigram.as_ref();
            let slot = parse_trigram(trigram).ok_or_else(|| Error::DataFormat {
                line: 0,
                reason: format!("{trigram:?} is not three letters A-Z"),
            })?;
            scores[slot] = score;
            present[slot] = true;
        }
        Ok(Self {
            scores,
            entries: present.iter().filter(|&&p| p).count(),
            present,
        })
    }

    /// Log-probability of a trigram, if present.
    pub fn get(&self, trigram: &str) -> Option<f64> {
        let slot = parse_trigram(trigram)?;
        self.present[slot].then_some(self.scores[slot])
    }

    /// Number of distinct trigrams with a recorded frequency.
    pub fn len(&self) -> usize {
        self.entries
    }

    /// Whether the table has no entries.
    pub fn is_empty(&self) -> bool {
        self.entries == 0
    }

    /// Sum of log-probabilities over all overlapping trigram windows.
    pub fn score(&self, indices: &[u8]) -> f64 {
        indices
            .windows(3)
            .map(|w| self.scores[trigram_slot(w[0], w[1], w[2])])
            .sum()
    }
}

impl std::fmt::Debug for TrigramTable {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TrigramTable")
            .field("entries", &self.entries)
            .finish()
    }
}

/// A fitness function over decoded letter indices. Higher is better.
pub trait Fitness: Sync {
    /// Short name used in logs.
    fn name(&self) -> &'static str;

    /// Score a decryption. Callers guarantee at least two symbols.
    fn score(&self, decoded: &[u8]) -> f64;
}

/// Index-of-coincidence fitness.
#[derive(Debug, Clone, Copy, Default)]
pub struct IocFitness;

impl Fitness for IocFitness {
    fn name(&self) -> &'static str {
        "ioc"
    }

    fn score(&self, decoded: &[u8]) -> f64 {
        ioc_unchecked(decoded)
    }
}

/// Trigram log-likelihood fitness.
#[derive(Debug, Clone, Copy)]
pub struct TrigramFitness<'a>(pub &'a TrigramTable);

impl Fitness for TrigramFitness<'_> {
    fn name(&self) -> &'static str {
        "trigram"
    }

    fn score(&self, decoded: &[u8]) -> f64 {
        self.0.score(decoded)
    }
}
