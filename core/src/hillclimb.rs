//! Greedy local search over plugboard wirings.
//!
//! One sweep walks every letter pair `(i, j)` with `i < j`. For each pair
//! both letters are first unplugged from the wiring held at the start of row
//! `i`, then four rewirings are tried:
//!
//! ```text
//! i ↔ partner(i)   i ↔ partner(j)   j ↔ partner(i)   j ↔ partner(j)
//! ```
//!
//! With both letters free this reduces to "plug i to j". Every wiring is
//! scored at most once per sweep; a candidate replaces the running best only
//! on a strictly higher score, so among equal scores the earliest wins.
//!
//! Candidates of one row are independent and are scored in parallel. The
//! reduction runs in generation order, which keeps results identical to a
//! sequential run.

use std::collections::HashSet;

use crate::alphabet::ALPHABET_LEN;
use crate::attack::check_ciphertext;
use crate::error::Result;
use crate::machine::MachineTemplate;
use crate::plugboard::Plugboard;
use crate::scoring::Fitness;
use rayon::prelude::*;
use tracing::trace;

/// Result of one or more sweeps.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ClimbResult {
    /// Best wiring found.
    pub plugboard: Plugboard,
    /// Its fitness.
    pub score: f64,
    /// Number of wirings decoded and scored, including the start.
    pub evaluated: usize,
}

/// The four rewirings tried for letters `i` and `j` against `row_base`.
pub(crate) fn neighbours(row_base: &Plugboard, i: u8, j: u8) -> [Plugboard; 4] {
    let (partner_i, partner_j) = (row_base.map(i), row_base.map(j));

    let mut base = *row_base;
    base.swap_letters(i, partner_i);
    base.swap_letters(j, partner_j);

    [(i, partner_i), (i, partner_j), (j, partner_i), (j, partner_j)].map(|(a, b)| {
        let mut candidate = base;
        candidate.swap_letters(a, b);
        debug_assert!(candidate.is_involution());
        candidate
    })
}

/// Hill climber bound to one ciphertext and one rotor configuration.
pub struct PlugboardHillClimber<'a> {
    ciphertext: &'a [u8],
    template: &'a MachineTemplate,
}

impl<'a> PlugboardHillClimber<'a> {
    /// Bind `ciphertext` (letter indices) to `template`.
    ///
    /// # Errors
    ///
    /// - `Error::InvalidSymbol` for an index of 26 or more
    /// - `Error::InsufficientData` for fewer than three letters
    pub fn new(ciphertext: &'a [u8], template: &'a MachineTemplate) -> Result<Self> {
        check_ciphertext(ciphertext)?;
        Ok(Self {
            ciphertext,
            template,
        })
    }

    /// Decode with a fresh machine and score.
    pub fn evaluate(&self, fitness: &dyn Fitness, plugboard: Plugboard) -> f64 {
        fitness.score(&self.template.decode(plugboard, self.ciphertext))
    }

    /// Run exactly one greedy sweep from `start`.
    pub fn sweep(&self, fitness: &dyn Fitness, start: Plugboard) -> ClimbResult {
        let mut best = start;
        let mut best_score = self.evaluate(fitness, start);
        let mut seen = HashSet::new();
        let mut evaluated = 1;

        for i in 0..ALPHABET_LEN as u8 {
            let row_base = best;
            let candidates: Vec<Plugboard> = (i + 1..ALPHABET_LEN as u8)
                .flat_map(|j| neighbours(&row_base, i, j))
                .filter(|candidate| seen.insert(candidate.key()))
                .collect();

            let scores: Vec<f64> = candidates
                .par_iter()
                .map(|&candidate| self.evaluate(fitness, candidate))
                .collect();
            evaluated += candidates.len();

            for (candidate, score) in candidates.into_iter().zip(scores) {
                if score > best_score {
                    best = candidate;
                    best_score = score;
                }
            }
            if best != row_base {
                trace!(
                    fitness = fitness.name(),
                    row = i,
                    score = best_score,
                    plugboard = %best,
                    "Sweep row improved"
                );
            }
        }

        ClimbResult {
            plugboard: best,
            score: best_score,
            evaluated,
        }
    }

    /// Run `passes` consecutive sweeps, stopping early once a sweep changes nothing.
    pub fn climb(&self, fitness: &dyn Fitness, start: Plugboard, passes: usize) -> ClimbResult {
        let mut result = ClimbResult {
            plugboard: start,
            score: self.evaluate(fitness, start),
            evaluated: 1,
        };
        for _ in 0..passes {
            let evaluated = result.evaluated;
            let next = self.sweep(fitness, result.plugboard);
            let unchanged = next.plugboard == result.plugboard;
            result = ClimbResult {
                evaluated: evaluated + next.evaluated,
                ..next
            };
            if unchanged {
                break;
            }
        }
        result
    }
}
