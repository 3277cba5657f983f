//! Outer search over rotor choice and starting position.
//!
//! The two leftmost rotor slots are searched: every ordered pair of distinct
//! rotors from a pool, crossed with every pair of starting letters. The
//! remaining rotors, ring settings and reflector stay fixed.
//!
//! Each candidate first gets a cheap baseline: the index of coincidence of
//! its decryption with no plugs. Only candidates whose baseline beats the
//! running mean of previously admitted baselines get the full
//! [`HillClimbAttack`]. That threshold only rises and depends on candidate
//! order, so a true solution can be pruned; the search is a heuristic, not an
//! exhaustive one.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use crate::alphabet::{self, ALPHABET};
use crate::attack::{check_ciphertext, HillClimbAttack};
use crate::catalog;
use crate::error::{Error, Result};
use crate::machine::MachineTemplate;
use crate::plugboard::Plugboard;
use crate::rotor::RotorSetting;
use crate::scoring::index_of_coincidence;
use serde::Serialize;
use tracing::{debug, info};

/// The rotors, letters and fixed settings to search over.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchSpace {
    /// Rotor ids eligible for the two searched slots.
    pub pool: Vec<String>,
    /// Starting letters tried in each searched slot.
    pub letters: Vec<char>,
    /// Ring settings (1-26) of the two searched slots.
    pub searched_rings: [u8; 2],
    /// Rotors to the right of the searched slots, leftmost first.
    pub fixed: Vec<RotorSetting>,
    /// Reflector id.
    pub reflector: String,
}

impl Default for SearchSpace {
    /// Slots `? ? IV III`, positions `? ? B Q`, rings `1 1 1 16`, reflector C-thin.
    fn default() -> Self {
        Self {
            pool: ["I", "II", "V", "VI", "Beta", "Gamma"]
                .map(String::from)
                .to_vec(),
            letters: ALPHABET.iter().map(|&b| b as char).collect(),
            searched_rings: [1, 1],
            fixed: vec![
                RotorSetting::new("IV", 'B', 1),
                RotorSetting::new("III", 'Q', 16),
            ],
            reflector: "C-thin".into(),
        }
    }
}

/// One point of the search space.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Candidate {
    /// Pool index of the leftmost rotor.
    pub first: usize,
    /// Pool index of the second rotor.
    pub second: usize,
    /// Starting letter of the leftmost rotor.
    pub first_letter: char,
    /// Starting letter of the second rotor.
    pub second_letter: char,
}

impl SearchSpace {
    /// Check ids and letters before any work is done.
    ///
    /// # Errors
    ///
    /// Configuration errors for unknown ids, bad letters or rings, a pool
    /// without two distinct rotors, or no letters at all.
    pub fn validate(&self) -> Result<()> {
        for id in &self.pool {
            catalog::rotor_wiring(id)?;
        }
        let distinct = self
            .pool
            .iter()
            .enumerate()
            .any(|(k, a)| self.pool[..k].iter().any(|b| b != a));
        if !distinct {
            return Err(Error::EmptyRotorPool);
        }
        if self.letters.is_empty() {
            return Err(Error::EmptyLetterSet);
        }
        if let Some(&letter) = self
            .letters
            .iter()
            .find(|&&c| !u8::try_from(c).is_ok_and(|b| alphabet::index_of(b).is_some()))
        {
            return Err(Error::InvalidPosition { letter });
        }
        if let Some(&ring) = self.searched_rings.iter().find(|r| !(1..=26).contains(*r)) {
            return Err(Error::InvalidRingSetting { ring });
        }
        catalog::reflector_wiring(&self.reflector)?;
        // Validates the fixed rotors and the overall rotor count.
        let first = self.letters[0];
        self.template(&Candidate {
            first: 0,
            second: 0,
            first_letter: first,
            second_letter: first,
        })?;
        Ok(())
    }

    /// Lazily enumerate candidates: rotor pairs outermost, second letter innermost.
    pub fn candidates(&self) -> impl Iterator<Item = Candidate> + '_ {
        let n = self.pool.len();
        (0..n)
            .flat_map(move |first| (0..n).map(move |second| (first, second)))
            .filter(move |&(first, second)| self.pool[first] != self.pool[second])
            .flat_map(move |(first, second)| {
                self.letters.iter().flat_map(move |&first_letter| {
                    self.letters.iter().map(move |&second_letter| Candidate {
                        first,
                        second,
                        first_letter,
                        second_letter,
                    })
                })
            })
    }

    /// Number of candidates [`SearchSpace::candidates`] yields.
    pub fn candidate_count(&self) -> usize {
        self.candidates().count()
    }

    /// Full rotor settings of a candidate, leftmost first.
    pub fn settings(&self, candidate: &Candidate) -> Vec<RotorSetting> {
        let [first_ring, second_ring] = self.searched_rings;
        let mut settings = vec![
            RotorSetting::new(
                self.pool[candidate.first].clone(),
                candidate.first_letter,
                first_ring,
            ),
            RotorSetting::new(
                self.pool[candidate.second].clone(),
                candidate.second_letter,
                second_ring,
            ),
        ];
        settings.extend(self.fixed.iter().cloned());
        settings
    }

    /// Build the machine template of a candidate.
    pub fn template(&self, candidate: &Candidate) -> Result<MachineTemplate> {
        MachineTemplate::new(&self.settings(candidate), &self.reflector)
    }
}

/// Adaptive pruning threshold: the mean of admitted baselines.
///
/// The first baseline is always admitted. A later one is admitted only if it
/// is strictly above the current mean, and then joins the mean.
#[derive(Debug, Clone, Copy, Default)]
pub struct ThresholdGate {
    total: f64,
    admitted: usize,
}

impl ThresholdGate {
    /// Current threshold, or `None` before the first baseline.
    pub fn threshold(&self) -> Option<f64> {
        (self.admitted > 0).then(|| self.total / self.admitted as f64)
    }

    /// Decide whether a baseline earns a full attack.
    pub fn admit(&mut self, baseline: f64) -> bool {
        match self.threshold() {
            Some(mean) if baseline <= mean => false,
            _ => {
                self.total += baseline;
                self.admitted += 1;
                true
            }
        }
    }
}

/// Cooperative cancellation flag shared between a search and its controller.
#[derive(Debug, Clone, Default)]
pub struct CancellationToken(Arc<AtomicBool>);

impl CancellationToken {
    /// Create an untriggered token.
    pub fn new() -> Self {
        Self::default()
    }

    /// Ask the search to stop before its next candidate.
    pub fn cancel(&self) {
        self.0.store(true, Ordering::Relaxed);
    }

    /// Whether cancellation was requested.
    pub fn is_cancelled(&self) -> bool {
        self.0.load(Ordering::Relaxed)
    }
}

/// Best configuration found by a search.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SearchOutcome {
    /// Rotor ids, leftmost first.
    pub rotors: Vec<String>,
    /// Starting letters, leftmost first.
    pub positions: Vec<char>,
    /// Recovered plugboard.
    pub plugboard: Plugboard,
    /// Trigram score of the best decryption.
    pub trigram_score: f64,
    /// Index of coincidence of the best decryption.
    pub ioc_score: f64,
    /// Candidates whose baseline was computed.
    pub examined: usize,
    /// Candidates that received a full attack.
    pub attacked: usize,
}

/// Rotor/position search driving a [`HillClimbAttack`] per surviving candidate.
pub struct RotorPositionSearch<'a> {
    space: SearchSpace,
    attack: HillClimbAttack<'a>,
    cancel: CancellationToken,
}

impl<'a> RotorPositionSearch<'a> {
    /// Create a search over `space` using `attack` for survivors.
    pub fn new(space: SearchSpace, attack: HillClimbAttack<'a>) -> Self {
        Self {
            space,
            attack,
            cancel: CancellationToken::new(),
        }
    }

    /// Use an externally controlled cancellation token.
    pub fn with_cancellation(mut self, token: CancellationToken) -> Self {
        self.cancel = token;
        self
    }

    /// The search space.
    pub fn space(&self) -> &SearchSpace {
        &self.space
    }

    /// Search for the configuration that best explains `ciphertext` (A-Z only).
    ///
    /// # Errors
    ///
    /// - configuration errors from [`SearchSpace::validate`]
    /// - `Error::InvalidSymbol` / `Error::InsufficientData` for bad ciphertext
    /// - `Error::Cancelled` if the token fires before the search finishes
    pub fn run(&self, ciphertext: &str) -> Result<SearchOutcome> {
        let ciphertext = alphabet::to_indices(ciphertext.as_bytes())?;
        check_ciphertext(&ciphertext)?;
        self.space.validate()?;

        let mut gate = ThresholdGate::default();
        let mut best: Option<SearchOutcome> = None;
        let mut examined = 0;
        let mut attacked = 0;

        for candidate in self.space.candidates() {
            if self.cancel.is_cancelled() {
                info!(examined, attacked, "Search cancelled");
                return Err(Error::Cancelled);
            }
            let template = self.space.template(&candidate)?;
            let baseline =
                index_of_coincidence(&template.decode(Plugboard::identity(), &ciphertext))?;
            examined += 1;
            if !gate.admit(baseline) {
                continue;
            }
            attacked += 1;

            let outcome = self.attack.run_indices(&ciphertext, &template)?;
            debug!(
                rotors = ?template.rotor_ids(),
                positions = ?template.positions(),
                baseline,
                threshold = ?gate.threshold(),
                trigram_score = outcome.trigram_score,
                "Candidate attacked"
            );

            if best
                .as_ref()
                .map_or(true, |b| outcome.trigram_score > b.trigram_score)
            {
                let improved = SearchOutcome {
                    rotors: template.rotor_ids().into_iter().map(String::from).collect(),
                    positions: template.positions(),
                    plugboard: outcome.plugboard,
                    trigram_score: outcome.trigram_score,
                    ioc_score: outcome.ioc_score,
                    examined,
                    attacked,
                };
                info!(
                    rotors = ?improved.rotors,
                    positions = ?improved.positions,
                    plugboard = %improved.plugboard,
                    score = improved.trigram_score,
                    "New best configuration"
                );
                best = Some(improved);
            }
        }

        // validate() guarantees at least one candidate, and the first is always admitted.
        let mut best = best.ok_or(Error::EmptyRotorPool)?;
        best.examined = examined;
        best.attacked = attacked;
        info!(
            examined,
            attacked,
            score = best.trigram_score,
            "Search finished"
        );
        Ok(best)
    }
}
