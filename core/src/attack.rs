//! Plugboard recovery for one fixed rotor configuration.
//!
//! The attack is an ordered list of phases. Each phase runs the hill climber
//! with its own fitness, starting where the previous phase stopped. The
//! default plan is one index-of-coincidence sweep from the identity wiring
//! (coarse, robust when few plugs are right) followed by one trigram sweep
//! (sharper once the text is partly readable).

use crate::alphabet;
use crate::error::{Error, Result};
use crate::hillclimb::PlugboardHillClimber;
use crate::machine::MachineTemplate;
use crate::plugboard::Plugboard;
use crate::scoring::{Fitness, IocFitness, TrigramFitness, TrigramTable};
use serde::Serialize;
use tracing::debug;

/// Shortest ciphertext the attack accepts: one trigram window.
pub const MIN_CIPHERTEXT_LEN: usize = 3;

/// Fitness used by one phase.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Phase {
    /// Index of coincidence.
    Ioc,
    /// Trigram log-likelihood.
    Trigram,
}

/// One step of an attack plan.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PhaseStep {
    /// Fitness to climb on.
    pub phase: Phase,
    /// Number of sweeps.
    pub passes: usize,
}

/// Outcome of one phase.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct PhaseResult {
    /// Which fitness was used.
    pub phase: Phase,
    /// Wiring at the end of the phase.
    pub plugboard: Plugboard,
    /// Fitness of that wiring under this phase's function.
    pub score: f64,
    /// Wirings scored during the phase.
    pub evaluated: usize,
}

/// Outcome of a whole attack.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AttackOutcome {
    /// Final wiring.
    pub plugboard: Plugboard,
    /// Trigram score of the final decryption.
    pub trigram_score: f64,
    /// Index of coincidence of the final decryption.
    pub ioc_score: f64,
    /// Per-phase results in plan order.
    pub phases: Vec<PhaseResult>,
}

/// Two-phase plugboard attack over one rotor configuration.
#[derive(Debug, Clone)]
pub struct HillClimbAttack<'a> {
    trigrams: &'a TrigramTable,
    plan: Vec<PhaseStep>,
}

impl<'a> HillClimbAttack<'a> {
    /// Attack with the default plan: one IOC sweep, then one trigram sweep.
    pub fn new(trigrams: &'a TrigramTable) -> Self {
        Self::with_plan(
            trigrams,
            vec![
                PhaseStep {
                    phase: Phase::Ioc,
                    passes: 1,
                },
                PhaseStep {
                    phase: Phase::Trigram,
                    passes: 1,
                },
            ],
        )
    }

    /// Attack with a custom phase list.
    pub fn with_plan(trigrams: &'a TrigramTable, plan: Vec<PhaseStep>) -> Self {
        Self { trigrams, plan }
    }

    /// The phase list.
    pub fn plan(&self) -> &[PhaseStep] {
        &self.plan
    }

    fn fitness(&self, phase: Phase) -> Box<dyn Fitness + 'a> {
        match phase {
            Phase::Ioc => Box::new(IocFitness),
            Phase::Trigram => Box::new(TrigramFitness(self.trigrams)),
        }
    }

    /// Attack text ciphertext (uppercase A-Z only).
    ///
    /// # Errors
    ///
    /// - `Error::InvalidSymbol` for bytes outside A-Z
    /// - `Error::InsufficientData` for fewer than three letters
    pub fn run(&self, ciphertext: &str, template: &MachineTemplate) -> Result<AttackOutcome> {
        let indices = alphabet::to_indices(ciphertext.as_bytes())?;
        self.run_indices(&indices, template)
    }

    /// Attack ciphertext given as letter indices.
    ///
    /// # Errors
    ///
    /// - `Error::InvalidSymbol` for an index of 26 or more
    /// - `Error::InsufficientData` for fewer than three letters
    pub fn run_indices(&self, ciphertext: &[u8], template: &MachineTemplate) -> Result<AttackOutcome> {
        let climber = PlugboardHillClimber::new(ciphertext, template)?;

        let mut plugboard = Plugboard::identity();
        let mut phases = Vec::with_capacity(self.plan.len());
        for step in &self.plan {
            let fitness = self.fitness(step.phase);
            let result = climber.climb(fitness.as_ref(), plugboard, step.passes);
            debug!(
                phase = fitness.name(),
                score = result.score,
                evaluated = result.evaluated,
                plugboard = %result.plugboard,
                "Attack phase finished"
            );
            plugboard = result.plugboard;
            phases.push(PhaseResult {
                phase: step.phase,
                plugboard,
                score: result.score,
                evaluated: result.evaluated,
            });
        }

        Ok(AttackOutcome {
            plugboard,
            trigram_score: climber.evaluate(&TrigramFitness(self.trigrams), plugboard),
            ioc_score: climber.evaluate(&IocFitness, plugboard),
            phases,
        })
    }
}

pub(crate) fn check_ciphertext(ciphertext: &[u8]) -> Result<()> {
    if let Some(position) = ciphertext
        .iter()
        .position(|&i| i as usize >= alphabet::ALPHABET_LEN)
    {
        return Err(Error::InvalidSymbol {
            byte: ciphertext[position],
            position,
        });
    }
    if ciphertext.len() < MIN_CIPHERTEXT_LEN {
        return Err(Error::InsufficientData {
            len: ciphertext.len(),
            minimum: MIN_CIPHERTEXT_LEN,
        });
    }
    Ok(())
}
