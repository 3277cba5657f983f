//! Enigma Core - rotor machine simulation and ciphertext-only plugboard recovery.
//!
//! This library provides:
//! - A faithful rotor machine (historic wirings, double-step stepping)
//! - Index-of-coincidence and trigram fitness functions
//! - Greedy hill climbing over plugboard wirings
//! - A pruned search over rotor choice and starting positions
//!
//! # Constraints
//!
//! This library intentionally does NOT:
//! - Perform file I/O (trigram tables are parsed from caller-supplied text)
//! - Guarantee an optimal answer (the search is greedy and pruned)
//! - Model cryptographic security
//!
//! # Example: Encrypt, then recover the plugboard
//!
//! ```
//! use enigma_core::{
//!     HillClimbAttack, MachineConfig, MachineTemplate, Plugboard, RotorSetting, TrigramTable,
//! };
//!
//! let rotors = vec![
//!     RotorSetting::new("I", 'A', 1),
//!     RotorSetting::new("II", 'A', 1),
//!     RotorSetting::new("III", 'A', 1),
//! ];
//! let config = MachineConfig {
//!     rotors: rotors.clone(),
//!     reflector: "B".into(),
//!     plugboard: Plugboard::identity(),
//! };
//!
//! // Encryption and decryption are the same operation.
//! let ciphertext = config.build().unwrap().encode_text("HELLOWORLDTESTMESSAGE").unwrap();
//! let plaintext = config.build().unwrap().encode_text(&ciphertext).unwrap();
//! assert_eq!(plaintext, "HELLOWORLDTESTMESSAGE");
//!
//! // Attack the ciphertext for this rotor configuration.
//! let table = TrigramTable::parse("HEL 5\nELL 5\nLLO 5\nTES 2\n").unwrap();
//! let template = MachineTemplate::new(&rotors, "B").unwrap();
//! let outcome = HillClimbAttack::new(&table).run(&ciphertext, &template).unwrap();
//! assert!(outcome.plugboard.is_involution());
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod alphabet;
pub mod attack;
pub mod catalog;
pub mod error;
pub mod hillclimb;
pub mod machine;
pub mod plugboard;
pub mod rotor;
pub mod scoring;
pub mod search;

pub use attack::{AttackOutcome, HillClimbAttack, Phase, PhaseResult, PhaseStep};
pub use error::{Error, Result};
pub use hillclimb::{ClimbResult, PlugboardHillClimber};
pub use machine::{EnigmaMachine, MachineConfig, MachineTemplate};
pub use plugboard::Plugboard;
pub use rotor::{Rotor, RotorSetting};
pub use scoring::{index_of_coincidence, Fitness, IocFitness, TrigramFitness, TrigramTable};
pub use search::{
    CancellationToken, Candidate, RotorPositionSearch, SearchOutcome, SearchSpace, ThresholdGate,
};
