//! End-to-end rotor/position search on a reduced space.

mod common;

use enigma_core::{
    HillClimbAttack, MachineConfig, Plugboard, RotorPositionSearch, RotorSetting, SearchSpace,
};

fn encrypt(plaintext: &str) -> String {
    let config = MachineConfig {
        rotors: vec![
            RotorSetting::new("II", 'D', 1),
            RotorSetting::new("V", 'K', 1),
            RotorSetting::new("IV", 'B', 1),
            RotorSetting::new("III", 'Q', 16),
        ],
        reflector: "C-thin".into(),
        plugboard: Plugboard::parse("AQ BJ CH DF EZ GK").unwrap(),
    };
    config.build().unwrap().encode_text(plaintext).unwrap()
}

fn space() -> SearchSpace {
    SearchSpace {
        pool: vec!["I".into(), "II".into(), "V".into()],
        letters: vec!['A', 'D', 'K'],
        ..SearchSpace::default()
    }
}

#[test]
fn finds_rotors_positions_and_plugboard() {
    let table = common::smoothed_table();
    let plaintext = common::corpus_letters()[600..900].to_string();
    let ciphertext = encrypt(&plaintext);

    let search = RotorPositionSearch::new(space(), HillClimbAttack::new(&table));
    let outcome = search.run(&ciphertext).unwrap();

    assert_eq!(outcome.rotors, ["II", "V", "IV", "III"]);
    assert_eq!(outcome.positions, ['D', 'K', 'B', 'Q']);
    assert_eq!(outcome.plugboard.to_pairs_string(), "AQ BJ CH DF EZ GK");
    assert_eq!(outcome.examined, 3 * 2 * 3 * 3);
    assert!(outcome.attacked >= 1 && outcome.attacked < outcome.examined);
}

#[test]
fn search_is_deterministic() {
    let table = common::smoothed_table();
    let ciphertext = encrypt(&common::corpus_letters()[600..900]);
    let search = RotorPositionSearch::new(space(), HillClimbAttack::new(&table));
    assert_eq!(search.run(&ciphertext).unwrap(), search.run(&ciphertext).unwrap());
}

#[test]
fn outcome_serializes() {
    let table = common::smoothed_table();
    let ciphertext = encrypt(&common::corpus_letters()[600..900]);
    let outcome = RotorPositionSearch::new(space(), HillClimbAttack::new(&table))
        .run(&ciphertext)
        .unwrap();
    let json = serde_json::to_value(&outcome).unwrap();
    assert_eq!(json["plugboard"], "AQ BJ CH DF EZ GK");
    assert_eq!(json["positions"][0], "D");
    assert_eq!(json["examined"], 54);
}
