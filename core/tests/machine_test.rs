//! Machine-level behaviour: known vectors, reciprocity and stepping.

mod common;

use enigma_core::{EnigmaMachine, MachineConfig, Plugboard, RotorSetting};
use proptest::prelude::*;

fn config(ids: &[&str], starts: &str, rings: &[u8], reflector: &str, plugs: &str) -> MachineConfig {
    MachineConfig {
        rotors: ids
            .iter()
            .zip(starts.chars())
            .zip(rings)
            .map(|((id, start), &ring)| RotorSetting::new(*id, start, ring))
            .collect(),
        reflector: reflector.into(),
        plugboard: Plugboard::parse(plugs).unwrap(),
    }
}

fn build(config: &MachineConfig) -> EnigmaMachine {
    config.build().unwrap()
}

#[test]
fn hello_world_roundtrip() {
    let cfg = config(&["I", "II", "III"], "AAA", &[1, 1, 1], "B", "");
    let ciphertext = build(&cfg).encode_text("HELLOWORLDTESTMESSAGE").unwrap();
    assert_eq!(ciphertext, "ILBDAAMTAZMTJAANUNPDY");
    assert_eq!(
        build(&cfg).encode_text(&ciphertext).unwrap(),
        "HELLOWORLDTESTMESSAGE"
    );
}

#[test]
fn four_rotor_roundtrip_with_plugs() {
    let cfg = config(
        &["Gamma", "VI", "IV", "III"],
        "AABQ",
        &[1, 1, 1, 16],
        "C-thin",
        "AQ BJ CH DF EZ GK",
    );
    let plaintext = common::corpus_letters();
    let ciphertext = build(&cfg).encode_text(&plaintext).unwrap();
    assert_eq!(ciphertext.len(), plaintext.len());
    assert_ne!(ciphertext, plaintext);
    assert_eq!(build(&cfg).encode_text(&ciphertext).unwrap(), plaintext);
}

#[test]
fn reset_machine_recovers_plaintext() {
    let cfg = config(&["II", "V", "VIII"], "XEZ", &[5, 12, 26], "C", "PO ML IU KJ");
    let mut machine = build(&cfg);
    let ciphertext = machine.encode_text("WEATHERREPORTFORTHENORTHSEA").unwrap();
    machine.reset();
    assert_eq!(
        machine.encode_text(&ciphertext).unwrap(),
        "WEATHERREPORTFORTHENORTHSEA"
    );
}

#[test]
fn permutation_and_pair_plugboards_encrypt_alike() {
    let pairs = config(&["I", "II", "III"], "MCK", &[1, 1, 1], "B", "AQ BJ CH");
    let perm = config(
        &["I", "II", "III"],
        "MCK",
        &[1, 1, 1],
        "B",
        "QJHDEFGCIBKLMNOPARSTUVWXYZ",
    );
    assert_eq!(
        build(&pairs).encode_text("ENIGMA").unwrap(),
        build(&perm).encode_text("ENIGMA").unwrap()
    );
}

#[test]
fn middle_rotor_double_steps() {
    // Middle rotor II one short of its notch E, right rotor III on its notch V.
    let cfg = config(&["I", "II", "III"], "ADV", &[1, 1, 1], "B", "");
    let mut machine = build(&cfg);
    machine.encode_text("XX").unwrap();
    let offsets = machine.offsets();
    assert_eq!(offsets[0], 1, "left rotor advanced once");
    assert_eq!(offsets[1], 3 + 2, "middle rotor advanced twice");
    assert_eq!(offsets[2], 21 + 2, "right rotor advanced twice");
}

fn rotor_id() -> impl Strategy<Value = &'static str> {
    prop::sample::select(vec!["I", "II", "III", "IV", "V", "VI", "VII", "VIII"])
}

fn plug_pairs() -> impl Strategy<Value = Plugboard> {
    Just((0u8..26).collect::<Vec<u8>>())
        .prop_shuffle()
        .prop_flat_map(|letters| (Just(letters), 0usize..=13))
        .prop_map(|(letters, n)| {
            let pairs: Vec<String> = letters
                .chunks(2)
                .take(n)
                .map(|p| [(b'A' + p[0]) as char, (b'A' + p[1]) as char].iter().collect())
                .collect();
            Plugboard::from_pairs(&pairs).unwrap()
        })
}

proptest! {
    #[test]
    fn prop_self_reciprocal(
        ids in prop::collection::vec(rotor_id(), 3),
        starts in prop::collection::vec(0u8..26, 3),
        rings in prop::collection::vec(1u8..=26, 3),
        plugboard in plug_pairs(),
        text in "[A-Z]{1,200}",
    ) {
        let rotors: Vec<RotorSetting> = ids
            .iter()
            .zip(&starts)
            .zip(&rings)
            .map(|((id, &s), &r)| RotorSetting::new(*id, (b'A' + s) as char, r))
            .collect();
        let cfg = MachineConfig { rotors, reflector: "B".into(), plugboard };
        let ciphertext = cfg.build().unwrap().encode_text(&text).unwrap();
        prop_assert_eq!(ciphertext.len(), text.len());
        prop_assert_eq!(cfg.build().unwrap().encode_text(&ciphertext).unwrap(), text);
    }

    #[test]
    fn prop_plugboards_are_involutions(plugboard in plug_pairs()) {
        prop_assert!(plugboard.is_involution());
        let text = plugboard.to_pairs_string();
        let reparsed = Plugboard::parse(&text).unwrap();
        prop_assert_eq!(reparsed, plugboard);
        let perm = Plugboard::from_permutation(&plugboard.to_permutation_string()).unwrap();
        prop_assert_eq!(perm, plugboard);
    }
}
