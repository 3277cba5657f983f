//! Command-level tests: files in, printed output back.

mod common;

use std::collections::HashMap;
use std::path::PathBuf;

use enigma_cli::{run, CliError, Command, Config, OutputFormat};

struct TempDir(PathBuf);

impl TempDir {
    fn new(name: &str) -> Self {
        let dir = std::env::temp_dir().join(format!("enigma-cli-{}-{name}", std::process::id()));
        std::fs::create_dir_all(&dir).unwrap();
        Self(dir)
    }

    fn write(&self, name: &str, contents: &str) -> PathBuf {
        let path = self.0.join(name);
        std::fs::write(&path, contents).unwrap();
        path
    }
}

impl Drop for TempDir {
    fn drop(&mut self) {
        let _ = std::fs::remove_dir_all(&self.0);
    }
}

fn config(trigrams: PathBuf) -> Config {
    let vars: HashMap<&str, &str> = [
        ("ENIGMA_ROTORS", "II V IV III"),
        ("ENIGMA_POSITIONS", "D K B Q"),
        ("ENIGMA_RINGS", "1 1 1 16"),
        ("ENIGMA_REFLECTOR", "C-thin"),
        ("ENIGMA_PLUGBOARD", "AQ BJ CH DF EZ GK"),
        ("ENIGMA_ROTOR_POOL", "I II V"),
        ("ENIGMA_SEARCH_LETTERS", "ADK"),
    ]
    .into_iter()
    .collect();
    Config {
        trigrams_path: trigrams,
        ..Config::from_lookup(|key| vars.get(key).map(|v| (*v).to_string()))
    }
}

#[test]
fn encrypt_then_attack_recovers_settings() {
    let dir = TempDir::new("roundtrip");
    let trigrams = dir.write("trigrams.txt", &common::trigram_file());
    let config = config(trigrams);

    let plaintext = common::corpus_letters()[600..900].to_lowercase();
    let input = dir.write("plain.txt", &plaintext);
    let ciphertext = run(&Command::Encrypt(input), &config).unwrap();
    assert_eq!(ciphertext.len(), 300);

    let cipher_file = dir.write("cipher.txt", &ciphertext);
    let output = run(&Command::Attack(cipher_file), &config).unwrap();
    let lines: Vec<&str> = output.lines().collect();
    assert_eq!(lines, ["II V IV III", "D K B Q", "AQ BJ CH DF EZ GK"]);
}

#[test]
fn attack_json_output() {
    let dir = TempDir::new("json");
    let trigrams = dir.write("trigrams.txt", &common::trigram_file());
    let mut config = config(trigrams);

    let input = dir.write("plain.txt", &common::corpus_letters()[600..900]);
    let ciphertext = run(&Command::Encrypt(input), &config).unwrap();
    let cipher_file = dir.write("cipher.txt", &ciphertext);

    config.output = OutputFormat::Json;
    let json = run(&Command::Attack(cipher_file), &config).unwrap();
    let value: serde_json::Value = serde_json::from_str(&json).unwrap();
    assert_eq!(value["rotors"][0], "II");
    assert_eq!(value["plugboard"], "AQ BJ CH DF EZ GK");
    assert_eq!(value["examined"], 54);
}

#[test]
fn attack_without_trigram_file_fails() {
    let dir = TempDir::new("missing");
    let config = config(dir.0.join("absent.txt"));
    let cipher_file = dir.write("cipher.txt", "ABCDEFGHIJ");
    let err = run(&Command::Attack(cipher_file), &config).unwrap_err();
    assert!(matches!(err, CliError::Io { .. }));
    assert_eq!(err.exit_code(), 1);
}

#[test]
fn attack_rejects_non_letter_ciphertext() {
    let dir = TempDir::new("symbols");
    let trigrams = dir.write("trigrams.txt", &common::trigram_file());
    let config = config(trigrams);

    for text in ["QWERTY1234UIOP\n", "QWERTYasdfUIOP\n"] {
        let cipher_file = dir.write("cipher.txt", text);
        let err = run(&Command::Attack(cipher_file), &config).unwrap_err();
        assert!(matches!(
            err,
            CliError::Core(enigma_core::Error::InvalidSymbol { position: 6, .. })
        ));
        assert_eq!(err.exit_code(), 1);
    }
}

#[test]
fn unknown_rotor_is_configuration_error() {
    let dir = TempDir::new("badrotor");
    let config = Config {
        rotors: "I II IX".into(),
        positions: "A A A".into(),
        rings: "1 1 1".into(),
        ..config(dir.0.join("unused.txt"))
    };
    let input = dir.write("plain.txt", "HELLO");
    let err = run(&Command::Encrypt(input), &config).unwrap_err();
    assert_eq!(err.to_string(), "unknown rotor: IX");
    assert_eq!(err.exit_code(), 3);
}
