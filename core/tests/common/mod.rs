//! Shared fixtures: an English corpus and a trigram table built from it.

#![allow(dead_code)]

use enigma_core::{alphabet::ALPHABET, TrigramTable};

/// Plain English prose used as plaintext and as the trigram reference.
pub const CORPUS: &str = concat!(
    "The weather station on the northern ridge reported heavy snow throughout the night and the convoy was ordered to remain in the harbour until the morning. All ships are to maintain radio silence and keep their lights covered while the escort vessels patrol the outer channel. The commander of the third flotilla requests fresh supplies of fuel and ammunition before the next departure, and the engineers report that the starboard engine of the leading destroyer must be repaired before it can sail again. There is no sign of enemy aircraft over the coast, but the observers on the cliffs have seen smoke to the west and believe that a group of merchant ships is moving towards the strait. The headquarters will send further instructions when the reconnaissance flight returns at noon. Until then every unit should stay at its present position and report any change in the weather or the movement of ships without delay.\n",
    "In the morning the wind turned to the south and the sea became calmer than it had been for many days. The harbour master opened the gates and the first of the trawlers went out to the fishing grounds beyond the lighthouse. On the quay the workers loaded crates of bread and salted meat into the holds of the supply ship while the officers checked the lists and signed the papers. A messenger arrived from the signal office with a note for the captain, who read it quickly and then gave orders to prepare the ship for sea within the hour. The men worked without rest, and by the time the church bell struck ten the anchor had been raised and the ship was moving slowly past the breakwater towards the open water.\n",
    "The story of the old mill by the river is known to everyone in the village. For more than two hundred years the great wheel turned with the current and ground the corn of the farmers who lived in the valley. When the railway came the mill lost most of its trade, and after the war it stood empty until a young couple from the city bought it and turned it into a small hotel. Now the visitors sit on the terrace in the evening and watch the water running under the bridge while the swallows fly low over the meadows.\n",
);

/// Corpus letters only, uppercased.
pub fn corpus_letters() -> String {
    CORPUS
        .bytes()
        .filter(u8::is_ascii_alphabetic)
        .map(|b| b.to_ascii_uppercase() as char)
        .collect()
}

/// Trigram table from the corpus with add-one smoothing.
///
/// Every trigram is present, so unseen letter combinations score below seen
/// ones instead of contributing a neutral 0.
pub fn smoothed_table() -> TrigramTable {
    let letters = corpus_letters();
    let mut counts = std::collections::HashMap::new();
    for window in letters.as_bytes().windows(3) {
        *counts.entry(window.to_vec()).or_insert(0u64) += 1;
    }
    let mut entries = Vec::with_capacity(26 * 26 * 26);
    for &a in ALPHABET {
        for &b in ALPHABET {
            for &c in ALPHABET {
                let key = vec![a, b, c];
                let count = counts.get(&key).copied().unwrap_or(0) + 1;
                entries.push((String::from_utf8(key).unwrap(), count));
            }
        }
    }
    TrigramTable::from_counts(entries).unwrap()
}
