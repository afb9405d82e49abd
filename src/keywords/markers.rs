// Marker-phrase extraction.
//
// Speakers flag what matters ("remember this", "the key thing is"). When a
// sentence contains one of those cues, the words of the *next* sentence are
// promoted straight to candidates without a frequency score.

use std::collections::HashSet;

use super::candidate::{Candidate, ExclusionSet};
use super::segment::{normalize, Sentence};
use super::stopwords::StopwordSet;
use super::traits::Segmenter;

/// Lower-case cues that mark the following sentence as important.
pub const IMPORTANCE_MARKERS: &[&str] = &[
    "important",
    "remember",
    "key",
    "crucial",
    "essential",
    "don't forget",
    "note that",
    "keep in mind",
];

/// Marker-phrase words must be longer than this.
pub const MIN_MARKER_WORD_LEN: usize = 3;

/// Whether a sentence contains an importance cue (substring match).
pub fn is_marker_sentence(text: &str) -> bool {
    let lower = text.to_lowercase();
    IMPORTANCE_MARKERS.iter().any(|m| lower.contains(m))
}

/// Pull candidate words out of sentences that follow a marker sentence.
///
/// `pending` holds terms already admitted by the frequency scorers; a word is
/// skipped if it matches one of them (case-insensitively) or was already
/// promoted by an earlier marker.
pub fn extract_marker_phrases(
    segmenter: &dyn Segmenter,
    sentences: &[Sentence],
    stopwords: &StopwordSet,
    exclusions: &ExclusionSet,
    pending: &[Candidate],
) -> Vec<Candidate> {
    let mut seen: HashSet<String> = pending.iter().map(|c| c.term.to_lowercase()).collect();
    let mut found = Vec::new();

    for marker in sentences.iter().filter(|s| is_marker_sentence(&s.text)) {
        let Some(next) = sentences.get(marker.index + 1) else {
            continue;
        };

        for word in segmenter.words(&next.text) {
            let Some(word) = normalize(&word, MIN_MARKER_WORD_LEN) else {
                continue;
            };
            if stopwords.contains(&word) || exclusions.contains(&word) {
                continue;
            }
            if seen.insert(word.clone()) {
                found.push(Candidate::marker(word));
            }
        }
    }
    found
}
