// Merge candidates from every scorer into the final keyword list.

use std::collections::HashSet;

use super::candidate::{Candidate, ExclusionSet};

/// Upper bound on the number of keywords returned.
pub const MAX_KEYWORDS: usize = 20;

/// Combine unigram, bigram and marker candidates into a ranked keyword list.
///
/// Excluded terms are dropped, duplicates collapse to one entry, and the
/// result is ordered longest first and capped at `MAX_KEYWORDS`. The relative
/// order of equal-length keywords is not part of the contract.
pub fn aggregate(
    unigrams: &[Candidate],
    bigrams: &[Candidate],
    markers: &[Candidate],
    exclusions: &ExclusionSet,
) -> Vec<String> {
    let mut seen = HashSet::new();
    let mut keywords: Vec<String> = unigrams
        .iter()
        .chain(bigrams)
        .chain(markers)
        .map(|c| c.term.as_str())
        .filter(|term| !exclusions.contains(term))
        .filter(|term| seen.insert(*term))
        .map(str::to_string)
        .collect();

    keywords.sort_by_key(|k| std::cmp::Reverse(k.chars().count()));
    keywords.truncate(MAX_KEYWORDS);
    keywords
}
