// Two-word phrase scoring.
//
// Pairs are taken from the unfiltered token stream so adjacency reflects the
// original word order. Ranking decides which pairs are worth scoring; the
// final cutoff is always the pair's exact adjacent count over the filtered
// stream length.

use std::collections::HashMap;

use super::candidate::{Candidate, CandidateKind, ExclusionSet};
use super::traits::PairRanker;

/// Pairs seen fewer times than this are never ranked by PMI.
pub const MIN_PAIR_FREQ: usize = 2;

/// How many ranked pairs are scored.
pub const TOP_PAIRS: usize = 20;

/// Ranks frequent pairs by pointwise mutual information.
///
/// `pmi = log2(n_pair * N / (n_w1 * n_w2))` where `N` is the stream length and
/// `n_w` are the unigram counts in the same stream. Equal scores are ordered
/// by the pair itself so the ranking is reproducible.
#[derive(Debug, Clone, Copy)]
pub struct PmiRanker {
    pub min_freq: usize,
    pub limit: usize,
}

impl Default for PmiRanker {
    fn default() -> Self {
        Self {
            min_freq: MIN_PAIR_FREQ,
            limit: TOP_PAIRS,
        }
    }
}

impl PairRanker for PmiRanker {
    fn name(&self) -> &'static str {
        "pmi"
    }

    fn rank(&self, tokens: &[String]) -> Vec<(String, String)> {
        if tokens.len() < 2 {
            return Vec::new();
        }

        let mut word_counts: HashMap<&str, usize> = HashMap::new();
        for t in tokens {
            *word_counts.entry(t.as_str()).or_insert(0) += 1;
        }

        let mut pair_counts: HashMap<(&str, &str), usize> = HashMap::new();
        for w in tokens.windows(2) {
            *pair_counts.entry((w[0].as_str(), w[1].as_str())).or_insert(0) += 1;
        }

        let n = tokens.len() as f64;
        let mut scored: Vec<((&str, &str), f64)> = pair_counts
            .into_iter()
            .filter(|(_, count)| *count >= self.min_freq)
            .map(|(pair, count)| {
                let n1 = word_counts[pair.0] as f64;
                let n2 = word_counts[pair.1] as f64;
                (pair, (count as f64 * n / (n1 * n2)).log2())
            })
            .collect();

        scored.sort_by(|a, b| b.1.total_cmp(&a.1).then_with(|| a.0.cmp(&b.0)));
        scored
            .into_iter()
            .take(self.limit)
            .map(|((w1, w2), _)| (w1.to_string(), w2.to_string()))
            .collect()
    }
}

/// Every adjacent pair, once per position, unranked.
///
/// No frequency filter, so a pair seen once can still pass the cutoff at
/// low thresholds.
#[derive(Debug, Clone, Copy, Default)]
pub struct AdjacentPairs;

impl PairRanker for AdjacentPairs {
    fn name(&self) -> &'static str {
        "adjacent"
    }

    fn rank(&self, tokens: &[String]) -> Vec<(String, String)> {
        tokens
            .windows(2)
            .map(|w| (w[0].clone(), w[1].clone()))
            .collect()
    }
}

/// Exact number of times `w1` is immediately followed by `w2`.
pub fn pair_count(tokens: &[String], w1: &str, w2: &str) -> usize {
    tokens
        .windows(2)
        .filter(|w| w[0] == w1 && w[1] == w2)
        .count()
}

/// Score ranked pairs against the filtered stream length `total`.
///
/// A phrase is a candidate when its share is strictly greater than
/// `threshold / 2`. With `total == 0` nothing is scored.
pub fn score_bigrams(
    ranker: &dyn PairRanker,
    unfiltered: &[String],
    total: usize,
    exclusions: &ExclusionSet,
    threshold: f64,
) -> Vec<Candidate> {
    if total == 0 {
        return Vec::new();
    }

    let cutoff = threshold / 2.0;
    let mut memo: HashMap<(String, String), usize> = HashMap::new();
    let mut found = Vec::new();

    for (w1, w2) in ranker.rank(unfiltered) {
        let phrase = format!("{w1} {w2}");
        if exclusions.contains(&phrase) {
            continue;
        }
        let count = *memo
            .entry((w1.clone(), w2.clone()))
            .or_insert_with(|| pair_count(unfiltered, &w1, &w2));
        let importance = count as f64 / total as f64;
        if importance > cutoff {
            found.push(Candidate::scored(phrase, CandidateKind::Bigram, importance));
        }
    }
    found
}
