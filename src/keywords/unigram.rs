// Single-token scoring by relative frequency.

use std::collections::HashMap;

use super::candidate::{Candidate, CandidateKind, ExclusionSet};

/// How many of the most frequent tokens are considered.
pub const TOP_UNIGRAMS: usize = 30;

/// Count tokens, most frequent first. Ties keep first-encountered order.
pub fn most_common(tokens: &[String], limit: usize) -> Vec<(String, usize)> {
    let mut order: Vec<(String, usize)> = Vec::new();
    let mut index: HashMap<&str, usize> = HashMap::new();

    for token in tokens {
        match index.get(token.as_str()) {
            Some(&i) => order[i].1 += 1,
            None => {
                index.insert(token.as_str(), order.len());
                order.push((token.clone(), 1));
            }
        }
    }

    // sort_by is stable, so equal counts stay in first-seen order
    order.sort_by(|a, b| b.1.cmp(&a.1));
    order.truncate(limit);
    order
}

/// Score tokens from the stop-word-filtered stream.
///
/// A token is a candidate when its share of the stream is strictly greater
/// than `threshold / 4`. An empty stream produces nothing.
pub fn score_unigrams(
    filtered: &[String],
    exclusions: &ExclusionSet,
    threshold: f64,
) -> Vec<Candidate> {
    let total = filtered.len();
    if total == 0 {
        return Vec::new();
    }

    let cutoff = threshold / 4.0;
    most_common(filtered, TOP_UNIGRAMS)
        .into_iter()
        .filter(|(word, _)| !exclusions.contains(word))
        .filter_map(|(word, count)| {
            let importance = count as f64 / total as f64;
            (importance > cutoff).then(|| Candidate::scored(word, CandidateKind::Unigram, importance))
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn toks(words: &[&str]) -> Vec<String> {
        words.iter().map(|w| w.to_string()).collect()
    }

    #[test]
    fn test_most_common_ties_keep_first_seen() {
        let counted = most_common(&toks(&["b", "a", "c", "a", "b", "d"]), 10);
        assert_eq!(
            counted,
            vec![
                ("b".to_string(), 2),
                ("a".to_string(), 2),
                ("c".to_string(), 1),
                ("d".to_string(), 1)
            ]
        );
    }

    #[test]
    fn test_boundary_is_excluded() {
        let stream = toks(&["dog", "dog", "dog", "dog", "cat", "cat", "bird", "nice"]);
        let found = score_unigrams(&stream, &ExclusionSet::default(), 0.5);
        let terms: Vec<&str> = found.iter().map(|c| c.term.as_str()).collect();
        // bird and nice sit exactly at 1/8 = 0.125 and are dropped
        assert_eq!(terms, vec!["dog", "cat"]);
        assert!((found[0].importance.unwrap() - 0.5).abs() < 1e-9);
        assert!((found[1].importance.unwrap() - 0.25).abs() < 1e-9);
    }

    #[test]
    fn test_empty_stream() {
        assert!(score_unigrams(&[], &ExclusionSet::default(), 0.5).is_empty());
    }

    #[test]
    fn test_excluded_tokens_skipped() {
        let stream = toks(&["flask", "flask", "route"]);
        let found = score_unigrams(&stream, &ExclusionSet::new(["FLASK"]), 0.5);
        assert_eq!(found.len(), 1);
        assert_eq!(found[0].term, "route");
    }

    #[test]
    fn test_only_top_thirty_considered() {
        // 40 distinct tokens, each once; zero threshold admits all considered
        let stream: Vec<String> = (0..40).map(|i| format!("tok{i}")).collect();
        let found = score_unigrams(&stream, &ExclusionSet::default(), 0.0);
        assert_eq!(found.len(), TOP_UNIGRAMS);
        assert_eq!(found[0].term, "tok0");
    }
}
