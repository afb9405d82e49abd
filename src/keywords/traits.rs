// Strategy traits for keyword discovery.
//
// Segmentation and collocation ranking each have a canonical implementation
// and an alternative. The engine holds them as trait objects so the choice is
// made once, at construction, instead of being scattered through the scoring
// code as fallbacks.

/// Splits raw text into sentences and sentences into words.
///
/// Implementations return raw words (original casing, punctuation-free runs).
/// Normalization and the length filter are applied by `segment::normalize`,
/// so every segmenter feeds the scorers the same kind of token.
pub trait Segmenter: Send + Sync {
    /// Short name for logs and the CLI.
    fn name(&self) -> &'static str;

    /// Split text into trimmed, non-empty sentences.
    fn sentences(&self, text: &str) -> Vec<String>;

    /// Split one sentence into words.
    fn words(&self, sentence: &str) -> Vec<String>;
}

/// Picks which adjacent token pairs are worth scoring as bigrams.
pub trait PairRanker: Send + Sync {
    fn name(&self) -> &'static str;

    /// Return the pairs to score, in ranked order. The same pair may appear
    /// more than once; the aggregator deduplicates the resulting phrases.
    fn rank(&self, tokens: &[String]) -> Vec<(String, String)>;
}

/// Anything that can turn a conversation into a ranked keyword list.
///
/// Mirrors the topic extractor seam: categorization only needs this trait, so
/// a different discovery approach can be dropped in without touching it.
pub trait KeywordExtractor {
    fn extract(&self, text: &str, existing: &[String], threshold: f64) -> Vec<String>;
}
