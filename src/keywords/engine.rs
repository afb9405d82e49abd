// The discovery pipeline.
//
// raw text -> segmenter -> stop-word filter -> unigram + collocation scorers
//          -> marker-phrase extractor (on the sentences) -> aggregator
//
// The engine owns one implementation of each strategy, chosen at
// construction. `KeywordEngine::default()` is the reference configuration:
// regex segmentation, builtin stop words, PMI-ranked collocations.

use std::fmt;
use std::str::FromStr;

use serde::Serialize;
use tracing::{debug, info};

use super::aggregate::aggregate;
use super::candidate::{Candidate, ExclusionSet};
use super::collocation::{score_bigrams, AdjacentPairs, PmiRanker};
use super::markers::extract_marker_phrases;
use super::segment::{flatten, segment, RegexSegmenter, RuleSegmenter};
use super::stopwords::{StopwordSet, StopwordSource};
use super::traits::{KeywordExtractor, PairRanker, Segmenter};
use super::unigram::score_unigrams;

/// Default sensitivity. Higher values admit fewer, more dominant terms.
pub const DEFAULT_THRESHOLD: f64 = 0.5;

/// Which segmenter to use.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SegmenterKind {
    #[default]
    Regex,
    Rule,
}

impl FromStr for SegmenterKind {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> anyhow::Result<Self> {
        match s.trim().to_lowercase().as_str() {
            "regex" => Ok(Self::Regex),
            "rule" => Ok(Self::Rule),
            other => anyhow::bail!("Unknown segmenter '{other}' (expected regex or rule)"),
        }
    }
}

impl fmt::Display for SegmenterKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Regex => write!(f, "regex"),
            Self::Rule => write!(f, "rule"),
        }
    }
}

/// Which pair ranking to use for collocations.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum CollocationKind {
    #[default]
    Pmi,
    Adjacent,
}

impl FromStr for CollocationKind {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> anyhow::Result<Self> {
        match s.trim().to_lowercase().as_str() {
            "pmi" => Ok(Self::Pmi),
            "adjacent" => Ok(Self::Adjacent),
            other => anyhow::bail!("Unknown collocation ranking '{other}' (expected pmi or adjacent)"),
        }
    }
}

impl fmt::Display for CollocationKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Pmi => write!(f, "pmi"),
            Self::Adjacent => write!(f, "adjacent"),
        }
    }
}

/// Strategy selection for a `KeywordEngine`.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct DiscoveryConfig {
    pub segmenter: SegmenterKind,
    pub stopwords: StopwordSource,
    pub collocations: CollocationKind,
}

/// Result of one discovery run.
#[derive(Debug, Clone, Default, Serialize)]
pub struct Discovery {
    /// Final ranked keyword list (at most 20, longest first)
    pub keywords: Vec<String>,
    /// Every candidate that passed its scorer, in pipeline order
    pub candidates: Vec<Candidate>,
    /// Token count after stop-word filtering (the scoring denominator)
    pub filtered_tokens: usize,
}

/// Keyword discovery with injected segmentation and ranking strategies.
pub struct KeywordEngine {
    segmenter: Box<dyn Segmenter>,
    stopwords: StopwordSet,
    ranker: Box<dyn PairRanker>,
}

impl Default for KeywordEngine {
    fn default() -> Self {
        Self::new(
            Box::new(RegexSegmenter),
            StopwordSet::builtin(),
            Box::new(PmiRanker::default()),
        )
    }
}

impl KeywordEngine {
    pub fn new(
        segmenter: Box<dyn Segmenter>,
        stopwords: StopwordSet,
        ranker: Box<dyn PairRanker>,
    ) -> Self {
        Self {
            segmenter,
            stopwords,
            ranker,
        }
    }

    /// Build an engine from configured strategy names.
    pub fn from_config(config: &DiscoveryConfig) -> Self {
        let segmenter: Box<dyn Segmenter> = match config.segmenter {
            SegmenterKind::Regex => Box::new(RegexSegmenter),
            SegmenterKind::Rule => Box::new(RuleSegmenter),
        };
        let ranker: Box<dyn PairRanker> = match config.collocations {
            CollocationKind::Pmi => Box::new(PmiRanker::default()),
            CollocationKind::Adjacent => Box::new(AdjacentPairs),
        };
        let engine = Self::new(segmenter, StopwordSet::load(config.stopwords), ranker);
        debug!(
            segmenter = engine.segmenter.name(),
            stopwords = %engine.stopwords.source(),
            ranker = engine.ranker.name(),
            "Built keyword engine"
        );
        engine
    }

    pub fn segmenter(&self) -> &dyn Segmenter {
        self.segmenter.as_ref()
    }

    pub fn stopwords(&self) -> &StopwordSet {
        &self.stopwords
    }

    /// Run the full pipeline and keep the intermediate candidates.
    pub fn discover(&self, text: &str, existing: &[String], threshold: f64) -> Discovery {
        let exclusions = ExclusionSet::new(existing);

        let sentences = segment(self.segmenter.as_ref(), text);
        let tokens = flatten(&sentences);
        let filtered = self.stopwords.filter(&tokens);
        let total = filtered.len();

        if total == 0 {
            debug!(sentences = sentences.len(), "No tokens left after filtering");
            return Discovery::default();
        }

        let unigrams = score_unigrams(&filtered, &exclusions, threshold);
        let bigrams = score_bigrams(self.ranker.as_ref(), &tokens, total, &exclusions, threshold);

        let pending: Vec<Candidate> = unigrams.iter().chain(&bigrams).cloned().collect();
        let markers = extract_marker_phrases(
            self.segmenter.as_ref(),
            &sentences,
            &self.stopwords,
            &exclusions,
            &pending,
        );

        let keywords = aggregate(&unigrams, &bigrams, &markers, &exclusions);

        info!(
            sentences = sentences.len(),
            tokens = tokens.len(),
            filtered = total,
            unigrams = unigrams.len(),
            bigrams = bigrams.len(),
            markers = markers.len(),
            keywords = keywords.len(),
            "Discovered keywords"
        );

        let mut candidates = pending;
        candidates.extend(markers);

        Discovery {
            keywords,
            candidates,
            filtered_tokens: total,
        }
    }

    /// Ranked keyword list only.
    pub fn generate(&self, text: &str, existing: &[String], threshold: f64) -> Vec<String> {
        self.discover(text, existing, threshold).keywords
    }
}

impl KeywordExtractor for KeywordEngine {
    fn extract(&self, text: &str, existing: &[String], threshold: f64) -> Vec<String> {
        self.generate(text, existing, threshold)
    }
}

/// Discover keywords with the reference engine configuration.
///
/// Returns at most 20 unique keywords and phrases, longest first, none of
/// which match `existing` case-insensitively.
pub fn generate_dynamic_keywords(text: &str, existing: &[String], threshold: f64) -> Vec<String> {
    KeywordEngine::default().generate(text, existing, threshold)
}
