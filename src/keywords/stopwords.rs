// Stop-word filtering.
//
// The builtin list is a fixed set of common English function words. When the
// `iso-stopwords` feature is compiled in, the much larger English list from the
// stop-words crate can be selected instead.

use std::collections::HashSet;
use std::fmt;
use std::str::FromStr;

use tracing::{debug, warn};

/// Fixed fallback list of English function words.
pub const BUILTIN_STOPWORDS: &[&str] = &[
    "a", "an", "the", "and", "or", "but", "if", "because", "as", "what", "while", "of", "to",
    "in", "for", "with", "by", "about", "against", "between", "into", "through", "during",
    "before", "after", "above", "below", "from", "up", "down", "on", "off", "over", "under",
    "again", "then", "once", "here", "there", "when", "where", "why", "how", "all", "any",
    "both", "each", "few", "more", "most", "other", "some", "such", "no", "nor", "not", "only",
    "own", "same", "so", "than", "too", "very", "can", "will", "just", "should", "now",
];

/// Where the active stop-word list comes from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum StopwordSource {
    /// The fixed builtin list
    #[default]
    Builtin,
    /// The stop-words crate's English list (needs the `iso-stopwords` feature)
    Iso,
}

impl FromStr for StopwordSource {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> anyhow::Result<Self> {
        match s.trim().to_lowercase().as_str() {
            "builtin" => Ok(Self::Builtin),
            "iso" => Ok(Self::Iso),
            other => anyhow::bail!("Unknown stop-word source '{other}' (expected builtin or iso)"),
        }
    }
}

impl fmt::Display for StopwordSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Builtin => write!(f, "builtin"),
            Self::Iso => write!(f, "iso"),
        }
    }
}

/// The active stop-word set. Membership checks expect lower-cased words.
#[derive(Debug, Clone)]
pub struct StopwordSet {
    words: HashSet<String>,
    source: StopwordSource,
}

impl Default for StopwordSet {
    fn default() -> Self {
        Self::builtin()
    }
}

impl StopwordSet {
    pub fn builtin() -> Self {
        Self {
            words: BUILTIN_STOPWORDS.iter().map(|w| w.to_string()).collect(),
            source: StopwordSource::Builtin,
        }
    }

    /// Load the requested source, falling back to the builtin list when it
    /// isn't available in this build.
    pub fn load(source: StopwordSource) -> Self {
        match source {
            StopwordSource::Builtin => Self::builtin(),
            StopwordSource::Iso => Self::iso().unwrap_or_else(|| {
                warn!("stop-words list not compiled in (iso-stopwords feature), using builtin list");
                Self::builtin()
            }),
        }
    }

    #[cfg(feature = "iso-stopwords")]
    fn iso() -> Option<Self> {
        use stop_words::{get, LANGUAGE};

        let list: Vec<String> = get(LANGUAGE::English);
        if list.is_empty() {
            return None;
        }
        debug!(words = list.len(), "Loaded English stop-word list");
        Some(Self {
            words: list.into_iter().map(|w| w.to_lowercase()).collect(),
            source: StopwordSource::Iso,
        })
    }

    #[cfg(not(feature = "iso-stopwords"))]
    fn iso() -> Option<Self> {
        debug!("iso-stopwords feature disabled");
        None
    }

    /// Which source actually backs this set (after any fallback).
    pub fn source(&self) -> StopwordSource {
        self.source
    }

    pub fn len(&self) -> usize {
        self.words.len()
    }

    pub fn is_empty(&self) -> bool {
        self.words.is_empty()
    }

    pub fn contains(&self, word: &str) -> bool {
        self.words.contains(word)
    }

    /// Drop every stop word, preserving order.
    pub fn filter(&self, tokens: &[String]) -> Vec<String> {
        tokens
            .iter()
            .filter(|t| !self.contains(t))
            .cloned()
            .collect()
    }
}
