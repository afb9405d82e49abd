// Candidate keywords and the exclusion set they are checked against.

use std::collections::HashSet;
use std::fmt;

use serde::{Deserialize, Serialize};

/// Which scorer produced a candidate.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CandidateKind {
    Unigram,
    Bigram,
    MarkerPhrase,
}

impl fmt::Display for CandidateKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CandidateKind::Unigram => write!(f, "unigram"),
            CandidateKind::Bigram => write!(f, "bigram"),
            CandidateKind::MarkerPhrase => write!(f, "marker"),
        }
    }
}

/// A provisional keyword before aggregation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Candidate {
    /// A single token or a "word1 word2" phrase
    pub term: String,
    pub kind: CandidateKind,
    /// Share of the filtered token stream, 0.0 to 1.0. Marker phrases are
    /// admitted without a score.
    pub importance: Option<f64>,
}

impl Candidate {
    pub fn scored(term: impl Into<String>, kind: CandidateKind, importance: f64) -> Self {
        Self {
            term: term.into(),
            kind,
            importance: Some(importance),
        }
    }

    pub fn marker(term: impl Into<String>) -> Self {
        Self {
            term: term.into(),
            kind: CandidateKind::MarkerPhrase,
            importance: None,
        }
    }
}

/// Keywords the caller already knows about, compared case-insensitively.
#[derive(Debug, Clone, Default)]
pub struct ExclusionSet {
    lowered: HashSet<String>,
}

impl ExclusionSet {
    pub fn new<I, S>(keywords: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        Self {
            lowered: keywords
                .into_iter()
                .map(|k| k.as_ref().to_lowercase())
                .collect(),
        }
    }

    pub fn contains(&self, term: &str) -> bool {
        self.lowered.contains(&term.to_lowercase())
    }

    pub fn len(&self) -> usize {
        self.lowered.len()
    }

    pub fn is_empty(&self) -> bool {
        self.lowered.is_empty()
    }
}
