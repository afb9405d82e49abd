// KeywordTracker — decaying importance scores across conversations.
//
// Every update first decays every tracked score, then credits the target
// keyword. Keywords that keep coming up stay near the top; ones that stop
// appearing fade geometrically. With a store path configured, the whole map
// is written back after each update.

use std::collections::HashMap;
use std::path::PathBuf;

use anyhow::Result;
use tracing::debug;

use super::persist::{load_scores, save_scores};

/// Added to a keyword's score on each update.
pub const DEFAULT_INCREMENT: f64 = 1.0;

/// Applied to every existing score before each update.
pub const DEFAULT_DECAY: f64 = 0.9;

/// How many keywords `get_top_keywords` callers usually ask for.
pub const DEFAULT_TOP_N: usize = 20;

/// Keyword → importance, optionally backed by a JSON file.
///
/// Keys are exact strings: "Python" and "python" are different keywords.
#[derive(Debug, Clone, Default)]
pub struct KeywordTracker {
    scores: HashMap<String, f64>,
    path: Option<PathBuf>,
}

impl KeywordTracker {
    /// Create a tracker, loading `path` if it exists.
    pub fn new(path: Option<PathBuf>) -> Self {
        let scores = path.as_deref().map(load_scores).unwrap_or_default();
        Self { scores, path }
    }

    /// A tracker that never touches disk.
    pub fn in_memory() -> Self {
        Self::default()
    }

    /// Create a tracker persisted at `path`.
    pub fn open(path: impl Into<PathBuf>) -> Self {
        Self::new(Some(path.into()))
    }

    /// Decay every score, credit `keyword`, then persist.
    ///
    /// A keyword seen for the first time starts at `importance_increment`;
    /// the decay applies only to keywords that were already tracked.
    pub fn update_keyword(
        &mut self,
        keyword: &str,
        importance_increment: f64,
        decay_factor: f64,
    ) -> Result<()> {
        match &self.path {
            // Commit in memory only once the new state is on disk.
            Some(path) => {
                let mut next = self.scores.clone();
                apply_update(&mut next, keyword, importance_increment, decay_factor);
                save_scores(path, &next)?;
                self.scores = next;
            }
            None => apply_update(&mut self.scores, keyword, importance_increment, decay_factor),
        }
        debug!(
            keyword,
            score = self.scores.get(keyword).copied().unwrap_or_default(),
            tracked = self.scores.len(),
            "Updated keyword importance"
        );
        Ok(())
    }

    /// `update_keyword` with the default increment and decay.
    pub fn update(&mut self, keyword: &str) -> Result<()> {
        self.update_keyword(keyword, DEFAULT_INCREMENT, DEFAULT_DECAY)
    }

    /// Highest-scoring keywords first. Equal scores are ordered by keyword,
    /// but callers shouldn't depend on that.
    pub fn get_top_keywords(&self, n: usize) -> Vec<(String, f64)> {
        top_scores(&self.scores, n)
    }

    pub fn score(&self, keyword: &str) -> Option<f64> {
        self.scores.get(keyword).copied()
    }

    pub fn scores(&self) -> &HashMap<String, f64> {
        &self.scores
    }

    pub fn len(&self) -> usize {
        self.scores.len()
    }

    pub fn is_empty(&self) -> bool {
        self.scores.is_empty()
    }
}

/// Decay-then-increment on a raw score map.
fn apply_update(
    scores: &mut HashMap<String, f64>,
    keyword: &str,
    importance_increment: f64,
    decay_factor: f64,
) {
    for score in scores.values_mut() {
        *score *= decay_factor;
    }
    *scores.entry(keyword.to_string()).or_insert(0.0) += importance_increment;
}

fn top_scores(scores: &HashMap<String, f64>, n: usize) -> Vec<(String, f64)> {
    let mut ranked: Vec<(String, f64)> = scores.iter().map(|(k, v)| (k.clone(), *v)).collect();
    ranked.sort_by(|a, b| b.1.total_cmp(&a.1).then_with(|| a.0.cmp(&b.0)));
    ranked.truncate(n);
    ranked
}
