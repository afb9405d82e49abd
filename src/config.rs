use std::env;
use std::path::PathBuf;

use anyhow::{Context, Result};

use crate::context::DEFAULT_CONTEXT_LINES;
use crate::keywords::engine::{CollocationKind, DiscoveryConfig, SegmenterKind, DEFAULT_THRESHOLD};
use crate::keywords::stopwords::StopwordSource;
use crate::tracker::{DEFAULT_DECAY, DEFAULT_INCREMENT};

/// Returns the default location of the keyword importance store.
/// Uses the platform data directory: ~/.local/share/kindling/keywords.json on Linux.
pub fn default_store_path() -> PathBuf {
    dirs::data_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join("kindling")
        .join("keywords.json")
}

/// Central configuration loaded from environment variables.
///
/// Every value has a default, so an empty environment is a valid setup. The
/// .env file is loaded automatically at startup via dotenvy.
#[derive(Debug, Clone)]
pub struct Config {
    /// Discovery sensitivity (KINDLING_THRESHOLD)
    pub threshold: f64,
    pub segmenter: SegmenterKind,
    pub stopwords: StopwordSource,
    pub collocations: CollocationKind,
    /// Where the keyword tracker persists its scores
    pub store_path: PathBuf,
    /// Multiplier applied to every tracked score on each update
    pub decay: f64,
    /// Added to a keyword's score each time it is observed
    pub increment: f64,
    /// Lines of context shown around a match
    pub context_lines: usize,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            threshold: DEFAULT_THRESHOLD,
            segmenter: SegmenterKind::default(),
            stopwords: StopwordSource::default(),
            collocations: CollocationKind::default(),
            store_path: default_store_path(),
            decay: DEFAULT_DECAY,
            increment: DEFAULT_INCREMENT,
            context_lines: DEFAULT_CONTEXT_LINES,
        }
    }
}

/// Read an env var and parse it, keeping `default` when unset.
fn parse_var<T>(name: &str, default: T) -> Result<T>
where
    T: std::str::FromStr,
    T::Err: std::fmt::Display,
{
    match env::var(name) {
        Ok(raw) if !raw.trim().is_empty() => raw
            .trim()
            .parse::<T>()
            .map_err(|e| anyhow::anyhow!("{e}"))
            .with_context(|| format!("Invalid value for {name}: '{raw}'")),
        _ => Ok(default),
    }
}

impl Config {
    /// Load configuration from environment variables.
    pub fn load() -> Result<Self> {
        let defaults = Self::default();

        let config = Self {
            threshold: parse_var("KINDLING_THRESHOLD", defaults.threshold)?,
            segmenter: parse_var("KINDLING_SEGMENTER", defaults.segmenter)?,
            stopwords: parse_var("KINDLING_STOPWORDS", defaults.stopwords)?,
            collocations: parse_var("KINDLING_COLLOCATIONS", defaults.collocations)?,
            store_path: parse_var("KINDLING_STORE_PATH", defaults.store_path)?,
            decay: parse_var("KINDLING_DECAY", defaults.decay)?,
            increment: parse_var("KINDLING_INCREMENT", defaults.increment)?,
            context_lines: parse_var("KINDLING_CONTEXT_LINES", defaults.context_lines)?,
        };
        config.validate()?;
        Ok(config)
    }

    /// Reject values the engine treats as caller contract violations.
    pub fn validate(&self) -> Result<()> {
        require_threshold(self.threshold)?;
        if !(self.decay > 0.0 && self.decay <= 1.0) {
            anyhow::bail!(
                "KINDLING_DECAY must be in (0, 1], got {}.\n\
                 A decay of 1.0 disables fading; smaller values fade faster.",
                self.decay
            );
        }
        if !(self.increment.is_finite() && self.increment >= 0.0) {
            anyhow::bail!("KINDLING_INCREMENT must be a non-negative number, got {}", self.increment);
        }
        Ok(())
    }

    /// Strategy selection for the keyword engine.
    pub fn discovery(&self) -> DiscoveryConfig {
        DiscoveryConfig {
            segmenter: self.segmenter,
            stopwords: self.stopwords,
            collocations: self.collocations,
        }
    }
}

/// Check a discovery threshold (from config or a CLI flag).
pub fn require_threshold(threshold: f64) -> Result<()> {
    if !(threshold.is_finite() && threshold >= 0.0) {
        anyhow::bail!("Threshold must be a non-negative number, got {threshold}");
    }
    Ok(())
}
