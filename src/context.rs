// Context extraction — find lines mentioning a keyword, with surrounding lines.
//
// Matching is whole-word and case-insensitive. A keyword list produced by
// discovery can be passed straight in.

use std::path::Path;

use anyhow::{Context, Result};
use regex::{Regex, RegexBuilder};
use serde::Serialize;
use tracing::{debug, warn};

/// Default number of lines shown before and after a match.
pub const DEFAULT_CONTEXT_LINES: usize = 3;

/// One matching line and its window of surrounding lines.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ContextMatch {
    /// Zero-based index of the matching line
    pub line_index: usize,
    pub line: String,
    /// Lines from `line_index - n` to `line_index + n`, clipped to the text
    pub context: Vec<String>,
}

/// All matches for one keyword.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct KeywordContext {
    pub keyword: String,
    pub matches: Vec<ContextMatch>,
}

/// Read a conversation transcript from disk.
pub fn load_conversation(path: &Path) -> Result<String> {
    let text = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read conversation from {}", path.display()))?;
    debug!(path = %path.display(), chars = text.chars().count(), "Loaded conversation");
    Ok(text)
}

fn keyword_pattern(keyword: &str) -> Option<Regex> {
    let pattern = format!(r"\b{}\b", regex::escape(keyword));
    match RegexBuilder::new(&pattern).case_insensitive(true).build() {
        Ok(re) => Some(re),
        Err(e) => {
            warn!(keyword, error = %e, "Skipping keyword with unusable pattern");
            None
        }
    }
}

/// Find every line containing each keyword, with `context_lines` of context
/// on both sides. Keywords without matches are left out; the rest keep
/// their input order.
pub fn extract_context<S: AsRef<str>>(
    text: &str,
    keywords: &[S],
    context_lines: usize,
) -> Vec<KeywordContext> {
    let lines: Vec<&str> = text.split('\n').collect();
    let mut results = Vec::new();

    for keyword in keywords {
        let keyword = keyword.as_ref();
        let Some(pattern) = keyword_pattern(keyword) else {
            continue;
        };

        let matches: Vec<ContextMatch> = lines
            .iter()
            .enumerate()
            .filter(|(_, line)| pattern.is_match(line))
            .map(|(i, line)| {
                let start = i.saturating_sub(context_lines);
                let end = (i + context_lines + 1).min(lines.len());
                ContextMatch {
                    line_index: i,
                    line: line.to_string(),
                    context: lines[start..end].iter().map(|l| l.to_string()).collect(),
                }
            })
            .collect();

        if !matches.is_empty() {
            results.push(KeywordContext {
                keyword: keyword.to_string(),
                matches,
            });
        }
    }
    results
}
