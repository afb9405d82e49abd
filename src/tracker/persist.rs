// JSON persistence for the keyword importance store.
//
// The file is a flat JSON object: { "keyword": score, ... }. Reads are
// tolerant: anything unreadable or malformed yields an empty store (with a
// warning), because losing decayed history is better than refusing to start.
// Writes go to a sibling temp file first and are renamed into place, so a
// crash mid-write leaves the previous version intact.

use std::collections::{BTreeMap, HashMap};
use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use tracing::{debug, warn};

/// Load scores from `path`. Missing, unreadable or invalid files give an
/// empty map.
pub fn load_scores(path: &Path) -> HashMap<String, f64> {
    if !path.exists() {
        debug!(path = %path.display(), "No keyword store yet, starting empty");
        return HashMap::new();
    }

    let raw = match fs::read_to_string(path) {
        Ok(raw) => raw,
        Err(e) => {
            warn!(path = %path.display(), error = %e, "Could not read keyword store, starting empty");
            return HashMap::new();
        }
    };

    let scores: HashMap<String, f64> = match serde_json::from_str(&raw) {
        Ok(scores) => scores,
        Err(e) => {
            warn!(path = %path.display(), error = %e, "Keyword store is not valid JSON, starting empty");
            return HashMap::new();
        }
    };

    // Scores must be finite and non-negative for decay to make sense.
    if let Some((keyword, score)) = scores.iter().find(|(_, s)| !s.is_finite() || **s < 0.0) {
        warn!(
            path = %path.display(),
            keyword = %keyword,
            score = *score,
            "Keyword store holds an invalid score, starting empty"
        );
        return HashMap::new();
    }

    debug!(path = %path.display(), keywords = scores.len(), "Loaded keyword store");
    scores
}

fn temp_path(path: &Path) -> PathBuf {
    let mut name = path
        .file_name()
        .map(|n| n.to_os_string())
        .unwrap_or_default();
    name.push(".tmp");
    path.with_file_name(name)
}

/// Write the full store to `path`, replacing any previous content.
pub fn save_scores(path: &Path, scores: &HashMap<String, f64>) -> Result<()> {
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            fs::create_dir_all(parent).with_context(|| {
                format!("Failed to create directory for keyword store: {}", path.display())
            })?;
        }
    }

    // Sorted keys keep the file diff-friendly.
    let ordered: BTreeMap<&str, f64> = scores.iter().map(|(k, v)| (k.as_str(), *v)).collect();
    let json = serde_json::to_string_pretty(&ordered)?;

    let tmp = temp_path(path);
    fs::write(&tmp, json).with_context(|| format!("Failed to write {}", tmp.display()))?;
    fs::rename(&tmp, path)
        .with_context(|| format!("Failed to replace keyword store at {}", path.display()))?;
    Ok(())
}
