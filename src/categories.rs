// Topic categorization over a fixed keyword taxonomy.
//
// Each category is a label plus a keyword list; a category "matches" wherever
// context extraction finds one of its keywords. Discovered keywords can be
// folded in as one extra category so conversations surface topics the fixed
// taxonomy doesn't know about.

use serde::Serialize;
use tracing::info;

use crate::context::extract_context;
use crate::keywords::traits::KeywordExtractor;

/// Label of the category built from discovered keywords.
pub const DYNAMIC_CATEGORY: &str = "Dynamic Topics";

/// The builtin taxonomy, in display order.
pub const DEFAULT_TOPIC_CATEGORIES: &[(&str, &[&str])] = &[
    (
        "Python Syntax",
        &[
            "syntax", "list comprehension", "dictionary", "function", "class", "variable",
            "loop", "if statement", "for loop", "while loop", "def ", "import", "return",
            "print(", "=", "==", "+=", "-=", "*=", "/=", "[]", "{}", "()", ":", "lambda",
        ],
    ),
    (
        "Web Development",
        &[
            "Flask", "FastAPI", "Django", "web", "HTML", "CSS", "JavaScript", "frontend",
            "backend", "API", "REST", "HTTP", "route", "template", "static", "request",
            "response", "server", "client", "browser",
        ],
    ),
    (
        "Data Processing",
        &[
            "pandas", "numpy", "data", "CSV", "Excel", "DataFrame", "Series", "processing",
            "analysis", "visualization", "plot", "graph", "chart", "statistics", "mean",
            "median", "standard deviation", "correlation",
        ],
    ),
    (
        "ADHD & Productivity",
        &[
            "ADHD", "focus", "distraction", "attention", "productivity", "Pomodoro", "timer",
            "break", "task", "planning", "organization", "routine", "habit", "reminder",
            "notification", "dopamine", "reward",
        ],
    ),
    (
        "Best Practices",
        &[
            "best practice", "clean code", "maintainable", "readable", "PEP 8",
            "documentation", "comment", "testing", "debug", "logging", "error handling",
            "version control", "git", "structure", "architecture", "pattern", "design",
        ],
    ),
    (
        "Debugging",
        &[
            "debug", "error", "exception", "try", "except", "finally", "raise", "traceback",
            "breakpoint", "pdb", "print debugging", "log", "assert", "testing", "unit test",
            "pytest", "unittest",
        ],
    ),
];

/// A labelled keyword list.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TopicCategory {
    pub label: String,
    pub keywords: Vec<String>,
}

/// Owned copy of the builtin taxonomy.
pub fn default_categories() -> Vec<TopicCategory> {
    DEFAULT_TOPIC_CATEGORIES
        .iter()
        .map(|(label, keywords)| TopicCategory {
            label: label.to_string(),
            keywords: keywords.iter().map(|k| k.to_string()).collect(),
        })
        .collect()
}

/// Append (or replace) the dynamic category built from discovered keywords.
pub fn with_dynamic_category(
    mut categories: Vec<TopicCategory>,
    keywords: Vec<String>,
) -> Vec<TopicCategory> {
    categories.retain(|c| c.label != DYNAMIC_CATEGORY);
    if !keywords.is_empty() {
        categories.push(TopicCategory {
            label: DYNAMIC_CATEGORY.to_string(),
            keywords,
        });
    }
    categories
}

/// One keyword hit inside a category.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TopicHit {
    pub keyword: String,
    pub line: String,
    pub context: Vec<String>,
}

/// All hits for one category.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TopicMatches {
    pub category: String,
    pub hits: Vec<TopicHit>,
}

impl TopicMatches {
    /// Hits with duplicate context windows removed, first occurrence kept.
    /// Several keywords often match the same passage.
    pub fn unique_hits(&self) -> Vec<&TopicHit> {
        let mut seen = std::collections::HashSet::new();
        self.hits
            .iter()
            .filter(|h| seen.insert(h.context.join("\n")))
            .collect()
    }
}

/// Run context extraction for every category. Categories without a single
/// hit are omitted.
pub fn extract_topics(
    text: &str,
    categories: &[TopicCategory],
    context_lines: usize,
) -> Vec<TopicMatches> {
    categories
        .iter()
        .filter_map(|category| {
            let hits: Vec<TopicHit> = extract_context(text, &category.keywords, context_lines)
                .into_iter()
                .flat_map(|kc| {
                    let keyword = kc.keyword;
                    kc.matches.into_iter().map(move |m| TopicHit {
                        keyword: keyword.clone(),
                        line: m.line,
                        context: m.context,
                    })
                })
                .collect();
            (!hits.is_empty()).then(|| TopicMatches {
                category: category.label.clone(),
                hits,
            })
        })
        .collect()
}

/// Categorize, optionally adding a dynamic category from discovery.
///
/// Keywords already in the taxonomy are passed as exclusions so the dynamic
/// category only holds new terms.
pub fn extract_topics_with_dynamic(
    text: &str,
    categories: Vec<TopicCategory>,
    context_lines: usize,
    extractor: Option<(&dyn KeywordExtractor, f64)>,
) -> Vec<TopicMatches> {
    let categories = match extractor {
        Some((extractor, threshold)) => {
            let known: Vec<String> = categories
                .iter()
                .flat_map(|c| c.keywords.iter().cloned())
                .collect();
            let discovered = extractor.extract(text, &known, threshold);
            info!(keywords = discovered.len(), "Adding dynamic topic category");
            with_dynamic_category(categories, discovered)
        }
        None => categories,
    };
    extract_topics(text, &categories, context_lines)
}
