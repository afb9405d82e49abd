// Colored terminal output for keyword lists, contexts, topics and rankings.
//
// All terminal-specific formatting lives here; main.rs only decides what to
// show.

use colored::Colorize;

use crate::categories::{TopicMatches, DYNAMIC_CATEGORY};
use crate::context::KeywordContext;
use crate::keywords::candidate::{Candidate, CandidateKind};
use crate::keywords::engine::Discovery;

/// Display the discovered keyword list, optionally with candidate scores.
pub fn display_keywords(discovery: &Discovery, show_scores: bool) {
    if discovery.keywords.is_empty() {
        println!("No keywords discovered.");
        return;
    }

    println!(
        "\n{}",
        format!(
            "=== {} dynamic keywords ({} tokens scored) ===",
            discovery.keywords.len(),
            discovery.filtered_tokens
        )
        .bold()
    );
    println!();

    for (i, keyword) in discovery.keywords.iter().enumerate() {
        let candidate = discovery.candidates.iter().find(|c| &c.term == keyword);
        if show_scores {
            println!(
                "  {:>2}. {:<32} {:<8} {}",
                i + 1,
                keyword.bold(),
                candidate
                    .map(|c| colorize_kind(c.kind).to_string())
                    .unwrap_or_default(),
                format_importance(candidate).dimmed(),
            );
        } else {
            println!("  {:>2}. {}", i + 1, keyword);
        }
    }
    println!();
}

fn format_importance(candidate: Option<&Candidate>) -> String {
    match candidate.and_then(|c| c.importance) {
        Some(score) => format!("{score:.3}"),
        None => "-".to_string(),
    }
}

fn colorize_kind(kind: CandidateKind) -> colored::ColoredString {
    let label = kind.to_string();
    match kind {
        CandidateKind::Unigram => label.green(),
        CandidateKind::Bigram => label.cyan(),
        CandidateKind::MarkerPhrase => label.yellow(),
    }
}

/// Print one context window, highlighting the matched line.
fn print_context(line: &str, context: &[String]) {
    println!("  {}", "-".repeat(40).dimmed());
    for ctx_line in context {
        if ctx_line == line {
            println!("  {} {}", ">>>".bright_green().bold(), ctx_line);
        } else {
            println!("      {}", ctx_line.dimmed());
        }
    }
    println!();
}

/// Display context matches grouped by keyword.
pub fn display_contexts(results: &[KeywordContext]) {
    if results.is_empty() {
        println!("No matches found.");
        return;
    }

    for result in results {
        println!(
            "\n{}",
            format!(
                "=== KEYWORD: '{}' - {} matches found ===",
                result.keyword,
                result.matches.len()
            )
            .bold()
        );
        for (i, m) in result.matches.iter().enumerate() {
            println!("\n  Match #{} (line {}):", i + 1, m.line_index + 1);
            print_context(&m.line, &m.context);
        }
    }
}

/// Display topic matches, one block per category, duplicate passages folded.
pub fn display_topics(results: &[TopicMatches]) {
    if results.is_empty() {
        println!("No topics found.");
        return;
    }

    for topic in results {
        let header = format!(
            "=== TOPIC: {} - {} matches found ===",
            topic.category,
            topic.hits.len()
        );
        if topic.category == DYNAMIC_CATEGORY {
            println!("\n{}", header.bright_yellow().bold());
        } else {
            println!("\n{}", header.bold());
        }

        for (i, hit) in topic.unique_hits().into_iter().enumerate() {
            println!(
                "\n  Match #{} (matched keyword: '{}'):",
                i + 1,
                hit.keyword.cyan()
            );
            print_context(&hit.line, &hit.context);
        }
    }
}

/// Display the tracker's ranking as a bar chart relative to the top score.
pub fn display_ranking(ranking: &[(String, f64)]) {
    if ranking.is_empty() {
        println!("No keywords tracked yet. Run `kindling track <file>` first.");
        return;
    }

    println!("\n{}", "=== Top keywords by importance ===".bold());
    println!();

    let bar_width: usize = 20;
    let max = ranking.first().map(|(_, s)| *s).unwrap_or(0.0);

    for (i, (keyword, score)) in ranking.iter().enumerate() {
        let share = if max > 0.0 { score / max } else { 0.0 };
        let filled = (share * bar_width as f64).round() as usize;
        let bar = format!(
            "[{}{}]",
            "=".repeat(filled),
            " ".repeat(bar_width.saturating_sub(filled))
        );
        let colored_bar = if share >= 0.66 {
            bar.bright_green()
        } else if share >= 0.33 {
            bar.bright_yellow()
        } else {
            bar.bright_blue()
        };

        let label = super::truncate_chars(keyword, 32);
        println!("  {:>2}. {:<35} {} {:.2}", i + 1, label.bold(), colored_bar, score);
    }
    println!();
}
