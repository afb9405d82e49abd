use std::path::PathBuf;

use anyhow::Result;
use clap::{Parser, Subcommand};
use colored::Colorize;
use tracing::info;

use kindling::categories::{default_categories, extract_topics_with_dynamic};
use kindling::config::{require_threshold, Config};
use kindling::context::{extract_context, load_conversation};
use kindling::keywords::traits::KeywordExtractor;
use kindling::keywords::KeywordEngine;
use kindling::output::terminal;
use kindling::tracker::{KeywordTracker, DEFAULT_TOP_N};

/// Kindling: find the terms that matter in a conversation.
///
/// Discovers keywords and phrases statistically, shows where they occur,
/// and tracks how important they stay across conversations.
#[derive(Parser)]
#[command(name = "kindling", version, about)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Discover keywords and phrases in a conversation file
    Discover {
        /// Path to the conversation text file
        file: PathBuf,

        /// Comma-separated keywords you already know about (excluded from output)
        #[arg(long, default_value = "")]
        existing: String,

        /// Sensitivity threshold (default: KINDLING_THRESHOLD or 0.5)
        #[arg(long)]
        threshold: Option<f64>,

        /// Show candidate kind and importance next to each keyword
        #[arg(long)]
        scores: bool,
    },

    /// Show lines around each keyword
    Context {
        /// Path to the conversation text file
        file: PathBuf,

        /// Comma-separated list of keywords to search for
        #[arg(short, long)]
        keywords: String,

        /// Lines of context before and after each match (default: KINDLING_CONTEXT_LINES or 3)
        #[arg(short, long)]
        context: Option<usize>,
    },

    /// Group matches by topic category
    Topics {
        /// Path to the conversation text file
        file: PathBuf,

        /// Add a "Dynamic Topics" category from discovered keywords
        #[arg(long)]
        dynamic: bool,

        /// Lines of context before and after each match
        #[arg(short, long)]
        context: Option<usize>,
    },

    /// Discover keywords and feed them into the importance tracker
    Track {
        /// Path to the conversation text file
        file: PathBuf,

        /// How many discovered keywords to record (default: 10)
        #[arg(long, default_value = "10")]
        limit: usize,

        /// How many tracked keywords to display afterwards
        #[arg(long, default_value_t = DEFAULT_TOP_N)]
        top: usize,
    },

    /// Show the most important tracked keywords
    Top {
        /// Number of keywords to show
        #[arg(short, long, default_value_t = DEFAULT_TOP_N)]
        n: usize,
    },
}

/// Split a comma-separated CLI list, dropping blanks.
fn split_list(raw: &str) -> Vec<String> {
    raw.split(',')
        .map(str::trim)
        .filter(|k| !k.is_empty())
        .map(str::to_string)
        .collect()
}

fn main() -> Result<()> {
    // Load .env file if present (silently ignore if missing)
    let _ = dotenvy::dotenv();

    // Set up structured logging
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("kindling=info")),
        )
        .init();

    let cli = Cli::parse();
    let config = Config::load()?;

    match cli.command {
        Commands::Discover {
            file,
            existing,
            threshold,
            scores,
        } => {
            let threshold = threshold.unwrap_or(config.threshold);
            require_threshold(threshold)?;

            let text = load_conversation(&file)?;
            println!(
                "Loaded conversation ({} characters, {} lines)",
                text.chars().count(),
                text.split('\n').count()
            );

            let engine = KeywordEngine::from_config(&config.discovery());
            let discovery = engine.discover(&text, &split_list(&existing), threshold);
            terminal::display_keywords(&discovery, scores);
        }

        Commands::Context {
            file,
            keywords,
            context,
        } => {
            let keywords = split_list(&keywords);
            if keywords.is_empty() {
                anyhow::bail!("No valid keywords provided. Pass a comma-separated list with --keywords.");
            }
            let context_lines = context.unwrap_or(config.context_lines);

            let text = load_conversation(&file)?;
            println!("Searching for keywords: {}", keywords.join(", "));
            println!("Context lines: {context_lines}");

            let results = extract_context(&text, &keywords, context_lines);
            terminal::display_contexts(&results);
        }

        Commands::Topics {
            file,
            dynamic,
            context,
        } => {
            let context_lines = context.unwrap_or(config.context_lines);
            let text = load_conversation(&file)?;

            let engine = KeywordEngine::from_config(&config.discovery());
            let extractor: Option<(&dyn KeywordExtractor, f64)> =
                dynamic.then_some((&engine as &dyn KeywordExtractor, config.threshold));

            let results =
                extract_topics_with_dynamic(&text, default_categories(), context_lines, extractor);
            terminal::display_topics(&results);
        }

        Commands::Track { file, limit, top } => {
            let text = load_conversation(&file)?;
            let engine = KeywordEngine::from_config(&config.discovery());
            let keywords = engine.generate(&text, &[], config.threshold);

            let mut tracker = KeywordTracker::open(&config.store_path);
            info!(
                path = %config.store_path.display(),
                tracked = tracker.len(),
                "Opened keyword store"
            );

            for keyword in keywords.iter().take(limit) {
                tracker.update_keyword(keyword, config.increment, config.decay)?;
            }

            println!(
                "Recorded {} keywords in {}",
                keywords.len().min(limit),
                config.store_path.display()
            );
            terminal::display_ranking(&tracker.get_top_keywords(top));
        }

        Commands::Top { n } => {
            let tracker = KeywordTracker::open(&config.store_path);
            terminal::display_ranking(&tracker.get_top_keywords(n));
            println!("{}", format!("Store: {}", config.store_path.display()).dimmed());
        }
    }

    Ok(())
}
