// Dynamic keyword discovery — segmentation, scoring, aggregation.

pub mod aggregate;
pub mod candidate;
pub mod collocation;
pub mod engine;
pub mod markers;
pub mod segment;
pub mod stopwords;
pub mod traits;
pub mod unigram;

pub use engine::{generate_dynamic_keywords, KeywordEngine, DEFAULT_THRESHOLD};
