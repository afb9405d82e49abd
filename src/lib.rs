// Kindling: dynamic keyword discovery for conversation transcripts
//
// This is the library root. The discovery engine lives in `keywords`, the
// decaying importance store in `tracker`; `context` and `categories` are the
// line-matching collaborators that consume discovered keywords.

pub mod categories;
pub mod config;
pub mod context;
pub mod keywords;
pub mod output;
pub mod tracker;
