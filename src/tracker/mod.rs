// Importance tracking — decaying keyword scores persisted across sessions.
//
// The store is a plain JSON file at a caller-chosen path (KINDLING_STORE_PATH,
// or the platform data directory by default). It is owned by whichever
// KeywordTracker opened it; nothing here is global.

pub mod importance;
pub mod persist;
pub mod shared;

pub use importance::{KeywordTracker, DEFAULT_DECAY, DEFAULT_INCREMENT, DEFAULT_TOP_N};
pub use shared::SharedKeywordTracker;
