// SharedKeywordTracker — a KeywordTracker safe to update from many threads.
//
// An update is a read-modify-write over the whole map plus a file write. Two
// unsynchronized updates could both decay the same snapshot and one
// increment would be lost, so the lock is held for decay, increment and
// persist together.

use std::sync::{Arc, Mutex, MutexGuard};

use anyhow::Result;

use super::importance::{KeywordTracker, DEFAULT_DECAY, DEFAULT_INCREMENT};

#[derive(Debug, Clone, Default)]
pub struct SharedKeywordTracker {
    inner: Arc<Mutex<KeywordTracker>>,
}

impl SharedKeywordTracker {
    pub fn new(tracker: KeywordTracker) -> Self {
        Self {
            inner: Arc::new(Mutex::new(tracker)),
        }
    }

    fn lock(&self) -> Result<MutexGuard<'_, KeywordTracker>> {
        self.inner
            .lock()
            .map_err(|_| anyhow::anyhow!("keyword tracker lock poisoned"))
    }

    pub fn update_keyword(
        &self,
        keyword: &str,
        importance_increment: f64,
        decay_factor: f64,
    ) -> Result<()> {
        self.lock()?
            .update_keyword(keyword, importance_increment, decay_factor)
    }

    pub fn update(&self, keyword: &str) -> Result<()> {
        self.update_keyword(keyword, DEFAULT_INCREMENT, DEFAULT_DECAY)
    }

    pub fn get_top_keywords(&self, n: usize) -> Result<Vec<(String, f64)>> {
        Ok(self.lock()?.get_top_keywords(n))
    }

    pub fn score(&self, keyword: &str) -> Result<Option<f64>> {
        Ok(self.lock()?.score(keyword))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::thread;

    #[test]
    fn test_concurrent_updates_are_serialized() {
        let shared = SharedKeywordTracker::new(KeywordTracker::in_memory());
        let handles: Vec<_> = (0..8)
            .map(|_| {
                let t = shared.clone();
                thread::spawn(move || {
                    for _ in 0..25 {
                        t.update_keyword("rust", 1.0, 1.0).unwrap();
                    }
                })
            })
            .collect();
        for h in handles {
            h.join().unwrap();
        }
        // With no decay every increment must land.
        assert_eq!(shared.score("rust").unwrap(), Some(200.0));
    }
}
