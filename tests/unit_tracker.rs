// Unit tests for the keyword importance tracker.
//
// Covers the decay law, the worked update sequence, persistence round trips
// and tolerant loading of damaged store files. Files live in temp dirs.

use std::fs;

use kindling::tracker::{KeywordTracker, SharedKeywordTracker, DEFAULT_DECAY};

fn close(a: f64, b: f64) -> bool {
    (a - b).abs() < 1e-9
}

// ============================================================
// Update semantics
// ============================================================

#[test]
fn worked_update_sequence() {
    let mut tracker = KeywordTracker::in_memory();
    tracker.update_keyword("keyword_a", 1.0, 0.9).unwrap();
    assert!(close(tracker.score("keyword_a").unwrap(), 1.0));

    tracker.update_keyword("keyword_b", 0.8, 0.9).unwrap();
    assert!(close(tracker.score("keyword_a").unwrap(), 0.9));
    assert!(close(tracker.score("keyword_b").unwrap(), 0.8));

    tracker.update_keyword("keyword_a", 0.5, 0.9).unwrap();
    let top = tracker.get_top_keywords(2);
    assert_eq!(top.len(), 2);
    assert_eq!(top[0].0, "keyword_a");
    assert!(close(top[0].1, 1.31));
    assert_eq!(top[1].0, "keyword_b");
    assert!(close(top[1].1, 0.72));
}

#[test]
fn untouched_keyword_follows_decay_law() {
    let mut tracker = KeywordTracker::in_memory();
    tracker.update_keyword("target", 2.0, DEFAULT_DECAY).unwrap();
    let before = tracker.score("target").unwrap();

    let n = 7;
    for i in 0..n {
        tracker.update(&format!("other{}", i % 3)).unwrap();
    }

    let expected = before * DEFAULT_DECAY.powi(n);
    assert!(close(tracker.score("target").unwrap(), expected));
}

#[test]
fn repeated_keyword_outranks_one_off() {
    let mut tracker = KeywordTracker::in_memory();
    for _ in 0..3 {
        tracker.update("python").unwrap();
    }
    tracker.update("flask").unwrap();
    tracker.update("python").unwrap();

    let top = tracker.get_top_keywords(10);
    assert_eq!(top[0].0, "python");
    assert!(top[0].1 > top[1].1);
}

// ============================================================
// Persistence
// ============================================================

#[test]
fn store_round_trips() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("keywords.json");

    let mut tracker = KeywordTracker::open(&path);
    tracker.update_keyword("Python", 1.0, 0.9).unwrap();
    tracker.update_keyword("Flask", 0.8, 0.9).unwrap();
    tracker.update_keyword("Python", 0.5, 0.9).unwrap();

    let reopened = KeywordTracker::open(&path);
    assert_eq!(reopened.len(), tracker.len());
    for (keyword, score) in tracker.scores() {
        assert!(close(reopened.score(keyword).unwrap(), *score));
    }
}

#[test]
fn store_file_is_flat_json_object() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("keywords.json");

    let mut tracker = KeywordTracker::open(&path);
    tracker.update("flask").unwrap();

    let raw = fs::read_to_string(&path).unwrap();
    let value: serde_json::Value = serde_json::from_str(&raw).unwrap();
    assert_eq!(value["flask"].as_f64(), Some(1.0));
}

#[test]
fn every_update_is_persisted() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("keywords.json");

    let mut tracker = KeywordTracker::open(&path);
    tracker.update("one").unwrap();
    assert_eq!(KeywordTracker::open(&path).len(), 1);
    tracker.update("two").unwrap();
    assert_eq!(KeywordTracker::open(&path).len(), 2);
}

#[test]
fn corrupt_store_starts_empty() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("keywords.json");
    fs::write(&path, "{\"python\": 1.0,,, oops").unwrap();

    let tracker = KeywordTracker::open(&path);
    assert!(tracker.is_empty());
}

#[test]
fn empty_store_file_starts_empty_and_recovers() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("keywords.json");
    fs::write(&path, "").unwrap();

    let mut tracker = KeywordTracker::open(&path);
    assert!(tracker.is_empty());

    tracker.update("rust").unwrap();
    assert_eq!(KeywordTracker::open(&path).score("rust"), Some(1.0));
}

#[test]
fn missing_store_starts_empty() {
    let dir = tempfile::tempdir().unwrap();
    let tracker = KeywordTracker::open(dir.path().join("absent.json"));
    assert!(tracker.is_empty());
    assert!(tracker.get_top_keywords(5).is_empty());
}

// ============================================================
// Shared tracker
// ============================================================

#[test]
fn shared_tracker_persists_under_lock() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("keywords.json");

    let shared = SharedKeywordTracker::new(KeywordTracker::open(&path));
    shared.update("alpha").unwrap();
    shared.update("beta").unwrap();

    let top = shared.get_top_keywords(1).unwrap();
    assert_eq!(top[0].0, "beta");
    assert_eq!(KeywordTracker::open(&path).len(), 2);
}

// ============================================================
// Properties over generated update sequences
// ============================================================

mod properties {
    use super::*;
    use proptest::prelude::*;

    fn relative_close(a: f64, b: f64) -> bool {
        (a - b).abs() <= 1e-9 * a.abs().max(b.abs()).max(1.0)
    }

    fn updates() -> impl Strategy<Value = Vec<(String, f64)>> {
        prop::collection::vec(("[a-z]{1,6}", 0.0f64..5.0), 0..40)
    }

    proptest! {
        #[test]
        fn untouched_keyword_decays_geometrically(
            start in 0.01f64..10.0,
            decay in 0.05f64..=1.0,
            others in prop::collection::vec(("[a-z]{1,6}", 0.0f64..5.0), 0..30),
        ) {
            let mut tracker = KeywordTracker::in_memory();
            tracker.update_keyword("TARGET", start, decay).unwrap();
            for (keyword, increment) in &others {
                tracker.update_keyword(keyword, *increment, decay).unwrap();
            }

            let expected = start * decay.powi(others.len() as i32);
            prop_assert!(relative_close(tracker.score("TARGET").unwrap(), expected));
        }

        #[test]
        fn top_keywords_are_sorted_and_bounded(seq in updates(), n in 0usize..30) {
            let mut tracker = KeywordTracker::in_memory();
            for (keyword, increment) in &seq {
                tracker.update_keyword(keyword, *increment, DEFAULT_DECAY).unwrap();
            }
            let top = tracker.get_top_keywords(n);
            prop_assert_eq!(top.len(), n.min(tracker.len()));
            for pair in top.windows(2) {
                prop_assert!(pair[0].1 >= pair[1].1);
            }
        }
    }

    proptest! {
        #![proptest_config(ProptestConfig::with_cases(48))]

        #[test]
        fn store_round_trips_any_update_sequence(seq in updates(), decay in 0.05f64..=1.0) {
            let dir = tempfile::tempdir().unwrap();
            let path = dir.path().join("keywords.json");

            let mut tracker = KeywordTracker::open(&path);
            for (keyword, increment) in &seq {
                tracker.update_keyword(keyword, *increment, decay).unwrap();
            }

            let reopened = KeywordTracker::open(&path);
            prop_assert_eq!(reopened.len(), tracker.len());
            for (keyword, score) in tracker.scores() {
                prop_assert!(relative_close(reopened.score(keyword).unwrap(), *score));
            }
        }
    }
}
