// Composition tests — verifying that the modules chain together correctly.
//
// These tests exercise the data flow:
//   discovery -> context extraction -> topic categorization
//   discovery -> importance tracker (persisted across "sessions")
// with the filesystem used only through temp dirs.

use kindling::categories::{
    default_categories, extract_topics, extract_topics_with_dynamic, with_dynamic_category,
    DYNAMIC_CATEGORY,
};
use kindling::context::{extract_context, load_conversation};
use kindling::keywords::traits::KeywordExtractor;
use kindling::keywords::{generate_dynamic_keywords, KeywordEngine, DEFAULT_THRESHOLD};
use kindling::tracker::KeywordTracker;

const SESSION_ONE: &str = "USER: I'm having trouble with my Python code. It keeps giving me errors with dictionaries.
ASSISTANT: Let's look at your dictionary code. Are you using the correct syntax for accessing keys?
USER: I think so. I'm using mydict['key'] but it says KeyError.
ASSISTANT: That means the key doesn't exist in the dictionary. You should check if the key exists first.
USER: That's helpful! Also, I'm working on a Flask project and need to handle form data.
ASSISTANT: Flask's request object has a form attribute that contains form data as a dictionary.
USER: I'm also struggling with focus today. My ADHD is making it hard to concentrate.
ASSISTANT: Have you tried using the Pomodoro technique? 25 minutes of focus followed by a 5-minute break?
USER: No, I haven't. That sounds like it could help.
ASSISTANT: It's very effective for many people with ADHD. The time-boxing helps maintain focus for short periods.";

const SESSION_TWO: &str = "USER: Back to Flask. My Flask form keeps failing validation.
ASSISTANT: Flask form validation needs a secret key. Remember this. Validators run before submission.
USER: Flask form validation works now.";

// ============================================================
// Chain: discovery -> context extraction
// ============================================================

#[test]
fn discovered_keywords_are_valid_context_input() {
    let keywords = generate_dynamic_keywords(SESSION_ONE, &[], DEFAULT_THRESHOLD);
    assert!(!keywords.is_empty());

    let contexts = extract_context(SESSION_ONE, &keywords, 1);
    // Single-word keywords were taken from the text, so each must be found.
    for keyword in keywords.iter().filter(|k| !k.contains(' ')) {
        assert!(
            contexts.iter().any(|c| &c.keyword == keyword),
            "keyword '{keyword}' was discovered but not located in the text"
        );
    }
    for c in &contexts {
        for m in &c.matches {
            assert!(m.context.len() <= 3);
            assert!(m.context.contains(&m.line));
        }
    }
}

// ============================================================
// Chain: discovery -> topic categorization
// ============================================================

#[test]
fn dynamic_topics_join_static_categories() {
    let engine = KeywordEngine::default();
    let results = extract_topics_with_dynamic(
        SESSION_ONE,
        default_categories(),
        3,
        Some((&engine as &dyn KeywordExtractor, DEFAULT_THRESHOLD)),
    );
    let labels: Vec<&str> = results.iter().map(|r| r.category.as_str()).collect();

    assert!(labels.contains(&"Python Syntax"));
    assert!(labels.contains(&"Web Development"));
    assert!(labels.contains(&"ADHD & Productivity"));
    assert!(labels.contains(&DYNAMIC_CATEGORY));

    let dynamic = results.iter().find(|r| r.category == DYNAMIC_CATEGORY).unwrap();
    assert!(!dynamic.hits.is_empty());
}

#[test]
fn static_only_topics_have_no_dynamic_category() {
    let results = extract_topics(SESSION_ONE, &default_categories(), 3);
    assert!(results.iter().all(|r| r.category != DYNAMIC_CATEGORY));
    assert!(results.iter().any(|r| r.category == "Python Syntax"));
}

#[test]
fn dynamic_category_excludes_taxonomy_keywords() {
    let categories = default_categories();
    let known: Vec<String> = categories
        .iter()
        .flat_map(|c| c.keywords.iter().cloned())
        .collect();
    let discovered = KeywordEngine::default().extract(SESSION_ONE, &known, DEFAULT_THRESHOLD);
    for k in &discovered {
        assert!(!known.iter().any(|kn| kn.eq_ignore_ascii_case(k)), "'{k}' already in taxonomy");
    }

    let merged = with_dynamic_category(categories, discovered.clone());
    let dynamic = merged.iter().find(|c| c.label == DYNAMIC_CATEGORY);
    assert_eq!(dynamic.map(|c| c.keywords.clone()), (!discovered.is_empty()).then_some(discovered));
}

// ============================================================
// Chain: discovery -> tracker across sessions
// ============================================================

#[test]
fn tracker_accumulates_across_sessions() {
    let dir = tempfile::tempdir().unwrap();
    let store = dir.path().join("keywords.json");

    let first = generate_dynamic_keywords(SESSION_ONE, &[], DEFAULT_THRESHOLD);
    {
        let mut tracker = KeywordTracker::open(&store);
        for k in first.iter().take(10) {
            tracker.update(k).unwrap();
        }
    }

    let second = generate_dynamic_keywords(SESSION_TWO, &[], DEFAULT_THRESHOLD);
    assert!(second.contains(&"flask".to_string()), "got {second:?}");

    let mut tracker = KeywordTracker::open(&store);
    let before = tracker.len();
    for k in second.iter().take(10) {
        tracker.update(k).unwrap();
    }
    assert!(tracker.len() >= before);

    // The most recent observation always carries at least the increment.
    let last = second.iter().take(10).last().unwrap();
    assert!(tracker.score(last).unwrap() >= 1.0);

    let top = tracker.get_top_keywords(3);
    assert!(top.windows(2).all(|w| w[0].1 >= w[1].1));
}

#[test]
fn marker_sentence_words_reach_tracker() {
    let keywords = generate_dynamic_keywords(SESSION_TWO, &[], DEFAULT_THRESHOLD);
    assert!(keywords.contains(&"validators".to_string()), "got {keywords:?}");
    assert!(keywords.contains(&"submission".to_string()));

    let mut tracker = KeywordTracker::in_memory();
    for k in &keywords {
        tracker.update(k).unwrap();
    }
    assert!(tracker.score("validators").is_some());
}

#[test]
fn conversation_file_round_trip() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("conversation.txt");
    std::fs::write(&path, SESSION_TWO).unwrap();

    let text = load_conversation(&path).unwrap();
    assert_eq!(text, SESSION_TWO);
    assert_eq!(
        generate_dynamic_keywords(&text, &[], DEFAULT_THRESHOLD),
        generate_dynamic_keywords(SESSION_TWO, &[], DEFAULT_THRESHOLD)
    );
}

#[test]
fn non_ascii_keywords_are_found_again_in_context() {
    let text = "we ordered at the café today\nthe café was busy\ncafé café café";
    let keywords = generate_dynamic_keywords(text, &[], DEFAULT_THRESHOLD);
    assert_eq!(keywords, vec!["café".to_string()]);

    let contexts = extract_context(text, &keywords, 0);
    assert_eq!(contexts.len(), 1);
    assert_eq!(contexts[0].matches.len(), 3);
}
