// Sentence and word segmentation.
//
// Two strategies:
// - RegexSegmenter: split sentences on runs of . ! ? and words on runs of
//   word characters. Deterministic and the reference behavior for tests.
// - RuleSegmenter: a small rule-based splitter that knows about common
//   abbreviations, decimals and English contractions. Closer to what a
//   linguistic tokenizer produces, at the cost of more rules.

use std::sync::LazyLock;

use regex::Regex;

use super::traits::Segmenter;

static SENTENCE_BREAK: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"[.!?]+").expect("static sentence regex"));
static WORD: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"\w+").expect("static word regex"));

/// Minimum token length (exclusive) for the general token stream.
pub const MIN_TOKEN_LEN: usize = 2;

/// A sentence with its position in the source text and normalized tokens.
#[derive(Debug, Clone, PartialEq)]
pub struct Sentence {
    pub index: usize,
    /// Trimmed sentence text in its original casing
    pub text: String,
    /// Normalized tokens (lower-cased, alphanumeric, longer than 2 chars)
    pub tokens: Vec<String>,
}

/// Lower-case a raw word and keep it only if it is alphanumeric and longer
/// than `min_len` characters.
pub fn normalize(word: &str, min_len: usize) -> Option<String> {
    if word.chars().count() > min_len && word.chars().all(char::is_alphanumeric) {
        Some(word.to_lowercase())
    } else {
        None
    }
}

/// Segment text into sentences carrying their normalized tokens.
pub fn segment(segmenter: &dyn Segmenter, text: &str) -> Vec<Sentence> {
    segmenter
        .sentences(text)
        .into_iter()
        .enumerate()
        .map(|(index, text)| {
            let tokens = segmenter
                .words(&text)
                .iter()
                .filter_map(|w| normalize(w, MIN_TOKEN_LEN))
                .collect();
            Sentence {
                index,
                text,
                tokens,
            }
        })
        .collect()
}

/// Flatten sentences into one token stream in document order.
pub fn flatten(sentences: &[Sentence]) -> Vec<String> {
    sentences
        .iter()
        .flat_map(|s| s.tokens.iter().cloned())
        .collect()
}

fn is_word_char(c: char) -> bool {
    c.is_alphanumeric() || c == '_'
}

/// The canonical segmenter.
#[derive(Debug, Clone, Copy, Default)]
pub struct RegexSegmenter;

impl Segmenter for RegexSegmenter {
    fn name(&self) -> &'static str {
        "regex"
    }

    fn sentences(&self, text: &str) -> Vec<String> {
        SENTENCE_BREAK
            .split(text)
            .map(str::trim)
            .filter(|s| !s.is_empty())
            .map(str::to_string)
            .collect()
    }

    fn words(&self, sentence: &str) -> Vec<String> {
        WORD.find_iter(sentence)
            .map(|m| m.as_str().to_string())
            .collect()
    }
}

/// Words that end with a period without ending the sentence.
const ABBREVIATIONS: &[&str] = &[
    "mr", "mrs", "ms", "dr", "prof", "sr", "jr", "vs", "etc", "e.g", "i.e", "approx", "dept",
    "ltd", "corp", "vol", "feb", "apr", "jun", "jul", "aug", "sept", "oct", "nov",
];

/// Characters that may trail a sentence terminator and still belong to it.
fn is_closer(c: char) -> bool {
    matches!(c, '"' | '\'' | ')' | ']' | '}' | '\u{201d}' | '\u{2019}')
}

fn is_apostrophe(c: char) -> bool {
    c == '\'' || c == '\u{2019}'
}

/// Rule-based segmenter with abbreviation and contraction handling.
#[derive(Debug, Clone, Copy, Default)]
pub struct RuleSegmenter;

impl RuleSegmenter {
    /// Whether the period at the end of `before` belongs to an abbreviation
    /// or initial rather than ending the sentence.
    fn is_abbreviation(before: &str) -> bool {
        let mut tokens = before
            .rsplit(|c: char| c.is_whitespace() || c == '(')
            .filter(|t| !t.is_empty());
        let Some(last) = tokens.next() else {
            return false;
        };
        let last = last.trim_end_matches('.');

        // Initials ("J. R. Tolkien", "John F. Kennedy") follow a capitalized
        // word or open the text. "so do I." and "plan B." end sentences.
        let mut chars = last.chars();
        if let (Some(c), None) = (chars.next(), chars.next()) {
            return c.is_uppercase()
                && c != 'I'
                && tokens
                    .next()
                    .is_none_or(|prev| prev.starts_with(char::is_uppercase));
        }
        ABBREVIATIONS.contains(&last.to_lowercase().as_str())
    }
}

impl Segmenter for RuleSegmenter {
    fn name(&self) -> &'static str {
        "rule"
    }

    fn sentences(&self, text: &str) -> Vec<String> {
        let chars: Vec<(usize, char)> = text.char_indices().collect();
        let mut sentences = Vec::new();
        let mut start = 0;
        let mut i = 0;

        while i < chars.len() {
            let (pos, c) = chars[i];
            if !matches!(c, '.' | '!' | '?') {
                i += 1;
                continue;
            }

            // Consume the whole terminator run plus any closing quotes.
            let only_period = c == '.';
            let mut j = i + 1;
            let mut only_single_period = only_period;
            while j < chars.len() && matches!(chars[j].1, '.' | '!' | '?') {
                only_single_period = false;
                j += 1;
            }
            while j < chars.len() && is_closer(chars[j].1) {
                j += 1;
            }
            let end = chars.get(j).map(|(p, _)| *p).unwrap_or(text.len());

            let at_boundary = j >= chars.len() || chars[j].1.is_whitespace();
            if !at_boundary {
                // "3.14", "example.com", "e.g" mid-token
                i = j;
                continue;
            }

            if only_single_period && Self::is_abbreviation(&text[start..pos]) {
                i = j;
                continue;
            }

            // A following lower-case word means the period was not final.
            let next_visible = chars[j..].iter().find(|(_, c)| !c.is_whitespace());
            if only_single_period {
                if let Some((_, next)) = next_visible {
                    if next.is_lowercase() {
                        i = j;
                        continue;
                    }
                }
            }

            let sentence = text[start..end].trim();
            if !sentence.is_empty() {
                sentences.push(sentence.to_string());
            }
            start = end;
            i = j;
        }

        let rest = text[start..].trim();
        if !rest.is_empty() {
            sentences.push(rest.to_string());
        }
        sentences
    }

    fn words(&self, sentence: &str) -> Vec<String> {
        let chars: Vec<char> = sentence.chars().collect();
        let mut words = Vec::new();
        let mut i = 0;

        while i < chars.len() {
            if !is_word_char(chars[i]) {
                i += 1;
                continue;
            }
            let begin = i;
            while i < chars.len() && is_word_char(chars[i]) {
                i += 1;
            }
            let word: String = chars[begin..i].iter().collect();

            // Apostrophe followed by letters: split the clitic off.
            if i + 1 < chars.len() && is_apostrophe(chars[i]) && chars[i + 1].is_alphabetic() {
                let suffix_start = i + 1;
                let mut k = suffix_start;
                while k < chars.len() && chars[k].is_alphabetic() {
                    k += 1;
                }
                let suffix: String = chars[suffix_start..k].iter().collect();

                if suffix.eq_ignore_ascii_case("t") && word.to_lowercase().ends_with('n') {
                    // don't -> do n't
                    let stem_len = word.chars().count() - 1;
                    let stem: String = word.chars().take(stem_len).collect();
                    let n: String = word.chars().skip(stem_len).collect();
                    if !stem.is_empty() {
                        words.push(stem);
                    }
                    words.push(format!("{n}'{suffix}"));
                } else {
                    words.push(word);
                    words.push(format!("'{suffix}"));
                }
                i = k;
                continue;
            }

            words.push(word);
        }
        words
    }
}
