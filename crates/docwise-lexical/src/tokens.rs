//! Tokenization primitives: stop-word filtering, suffix stripping, keyword
//! extraction.

use std::collections::HashSet;

/// Common English function words excluded from keyword sets.
static STOP_WORDS: &[&str] = &[
    "the", "a", "an", "and", "or", "but", "in", "on", "at", "to", "for", "of", "with", "by", "is",
    "are", "was", "were", "be", "been", "have", "has", "had", "do", "does", "did", "will", "would",
    "could", "should", "may", "might", "must", "can", "this", "that", "these", "those", "i", "you",
    "he", "she", "it", "we", "they", "me", "him", "her", "us", "them", "my", "your", "his", "its",
    "our", "their", "mine", "yours", "ours", "theirs", "myself", "yourself", "himself", "herself",
    "itself", "ourselves", "yourselves", "themselves", "what", "which", "who", "whom", "whose",
    "where", "when", "why", "how", "all", "any", "both", "each", "few", "more", "most", "other",
    "some", "such", "no", "nor", "not", "only", "own", "same", "so", "than", "too", "very", "just",
];

/// The interrogatives consulted wherever a "question word" matters.
pub static QUESTION_WORDS: &[&str] = &["what", "how", "why", "when", "where", "who", "which"];

#[must_use]
pub fn is_stop_word(word: &str) -> bool {
    STOP_WORDS.contains(&word)
}

/// Crude suffix-stripping stemmer. Tests suffixes in a fixed priority order
/// and strips the first match once; never re-applied. Intentionally
/// approximate ("running" -> "runn") so results stay reproducible.
#[must_use]
pub fn stem(word: &str) -> &str {
    let len = word.len();
    if len <= 3 {
        return word;
    }

    if word.ends_with("ing") && len > 4 {
        &word[..len - 3]
    } else if word.ends_with("ed") && len > 3 {
        &word[..len - 2]
    } else if word.ends_with("ly") && len > 3 {
        &word[..len - 2]
    } else if word.ends_with("tion") && len > 5 {
        &word[..len - 4]
    } else if word.ends_with("ment") && len > 5 {
        &word[..len - 4]
    } else if word.ends_with("ness") && len > 5 {
        &word[..len - 4]
    } else if word.ends_with("able") && len > 5 {
        &word[..len - 4]
    } else if word.ends_with("ible") && len > 5 {
        &word[..len - 4]
    } else if word.ends_with("er") && len > 3 {
        &word[..len - 2]
    } else if word.ends_with("est") && len > 4 {
        &word[..len - 3]
    } else if word.ends_with('s') && len > 2 && !word.ends_with("ss") {
        &word[..len - 1]
    } else {
        word
    }
}

/// Normalized keyword tokens with duplicates preserved, for frequency
/// statistics.
pub(crate) fn keyword_tokens(text: &str) -> Vec<String> {
    let clean: String = text
        .chars()
        .filter(|c| c.is_ascii_alphanumeric() || c.is_whitespace())
        .collect::<String>()
        .to_lowercase();

    clean
        .split_whitespace()
        .filter(|word| word.len() > 2 && !is_stop_word(word) && !is_numeric(word))
        .map(|word| stem(word).to_owned())
        .collect()
}

/// Extract normalized keywords: lower-case, strip punctuation, drop short
/// tokens, stop words and numbers, then stem. Deduplicated, first
/// occurrence order.
#[must_use]
pub fn extract_keywords(text: &str) -> Vec<String> {
    let mut seen = HashSet::new();
    keyword_tokens(text)
        .into_iter()
        .filter(|word| seen.insert(word.clone()))
        .collect()
}

fn is_numeric(word: &str) -> bool {
    !word.is_empty() && word.chars().all(|c| c.is_ascii_digit())
}
