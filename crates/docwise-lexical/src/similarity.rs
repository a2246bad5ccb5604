//! Composite string similarity: Jaccard keyword overlap, synonym overlap,
//! substring matches, and a crude TF-IDF cosine, combined as weighted sums.
//!
//! Downstream retrieval scores built on these signals are not clamped to
//! [0, 1]; only the engine's re-rank path applies a cap.

use std::collections::{HashMap, HashSet};

use crate::phrases::{phrase_similarity, positional_similarity};
use crate::synonyms::are_synonyms;
use crate::tokens::{QUESTION_WORDS, extract_keywords};

/// Base composite similarity of two strings. Empty or blank input scores 0.
#[must_use]
pub fn similarity(a: &str, b: &str) -> f64 {
    let Some(signals) = Signals::compute(a, b) else {
        return 0.0;
    };
    signals.jaccard * 0.3 + signals.synonym * 0.3 + signals.substring * 0.2 + signals.tfidf * 0.2
}

/// Retrieval-time variant: reweighted base signals plus a question-word
/// co-occurrence boost.
#[must_use]
pub fn enhanced_similarity(query: &str, text: &str) -> f64 {
    let Some(signals) = Signals::compute(query, text) else {
        return 0.0;
    };
    let question = question_overlap_boost(query, text);
    signals.jaccard * 0.25
        + signals.synonym * 0.25
        + signals.substring * 0.2
        + signals.tfidf * 0.2
        + question * 0.1
}

/// Deep variant blending lexical, phrase-level, and positional signals.
#[must_use]
pub fn semantic_similarity(a: &str, b: &str) -> f64 {
    similarity(a, b) * 0.5 + phrase_similarity(a, b) * 0.3 + positional_similarity(a, b) * 0.2
}

struct Signals {
    jaccard: f64,
    synonym: f64,
    substring: f64,
    tfidf: f64,
}

impl Signals {
    fn compute(a: &str, b: &str) -> Option<Self> {
        if a.trim().is_empty() || b.trim().is_empty() {
            return None;
        }
        let keywords_a = extract_keywords(a);
        let keywords_b = extract_keywords(b);
        Some(Self {
            jaccard: jaccard_overlap(&keywords_a, &keywords_b),
            synonym: synonym_overlap(&keywords_a, &keywords_b),
            substring: substring_overlap(a, b),
            tfidf: tfidf_cosine(&keywords_a, &keywords_b, a, b),
        })
    }
}

#[allow(clippy::cast_precision_loss)]
fn jaccard_overlap(a: &[String], b: &[String]) -> f64 {
    let set_a: HashSet<&str> = a.iter().map(String::as_str).collect();
    let set_b: HashSet<&str> = b.iter().map(String::as_str).collect();

    let union = set_a.union(&set_b).count();
    if union == 0 {
        return 0.0;
    }
    set_a.intersection(&set_b).count() as f64 / union as f64
}

#[allow(clippy::cast_precision_loss)]
fn synonym_overlap(a: &[String], b: &[String]) -> f64 {
    let comparisons = a.len() * b.len();
    if comparisons == 0 {
        return 0.0;
    }
    let matches = a
        .iter()
        .map(|word_a| b.iter().filter(|word_b| are_synonyms(word_a, word_b)).count())
        .sum::<usize>();
    matches as f64 / comparisons as f64
}

/// Fraction of words (len > 3) on the shorter side that appear as a
/// substring of, or contain, some word on the other side.
#[allow(clippy::cast_precision_loss)]
fn substring_overlap(a: &str, b: &str) -> f64 {
    let lower_a = a.to_lowercase();
    let lower_b = b.to_lowercase();
    let words_a: Vec<&str> = lower_a.split_whitespace().collect();
    let words_b: Vec<&str> = lower_b.split_whitespace().collect();
    if words_a.is_empty() || words_b.is_empty() {
        return 0.0;
    }

    let (shorter, longer) = if words_a.len() <= words_b.len() {
        (&words_a, &words_b)
    } else {
        (&words_b, &words_a)
    };

    let matches = shorter
        .iter()
        .filter(|word| {
            word.len() > 3
                && longer
                    .iter()
                    .any(|other| other.contains(**word) || word.contains(other))
        })
        .count();

    matches as f64 / shorter.len() as f64
}

fn tfidf_cosine(keywords_a: &[String], keywords_b: &[String], a: &str, b: &str) -> f64 {
    let weights_a = tfidf_weights(keywords_a, a);
    let weights_b = tfidf_weights(keywords_b, b);

    let union: HashSet<&String> = weights_a.keys().chain(weights_b.keys()).collect();

    let mut dot = 0.0;
    let mut norm_a = 0.0;
    let mut norm_b = 0.0;
    for word in union {
        let x = weights_a.get(word).copied().unwrap_or(0.0);
        let y = weights_b.get(word).copied().unwrap_or(0.0);
        dot += x * y;
        norm_a += x * x;
        norm_b += y * y;
    }

    if norm_a == 0.0 || norm_b == 0.0 {
        return 0.0;
    }
    dot / (norm_a.sqrt() * norm_b.sqrt())
}

/// Term weight per keyword: raw-token frequency times a length-derived idf
/// stand-in. Counts match against raw whitespace tokens, so stemmed
/// keywords only hit their surface forms.
#[allow(clippy::cast_precision_loss)]
fn tfidf_weights(keywords: &[String], text: &str) -> HashMap<String, f64> {
    let lower = text.to_lowercase();
    let words: Vec<&str> = lower.split_whitespace().collect();

    let mut weights = HashMap::new();
    if words.is_empty() {
        return weights;
    }
    for keyword in keywords {
        let count = words.iter().filter(|word| *word == keyword).count();
        let tf = count as f64 / words.len() as f64;
        let idf = (1.0 + keyword.len() as f64 / 5.0).ln();
        weights.insert(keyword.clone(), tf * idf);
    }
    weights
}

/// 0.1 per interrogative present in both strings, capped at 0.3.
fn question_overlap_boost(question: &str, text: &str) -> f64 {
    let lower_question = question.to_lowercase();
    let lower_text = text.to_lowercase();

    let mut boost: f64 = 0.0;
    for word in QUESTION_WORDS {
        if lower_question.contains(word) && lower_text.contains(word) {
            boost += 0.1;
        }
    }
    boost.min(0.3)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn blank_input_scores_zero() {
        assert_eq!(similarity("", "anything"), 0.0);
        assert_eq!(similarity("anything", "   "), 0.0);
        assert_eq!(enhanced_similarity("", ""), 0.0);
    }

    #[test]
    fn identical_text_scores_high() {
        let text = "the compiler translates source code into machine code";
        let score = similarity(text, text);
        assert!(score > 0.6, "got {score}");
    }

    #[test]
    fn unrelated_text_scores_low() {
        let a = "bananas grow in tropical climates";
        let b = "the stock market closed higher today";
        let related = similarity(a, "banana plantations need tropical weather");
        let unrelated = similarity(a, b);
        assert!(related > unrelated);
    }

    #[test]
    fn synonym_overlap_contributes() {
        let with_synonym = similarity("a fast algorithm", "a quick algorithm");
        let without = similarity("a fast algorithm", "a purple algorithm");
        assert!(with_synonym > without);
    }

    #[test]
    fn substring_overlap_fraction() {
        // "programming" contains "program"
        let score = substring_overlap("program design", "programming language design");
        assert!(score > 0.9, "got {score}");
    }

    #[test]
    fn substring_ignores_short_words() {
        // Words of length <= 3 on the shorter side never count
        assert_eq!(substring_overlap("cat dog", "a catalog of dogmas"), 0.0);
    }

    #[test]
    fn jaccard_of_disjoint_sets_is_zero() {
        let a = vec!["java".to_owned()];
        let b = vec!["python".to_owned()];
        assert_eq!(jaccard_overlap(&a, &b), 0.0);
    }

    #[test]
    fn jaccard_of_equal_sets_is_one() {
        let a = vec!["java".to_owned(), "compil".to_owned()];
        assert_eq!(jaccard_overlap(&a, &a.clone()), 1.0);
    }

    #[test]
    fn tfidf_zero_when_no_keyword_hits() {
        // Keywords are stemmed; raw tokens here never equal a stemmed form
        let score = tfidf_cosine(
            &["runn".to_owned()],
            &["runn".to_owned()],
            "running",
            "running",
        );
        assert_eq!(score, 0.0);
    }

    #[test]
    fn tfidf_positive_on_shared_surface_forms() {
        let keywords = extract_keywords("java language");
        let score = tfidf_cosine(&keywords, &keywords, "java language", "java language");
        assert!(score > 0.99, "got {score}");
    }

    #[test]
    fn question_boost_counts_shared_interrogatives() {
        let boost = question_overlap_boost("what is java and how does it work", "what it is and how");
        assert!((boost - 0.2).abs() < 1e-9);
    }

    #[test]
    fn question_boost_caps_at_three_tenths() {
        let all = "what how why when where who which";
        assert!((question_overlap_boost(all, all) - 0.3).abs() < 1e-9);
    }

    #[test]
    fn enhanced_rewards_shared_question_words() {
        let query = "how does the engine work";
        let with_cue = enhanced_similarity(query, "how the engine works in detail");
        let without_cue = enhanced_similarity(query, "the engine works in detail");
        assert!(with_cue > without_cue);
    }

    #[test]
    fn semantic_includes_phrase_and_position_signals() {
        let a = "the quick brown fox jumps";
        let score = semantic_similarity(a, a);
        assert!(score > similarity(a, a) * 0.5);
    }

    mod proptest_similarity {
        use super::*;
        use proptest::prelude::*;

        proptest! {
            #![proptest_config(ProptestConfig::with_cases(1000))]

            #[test]
            fn similarity_never_panics(a in "\\PC{0,300}", b in "\\PC{0,300}") {
                let _ = similarity(&a, &b);
                let _ = enhanced_similarity(&a, &b);
            }

            #[test]
            fn similarity_is_finite_and_nonnegative(a in "[a-zA-Z0-9 .,!?]{0,200}", b in "[a-zA-Z0-9 .,!?]{0,200}") {
                let score = similarity(&a, &b);
                prop_assert!(score.is_finite());
                prop_assert!(score >= 0.0);
            }

            #[test]
            fn base_similarity_stays_within_unit_range(a in "[a-z ]{1,100}", b in "[a-z ]{1,100}") {
                // Each signal lies in [0, 1] and the weights sum to 1.0;
                // the cosine can sit an ulp above 1 on identical vectors.
                let score = similarity(&a, &b);
                prop_assert!(score >= 0.0);
                prop_assert!(score <= 1.0 + 1e-9);
            }
        }
    }
}
