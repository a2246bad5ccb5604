//! Phrase-level and positional signals for the deep similarity variant.

use crate::similarity::similarity;
use crate::synonyms::are_synonyms;
use crate::tokens::is_stop_word;

/// Short sentences (2 to 5 words) carrying at least one content word.
/// Words are reduced to lower-case letters; everything else is dropped.
#[must_use]
pub fn extract_important_phrases(text: &str) -> Vec<String> {
    let mut phrases = Vec::new();

    for sentence in text.split(['.', '!', '?']) {
        let words: Vec<&str> = sentence.trim().split_whitespace().collect();
        if !(2..=5).contains(&words.len()) {
            continue;
        }

        let mut phrase = String::new();
        let mut has_content_word = false;
        for word in &words {
            let clean: String = word
                .chars()
                .filter(char::is_ascii_alphabetic)
                .collect::<String>()
                .to_lowercase();
            if clean.len() > 2 && !is_stop_word(&clean) {
                has_content_word = true;
            }
            if !phrase.is_empty() {
                phrase.push(' ');
            }
            phrase.push_str(&clean);
        }

        if has_content_word {
            phrases.push(phrase);
        }
    }

    phrases
}

/// Fraction of phrases on one side with a close match (base similarity
/// above 0.6) on the other, over the larger phrase count.
#[allow(clippy::cast_precision_loss)]
pub(crate) fn phrase_similarity(a: &str, b: &str) -> f64 {
    let phrases_a = extract_important_phrases(a);
    let phrases_b = extract_important_phrases(b);
    if phrases_a.is_empty() || phrases_b.is_empty() {
        return 0.0;
    }

    let matches = phrases_a
        .iter()
        .filter(|phrase_a| {
            phrases_b
                .iter()
                .any(|phrase_b| similarity(phrase_a, phrase_b) > 0.6)
        })
        .count();

    matches as f64 / phrases_a.len().max(phrases_b.len()) as f64
}

/// Rewards shared or synonymous content words sitting at similar relative
/// offsets in the two strings.
#[allow(clippy::cast_precision_loss)]
pub(crate) fn positional_similarity(a: &str, b: &str) -> f64 {
    let lower_a = a.to_lowercase();
    let lower_b = b.to_lowercase();
    let words_a: Vec<&str> = lower_a.split_whitespace().collect();
    let words_b: Vec<&str> = lower_b.split_whitespace().collect();
    if words_a.is_empty() || words_b.is_empty() {
        return 0.0;
    }

    let mut score = 0.0;
    let mut matches = 0u32;
    for (i, word) in words_a.iter().enumerate() {
        if word.len() <= 2 || is_stop_word(word) {
            continue;
        }
        let relative_a = i as f64 / words_a.len() as f64;

        if let Some(j) = words_b
            .iter()
            .position(|other| *other == *word || are_synonyms(word, other))
        {
            let relative_b = j as f64 / words_b.len() as f64;
            score += 1.0 - (relative_a - relative_b).abs();
            matches += 1;
        }
    }

    if matches == 0 {
        0.0
    } else {
        score / f64::from(matches)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn extracts_short_sentences_only() {
        let text = "Quick summary here. This sentence is definitely far too long to qualify as a phrase at all.";
        let phrases = extract_important_phrases(text);
        assert_eq!(phrases, vec!["quick summary here"]);
    }

    #[test]
    fn single_word_sentences_skipped() {
        assert!(extract_important_phrases("Hello. Hi.").is_empty());
    }

    #[test]
    fn stop_word_only_sentences_skipped() {
        assert!(extract_important_phrases("it is. so very.").is_empty());
    }

    #[test]
    fn punctuation_stripped_from_phrase_words() {
        let phrases = extract_important_phrases("well-known answer, really!");
        assert_eq!(phrases, vec!["wellknown answer really"]);
    }

    #[test]
    fn identical_phrases_match() {
        let text = "fast rendering engine.";
        assert!(phrase_similarity(text, text) > 0.99);
    }

    #[test]
    fn disjoint_phrases_do_not_match() {
        assert_eq!(
            phrase_similarity("tropical fruit salad.", "stock market report."),
            0.0
        );
    }

    #[test]
    fn positional_rewards_same_offsets() {
        let same = positional_similarity("compiler emits bytecode", "compiler emits bytecode");
        assert!((same - 1.0).abs() < 1e-9);
    }

    #[test]
    fn positional_penalizes_displacement() {
        let aligned = positional_similarity("compiler emits bytecode", "compiler emits bytecode");
        let shifted = positional_similarity(
            "compiler emits bytecode",
            "yesterday morning the new compiler emits bytecode",
        );
        assert!(aligned > shifted);
    }

    #[test]
    fn positional_counts_synonyms() {
        let score = positional_similarity("fast compiler", "quick compiler");
        assert!(score > 0.9, "got {score}");
    }

    #[test]
    fn positional_empty_input_zero() {
        assert_eq!(positional_similarity("", "words here"), 0.0);
    }
}
