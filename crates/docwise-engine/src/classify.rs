//! Rule-based tagging of a question's rhetorical intent.
//!
//! A single pass over the lower-cased query: leading-interrogative
//! heuristics pick a provisional type, then content-keyword overrides
//! run in a fixed order with the last matching override winning.

use std::collections::HashSet;

use docwise_lexical::{is_stop_word, stem, QUESTION_WORDS};
use serde::Serialize;

/// Closed set of answer templates a query can map to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum QueryType {
    Definition,
    Comparison,
    List,
    Reason,
    Explanation,
    Procedure,
    Factual,
    Analysis,
    Summary,
    Numerical,
    Temporal,
    General,
}

impl QueryType {
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Definition => "definition",
            Self::Comparison => "comparison",
            Self::List => "list",
            Self::Reason => "reason",
            Self::Explanation => "explanation",
            Self::Procedure => "procedure",
            Self::Factual => "factual",
            Self::Analysis => "analysis",
            Self::Summary => "summary",
            Self::Numerical => "numerical",
            Self::Temporal => "temporal",
            Self::General => "general",
        }
    }
}

/// What the classifier learned about one query.
#[derive(Debug, Clone)]
pub struct QueryClassification {
    pub primary_type: QueryType,
    /// Stemmed, stop-word-filtered content tokens longer than 3 chars,
    /// first occurrence order.
    pub key_terms: Vec<String>,
    /// Which of the fixed interrogatives appear anywhere in the query.
    pub question_words: Vec<&'static str>,
}

#[must_use]
pub fn classify(query: &str) -> QueryClassification {
    let lower = query.trim().to_lowercase();
    let mut primary = leading_word_type(&lower);

    // Overrides run unconditionally; the last matching one wins.
    if ["compare", "difference", "vs", "versus"]
        .iter()
        .any(|cue| lower.contains(cue))
    {
        primary = QueryType::Comparison;
    }
    if ["list", "types of", "examples", "kinds of"]
        .iter()
        .any(|cue| lower.contains(cue))
    {
        primary = QueryType::List;
    }
    if ["analyze", "analysis", "evaluate", "assess"]
        .iter()
        .any(|cue| lower.contains(cue))
    {
        primary = QueryType::Analysis;
    }
    if ["summarize", "summary", "overview", "brief"]
        .iter()
        .any(|cue| lower.contains(cue))
    {
        primary = QueryType::Summary;
    }

    QueryClassification {
        primary_type: primary,
        key_terms: extract_key_terms(&lower),
        question_words: extract_question_words(&lower),
    }
}

fn leading_word_type(lower: &str) -> QueryType {
    if lower.starts_with("what") {
        if lower.contains("steps") || lower.contains("procedure") {
            QueryType::Procedure
        } else if ["what is", "what are", "what does", "define"]
            .iter()
            .any(|cue| lower.contains(cue))
        {
            QueryType::Definition
        } else {
            QueryType::Factual
        }
    } else if lower.starts_with("how") {
        if lower.contains("how many") || lower.contains("how much") {
            QueryType::Numerical
        } else if lower.contains("how does") || lower.contains("how is") {
            QueryType::Explanation
        } else if ["how to", "how do", "how can"]
            .iter()
            .any(|cue| lower.contains(cue))
        {
            QueryType::Procedure
        } else {
            QueryType::General
        }
    } else if lower.starts_with("why") {
        QueryType::Reason
    } else if lower.starts_with("when") {
        QueryType::Temporal
    } else if lower.starts_with("where") || lower.starts_with("who") {
        QueryType::Factual
    } else {
        QueryType::General
    }
}

fn extract_key_terms(lower: &str) -> Vec<String> {
    let mut seen = HashSet::new();
    lower
        .split_whitespace()
        .map(|word| {
            word.chars()
                .filter(char::is_ascii_alphanumeric)
                .collect::<String>()
        })
        .filter(|word| word.len() > 3 && !is_stop_word(word))
        .map(|word| stem(&word).to_string())
        .filter(|term| seen.insert(term.clone()))
        .collect()
}

fn extract_question_words(lower: &str) -> Vec<&'static str> {
    QUESTION_WORDS
        .iter()
        .filter(|word| lower.contains(*word))
        .copied()
        .collect()
}
