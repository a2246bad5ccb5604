//! Deterministic lexical analysis: stop words, suffix stemming, synonym
//! clusters, keyword extraction, and composite string similarity.
//!
//! Everything here is pure and table-driven. Scores are weighted sums of
//! independent signals, reproducible for a fixed pair of inputs.

pub mod phrases;
pub mod similarity;
pub mod synonyms;
pub mod tokens;

pub use phrases::extract_important_phrases;
pub use similarity::{enhanced_similarity, semantic_similarity, similarity};
pub use synonyms::are_synonyms;
pub use tokens::{QUESTION_WORDS, extract_keywords, is_stop_word, stem};
