//! Immutable-snapshot chunk store with composite-scored lexical retrieval.
//!
//! The store never mutates a chunk collection in place. Every mutation
//! builds a fresh `Vec`, wraps it in an `Arc`, and swaps it under a short
//! write lock, so a retrieval that grabbed the previous snapshot keeps
//! reading a consistent corpus while a rebuild is in flight.

use std::sync::{Arc, PoisonError, RwLock};

use docwise_lexical::{enhanced_similarity, is_stop_word, similarity};
use serde::Deserialize;

use crate::types::Chunk;

/// Words whose presence marks a chunk as carrying central information.
static IMPORTANCE_WORDS: &[&str] = &[
    "important",
    "key",
    "main",
    "primary",
    "essential",
    "crucial",
    "significant",
    "definition",
    "meaning",
];

/// Retrieval tuning.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct RetrievalConfig {
    /// Maximum number of chunks returned per query.
    pub top_k: usize,
    /// Chunks must score strictly above this to be returned at all.
    pub floor: f64,
}

impl Default for RetrievalConfig {
    fn default() -> Self {
        Self {
            top_k: 8,
            floor: 0.0,
        }
    }
}

/// Per-signal decomposition of a chunk's composite score, kept alongside
/// the total so callers can explain a ranking.
#[derive(Debug, Clone, Copy, Default)]
pub struct ScoreBreakdown {
    pub enhanced: f64,
    pub exact_match: f64,
    pub keyword_importance: f64,
    pub title: f64,
    pub question_type: f64,
}

impl ScoreBreakdown {
    /// Weighted composite. Not clamped; the exact-match path alone can
    /// push the total past what the weights suggest.
    #[must_use]
    pub fn total(&self) -> f64 {
        0.4 * self.enhanced
            + 0.25 * self.exact_match
            + 0.15 * self.keyword_importance
            + 0.1 * self.title
            + 0.1 * self.question_type
    }
}

/// A chunk paired with its score for one query. Lives only for the
/// duration of a single retrieval.
#[derive(Debug, Clone)]
pub struct ScoredChunk {
    pub chunk: Chunk,
    pub score: f64,
    pub breakdown: ScoreBreakdown,
}

/// Owns the corpus of chunks across all registered documents.
#[derive(Debug, Default)]
pub struct ChunkStore {
    snapshot: RwLock<Arc<Vec<Chunk>>>,
}

impl ChunkStore {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Current snapshot. Cheap to take; the returned handle stays valid
    /// and unchanged across later mutations.
    #[must_use]
    pub fn snapshot(&self) -> Arc<Vec<Chunk>> {
        self.snapshot
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.snapshot().len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.snapshot().is_empty()
    }

    /// Replace the whole corpus atomically.
    pub fn replace_all(&self, chunks: Vec<Chunk>) {
        let count = chunks.len();
        *self
            .snapshot
            .write()
            .unwrap_or_else(PoisonError::into_inner) = Arc::new(chunks);
        tracing::debug!(chunks = count, "swapped corpus snapshot");
    }

    /// Append newly chunked documents without disturbing concurrent reads.
    pub fn append(&self, chunks: Vec<Chunk>) {
        let mut guard = self
            .snapshot
            .write()
            .unwrap_or_else(PoisonError::into_inner);
        let mut next = Vec::with_capacity(guard.len() + chunks.len());
        next.extend(guard.iter().cloned());
        next.extend(chunks);
        *guard = Arc::new(next);
    }

    pub fn clear(&self) {
        self.replace_all(Vec::new());
    }

    /// Rank the corpus against a query and return the best matches, at
    /// most `top_k`, sorted by descending score with insertion order as
    /// the tie-break. Blank queries and an empty corpus yield nothing.
    #[must_use]
    pub fn retrieve(&self, query: &str, config: &RetrievalConfig) -> Vec<ScoredChunk> {
        if query.trim().is_empty() {
            return Vec::new();
        }
        let snapshot = self.snapshot();
        if snapshot.is_empty() {
            return Vec::new();
        }

        let query_lower = query.to_lowercase();
        let mut scored: Vec<ScoredChunk> = snapshot
            .iter()
            .map(|chunk| {
                let breakdown = score_chunk(query, &query_lower, chunk);
                ScoredChunk {
                    chunk: chunk.clone(),
                    score: breakdown.total(),
                    breakdown,
                }
            })
            .filter(|scored| scored.score > config.floor)
            .collect();

        scored.sort_by(|a, b| {
            b.score
                .partial_cmp(&a.score)
                .unwrap_or(std::cmp::Ordering::Equal)
        });
        scored.truncate(config.top_k);

        tracing::debug!(
            candidates = snapshot.len(),
            returned = scored.len(),
            "retrieved chunks"
        );
        scored
    }
}

fn score_chunk(query: &str, query_lower: &str, chunk: &Chunk) -> ScoreBreakdown {
    let content_lower = chunk.text.to_lowercase();
    ScoreBreakdown {
        enhanced: enhanced_similarity(query, &chunk.text),
        exact_match: exact_match_boost(query_lower, &content_lower),
        keyword_importance: keyword_importance_boost(&content_lower),
        title: 0.3 * similarity(query, &chunk.source_display_name),
        question_type: question_type_boost(query_lower, &content_lower),
    }
}

/// Full credit when the query appears verbatim; otherwise the fraction of
/// all query words that show up as whole words, counting only content
/// words longer than two characters as hits.
#[allow(clippy::cast_precision_loss)]
fn exact_match_boost(query_lower: &str, content_lower: &str) -> f64 {
    if content_lower.contains(query_lower) {
        return 1.0;
    }

    let words: Vec<&str> = query_lower.split_whitespace().collect();
    if words.is_empty() {
        return 0.0;
    }
    let hits = words
        .iter()
        .filter(|word| word.len() > 2 && !is_stop_word(word))
        .filter(|word| contains_whole_word(content_lower, word))
        .count();
    hits as f64 / words.len() as f64
}

fn contains_whole_word(haystack: &str, needle: &str) -> bool {
    haystack.match_indices(needle).any(|(start, _)| {
        let before = haystack[..start].chars().next_back();
        let after = haystack[start + needle.len()..].chars().next();
        !before.is_some_and(char::is_alphanumeric) && !after.is_some_and(char::is_alphanumeric)
    })
}

fn keyword_importance_boost(content_lower: &str) -> f64 {
    let matches = IMPORTANCE_WORDS
        .iter()
        .filter(|word| content_lower.contains(**word))
        .count();
    #[allow(clippy::cast_precision_loss)]
    let boost = matches as f64 * 0.1;
    boost.min(0.5)
}

/// Rewards a chunk whose content matches the question's theme: definitions
/// for "what", processes for "how", causes for "why", dates for "when".
fn question_type_boost(query_lower: &str, content_lower: &str) -> f64 {
    const CUES: [(&str, [&str; 2]); 4] = [
        ("what", ["definition", "meaning"]),
        ("how", ["process", "method"]),
        ("why", ["because", "reason"]),
        ("when", ["date", "time"]),
    ];

    for (question_word, content_cues) in CUES {
        if query_lower.contains(question_word)
            && content_cues.iter().any(|cue| content_lower.contains(cue))
        {
            return 0.3;
        }
    }
    0.0
}
