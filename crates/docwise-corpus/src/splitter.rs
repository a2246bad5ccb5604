//! Sentence-aware bounded chunking of normalized document text.
//!
//! Paragraphs that fit the size limit become chunks verbatim. Longer
//! paragraphs are rebuilt sentence by sentence, carrying a short sentence
//! overlap between consecutive chunks so retrieval does not lose context
//! at chunk seams.

use chrono::Utc;
use serde::Deserialize;

use crate::normalize::normalize;
use crate::types::{Chunk, Document};

/// Tuning knobs for the chunker.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct ChunkerConfig {
    /// Upper bound on chunk length in bytes. A single sentence longer than
    /// this is emitted as its own oversized chunk rather than cut mid-word.
    pub chunk_size: usize,
    /// How many trailing sentences of the previous chunk are repeated at
    /// the start of the next one.
    pub overlap_sentences: usize,
}

impl Default for ChunkerConfig {
    fn default() -> Self {
        Self {
            chunk_size: 400,
            overlap_sentences: 2,
        }
    }
}

/// Splits documents into bounded, overlapping [`Chunk`]s.
#[derive(Debug, Clone)]
pub struct Chunker {
    config: ChunkerConfig,
}

impl Chunker {
    #[must_use]
    pub fn new(config: ChunkerConfig) -> Self {
        Self { config }
    }

    /// Normalize a document's text and split it into retrieval chunks.
    ///
    /// Returns an empty vector when the document normalizes to nothing.
    #[must_use]
    pub fn chunk(&self, document: &Document) -> Vec<Chunk> {
        let normalized = normalize(&document.raw_text, document.declared_kind);
        let pieces = self.split(&normalized);

        tracing::debug!(
            document_id = %document.id,
            chunks = pieces.len(),
            "chunked document"
        );

        let created_at = Utc::now();
        pieces
            .into_iter()
            .enumerate()
            .map(|(sequence, text)| Chunk {
                source_document_id: document.id.clone(),
                source_display_name: document.display_name.clone(),
                text,
                declared_kind: document.declared_kind,
                sequence,
                created_at,
            })
            .collect()
    }

    fn split(&self, text: &str) -> Vec<String> {
        let mut chunks = Vec::new();

        for paragraph in text.split("\n\n") {
            let paragraph = paragraph.trim();
            if paragraph.is_empty() {
                continue;
            }
            if paragraph.len() <= self.config.chunk_size {
                chunks.push(paragraph.to_owned());
            } else {
                self.split_long_paragraph(paragraph, &mut chunks);
            }
        }

        chunks
    }

    fn split_long_paragraph(&self, paragraph: &str, chunks: &mut Vec<String>) {
        let sentences = split_sentences(paragraph);
        let mut current: Vec<&str> = Vec::new();
        let mut current_len = 0usize;

        for sentence in sentences {
            let added = sentence.len() + usize::from(!current.is_empty());
            if current_len + added > self.config.chunk_size && !current.is_empty() {
                chunks.push(current.join(" "));
                let overlap = self.overlapped_start(&current, sentence.len());
                current_len = overlap.iter().map(|s| s.len() + 1).sum();
                current = overlap;
            }
            current_len += sentence.len() + usize::from(!current.is_empty());
            current.push(sentence);
        }

        if !current.is_empty() {
            chunks.push(current.join(" "));
        }
    }

    /// Trailing sentences of the finished chunk to carry forward, newest
    /// last. Skipped entirely for single-sentence chunks, and bounded so
    /// overlap plus the incoming sentence still fits the size limit.
    fn overlapped_start<'a>(&self, finished: &[&'a str], incoming_len: usize) -> Vec<&'a str> {
        if finished.len() <= 1 || self.config.overlap_sentences == 0 {
            return Vec::new();
        }

        let mut overlap: Vec<&str> = Vec::new();
        let mut overlap_len = 0usize;
        for sentence in finished.iter().rev().take(self.config.overlap_sentences) {
            let candidate = overlap_len + sentence.len() + 1;
            if candidate + incoming_len + 1 > self.config.chunk_size {
                break;
            }
            overlap.push(sentence);
            overlap_len = candidate;
        }
        overlap.reverse();
        overlap
    }
}

/// Split on sentence terminators (`.`, `!`, `?`) followed by whitespace.
/// Terminators stay attached to their sentence.
fn split_sentences(text: &str) -> Vec<&str> {
    let mut sentences = Vec::new();
    let mut start = 0;
    let mut chars = text.char_indices().peekable();

    while let Some((i, c)) = chars.next() {
        if matches!(c, '.' | '!' | '?') {
            let next_is_space = chars
                .peek()
                .is_none_or(|(_, next)| next.is_whitespace());
            if next_is_space {
                let end = i + c.len_utf8();
                let sentence = text[start..end].trim();
                if !sentence.is_empty() {
                    sentences.push(sentence);
                }
                start = end;
            }
        }
    }

    let tail = text[start..].trim();
    if !tail.is_empty() {
        sentences.push(tail);
    }

    sentences
}
