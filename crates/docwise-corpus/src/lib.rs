//! Document-side of the docwise engine.
//!
//! Takes caller-supplied extracted text through per-kind normalization and
//! sentence-aware chunking, then owns the resulting corpus in a snapshot
//! store that ranks chunks against a query with a composite lexical score.

pub mod normalize;
pub mod splitter;
pub mod store;
pub mod types;

pub use normalize::normalize;
pub use splitter::{Chunker, ChunkerConfig};
pub use store::{ChunkStore, RetrievalConfig, ScoreBreakdown, ScoredChunk};
pub use types::{format_size, Chunk, Document, DocumentKind};
