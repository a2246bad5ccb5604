//! Lexical question answering over caller-supplied documents.
//!
//! The pipeline: retrieve composite-scored chunks from the corpus, re-rank
//! with a capped relevance score, drop everything under a dynamic threshold,
//! classify the question's rhetorical intent, and render the surviving
//! chunks through the matching answer template. Everything runs on one
//! worker task per [`Engine`] instance, strictly in submission order.

pub mod answer;
pub mod classify;
pub mod config;
pub mod engine;
pub mod error;
pub mod synthesize;

pub use answer::{Answer, Degenerate};
pub use classify::{classify, QueryClassification, QueryType};
pub use config::EngineConfig;
pub use engine::Engine;
pub use error::{ConfigError, EngineError};
pub use synthesize::{synthesize, truncate};
