//! The answer contract: every `ask` resolves to text, never an error.

use serde::Serialize;

/// What the caller gets back from `ask`. Degenerate outcomes carry zero
/// confidence and no source attribution.
#[derive(Debug, Clone, Serialize)]
pub struct Answer {
    pub text: String,
    pub confidence: f64,
    pub primary_source: Option<String>,
    pub supplementary_source_count: usize,
}

/// Why an `ask` resolved without a synthesized answer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Degenerate {
    EmptyCorpus,
    BlankQuery,
    NoCandidates,
    BelowThreshold,
}

impl Degenerate {
    /// Fixed user-facing text for each degenerate outcome.
    #[must_use]
    pub fn message(self) -> &'static str {
        match self {
            Self::EmptyCorpus => {
                "I don't have any documents uploaded yet. Please upload some documents \
                 first so I can help answer your questions."
            }
            Self::BlankQuery => "Please enter a question so I can search your documents.",
            Self::NoCandidates => {
                "I couldn't find relevant information in the uploaded documents to answer \
                 your question. Try rephrasing your question or upload more relevant documents."
            }
            Self::BelowThreshold => {
                "I found some related information in your documents, but couldn't find a \
                 specific answer to your question. Try rephrasing your question or upload \
                 more relevant documents."
            }
        }
    }
}

impl Answer {
    #[must_use]
    pub fn degenerate(reason: Degenerate) -> Self {
        Self {
            text: reason.message().to_owned(),
            confidence: 0.0,
            primary_source: None,
            supplementary_source_count: 0,
        }
    }

    #[must_use]
    pub fn internal_error(detail: &str) -> Self {
        Self {
            text: format!("Something went wrong while answering your question: {detail}"),
            confidence: 0.0,
            primary_source: None,
            supplementary_source_count: 0,
        }
    }
}
