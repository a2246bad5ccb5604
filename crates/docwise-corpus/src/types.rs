//! Core data model: documents, declared kinds, and retrieval chunks.

use chrono::{DateTime, Utc};

/// Declared format of the file a document's text was extracted from.
/// Extraction happens upstream; the kind only drives normalization.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DocumentKind {
    Text,
    Pdf,
    Word,
    Xml,
    Html,
    Unknown,
}

impl DocumentKind {
    /// Resolve from a file extension or a MIME-style label.
    #[must_use]
    pub fn from_label(label: &str) -> Self {
        match label.trim().to_lowercase().as_str() {
            "txt" | "text" | "text/plain" => Self::Text,
            "pdf" | "application/pdf" => Self::Pdf,
            "doc" | "docx" | "application/msword"
            | "application/vnd.openxmlformats-officedocument.wordprocessingml.document" => {
                Self::Word
            }
            "xml" | "application/xml" | "text/xml" => Self::Xml,
            "html" | "htm" | "text/html" => Self::Html,
            _ => Self::Unknown,
        }
    }

    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Text => "text",
            Self::Pdf => "pdf",
            Self::Word => "word",
            Self::Xml => "xml",
            Self::Html => "html",
            Self::Unknown => "unknown",
        }
    }
}

/// A caller-supplied document. Immutable once created; the engine only
/// reads it.
#[derive(Debug, Clone)]
pub struct Document {
    pub id: String,
    pub display_name: String,
    pub raw_text: String,
    pub declared_kind: DocumentKind,
}

impl Document {
    #[must_use]
    pub fn new(
        id: impl Into<String>,
        display_name: impl Into<String>,
        raw_text: impl Into<String>,
        declared_kind: DocumentKind,
    ) -> Self {
        Self {
            id: id.into(),
            display_name: display_name.into(),
            raw_text: raw_text.into(),
            declared_kind,
        }
    }
}

/// A bounded span of a document's text, the unit of retrieval. Created only
/// by the chunker; immutable after creation.
#[derive(Debug, Clone)]
pub struct Chunk {
    pub source_document_id: String,
    pub source_display_name: String,
    pub text: String,
    pub declared_kind: DocumentKind,
    pub sequence: usize,
    pub created_at: DateTime<Utc>,
}

/// Human-readable byte size for listing output, one decimal.
#[must_use]
#[allow(clippy::cast_precision_loss)]
pub fn format_size(bytes: u64) -> String {
    const UNITS: [&str; 4] = ["B", "KB", "MB", "GB"];

    let mut value = bytes as f64;
    let mut unit = 0;
    while value >= 1024.0 && unit < UNITS.len() - 1 {
        value /= 1024.0;
        unit += 1;
    }
    format!("{value:.1} {}", UNITS[unit])
}
