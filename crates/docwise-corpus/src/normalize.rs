//! Per-kind cleanup of extracted text before chunking.
//!
//! Upstream extractors leave format-specific residue: hard line wraps in
//! PDF text, CRLF endings from Word converters, markup in HTML/XML dumps.
//! Normalization reduces all of it to plain paragraphed prose so the
//! chunker sees uniform input.

use std::sync::LazyLock;

use regex::Regex;

use crate::types::DocumentKind;

static SPACE_RUNS: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"[ \t]+").unwrap());
static WHITESPACE_RUNS: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"\s+").unwrap());
static PARAGRAPH_BREAK: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"\n\s*\n").unwrap());
static MARKUP_TAG: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"<[^>]+>").unwrap());
static HTML_ENTITY: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"&[a-zA-Z#0-9]+;").unwrap());

/// Clean extracted text according to its declared kind.
#[must_use]
pub fn normalize(text: &str, kind: DocumentKind) -> String {
    match kind {
        DocumentKind::Text => text.replace("\r\n", "\n").trim().to_owned(),
        DocumentKind::Pdf | DocumentKind::Word => reflow_paragraphs(text),
        DocumentKind::Xml => collapse_whitespace(&MARKUP_TAG.replace_all(text, " ")),
        DocumentKind::Html => {
            let without_tags = MARKUP_TAG.replace_all(text, " ");
            let without_entities = HTML_ENTITY.replace_all(&without_tags, " ");
            collapse_whitespace(&without_entities)
        }
        DocumentKind::Unknown => collapse_whitespace(text),
    }
}

/// Keep paragraph boundaries (blank lines), join wrapped lines inside a
/// paragraph, collapse space runs, drop non-printable artifacts.
fn reflow_paragraphs(text: &str) -> String {
    let printable: String = text
        .replace("\r\n", "\n")
        .chars()
        .filter(|c| !c.is_control() || *c == '\n' || *c == '\t')
        .collect();

    PARAGRAPH_BREAK
        .split(&printable)
        .map(|paragraph| {
            let joined = paragraph.replace('\n', " ");
            SPACE_RUNS.replace_all(&joined, " ").trim().to_owned()
        })
        .filter(|paragraph| !paragraph.is_empty())
        .collect::<Vec<_>>()
        .join("\n\n")
}

fn collapse_whitespace(text: &str) -> String {
    WHITESPACE_RUNS.replace_all(text, " ").trim().to_owned()
}
