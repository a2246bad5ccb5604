//! Template-driven answer text from selected chunks.
//!
//! Each query type maps to one builder. Builders work on the ordered,
//! threshold-filtered chunk texts and the query classification; they never
//! look at the store. All truncation goes through [`truncate`] so cuts land
//! on word boundaries when one is close enough.

use std::fmt::Write as _;
use std::sync::LazyLock;

use regex::Regex;

use crate::classify::{QueryClassification, QueryType};

static NUMBERED_MARKER: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"\d+[.):]").unwrap());
static BULLET_MARKER: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"[•·-]").unwrap());
static STEP_MARKER: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)step\s*\d+|\d+[.):]|first|second|third|then|next|finally").unwrap()
});
static DIGITS: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"\d").unwrap());

const CAUSAL_CUES: [&str; 6] = [
    "because",
    "reason",
    "due to",
    "since",
    "as a result",
    "therefore",
];
const TEMPORAL_CUES: [&str; 9] = [
    "year", "month", "day", "time", "date", "when", "before", "after", "during",
];
const DEFINITION_CUES: [&str; 4] = ["is defined as", "refers to", "means", "definition of"];

/// Build the final answer text for a classified query.
#[must_use]
pub fn synthesize(classification: &QueryClassification, chunks: &[&str]) -> String {
    let mut text = match classification.primary_type {
        QueryType::Definition => definition_answer(chunks, &classification.key_terms),
        QueryType::Comparison => enumerated_answer("**Comparison Analysis:**", "Point", chunks, 4, 250),
        QueryType::List => list_answer(chunks),
        QueryType::Reason => reason_answer(chunks),
        QueryType::Explanation => plain_answer("**Explanation:**", chunks, 3),
        QueryType::Procedure => procedure_answer(chunks),
        QueryType::Factual => bulleted_answer("**Facts:**", chunks, 4, 200),
        QueryType::Analysis => enumerated_untruncated("**Analysis:**", "Aspect", chunks, 3),
        QueryType::Summary => summary_answer(chunks),
        QueryType::Numerical => filtered_answer("**Numerical Information:**", chunks, |c| {
            DIGITS.is_match(c)
        }),
        QueryType::Temporal => filtered_answer("**Time-related Information:**", chunks, |c| {
            let lower = c.to_lowercase();
            TEMPORAL_CUES.iter().any(|cue| lower.contains(cue))
        }),
        QueryType::General => bulleted_answer("**Based on your documents:**", chunks, 4, 250),
    };

    if chunks.len() > 3 {
        text.push_str("\n\nAdditional relevant information:\n");
        for chunk in chunks.iter().skip(3).take(3) {
            let _ = writeln!(text, "• {}", truncate(chunk, 150));
        }
    }

    text.trim().to_owned()
}

fn definition_answer(chunks: &[&str], key_terms: &[String]) -> String {
    let mut text = String::from("**Definition:**\n\n");

    let best = find_best_definition(chunks, key_terms);
    if let Some(definition) = best {
        text.push_str(definition.trim());
        text.push_str("\n\n");
    }

    for chunk in chunks.iter().take(2) {
        if Some(*chunk) != best {
            let _ = write!(text, "**Additional context:** {}\n\n", truncate(chunk, 200));
        }
    }

    text
}

/// First chunk carrying a definitional cue phrase; otherwise the chunk
/// matching the most key terms.
fn find_best_definition<'a>(chunks: &[&'a str], key_terms: &[String]) -> Option<&'a str> {
    for chunk in chunks {
        let lower = chunk.to_lowercase();
        if DEFINITION_CUES.iter().any(|cue| lower.contains(cue)) {
            return Some(chunk);
        }
    }

    let mut best = None;
    let mut max_matches = 0;
    for chunk in chunks {
        let lower = chunk.to_lowercase();
        let matches = key_terms
            .iter()
            .filter(|term| lower.contains(term.as_str()))
            .count();
        if matches > max_matches {
            max_matches = matches;
            best = Some(*chunk);
        }
    }
    best
}

fn enumerated_answer(
    header: &str,
    label: &str,
    chunks: &[&str],
    max: usize,
    limit: usize,
) -> String {
    let mut text = format!("{header}\n\n");
    for (i, chunk) in chunks.iter().take(max).enumerate() {
        let _ = write!(
            text,
            "**{label} {}:** {}\n\n",
            i + 1,
            truncate(chunk, limit)
        );
    }
    text
}

fn enumerated_untruncated(header: &str, label: &str, chunks: &[&str], max: usize) -> String {
    let mut text = format!("{header}\n\n");
    for (i, chunk) in chunks.iter().take(max).enumerate() {
        let _ = write!(text, "**{label} {}:** {}\n\n", i + 1, chunk.trim());
    }
    text
}

fn bulleted_answer(header: &str, chunks: &[&str], max: usize, limit: usize) -> String {
    let mut text = format!("{header}\n\n");
    for chunk in chunks.iter().take(max) {
        let _ = write!(text, "• {}\n\n", truncate(chunk, limit));
    }
    text
}

fn plain_answer(header: &str, chunks: &[&str], max: usize) -> String {
    let mut text = format!("{header}\n\n");
    for chunk in chunks.iter().take(max) {
        text.push_str(chunk.trim());
        text.push_str("\n\n");
    }
    text
}

fn list_answer(chunks: &[&str]) -> String {
    let mut text = String::from("**List of Items:**\n\n");

    let items = extract_list_items(chunks);
    if items.is_empty() {
        for chunk in chunks.iter().take(5) {
            let _ = write!(text, "• {}\n\n", truncate(chunk, 200));
        }
    } else {
        for item in items.iter().take(8) {
            let _ = writeln!(text, "• {item}");
        }
    }

    text
}

/// Structural list items: text between numbered or bulleted markers.
fn extract_list_items(chunks: &[&str]) -> Vec<String> {
    let mut items = Vec::new();
    for chunk in chunks {
        items.extend(segments_after_markers(chunk, &NUMBERED_MARKER));
        items.extend(segments_after_markers(chunk, &BULLET_MARKER));
    }
    items
}

fn reason_answer(chunks: &[&str]) -> String {
    let mut text = String::from("**Reasons:**\n\n");

    let mut found = false;
    for chunk in chunks {
        let lower = chunk.to_lowercase();
        if CAUSAL_CUES.iter().any(|cue| lower.contains(cue)) {
            let _ = write!(text, "• {}\n\n", truncate(chunk, 300));
            found = true;
        }
    }

    if !found {
        if let Some(first) = chunks.first() {
            let _ = write!(text, "• {}\n\n", truncate(first, 300));
        }
    }

    text
}

fn procedure_answer(chunks: &[&str]) -> String {
    let mut text = String::from("**Procedure:**\n\n");

    let steps = extract_steps(chunks);
    if steps.is_empty() {
        for chunk in chunks {
            let lower = chunk.to_lowercase();
            if ["step", "procedure", "process", "method"]
                .iter()
                .any(|cue| lower.contains(cue))
            {
                let _ = write!(text, "• {}\n\n", truncate(chunk, 250));
            }
        }
    } else {
        for (i, step) in steps.iter().enumerate() {
            let _ = write!(text, "**Step {}:** {step}\n\n", i + 1);
        }
    }

    text
}

/// Ordered step fragments anchored on sequencing cues; fragments of ten
/// characters or fewer are noise and dropped.
fn extract_steps(chunks: &[&str]) -> Vec<String> {
    let mut steps = Vec::new();
    for chunk in chunks {
        steps.extend(
            segments_after_markers(chunk, &STEP_MARKER)
                .into_iter()
                .filter(|step| step.len() > 10),
        );
    }
    steps
}

/// The text between each marker match and the next one (or end of input),
/// with leading separator punctuation stripped.
fn segments_after_markers(text: &str, marker: &Regex) -> Vec<String> {
    let spans: Vec<(usize, usize)> = marker.find_iter(text).map(|m| (m.start(), m.end())).collect();
    spans
        .iter()
        .enumerate()
        .filter_map(|(i, (_, end))| {
            let next_start = spans.get(i + 1).map_or(text.len(), |(start, _)| *start);
            let segment = text[*end..next_start]
                .trim_start_matches([':', '.'])
                .trim();
            (!segment.is_empty()).then(|| segment.to_owned())
        })
        .collect()
}

fn summary_answer(chunks: &[&str]) -> String {
    let combined = chunks.join(" ");
    format!("**Summary:**\n\n{}\n\n", truncate(&combined, 500))
}

fn filtered_answer(header: &str, chunks: &[&str], keep: impl Fn(&str) -> bool) -> String {
    let mut text = format!("{header}\n\n");
    for chunk in chunks.iter().filter(|c| keep(c)) {
        let _ = write!(text, "• {}\n\n", truncate(chunk, 200));
    }
    text
}

/// Cut `text` to at most `limit` characters. When the cut leaves a word
/// boundary within the last fifth of the limit, back up to it; an ellipsis
/// marks any cut.
#[must_use]
pub fn truncate(text: &str, limit: usize) -> String {
    let cut_at = match text.char_indices().nth(limit) {
        Some((byte_index, _)) => byte_index,
        None => return text.trim().to_owned(),
    };

    let mut cut = &text[..cut_at];
    if let Some(last_space) = cut.rfind(' ') {
        if last_space > limit * 4 / 5 {
            cut = &cut[..last_space];
        }
    }
    format!("{}...", cut.trim_end())
}
