//! Relevance scoring of journal entries against a question.
//!
//! The score is a small additive integer heuristic: a fixed boost for the
//! caller's current project, two points per keyword occurrence in the entry
//! text, and a flat boost for failure-flagged entries in the modes that
//! care about failure history. Entries scoring zero are excluded entirely
//! downstream — the gate is inclusion, not just ordering.

use crate::models::Mode;

/// Boost when the entry belongs to the caller's current project.
const PROJECT_MATCH_BOOST: u32 = 10;

/// Points per keyword occurrence in the entry text.
const KEYWORD_HIT_WEIGHT: u32 = 2;

/// Flat boost for failure-flagged entries in `search` and `suggest` modes.
const ERROR_ENTRY_BOOST: u32 = 5;

/// Substrings marking an entry as describing a failure.
const ERROR_MARKERS: &[&str] = &[
    "error",
    "bug",
    "exception",
    "crash",
    "doesn't work",
    "does not work",
    "broken",
    "failure",
    "failed",
    "panic",
];

/// Score one entry's full text against the extracted keywords.
///
/// Returns the accumulated score and whether the entry reads like a
/// failure report. All contributions are additive and order-independent;
/// keyword occurrences are counted case-insensitively and non-overlapping,
/// and a keyword repeated in the question compounds because the keyword
/// list is not deduplicated.
pub fn score_entry(
    entry_text: &str,
    entry_project: &str,
    keywords: &[String],
    project_filter: Option<&str>,
    mode: Mode,
) -> (u32, bool) {
    let text_lower = entry_text.to_lowercase();
    let mut score = 0u32;

    if let Some(filter) = project_filter {
        if entry_project.to_lowercase() == filter.to_lowercase() {
            score += PROJECT_MATCH_BOOST;
        }
    }

    for keyword in keywords {
        let occurrences = text_lower.matches(keyword.as_str()).count() as u32;
        score += occurrences * KEYWORD_HIT_WEIGHT;
    }

    let is_error = ERROR_MARKERS
        .iter()
        .any(|marker| text_lower.contains(marker));
    if is_error && mode.boosts_error_entries() {
        score += ERROR_ENTRY_BOOST;
    }

    (score, is_error)
}
