//! Keyword extraction from natural-language questions.
//!
//! The assistant's matching is plain substring search, so extraction only
//! has to normalize: lower-case, split on whitespace, trim punctuation from
//! token edges, and drop short tokens and closed-class stop-words. No
//! stemming. Output keeps encounter order and repeats — repeated terms in a
//! question naturally weight the scorer toward them.

/// Tokens this short carry no signal for substring matching.
const MIN_KEYWORD_CHARS: usize = 4;

/// Punctuation stripped from token edges before filtering.
const EDGE_PUNCTUATION: &[char] = &[
    '.', ',', ';', ':', '!', '?', '¿', '¡', '(', ')', '[', ']', '{', '}', '"', '\'', '-', '`',
];

/// Closed-class English words that never make useful search terms.
/// Only words longer than three characters matter here; shorter ones are
/// already dropped by the length filter.
const STOP_WORDS: &[&str] = &[
    "about", "after", "again", "also", "another", "because", "been", "before", "being", "between",
    "both", "cannot", "could", "does", "doing", "done", "down", "each", "even", "every", "from",
    "have", "having", "here", "into", "just", "know", "like", "made", "make", "many", "mine",
    "more", "most", "much", "must", "need", "only", "other", "ours", "over", "same", "should",
    "since", "some", "something", "still", "such", "than", "that", "their", "theirs", "them",
    "then", "there", "these", "they", "this", "those", "through", "under", "until", "upon",
    "very", "want", "went", "were", "what", "when", "where", "which", "while", "will", "with",
    "would", "your", "yours",
];

/// Extract significant search terms from a question.
///
/// Returns tokens in encounter order, lower-cased, without deduplication.
/// Tokens of three or fewer characters and stop-words are dropped, so a
/// question made entirely of filler yields an empty list — the caller
/// treats that as "no usable keywords", not an error.
pub fn extract_keywords(text: &str) -> Vec<String> {
    let lowered = text.to_lowercase();
    let mut keywords = Vec::new();

    for token in lowered.split_whitespace() {
        let word = token.trim_matches(|c| EDGE_PUNCTUATION.contains(&c));

        if word.chars().count() < MIN_KEYWORD_CHARS {
            continue;
        }
        if STOP_WORDS.contains(&word) {
            continue;
        }

        keywords.push(word.to_string());
    }

    keywords
}
