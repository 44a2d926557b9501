//! Core data types shared across the journal and assistant pipeline.
//!
//! These types represent journal entries as read from disk, the scored and
//! ranked view of them built per assistant invocation, and the reply shape
//! handed back to callers (CLI or any UI layer on top).

use serde::Serialize;

/// The assistant's answering strategy.
///
/// Each mode selects a distinct instruction template and a context size cap.
/// Unknown mode strings fall back to [`Mode::Search`] rather than failing,
/// so a stale caller never breaks the assistant.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Mode {
    /// Find precedent: has this problem been seen before?
    Search,
    /// Propose solutions based on what worked previously.
    Suggest,
    /// Identify entries and source files related to the question.
    Files,
    /// Surface recurring patterns across the whole retained history.
    Analyze,
}

impl Mode {
    /// Parse a mode name. Unrecognized names fall back to `Search`.
    pub fn parse(s: &str) -> Mode {
        match s.to_ascii_lowercase().as_str() {
            "suggest" => Mode::Suggest,
            "files" => Mode::Files,
            "analyze" => Mode::Analyze,
            _ => Mode::Search,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Mode::Search => "search",
            Mode::Suggest => "suggest",
            Mode::Files => "files",
            Mode::Analyze => "analyze",
        }
    }

    /// Maximum number of entries retained in the assembled context.
    pub fn context_limit(&self) -> usize {
        match self {
            Mode::Analyze => 10,
            _ => 5,
        }
    }

    /// Whether failure-flagged entries get a relevance boost in this mode.
    pub fn boosts_error_entries(&self) -> bool {
        matches!(self, Mode::Search | Mode::Suggest)
    }
}

/// Parsed frontmatter of an entry: an ordered, schema-less string mapping.
///
/// Entries are free-form Markdown and any subset of header keys may be
/// missing; the typed getters centralize the fallback literals so call
/// sites never invent their own.
#[derive(Debug, Clone, Default)]
pub struct EntryHeader {
    fields: Vec<(String, String)>,
}

impl EntryHeader {
    pub fn from_pairs(fields: Vec<(String, String)>) -> Self {
        Self { fields }
    }

    /// Raw lookup by key; first occurrence wins.
    pub fn get(&self, key: &str) -> Option<&str> {
        self.fields
            .iter()
            .find(|(k, _)| k == key)
            .map(|(_, v)| v.as_str())
    }

    pub fn author(&self) -> &str {
        self.get("author").filter(|v| !v.is_empty()).unwrap_or("N/A")
    }

    /// The commit/problem line, doubling as the entry title.
    pub fn subject(&self) -> &str {
        self.get("commit_problem")
            .filter(|v| !v.is_empty())
            .unwrap_or("untitled")
    }

    pub fn branch(&self) -> &str {
        self.get("branch").filter(|v| !v.is_empty()).unwrap_or("N/A")
    }

    /// Branch value suitable for aggregation: `None` when absent or empty.
    pub fn branch_nonempty(&self) -> Option<&str> {
        self.get("branch").filter(|v| !v.trim().is_empty())
    }

    pub fn date(&self) -> &str {
        self.get("date").filter(|v| !v.is_empty()).unwrap_or("N/A")
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    pub fn len(&self) -> usize {
        self.fields.len()
    }
}

/// One journal entry as read from `root/<project>/entries/<filename>`.
#[derive(Debug, Clone)]
pub struct JournalEntry {
    /// Owning project, derived from the directory name.
    pub project: String,
    /// File name within the project's entries directory (timestamp-derived).
    pub filename: String,
    /// Parsed frontmatter fields.
    pub header: EntryHeader,
    /// Full file text, header block included.
    pub raw_content: String,
    /// Bounded prefix of the raw content used for prompt excerpts.
    pub content_preview: String,
}

/// An entry that passed the relevance gate, with its per-query score.
#[derive(Debug, Clone)]
pub struct ScoredEntry {
    pub entry: JournalEntry,
    /// Additive relevance score; always > 0 once inside a context.
    pub score: u32,
    /// Whether the entry text contains a failure-indicator phrase.
    pub is_error: bool,
}

/// The bounded, ranked set of entries assembled for one invocation.
///
/// Built fresh per question, never cached. `projects` and `branches`
/// describe the retained entries only, not the full candidate pool.
#[derive(Debug, Clone, Default)]
pub struct Context {
    /// Entries sorted descending by score, truncated to the mode's cap.
    pub entries: Vec<ScoredEntry>,
    /// Distinct project names among retained entries, first-seen order.
    pub projects: Vec<String>,
    /// Distinct non-empty branch values among retained entries.
    pub branches: Vec<String>,
}

/// A cited entry, normalized for UI linking.
#[derive(Debug, Clone, Serialize)]
pub struct FileReference {
    pub project: String,
    pub filename: String,
    pub title: String,
    pub branch: String,
    pub date: String,
    pub relevance: u32,
}

/// The assistant's reply shape, consumed by the CLI and any UI layer.
#[derive(Debug, Clone, Serialize)]
pub struct AssistantReply {
    /// Markdown-formatted answer text, or a clearly-marked failure notice.
    pub response: String,
    /// Number of entries in the assembled context after truncation.
    pub context_used: usize,
    pub referenced_files: Vec<FileReference>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_mode_parse_known() {
        assert_eq!(Mode::parse("search"), Mode::Search);
        assert_eq!(Mode::parse("suggest"), Mode::Suggest);
        assert_eq!(Mode::parse("files"), Mode::Files);
        assert_eq!(Mode::parse("ANALYZE"), Mode::Analyze);
    }

    #[test]
    fn test_mode_parse_unknown_falls_back_to_search() {
        assert_eq!(Mode::parse("summarize"), Mode::Search);
        assert_eq!(Mode::parse(""), Mode::Search);
    }

    #[test]
    fn test_mode_context_limit() {
        assert_eq!(Mode::Analyze.context_limit(), 10);
        assert_eq!(Mode::Search.context_limit(), 5);
        assert_eq!(Mode::Suggest.context_limit(), 5);
        assert_eq!(Mode::Files.context_limit(), 5);
    }

    #[test]
    fn test_header_getters_default_missing_fields() {
        let header = EntryHeader::default();
        assert_eq!(header.subject(), "untitled");
        assert_eq!(header.branch(), "N/A");
        assert_eq!(header.date(), "N/A");
        assert_eq!(header.author(), "N/A");
        assert!(header.branch_nonempty().is_none());
    }

    #[test]
    fn test_header_first_occurrence_wins() {
        let header = EntryHeader::from_pairs(vec![
            ("branch".to_string(), "main".to_string()),
            ("branch".to_string(), "dev".to_string()),
        ]);
        assert_eq!(header.branch(), "main");
    }

    #[test]
    fn test_header_empty_value_treated_as_absent() {
        let header = EntryHeader::from_pairs(vec![("branch".to_string(), String::new())]);
        assert_eq!(header.branch(), "N/A");
        assert!(header.branch_nonempty().is_none());
    }
}
