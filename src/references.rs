//! Reference extraction: normalized citations for the retained context.

use crate::models::{Context, FileReference};

/// Derive the list of cited entries from an assembled context.
///
/// Pure and infallible: one reference per retained entry, in context
/// order, with missing header fields replaced by placeholders.
pub fn extract_file_references(context: &Context) -> Vec<FileReference> {
    context
        .entries
        .iter()
        .map(|scored| FileReference {
            project: scored.entry.project.clone(),
            filename: scored.entry.filename.clone(),
            title: scored.entry.header.subject().to_string(),
            branch: scored.entry.header.branch().to_string(),
            date: scored.entry.header.date().to_string(),
            relevance: scored.score,
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{EntryHeader, JournalEntry, ScoredEntry};

    fn scored_entry(project: &str, filename: &str, fields: Vec<(&str, &str)>, score: u32) -> ScoredEntry {
        ScoredEntry {
            entry: JournalEntry {
                project: project.to_string(),
                filename: filename.to_string(),
                header: EntryHeader::from_pairs(
                    fields
                        .into_iter()
                        .map(|(k, v)| (k.to_string(), v.to_string()))
                        .collect(),
                ),
                raw_content: String::new(),
                content_preview: String::new(),
            },
            score,
            is_error: false,
        }
    }

    #[test]
    fn test_references_follow_context_order() {
        let context = Context {
            entries: vec![
                scored_entry("Alpha", "a.md", vec![("commit_problem", "fix auth")], 17),
                scored_entry("Beta", "b.md", vec![("branch", "main")], 4),
            ],
            projects: vec!["Alpha".to_string(), "Beta".to_string()],
            branches: vec!["main".to_string()],
        };

        let refs = extract_file_references(&context);
        assert_eq!(refs.len(), 2);
        assert_eq!(refs[0].project, "Alpha");
        assert_eq!(refs[0].title, "fix auth");
        assert_eq!(refs[0].relevance, 17);
        assert_eq!(refs[1].project, "Beta");
        assert_eq!(refs[1].branch, "main");
    }

    #[test]
    fn test_missing_fields_get_placeholders() {
        let context = Context {
            entries: vec![scored_entry("Alpha", "a.md", vec![], 2)],
            projects: vec!["Alpha".to_string()],
            branches: vec![],
        };

        let refs = extract_file_references(&context);
        assert_eq!(refs[0].title, "untitled");
        assert_eq!(refs[0].branch, "N/A");
        assert_eq!(refs[0].date, "N/A");
    }

    #[test]
    fn test_empty_context_yields_no_references() {
        assert!(extract_file_references(&Context::default()).is_empty());
    }
}
