//! Context assembly: from a question to a bounded, ranked set of entries.
//!
//! Every invocation rescans the store from disk — at journal scale
//! (hundreds of entries) this is cheap, and it keeps results consistent
//! with whatever is on disk right now, with no index to invalidate.

use anyhow::Result;
use std::path::Path;

use crate::keywords::extract_keywords;
use crate::models::{Context, Mode, ScoredEntry};
use crate::score::score_entry;
use crate::store;

/// Scan the whole store and assemble the context for one question.
///
/// All projects are scanned regardless of the filter; the filter biases
/// scoring toward the caller's current project without excluding
/// cross-project history.
pub fn build_context(
    root: &Path,
    question: &str,
    project_filter: Option<&str>,
    mode: Mode,
) -> Result<Context> {
    let keywords = extract_keywords(question);
    let entries = store::load_entries(root, None)?;

    let mut pool = Vec::new();
    for entry in entries {
        let (score, is_error) = score_entry(
            &entry.raw_content,
            &entry.project,
            &keywords,
            project_filter,
            mode,
        );

        // Hard inclusion gate: zero-score entries never enter the pool.
        if score > 0 {
            pool.push(ScoredEntry {
                entry,
                score,
                is_error,
            });
        }
    }

    Ok(assemble(pool, mode))
}

/// Rank the candidate pool and truncate to the mode's cap.
///
/// The sort is stable, so equal-score entries keep their discovery order.
/// Project and branch aggregates cover the retained entries only — the
/// metadata describes what was actually surfaced to the model.
pub fn assemble(mut pool: Vec<ScoredEntry>, mode: Mode) -> Context {
    pool.sort_by(|a, b| b.score.cmp(&a.score));
    pool.truncate(mode.context_limit());

    let mut projects: Vec<String> = Vec::new();
    let mut branches: Vec<String> = Vec::new();

    for scored in &pool {
        if !projects.iter().any(|p| p == &scored.entry.project) {
            projects.push(scored.entry.project.clone());
        }
        if let Some(branch) = scored.entry.header.branch_nonempty() {
            if !branches.iter().any(|b| b == branch) {
                branches.push(branch.to_string());
            }
        }
    }

    Context {
        entries: pool,
        projects,
        branches,
    }
}
