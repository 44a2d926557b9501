//! Entry composition: turning raw notes into persisted journal entries.
//!
//! The write path mirrors what the reader expects: a frontmatter block,
//! a Markdown body, and a timestamp-derived filename with a slugged
//! branch suffix. Filenames have second resolution; a same-second save
//! overwrites (last write wins) rather than deduplicating.
//!
//! Notes can optionally pass through the language model for reformatting.
//! That call is best-effort: any failure falls back to the original notes
//! so saving never depends on Ollama being up.

use anyhow::{bail, Result};
use chrono::Local;
use std::path::PathBuf;
use std::time::Duration;

use crate::config::Config;
use crate::generate::{CompletionService, SamplingOptions};

/// Input for a new journal entry, straight from the form or CLI flags.
#[derive(Debug, Clone, Default)]
pub struct NewEntry {
    pub author: String,
    pub project: String,
    pub branch: String,
    pub subject: String,
    pub notes: String,
}

/// Persist a new entry, optionally rewriting the notes through the model.
///
/// Returns the path of the written file. The only hard failure modes are
/// empty notes and filesystem errors; rewrite failures degrade silently
/// to the original notes.
pub fn save_entry(
    config: &Config,
    completion: Option<&dyn CompletionService>,
    entry: &NewEntry,
) -> Result<PathBuf> {
    if entry.notes.trim().is_empty() {
        bail!("nothing to save: notes are empty");
    }

    let notes = match completion {
        Some(service) => rewrite_notes(
            service,
            entry,
            Duration::from_secs(config.generation.rewrite_timeout_secs),
        ),
        None => entry.notes.clone(),
    };

    let now = Local::now();
    let timestamp = now.format("%Y-%m-%d_%H-%M-%S").to_string();
    let date = now.format("%Y-%m-%d %H:%M:%S").to_string();

    let project = if entry.project.trim().is_empty() {
        "Unassigned"
    } else {
        entry.project.as_str()
    };

    let entries_dir = config.storage.root.join(project).join("entries");
    std::fs::create_dir_all(&entries_dir)?;

    let path = entries_dir.join(filename_for(&timestamp, &entry.branch));
    std::fs::write(&path, render_markdown(entry, &notes, &date))?;

    Ok(path)
}

/// Build the entry filename: `<timestamp>_<branch-slug>.md`.
pub fn filename_for(timestamp: &str, branch: &str) -> String {
    let slug = if branch.trim().is_empty() {
        "no-branch".to_string()
    } else {
        branch.replace(['/', '\\'], "-").replace(' ', "_")
    };
    format!("{timestamp}_{slug}.md")
}

/// Render the full Markdown document for an entry.
pub fn render_markdown(entry: &NewEntry, notes: &str, date: &str) -> String {
    let author = if entry.author.trim().is_empty() {
        "Anonymous"
    } else {
        entry.author.as_str()
    };
    let title = if entry.subject.trim().is_empty() {
        "Development entry"
    } else {
        entry.subject.as_str()
    };

    format!(
        "---\n\
         author: {author}\n\
         project: {project}\n\
         branch: {branch}\n\
         commit_problem: {subject}\n\
         date: {date}\n\
         ---\n\
         \n\
         # {title}\n\
         \n\
         {notes}\n\
         \n\
         ---\n\
         \n\
         ## Original notes\n\
         ```\n\
         {original}\n\
         ```\n\
         \n\
         ---\n\
         *Recorded by devlog on {date}*\n",
        project = entry.project,
        branch = entry.branch,
        subject = entry.subject,
        original = entry.notes,
    )
}

/// Reformat notes through the model, falling back to the original text.
pub fn rewrite_notes(
    completion: &dyn CompletionService,
    entry: &NewEntry,
    timeout: Duration,
) -> String {
    let prompt = rewrite_prompt(entry);

    match completion.generate(&prompt, &SamplingOptions::rewrite(), timeout) {
        Ok(text) => text,
        Err(e) => {
            eprintln!("Warning: note rewrite failed, keeping original notes: {}", e);
            entry.notes.clone()
        }
    }
}

fn rewrite_prompt(entry: &NewEntry) -> String {
    format!(
        "You are a technical assistant that reformats development notes.\n\
         \n\
         CONTEXT:\n\
         - Project: {}\n\
         - Branch: {}\n\
         - Commit/Problem: {}\n\
         \n\
         DEVELOPER'S NOTES:\n\
         {}\n\
         \n\
         STRICT INSTRUCTIONS:\n\
         1. Reformat the text using Markdown (## headings, - lists, ``` code blocks).\n\
         2. Organize into sections only IF the content supports it.\n\
         3. Do NOT invent technical details (file names, functions, errors).\n\
         4. Do NOT add code examples that are not in the notes.\n\
         5. Do NOT assume problems or solutions that are not mentioned.\n\
         6. If the notes are brief, keep the summary brief.\n\
         7. Be literal with the information given.\n\
         \n\
         Reply ONLY with the reformatted text, without introductions.\n\
         \n\
         SUMMARY:",
        entry.project, entry.branch, entry.subject, entry.notes
    )
}
