//! Read-only access to the journal's on-disk entry store.
//!
//! The store is a plain directory tree, `root/<project>/entries/<file>.md`,
//! where each file carries an optional `---`-delimited frontmatter block of
//! `key: value` lines followed by a free-text Markdown body. The reader
//! tolerates everything: a missing root yields zero projects, a project
//! without an entries directory yields zero entries, and an unreadable or
//! headerless file is skipped or parsed as header-free rather than failing
//! the scan.

use anyhow::{bail, Result};
use globset::{Glob, GlobSet, GlobSetBuilder};
use std::path::{Path, PathBuf};
use walkdir::WalkDir;

use crate::models::{EntryHeader, JournalEntry};

/// Characters of raw content kept as the display/context preview.
pub const PREVIEW_CHARS: usize = 800;

/// Marker delimiting the frontmatter block.
const HEADER_MARKER: &str = "---";

/// List project directories directly under the storage root, sorted.
///
/// A nonexistent root is "no projects yet", not an error.
pub fn list_projects(root: &Path) -> Result<Vec<String>> {
    if !root.exists() {
        return Ok(Vec::new());
    }

    let mut projects = Vec::new();
    for dir_entry in std::fs::read_dir(root)? {
        // One unreadable directory entry must not abort the listing.
        let dir_entry = match dir_entry {
            Ok(e) => e,
            Err(e) => {
                eprintln!("Warning: skipping unreadable path under {}: {}", root.display(), e);
                continue;
            }
        };
        let is_dir = match dir_entry.file_type() {
            Ok(t) => t.is_dir(),
            Err(e) => {
                eprintln!(
                    "Warning: skipping {}: {}",
                    dir_entry.path().display(),
                    e
                );
                continue;
            }
        };
        if is_dir {
            projects.push(dir_entry.file_name().to_string_lossy().to_string());
        }
    }

    projects.sort();
    Ok(projects)
}

/// Load every entry from the chosen projects, in deterministic order.
///
/// With a filter, only that project is scanned; otherwise all projects
/// under the root. Order is project name ascending, then file name
/// ascending — this is the discovery order the ranking ties break on.
pub fn load_entries(root: &Path, project_filter: Option<&str>) -> Result<Vec<JournalEntry>> {
    let projects = match project_filter {
        Some(name) => vec![name.to_string()],
        None => list_projects(root)?,
    };

    let md_glob = entry_glob()?;
    let mut entries = Vec::new();

    for project in &projects {
        let entries_dir = root.join(project).join("entries");
        if !entries_dir.exists() {
            continue;
        }

        let walker = WalkDir::new(&entries_dir)
            .max_depth(1)
            .sort_by_file_name();
        for dir_entry in walker {
            let dir_entry = match dir_entry {
                Ok(e) => e,
                Err(e) => {
                    eprintln!("Warning: skipping unreadable path: {}", e);
                    continue;
                }
            };
            if !dir_entry.file_type().is_file() {
                continue;
            }

            let filename = dir_entry.file_name().to_string_lossy().to_string();
            if !md_glob.is_match(&filename) {
                continue;
            }

            // A single corrupt or locked entry must not abort the scan.
            let raw_content = match std::fs::read_to_string(dir_entry.path()) {
                Ok(text) => text,
                Err(e) => {
                    eprintln!(
                        "Warning: skipping entry {}: {}",
                        dir_entry.path().display(),
                        e
                    );
                    continue;
                }
            };

            entries.push(build_entry(project, &filename, raw_content));
        }
    }

    Ok(entries)
}

/// Distinct branch names appearing in a project's entry headers, sorted.
pub fn list_branches(root: &Path, project: &str) -> Result<Vec<String>> {
    let entries = load_entries(root, Some(project))?;

    let mut branches: Vec<String> = Vec::new();
    for entry in &entries {
        if let Some(branch) = entry.header.branch_nonempty() {
            if branch.eq_ignore_ascii_case("none") {
                continue;
            }
            if !branches.iter().any(|b| b == branch) {
                branches.push(branch.to_string());
            }
        }
    }

    branches.sort();
    Ok(branches)
}

/// Read one entry file, returning the parsed entry.
pub fn read_entry(root: &Path, project: &str, filename: &str) -> Result<JournalEntry> {
    let path = entry_path(root, project, filename);
    if !path.exists() {
        bail!("entry not found: {}/{}", project, filename);
    }

    let raw_content = std::fs::read_to_string(&path)?;
    Ok(build_entry(project, filename, raw_content))
}

/// Path of an entry file inside the store.
pub fn entry_path(root: &Path, project: &str, filename: &str) -> PathBuf {
    root.join(project).join("entries").join(filename)
}

/// Sort entries by frontmatter date, most recent first.
///
/// Dates are `%Y-%m-%d %H:%M:%S` strings, so lexicographic order is
/// chronological; entries without a date sink to the end.
pub fn sort_by_date_desc(entries: &mut [JournalEntry]) {
    entries.sort_by(|a, b| {
        let da = a.header.get("date").unwrap_or("");
        let db = b.header.get("date").unwrap_or("");
        db.cmp(da)
    });
}

/// Parse the leading frontmatter block of an entry.
///
/// The block is delimited by `---` lines; each line inside is split on the
/// first colon only. Lines without a colon, or a file without the marker,
/// simply contribute nothing.
pub fn parse_header(content: &str) -> EntryHeader {
    if !content.starts_with(HEADER_MARKER) {
        return EntryHeader::default();
    }

    let mut parts = content.splitn(3, HEADER_MARKER);
    parts.next(); // leading empty segment before the first marker
    let block = match parts.next() {
        Some(block) => block,
        None => return EntryHeader::default(),
    };

    let mut fields = Vec::new();
    for line in block.lines() {
        if let Some((key, value)) = line.split_once(':') {
            fields.push((key.trim().to_string(), value.trim().to_string()));
        }
    }

    EntryHeader::from_pairs(fields)
}

/// Strip the frontmatter block, returning only the entry body.
pub fn strip_header(content: &str) -> &str {
    if !content.starts_with(HEADER_MARKER) {
        return content;
    }

    let parts: Vec<&str> = content.splitn(3, HEADER_MARKER).collect();
    if parts.len() >= 3 {
        parts[2].trim()
    } else {
        content
    }
}

/// First `n` characters of a string (not bytes — entries are UTF-8 text).
pub fn char_prefix(s: &str, n: usize) -> &str {
    match s.char_indices().nth(n) {
        Some((idx, _)) => &s[..idx],
        None => s,
    }
}

fn build_entry(project: &str, filename: &str, raw_content: String) -> JournalEntry {
    let header = parse_header(&raw_content);
    let content_preview = char_prefix(&raw_content, PREVIEW_CHARS).to_string();

    JournalEntry {
        project: project.to_string(),
        filename: filename.to_string(),
        header,
        raw_content,
        content_preview,
    }
}

fn entry_glob() -> Result<GlobSet> {
    let mut builder = GlobSetBuilder::new();
    builder.add(Glob::new("*.md")?);
    Ok(builder.build()?)
}
