//! Instruction templates for the assistant's completion calls.
//!
//! Each [`Mode`] renders a distinct template embedding the literal question
//! and a block describing every retained context entry. When the context is
//! empty the block is replaced with an explicit no-history notice so the
//! model cannot infer precedent that does not exist.

use crate::models::{Context, Mode};
use crate::store::char_prefix;

/// Characters of each entry's preview included in the prompt.
const EXCERPT_CHARS: usize = 600;

/// Render the full prompt for one assistant invocation.
pub fn render_prompt(question: &str, context: &Context, mode: Mode) -> String {
    let context_block = render_context_block(context);

    match mode {
        Mode::Search => search_prompt(question, &context_block),
        Mode::Suggest => suggest_prompt(question, &context_block),
        Mode::Files => files_prompt(question, &context_block),
        Mode::Analyze => analyze_prompt(question, &context_block),
    }
}

/// Render the shared history block embedded in every template.
pub fn render_context_block(context: &Context) -> String {
    if context.entries.is_empty() {
        return "No relevant history was found across any project. Do not invent precedent; \
                treat this as a new, undocumented situation.\n"
            .to_string();
    }

    let branches = if context.branches.is_empty() {
        "N/A".to_string()
    } else {
        context.branches.join(", ")
    };

    let mut block = format!(
        "**RELEVANT HISTORY ({} entries found):**\nProjects: {}\nBranches: {}\n\n",
        context.entries.len(),
        context.projects.join(", "),
        branches
    );

    for (i, scored) in context.entries.iter().enumerate() {
        let entry = &scored.entry;
        block.push_str(&format!(
            "**=== Entry {} ===**\n\
             Project: `{}`\n\
             Branch: `{}`\n\
             Problem: {}\n\
             Date: {}\n\
             File: `{}`\n\
             Content:\n{}...\n\n",
            i + 1,
            entry.project,
            entry.header.branch(),
            entry.header.subject(),
            entry.header.date(),
            entry.filename,
            char_prefix(&entry.content_preview, EXCERPT_CHARS)
        ));
    }

    block
}

fn search_prompt(question: &str, context_block: &str) -> String {
    format!(
        "You are a technical assistant that helps a developer search their work journal.\n\
         \n\
         **DEVELOPER'S QUESTION:**\n\
         \"{question}\"\n\
         \n\
         {context_block}\
         \n\
         **INSTRUCTIONS:**\n\
         1. Look through the history for SIMILAR or RELATED problems.\n\
         2. If you find something similar:\n\
            - Name the project and file explicitly, as `[Project/file.md]`.\n\
            - Explain what was done on that occasion.\n\
            - Say whether the situation is identical or only similar.\n\
         3. If nothing similar exists, state clearly that this is a NEW problem\n\
            and suggest documenting the eventual solution.\n\
         4. Always cite referenced entries as `[Project/file]`.\n\
         \n\
         **FORMAT:**\n\
         Markdown prose with headings, inline code, and quotes for key conclusions.\n\
         \n\
         **ANSWER:**"
    )
}

fn suggest_prompt(question: &str, context_block: &str) -> String {
    format!(
        "You are a technical assistant that proposes solutions based on a developer's \
         prior experience.\n\
         \n\
         **DEVELOPER'S PROBLEM:**\n\
         \"{question}\"\n\
         \n\
         {context_block}\
         \n\
         **INSTRUCTIONS:**\n\
         1. Analyze the history and suggest CONCRETE solutions.\n\
         2. If similar entries exist, explain what worked before and adapt it to the\n\
            current situation, citing the specific entries.\n\
         3. If there is no precedent, give general but actionable suggestions and ask\n\
            for missing details if needed.\n\
         4. Point at files or areas of the codebase likely involved.\n\
         5. Always cite history entries as `[Project/file]`.\n\
         \n\
         **FORMAT:**\n\
         Markdown with clear sections, numbered steps where appropriate, and code\n\
         blocks for anything runnable.\n\
         \n\
         **ANSWER:**"
    )
}

fn files_prompt(question: &str, context_block: &str) -> String {
    format!(
        "You are an assistant that identifies files related to a developer's query.\n\
         \n\
         **DEVELOPER'S QUERY:**\n\
         \"{question}\"\n\
         \n\
         {context_block}\
         \n\
         **INSTRUCTIONS:**\n\
         1. Identify EVERY history entry related to the query.\n\
         2. For each one give its `[Project/file]` reference, why it is relevant,\n\
            and what information it contains.\n\
         3. Additionally suggest source files likely involved, even if they do not\n\
            appear in the history.\n\
         4. Order everything by relevance.\n\
         \n\
         **FORMAT:**\n\
         ## Journal entries\n\
         - referenced entries with a one-line description each\n\
         \n\
         ## Suggested source files\n\
         - probable code files to inspect, with reasoning\n\
         \n\
         **ANSWER:**"
    )
}

fn analyze_prompt(question: &str, context_block: &str) -> String {
    format!(
        "You are an assistant that analyzes patterns in a development journal.\n\
         \n\
         **DEVELOPER'S QUERY:**\n\
         \"{question}\"\n\
         \n\
         {context_block}\
         \n\
         **INSTRUCTIONS:**\n\
         1. Analyze the full history provided above.\n\
         2. Identify recurring errors, problematic areas, patterns across branches\n\
            and projects, and temporal trends.\n\
         3. Give ACTIONABLE insights, not generic advice.\n\
         4. Cite the entries where problems repeat as `[Project/file]`.\n\
         \n\
         **FORMAT:**\n\
         ## Pattern analysis\n\
         - key statistics and conclusions\n\
         \n\
         ## Recurring problems\n\
         - list with observed frequency\n\
         \n\
         ## Recommendations\n\
         - concrete follow-up actions\n\
         \n\
         **ANSWER:**"
    )
}
