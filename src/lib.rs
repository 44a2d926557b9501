//! # devlog
//!
//! A local-first development journal with a retrieval-augmented assistant.
//!
//! devlog captures free-text notes about work performed, persists them as
//! timestamped Markdown files organized by project and branch, and answers
//! questions about that history by assembling a relevance-ranked context
//! from the entries and handing it to a locally hosted language model.
//!
//! ## Architecture
//!
//! ```text
//! ┌──────────┐   ┌──────────────────────────┐   ┌───────────┐
//! │ Markdown │──▶│ keywords → score →       │──▶│  prompt    │
//! │ entries  │   │ context (rank+truncate)  │   │ templates │
//! └──────────┘   └──────────────────────────┘   └────┬──────┘
//!      ▲                                             ▼
//! ┌────┴─────┐                                  ┌──────────┐
//! │ compose  │                                  │  Ollama  │
//! │ (save)   │                                  │ generate │
//! └──────────┘                                  └──────────┘
//! ```
//!
//! Every question performs a fresh read-only scan of the store — there is
//! no index, no cache, and no shared mutable state, so concurrent
//! invocations are trivially safe at journal-sized corpora.
//!
//! ## Modules
//!
//! | Module | Purpose |
//! |--------|---------|
//! | [`config`] | TOML configuration parsing |
//! | [`models`] | Core data types and the mode enumeration |
//! | [`store`] | Entry store reader (projects, entries, frontmatter) |
//! | [`keywords`] | Keyword extraction from questions |
//! | [`score`] | Additive relevance scoring |
//! | [`context`] | Ranking, truncation, and metadata aggregation |
//! | [`prompt`] | Mode-specific instruction templates |
//! | [`generate`] | Completion-service trait and the Ollama client |
//! | [`references`] | Citation records for the UI layer |
//! | [`assistant`] | End-to-end question answering |
//! | [`compose`] | Entry creation and the optional AI rewrite |

pub mod assistant;
pub mod compose;
pub mod config;
pub mod context;
pub mod generate;
pub mod keywords;
pub mod models;
pub mod prompt;
pub mod references;
pub mod score;
pub mod store;
