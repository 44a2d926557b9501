//! # devlog CLI
//!
//! The `devlog` binary is the primary interface for the journal. It
//! provides commands for initializing the storage root, saving entries,
//! browsing history, and asking the retrieval-augmented assistant.
//!
//! ## Usage
//!
//! ```bash
//! devlog --config ./devlog.toml <command>
//! ```
//!
//! ## Commands
//!
//! | Command | Description |
//! |---------|-------------|
//! | `devlog init` | Create the storage root and a starter config |
//! | `devlog save` | Save a journal entry (optionally AI-rewritten) |
//! | `devlog ask "<question>"` | Ask the assistant about past work |
//! | `devlog entries` | List entries, newest first |
//! | `devlog projects` | List projects |
//! | `devlog branches <project>` | List branches recorded for a project |
//! | `devlog show <project> <file>` | Print one entry |
//!
//! ## Examples
//!
//! ```bash
//! # Record what you just did, letting the model tidy the notes
//! devlog save --project Alpha --branch feature/login \
//!     --subject "fix oauth redirect" --notes "redirect URI was wrong"
//!
//! # Has anything like this happened before?
//! devlog ask "oauth redirect loops back to login" --project Alpha
//!
//! # Patterns across the whole journal
//! devlog ask "what keeps breaking" --mode analyze
//! ```

use anyhow::Result;
use clap::{Parser, Subcommand};
use std::path::PathBuf;

use devlog::assistant;
use devlog::compose::{self, NewEntry};
use devlog::config::{self, Config};
use devlog::generate::OllamaClient;
use devlog::models::Mode;
use devlog::store;

/// devlog — a local-first development journal with a retrieval-augmented
/// assistant.
///
/// All commands accept a `--config` flag pointing to a TOML configuration
/// file; when the file does not exist, built-in local defaults are used
/// (storage under `./journal`, Ollama on localhost).
#[derive(Parser)]
#[command(
    name = "devlog",
    about = "devlog — a local-first development journal with a retrieval-augmented assistant",
    version
)]
struct Cli {
    /// Path to configuration file (TOML).
    #[arg(long, global = true, default_value = "./devlog.toml")]
    config: PathBuf,

    #[command(subcommand)]
    command: Commands,
}

/// Top-level CLI commands.
#[derive(Subcommand)]
enum Commands {
    /// Create the storage root and write a starter config file.
    ///
    /// Idempotent: existing directories are kept and an existing config
    /// file is never overwritten.
    Init,

    /// Save a journal entry.
    ///
    /// By default the notes are reformatted by the configured model before
    /// saving; the original notes are always preserved verbatim in the
    /// entry body. If the model is unreachable the original notes are
    /// saved unchanged.
    Save {
        /// Project the work belongs to.
        #[arg(long)]
        project: String,

        /// Free-text notes describing the work performed.
        #[arg(long)]
        notes: String,

        /// Entry author.
        #[arg(long, default_value = "")]
        author: String,

        /// Git branch the work happened on.
        #[arg(long, default_value = "")]
        branch: String,

        /// Commit message or problem statement (doubles as the title).
        #[arg(long, default_value = "")]
        subject: String,

        /// Skip the AI rewrite and save the notes as-is.
        #[arg(long)]
        no_ai: bool,
    },

    /// Ask the assistant a question about past work.
    ///
    /// Scans every project's entries, ranks them for relevance, and sends
    /// the best matches as context to the model. A backend failure is
    /// reported in the answer text; it never aborts the command.
    Ask {
        /// The question to answer.
        question: String,

        /// Bias results toward this project (others are still searched).
        #[arg(long)]
        project: Option<String>,

        /// Answering strategy: `search`, `suggest`, `files`, or `analyze`.
        /// Unknown values behave like `search`.
        #[arg(long, default_value = "search")]
        mode: String,

        /// Print the reply as JSON instead of human-readable text.
        #[arg(long)]
        json: bool,
    },

    /// List journal entries, newest first.
    Entries {
        /// Only list entries of this project.
        #[arg(long)]
        project: Option<String>,
    },

    /// List projects in the journal.
    Projects,

    /// List branches recorded in a project's entries.
    Branches {
        /// Project name.
        project: String,
    },

    /// Print one entry.
    Show {
        /// Project name.
        project: String,
        /// Entry file name.
        filename: String,
        /// Print the raw file including frontmatter.
        #[arg(long)]
        raw: bool,
    },
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    if let Commands::Init = cli.command {
        return run_init(&cli.config);
    }

    let cfg = if cli.config.exists() {
        config::load_config(&cli.config)?
    } else {
        Config::default_local()
    };

    match cli.command {
        Commands::Init => unreachable!(),
        Commands::Save {
            project,
            notes,
            author,
            branch,
            subject,
            no_ai,
        } => {
            let entry = NewEntry {
                author,
                project,
                branch,
                subject,
                notes,
            };
            let client;
            let completion = if no_ai {
                None
            } else {
                client = OllamaClient::new(&cfg.generation);
                Some(&client as &dyn devlog::generate::CompletionService)
            };
            let path = compose::save_entry(&cfg, completion, &entry)?;
            println!("Entry saved: {}", path.display());
        }
        Commands::Ask {
            question,
            project,
            mode,
            json,
        } => {
            let client = OllamaClient::new(&cfg.generation);
            let reply = assistant::answer(
                &cfg,
                &client,
                &question,
                project.as_deref(),
                Mode::parse(&mode),
            )?;

            if json {
                println!("{}", serde_json::to_string_pretty(&reply)?);
            } else {
                println!("{}", reply.response);
                println!();
                println!("--- Context: {} entries ---", reply.context_used);
                for file_ref in &reply.referenced_files {
                    println!(
                        "[{:>3}] {}/{}  {} ({})",
                        file_ref.relevance,
                        file_ref.project,
                        file_ref.filename,
                        file_ref.title,
                        file_ref.date
                    );
                }
            }
        }
        Commands::Entries { project } => {
            let mut entries = store::load_entries(&cfg.storage.root, project.as_deref())?;
            store::sort_by_date_desc(&mut entries);

            if entries.is_empty() {
                println!("No entries found.");
                return Ok(());
            }

            for entry in &entries {
                println!(
                    "{}  {}/{}  [{}]  {}",
                    entry.header.date(),
                    entry.project,
                    entry.filename,
                    entry.header.branch(),
                    entry.header.subject()
                );
            }
            println!();
            println!("{} entries.", entries.len());
        }
        Commands::Projects => {
            let projects = store::list_projects(&cfg.storage.root)?;
            if projects.is_empty() {
                println!("No projects yet.");
            }
            for project in projects {
                println!("{}", project);
            }
        }
        Commands::Branches { project } => {
            for branch in store::list_branches(&cfg.storage.root, &project)? {
                println!("{}", branch);
            }
        }
        Commands::Show {
            project,
            filename,
            raw,
        } => {
            let entry = store::read_entry(&cfg.storage.root, &project, &filename)?;
            if raw {
                print!("{}", entry.raw_content);
            } else {
                println!("{}", store::strip_header(&entry.raw_content));
            }
        }
    }

    Ok(())
}

fn run_init(config_path: &PathBuf) -> Result<()> {
    let cfg = if config_path.exists() {
        config::load_config(config_path)?
    } else {
        std::fs::write(config_path, config::STARTER_CONFIG)?;
        println!("Wrote starter config: {}", config_path.display());
        Config::default_local()
    };

    std::fs::create_dir_all(&cfg.storage.root)?;
    println!("Journal initialized at {}", cfg.storage.root.display());
    Ok(())
}
