//! Assistant orchestration: question in, answer plus citations out.
//!
//! One invocation is a full pipeline run: validate the question, rescan
//! and score the store, assemble the bounded context, render the mode's
//! template, and make one blocking completion call. Backend failures are
//! absorbed into the reply as clearly-marked degradation messages — the
//! assistant surface itself only errors on invalid requests.

use anyhow::{bail, Result};
use std::time::Duration;

use crate::config::Config;
use crate::context::build_context;
use crate::generate::{CompletionService, SamplingOptions};
use crate::models::{AssistantReply, Mode};
use crate::prompt::render_prompt;
use crate::references::extract_file_references;

/// Answer a question against the journal history.
///
/// `project` biases scoring toward the caller's current project without
/// excluding others. Returns an error only for an empty question or an
/// unreadable storage root; completion-service failures come back as the
/// reply's `response` text.
pub fn answer(
    config: &Config,
    completion: &dyn CompletionService,
    question: &str,
    project: Option<&str>,
    mode: Mode,
) -> Result<AssistantReply> {
    if question.trim().is_empty() {
        bail!("question must not be empty");
    }

    let context = build_context(&config.storage.root, question, project, mode)?;
    let referenced_files = extract_file_references(&context);
    let context_used = context.entries.len();

    let prompt = render_prompt(question, &context, mode);

    let response = match completion.generate(
        &prompt,
        &SamplingOptions::assistant(),
        Duration::from_secs(config.generation.ask_timeout_secs),
    ) {
        Ok(text) => text,
        Err(e) => {
            eprintln!("Warning: completion failed: {}", e);
            e.user_message()
        }
    };

    Ok(AssistantReply {
        response,
        context_used,
        referenced_files,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::generate::GenerationError;
    use std::cell::RefCell;
    use std::fs;
    use tempfile::TempDir;

    /// Completion stub that records the prompt it was given.
    struct RecordingService {
        reply: Result<String, GenerationError>,
        seen_prompt: RefCell<Option<String>>,
    }

    impl RecordingService {
        fn replying(text: &str) -> Self {
            Self {
                reply: Ok(text.to_string()),
                seen_prompt: RefCell::new(None),
            }
        }

        fn failing(error: GenerationError) -> Self {
            Self {
                reply: Err(error),
                seen_prompt: RefCell::new(None),
            }
        }
    }

    impl CompletionService for RecordingService {
        fn generate(
            &self,
            prompt: &str,
            _options: &SamplingOptions,
            _timeout: Duration,
        ) -> Result<String, GenerationError> {
            *self.seen_prompt.borrow_mut() = Some(prompt.to_string());
            match &self.reply {
                Ok(text) => Ok(text.clone()),
                Err(GenerationError::Timeout) => Err(GenerationError::Timeout),
                Err(GenerationError::Empty) => Err(GenerationError::Empty),
                Err(GenerationError::Http(s)) => Err(GenerationError::Http(*s)),
                Err(GenerationError::Transport(d)) => {
                    Err(GenerationError::Transport(d.clone()))
                }
            }
        }
    }

    fn config_rooted_at(root: &std::path::Path) -> Config {
        let mut config = Config::default_local();
        config.storage.root = root.to_path_buf();
        config
    }

    fn write_entry(root: &std::path::Path, project: &str, filename: &str, content: &str) {
        let dir = root.join(project).join("entries");
        fs::create_dir_all(&dir).unwrap();
        fs::write(dir.join(filename), content).unwrap();
    }

    #[test]
    fn test_empty_question_rejected_before_scanning() {
        let config = config_rooted_at(std::path::Path::new("/nonexistent"));
        let service = RecordingService::replying("unused");

        let err = answer(&config, &service, "   ", None, Mode::Search).unwrap_err();
        assert!(err.to_string().contains("question must not be empty"));
        assert!(service.seen_prompt.borrow().is_none());
    }

    #[test]
    fn test_scenario_parser_crash_in_alpha() {
        let tmp = TempDir::new().unwrap();
        write_entry(
            tmp.path(),
            "Alpha",
            "2025-03-01_10-00-00.md",
            "---\nbranch: main\ncommit_problem: npe fix\ndate: 2025-03-01 10:00:00\n---\nNullPointerException in parser",
        );
        let config = config_rooted_at(tmp.path());
        let service = RecordingService::replying("See [Alpha/2025-03-01_10-00-00.md].");

        let reply = answer(&config, &service, "parser crash", Some("Alpha"), Mode::Search).unwrap();

        assert_eq!(reply.context_used, 1);
        assert_eq!(reply.referenced_files.len(), 1);
        assert_eq!(reply.referenced_files[0].project, "Alpha");
        assert_eq!(reply.referenced_files[0].relevance, 17);
        assert_eq!(reply.response, "See [Alpha/2025-03-01_10-00-00.md].");

        let prompt = service.seen_prompt.borrow().clone().unwrap();
        assert!(prompt.contains("parser crash"));
        assert!(prompt.contains("2025-03-01_10-00-00.md"));
    }

    #[test]
    fn test_all_stop_word_question_surfaces_no_context() {
        let tmp = TempDir::new().unwrap();
        write_entry(tmp.path(), "Alpha", "a.md", "routine refactoring notes");
        let config = config_rooted_at(tmp.path());
        let service = RecordingService::replying("This looks like a new situation.");

        let reply = answer(&config, &service, "a an the of", None, Mode::Search).unwrap();

        assert_eq!(reply.context_used, 0);
        assert!(reply.referenced_files.is_empty());
        let prompt = service.seen_prompt.borrow().clone().unwrap();
        assert!(prompt.contains("No relevant history was found across any project"));
    }

    #[test]
    fn test_empty_corpus_still_answers() {
        let tmp = TempDir::new().unwrap();
        let config = config_rooted_at(tmp.path());
        let service = RecordingService::replying("Nothing documented yet.");

        let reply = answer(&config, &service, "database migration", None, Mode::Analyze).unwrap();
        assert_eq!(reply.context_used, 0);
    }

    #[test]
    fn test_backend_failure_becomes_degradation_message() {
        let tmp = TempDir::new().unwrap();
        write_entry(tmp.path(), "Alpha", "a.md", "websocket timeout bug");
        let config = config_rooted_at(tmp.path());

        let service =
            RecordingService::failing(GenerationError::Transport("connection refused".into()));
        let reply = answer(&config, &service, "websocket timeout", None, Mode::Search).unwrap();

        // The call succeeds; the failure is in the response text, and the
        // context statistics are still real.
        assert_eq!(reply.context_used, 1);
        assert!(reply.response.contains("connection refused"));
        assert!(reply.response.contains("ollama serve"));
    }

    #[test]
    fn test_timeout_and_empty_have_distinct_messages() {
        let tmp = TempDir::new().unwrap();
        let config = config_rooted_at(tmp.path());

        let timed_out = RecordingService::failing(GenerationError::Timeout);
        let timeout_reply = answer(&config, &timed_out, "anything", None, Mode::Search).unwrap();

        let empty = RecordingService::failing(GenerationError::Empty);
        let empty_reply = answer(&config, &empty, "anything", None, Mode::Search).unwrap();

        assert_ne!(timeout_reply.response, empty_reply.response);
        assert!(timeout_reply.response.contains("timed out"));
        assert!(empty_reply.response.contains("empty answer"));
    }

    #[test]
    fn test_unknown_mode_string_behaves_like_search() {
        let tmp = TempDir::new().unwrap();
        write_entry(tmp.path(), "Alpha", "a.md", "a crash in the importer");
        let config = config_rooted_at(tmp.path());
        let service = RecordingService::replying("answer");

        let reply = answer(
            &config,
            &service,
            "importer crash",
            None,
            Mode::parse("definitely-not-a-mode"),
        )
        .unwrap();

        assert_eq!(reply.context_used, 1);
        let prompt = service.seen_prompt.borrow().clone().unwrap();
        assert!(prompt.contains("SIMILAR or RELATED"));
    }
}
