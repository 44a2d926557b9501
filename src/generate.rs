//! Completion-service client for the locally hosted language model.
//!
//! The model is treated as a black box behind [`CompletionService`]: one
//! prompt in, one completion out, with a bounded wait. The only concrete
//! implementation talks to Ollama's `/api/generate` endpoint over blocking
//! HTTP; tests substitute their own implementations.
//!
//! Failures are never retried here. Each failure mode maps to a distinct
//! [`GenerationError`] variant so callers can degrade with a specific,
//! human-readable message instead of an exception trace.

use std::time::Duration;
use thiserror::Error;

use crate::config::GenerationConfig;

/// Sampling knobs forwarded to the model.
#[derive(Debug, Clone, Copy)]
pub struct SamplingOptions {
    pub temperature: f64,
    pub num_predict: u32,
    pub top_k: u32,
    pub top_p: f64,
}

impl SamplingOptions {
    /// Settings for assistant answers: room to reason, moderate creativity.
    pub fn assistant() -> Self {
        Self {
            temperature: 0.6,
            num_predict: 2048,
            top_k: 40,
            top_p: 0.9,
        }
    }

    /// Settings for note rewriting: conservative, concise, literal.
    pub fn rewrite() -> Self {
        Self {
            temperature: 0.3,
            num_predict: 1024,
            top_k: 20,
            top_p: 0.8,
        }
    }
}

/// Failure modes of a completion call.
#[derive(Debug, Error)]
pub enum GenerationError {
    #[error("timed out waiting for the completion service")]
    Timeout,
    #[error("could not reach the completion service: {0}")]
    Transport(String),
    #[error("completion service returned HTTP {0}")]
    Http(u16),
    #[error("completion service returned an empty completion")]
    Empty,
}

impl GenerationError {
    /// The user-visible degradation message for this failure.
    ///
    /// Returned as the assistant's `response` payload; the assistant API
    /// itself still succeeds.
    pub fn user_message(&self) -> String {
        match self {
            GenerationError::Timeout => {
                "The language model timed out before answering. \
                 Try again, or ask a narrower question."
                    .to_string()
            }
            GenerationError::Transport(detail) => {
                format!(
                    "Could not reach the language model ({detail}). \
                     Is Ollama running? Start it with `ollama serve`."
                )
            }
            GenerationError::Http(status) => {
                format!("The language model returned HTTP {status}.")
            }
            GenerationError::Empty => {
                "The language model returned an empty answer. \
                 Try rephrasing the question."
                    .to_string()
            }
        }
    }
}

/// A synchronous, single-shot text-completion backend.
pub trait CompletionService {
    fn generate(
        &self,
        prompt: &str,
        options: &SamplingOptions,
        timeout: Duration,
    ) -> Result<String, GenerationError>;
}

/// Completion service backed by Ollama's generate endpoint.
pub struct OllamaClient {
    endpoint: String,
    model: String,
}

impl OllamaClient {
    pub fn new(config: &GenerationConfig) -> Self {
        Self {
            endpoint: config.endpoint.clone(),
            model: config.model.clone(),
        }
    }
}

impl CompletionService for OllamaClient {
    fn generate(
        &self,
        prompt: &str,
        options: &SamplingOptions,
        timeout: Duration,
    ) -> Result<String, GenerationError> {
        let client = reqwest::blocking::Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| GenerationError::Transport(e.to_string()))?;

        let body = serde_json::json!({
            "model": self.model,
            "prompt": prompt,
            "stream": false,
            "options": {
                "temperature": options.temperature,
                "num_predict": options.num_predict,
                "top_k": options.top_k,
                "top_p": options.top_p,
            },
        });

        let response = client
            .post(&self.endpoint)
            .json(&body)
            .send()
            .map_err(|e| {
                if e.is_timeout() {
                    GenerationError::Timeout
                } else {
                    GenerationError::Transport(e.to_string())
                }
            })?;

        let status = response.status();
        if !status.is_success() {
            return Err(GenerationError::Http(status.as_u16()));
        }

        let json: serde_json::Value = response
            .json()
            .map_err(|e| GenerationError::Transport(e.to_string()))?;

        let completion = json
            .get("response")
            .and_then(|r| r.as_str())
            .unwrap_or("")
            .trim()
            .to_string();

        if completion.is_empty() {
            return Err(GenerationError::Empty);
        }

        Ok(completion)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sampling_presets() {
        let ask = SamplingOptions::assistant();
        assert_eq!(ask.num_predict, 2048);
        assert!((ask.temperature - 0.6).abs() < 1e-9);

        let rewrite = SamplingOptions::rewrite();
        assert_eq!(rewrite.num_predict, 1024);
        assert!(rewrite.temperature < ask.temperature);
    }

    #[test]
    fn test_user_messages_are_distinct() {
        let errors = [
            GenerationError::Timeout,
            GenerationError::Transport("connection refused".to_string()),
            GenerationError::Http(500),
            GenerationError::Empty,
        ];
        let messages: Vec<String> = errors.iter().map(|e| e.user_message()).collect();
        for (i, a) in messages.iter().enumerate() {
            for b in messages.iter().skip(i + 1) {
                assert_ne!(a, b);
            }
        }
    }

    #[test]
    fn test_transport_message_mentions_ollama() {
        let msg = GenerationError::Transport("connection refused".to_string()).user_message();
        assert!(msg.contains("connection refused"));
        assert!(msg.contains("ollama serve"));
    }
}
