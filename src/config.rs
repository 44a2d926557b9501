use anyhow::{Context as _, Result};
use serde::Deserialize;
use std::path::{Path, PathBuf};

#[derive(Debug, Deserialize, Clone)]
pub struct Config {
    #[serde(default)]
    pub storage: StorageConfig,
    #[serde(default)]
    pub generation: GenerationConfig,
}

#[derive(Debug, Deserialize, Clone)]
pub struct StorageConfig {
    /// Root directory holding `<project>/entries/*.md` trees.
    #[serde(default = "default_root")]
    pub root: PathBuf,
}

impl Default for StorageConfig {
    fn default() -> Self {
        Self {
            root: default_root(),
        }
    }
}

fn default_root() -> PathBuf {
    PathBuf::from("journal")
}

#[derive(Debug, Deserialize, Clone)]
pub struct GenerationConfig {
    /// Ollama generate endpoint.
    #[serde(default = "default_endpoint")]
    pub endpoint: String,
    #[serde(default = "default_model")]
    pub model: String,
    /// Timeout for assistant answers.
    #[serde(default = "default_ask_timeout_secs")]
    pub ask_timeout_secs: u64,
    /// Timeout for the note-rewrite call on save.
    #[serde(default = "default_rewrite_timeout_secs")]
    pub rewrite_timeout_secs: u64,
}

impl Default for GenerationConfig {
    fn default() -> Self {
        Self {
            endpoint: default_endpoint(),
            model: default_model(),
            ask_timeout_secs: default_ask_timeout_secs(),
            rewrite_timeout_secs: default_rewrite_timeout_secs(),
        }
    }
}

fn default_endpoint() -> String {
    "http://localhost:11434/api/generate".to_string()
}
fn default_model() -> String {
    "llama3.1:8b".to_string()
}
fn default_ask_timeout_secs() -> u64 {
    180
}
fn default_rewrite_timeout_secs() -> u64 {
    120
}

impl Config {
    /// All-defaults configuration for running without a config file.
    pub fn default_local() -> Self {
        Self {
            storage: StorageConfig::default(),
            generation: GenerationConfig::default(),
        }
    }
}

pub fn load_config(path: &Path) -> Result<Config> {
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read config file: {}", path.display()))?;

    let config: Config = toml::from_str(&content).with_context(|| "Failed to parse config file")?;

    if config.generation.endpoint.is_empty() {
        anyhow::bail!("generation.endpoint must not be empty");
    }

    if config.generation.model.is_empty() {
        anyhow::bail!("generation.model must not be empty");
    }

    if config.generation.ask_timeout_secs == 0 || config.generation.rewrite_timeout_secs == 0 {
        anyhow::bail!("generation timeouts must be > 0");
    }

    Ok(config)
}

/// Starter config written by `devlog init`.
pub const STARTER_CONFIG: &str = r#"[storage]
root = "journal"

[generation]
endpoint = "http://localhost:11434/api/generate"
model = "llama3.1:8b"
ask_timeout_secs = 180
rewrite_timeout_secs = 120
"#;
