//! Configuration for model downloads and generated files

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

use crate::error::Result;

/// Environment variable read as the default hub token
pub const TOKEN_ENV_VAR: &str = "HUGGINGFACE_API_KEY";

/// Downloader and generator configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ModelsConfig {
    /// Root directory for downloaded models and generated info files
    #[serde(default = "default_models_dir")]
    pub models_dir: PathBuf,

    /// Base URL of the model hub
    #[serde(default = "default_hub_endpoint")]
    pub hub_endpoint: String,

    /// Repository revision to resolve files against
    #[serde(default = "default_revision")]
    pub revision: String,

    /// Per-request timeout in seconds
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,

    /// Directory prefixes probed when a declared file is not found by name
    #[serde(default = "default_alt_prefixes")]
    pub alt_prefixes: Vec<String>,

    /// Glob patterns skipped during snapshot downloads
    #[serde(default = "default_ignore_patterns")]
    pub ignore_patterns: Vec<String>,

    /// Draw a progress bar while downloading
    #[serde(default = "default_show_progress")]
    pub show_progress: bool,
}

impl Default for ModelsConfig {
    fn default() -> Self {
        Self {
            models_dir: default_models_dir(),
            hub_endpoint: default_hub_endpoint(),
            revision: default_revision(),
            timeout_secs: default_timeout_secs(),
            alt_prefixes: default_alt_prefixes(),
            ignore_patterns: default_ignore_patterns(),
            show_progress: default_show_progress(),
        }
    }
}

impl ModelsConfig {
    /// Load configuration from a TOML file; missing keys take their defaults
    pub fn from_file(path: &Path) -> Result<Self> {
        let raw = std::fs::read_to_string(path)?;
        Ok(toml::from_str(&raw)?)
    }

    /// Local directory for a model's files
    pub fn model_path(&self, name: &str) -> PathBuf {
        self.models_dir.join(name)
    }

    /// Directory holding the per-model config documents
    pub fn configs_dir(&self) -> PathBuf {
        self.models_dir.join("configs")
    }
}

fn default_models_dir() -> PathBuf {
    PathBuf::from("models").join("tts")
}

fn default_hub_endpoint() -> String {
    "https://huggingface.co".to_string()
}

fn default_revision() -> String {
    "main".to_string()
}

fn default_timeout_secs() -> u64 {
    3600
}

fn default_alt_prefixes() -> Vec<String> {
    ["model", "models", "checkpoints", "assets", "base"]
        .iter()
        .map(|p| p.to_string())
        .collect()
}

fn default_ignore_patterns() -> Vec<String> {
    ["*.md", "*.git*", "samples/*"]
        .iter()
        .map(|p| p.to_string())
        .collect()
}

fn default_show_progress() -> bool {
    true
}
