//! Error types for the Foodime model tooling

use thiserror::Error;

#[derive(Error, Debug)]
pub enum Error {
    #[error("Model {0} not found in recommended models")]
    ModelNotFound(String),

    #[error("Download failed: {0}")]
    DownloadError(String),

    #[error("Configuration error: {0}")]
    ConfigError(String),

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("HTTP error: {0}")]
    HttpError(#[from] reqwest::Error),

    #[error("HuggingFace Hub error: {0}")]
    HfHubError(String),

    #[error("Serialization error: {0}")]
    SerializationError(#[from] toml::ser::Error),

    #[error("Config parse error: {0}")]
    ConfigParseError(#[from] toml::de::Error),
}

pub type Result<T> = std::result::Result<T, Error>;

impl From<glob::PatternError> for Error {
    fn from(e: glob::PatternError) -> Self {
        Error::ConfigError(format!("invalid ignore pattern: {}", e))
    }
}
