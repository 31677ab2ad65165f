//! Foodime Core - TTS model catalog and downloader
//!
//! This crate holds the static catalog of recommended text-to-speech models and
//! the tooling around it:
//! - human-readable listing of the catalog
//! - README and per-model config generation
//! - downloads from the HuggingFace hub, either as a repository snapshot or
//!   file by file with fallback directory prefixes
//!
//! # Example
//!
//! ```ignore
//! use foodime_core::{catalog, HfHubClient, ModelDownloader, ModelsConfig};
//!
//! let config = ModelsConfig::default();
//! let hub = HfHubClient::new(&config, "hf_...")?;
//! let downloader = ModelDownloader::new(hub, config)?;
//! let report = downloader.download_model(catalog::find("suno/bark-small").unwrap())?;
//! ```

pub mod catalog;
pub mod config;
pub mod error;
pub mod hub;
pub mod model;

pub use catalog::{FetchStrategy, ModelDescriptor};
pub use config::{ModelsConfig, TOKEN_ENV_VAR};
pub use error::{Error, Result};
pub use hub::{HfHubClient, HubClient};
pub use model::{create_model_info, DownloadReport, ModelDownloader, ProbeOutcome};
