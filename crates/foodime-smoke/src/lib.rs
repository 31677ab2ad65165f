//! Foodime Smoke - availability and error-response checks for the TTS service
//!
//! The checks talk to a separately running Foodime AI service over HTTP:
//! `GET /health`, `GET /api/tts/voices` and `POST /api/tts/test`.
//!
//! # Example
//!
//! ```ignore
//! use foodime_smoke::{checks, ServiceClient, SmokeConfig};
//!
//! let config = SmokeConfig::from_env();
//! let client = ServiceClient::new(&config)?;
//! checks::check_health(&client).await?;
//! ```

pub mod checks;
pub mod client;
pub mod config;
pub mod error;

pub use checks::{CheckReport, VoiceTestOutcome};
pub use client::{ApiResponse, ServiceClient};
pub use config::{SmokeConfig, BASE_URL_ENV_VAR};
pub use error::{CheckFailure, Result};
