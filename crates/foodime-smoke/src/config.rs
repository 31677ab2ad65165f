//! Smoke check configuration

/// Environment variable overriding the service base URL
pub const BASE_URL_ENV_VAR: &str = "FOODIME_AI_URL";

#[derive(Debug, Clone)]
pub struct SmokeConfig {
    /// Base URL of the service under test
    pub base_url: String,

    /// Providers whose voice listing must succeed
    pub providers: Vec<String>,

    /// Provider used for the voice test round trip
    pub test_provider: String,

    pub sample_text: String,

    /// Per-request timeout in seconds
    pub timeout_secs: u64,
}

impl Default for SmokeConfig {
    fn default() -> Self {
        Self {
            base_url: "http://localhost:3050".to_string(),
            providers: vec!["elevenlabs".to_string(), "google".to_string()],
            test_provider: "google".to_string(),
            sample_text: "Hello, this is a test.".to_string(),
            timeout_secs: 30,
        }
    }
}

impl SmokeConfig {
    /// Defaults, with the base URL taken from the environment when set
    pub fn from_env() -> Self {
        Self::with_env_url(std::env::var(BASE_URL_ENV_VAR).ok())
    }

    /// Point the checks at another service instance
    pub fn with_base_url(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
            ..Default::default()
        }
    }

    fn with_env_url(url: Option<String>) -> Self {
        match url {
            Some(url) if !url.trim().is_empty() => Self::with_base_url(url),
            _ => Self::default(),
        }
    }
}
