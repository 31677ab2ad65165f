//! HTTP client for the service under test

use reqwest::{Client, Response, StatusCode};
use serde_json::Value;
use std::time::Duration;
use tracing::debug;

use crate::config::SmokeConfig;
use crate::error::{CheckFailure, Result};

pub const HEALTH_PATH: &str = "/health";
pub const VOICES_PATH: &str = "/api/tts/voices";
pub const VOICE_TEST_PATH: &str = "/api/tts/test";

/// Status and JSON body of one round trip. Bodies that are not JSON come back
/// as `Value::Null`.
#[derive(Debug, Clone)]
pub struct ApiResponse {
    pub status: StatusCode,
    pub body: Value,
}

impl ApiResponse {
    /// Top-level field of a JSON object body
    pub fn field(&self, name: &str) -> Option<&Value> {
        self.body.as_object().and_then(|obj| obj.get(name))
    }
}

pub struct ServiceClient {
    http: Client,
    base_url: String,
}

impl ServiceClient {
    pub fn new(config: &SmokeConfig) -> Result<Self> {
        let http = Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()
            .map_err(|e| {
                CheckFailure::ConfigError(format!("Failed to create HTTP client: {}", e))
            })?;

        Ok(Self {
            http,
            base_url: config.base_url.trim_end_matches('/').to_string(),
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    pub fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    /// `GET /health`
    pub async fn health(&self) -> Result<ApiResponse> {
        let sent = self.http.get(self.url(HEALTH_PATH)).send().await;
        self.finish(HEALTH_PATH, sent).await
    }

    /// `GET /api/tts/voices`, with the provider query parameter when given
    pub async fn voices(&self, provider: Option<&str>) -> Result<ApiResponse> {
        let mut request = self.http.get(self.url(VOICES_PATH));
        if let Some(provider) = provider {
            request = request.query(&[("provider", provider)]);
        }
        let sent = request.send().await;
        self.finish(VOICES_PATH, sent).await
    }

    /// `POST /api/tts/test` with a JSON body
    pub async fn test_voice(&self, body: &Value) -> Result<ApiResponse> {
        let sent = self
            .http
            .post(self.url(VOICE_TEST_PATH))
            .json(body)
            .send()
            .await;
        self.finish(VOICE_TEST_PATH, sent).await
    }

    async fn finish(
        &self,
        endpoint: &str,
        sent: std::result::Result<Response, reqwest::Error>,
    ) -> Result<ApiResponse> {
        let response = sent.map_err(|e| self.transport_error(endpoint, e))?;
        let status = response.status();
        let bytes = response
            .bytes()
            .await
            .map_err(|e| self.transport_error(endpoint, e))?;
        let body = serde_json::from_slice(&bytes).unwrap_or(Value::Null);

        debug!("{} -> {} {}", endpoint, status, body);
        Ok(ApiResponse { status, body })
    }

    fn transport_error(&self, endpoint: &str, e: reqwest::Error) -> CheckFailure {
        if e.is_connect() {
            CheckFailure::ServiceUnavailable {
                url: self.base_url.clone(),
            }
        } else {
            CheckFailure::Transport {
                endpoint: endpoint.to_string(),
                source: e,
            }
        }
    }
}
