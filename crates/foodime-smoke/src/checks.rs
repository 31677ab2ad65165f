//! The service checks
//!
//! Each check is a short linear sequence of round trips. A provider-side
//! failure on the voice test (500 with an `error` field) is an accepted
//! outcome, not a failed check.

use serde_json::{json, Value};
use tracing::{error, info};

use crate::client::{ApiResponse, ServiceClient, HEALTH_PATH, VOICES_PATH, VOICE_TEST_PATH};
use crate::config::SmokeConfig;
use crate::error::{CheckFailure, Result};

/// How the voice test round trip ended
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum VoiceTestOutcome {
    /// 200 with a `success` field
    Succeeded,
    /// 500 with an `error` field, reported by the TTS provider
    ProviderFailed,
    /// The provider listed no voices, so nothing was submitted
    NoVoices,
}

/// Result of one named check, as reported by [`run_all`]
#[derive(Debug)]
pub struct CheckReport {
    pub name: &'static str,
    pub result: Result<String>,
}

impl CheckReport {
    pub fn passed(&self) -> bool {
        self.result.is_ok()
    }
}

fn expect_status(endpoint: &str, response: &ApiResponse, expected: u16) -> Result<()> {
    if response.status.as_u16() != expected {
        return Err(CheckFailure::unexpected_status(
            endpoint,
            expected.to_string(),
            response.status.as_u16(),
        ));
    }
    Ok(())
}

fn voice_list(endpoint: &str, response: &ApiResponse) -> Result<Vec<Value>> {
    match response.field("voices") {
        Some(Value::Array(voices)) => Ok(voices.clone()),
        Some(other) => Err(CheckFailure::malformed(
            endpoint,
            format!("\"voices\" is not a list: {}", other),
        )),
        None => Err(CheckFailure::malformed(endpoint, "missing \"voices\" field")),
    }
}

/// `GET /health` answers 200 with `status == "ok"`
pub async fn check_health(client: &ServiceClient) -> Result<()> {
    let response = client.health().await?;
    expect_status(HEALTH_PATH, &response, 200)?;

    match response.field("status").and_then(Value::as_str) {
        Some("ok") => Ok(()),
        other => Err(CheckFailure::malformed(
            HEALTH_PATH,
            format!("expected status \"ok\", got {:?}", other),
        )),
    }
}

/// Every provider answers 200 with a list-typed `voices` field
pub async fn check_voice_listing(client: &ServiceClient, providers: &[String]) -> Result<()> {
    for provider in providers {
        let response = client.voices(Some(provider.as_str())).await?;
        expect_status(VOICES_PATH, &response, 200)?;
        voice_list(VOICES_PATH, &response)?;
    }
    Ok(())
}

/// Submit the provider's first voice with sample text to the test endpoint
pub async fn check_voice_test(
    client: &ServiceClient,
    provider: &str,
    text: &str,
) -> Result<VoiceTestOutcome> {
    let response = client.voices(Some(provider)).await?;
    expect_status(VOICES_PATH, &response, 200)?;
    let voices = voice_list(VOICES_PATH, &response)?;

    let Some(voice) = voices.into_iter().next() else {
        return Ok(VoiceTestOutcome::NoVoices);
    };

    let payload = json!({
        "provider": provider,
        "voiceId": voice,
        "text": text,
    });
    let response = client.test_voice(&payload).await?;

    match response.status.as_u16() {
        200 if response.field("success").is_some() => Ok(VoiceTestOutcome::Succeeded),
        200 => Err(CheckFailure::malformed(
            VOICE_TEST_PATH,
            "200 response without \"success\" field",
        )),
        500 if response.field("error").is_some() => Ok(VoiceTestOutcome::ProviderFailed),
        500 => Err(CheckFailure::malformed(
            VOICE_TEST_PATH,
            "500 response without \"error\" field",
        )),
        actual => Err(CheckFailure::unexpected_status(
            VOICE_TEST_PATH,
            "200 or 500",
            actual,
        )),
    }
}

/// Missing parameters are rejected with 500 on both API endpoints
pub async fn check_error_handling(client: &ServiceClient) -> Result<()> {
    let response = client.voices(None).await?;
    expect_status(VOICES_PATH, &response, 500)?;

    let response = client.test_voice(&json!({})).await?;
    expect_status(VOICE_TEST_PATH, &response, 500)?;
    Ok(())
}

/// Run the four checks in order, logging each result
pub async fn run_all(client: &ServiceClient, config: &SmokeConfig) -> Vec<CheckReport> {
    let reports = vec![
        CheckReport {
            name: "service availability",
            result: check_health(client).await.map(|()| "ok".to_string()),
        },
        CheckReport {
            name: "voice listing",
            result: check_voice_listing(client, &config.providers)
                .await
                .map(|()| format!("{} providers", config.providers.len())),
        },
        CheckReport {
            name: "voice test",
            result: check_voice_test(client, &config.test_provider, &config.sample_text)
                .await
                .map(|outcome| format!("{:?}", outcome)),
        },
        CheckReport {
            name: "error handling",
            result: check_error_handling(client).await.map(|()| "ok".to_string()),
        },
    ];

    for report in &reports {
        match &report.result {
            Ok(detail) => info!("PASS {} ({})", report.name, detail),
            Err(e) => error!("FAIL {}: {}", report.name, e),
        }
    }
    reports
}
