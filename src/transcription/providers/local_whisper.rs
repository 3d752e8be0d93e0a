use anyhow::{bail, Context, Result};
use async_trait::async_trait;
use base64::{engine::general_purpose::STANDARD as BASE64, Engine};
use serde::{Deserialize, Serialize};
use std::path::Path;
use std::time::Duration;
use tokio::fs;
use tracing::{debug, error, info};

use super::SttProvider;

const DEFAULT_BASE_URL: &str = "http://localhost:8384";
const HEALTH_TIMEOUT_SECS: u64 = 5;

#[derive(Debug, Serialize)]
struct TranscriptionPayload {
    content: String, // base64 audio
    language: String,
    timestamps: bool,
}

#[derive(Debug, Deserialize)]
struct TranscriptionResponse {
    result: TranscriptionResult,
}

#[derive(Debug, Deserialize)]
struct TranscriptionResult {
    text: String,
}

#[derive(Debug, Deserialize)]
struct ErrorResponse {
    error: ErrorDetail,
}

#[derive(Debug, Deserialize)]
struct ErrorDetail {
    message: String,
}

/// Provider for a locally running whisper HTTP service.
pub struct LocalWhisperProvider {
    client: reqwest::Client,
    base_url: String,
}

impl LocalWhisperProvider {
    pub fn new(endpoint: Option<String>, timeout_seconds: u64) -> Result<Self> {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(timeout_seconds))
            .build()
            .context("Failed to build HTTP client")?;
        let base_url = endpoint.unwrap_or_else(|| DEFAULT_BASE_URL.to_string());

        info!(
            "Initialized local whisper provider with base URL: {}",
            base_url
        );

        Ok(Self { client, base_url })
    }

    /// Connectivity check before shipping a potentially large payload.
    async fn check_health(&self) -> Result<()> {
        let health_url = format!("{}/health", self.base_url.trim_end_matches('/'));
        debug!("Checking local whisper service health: {}", health_url);

        let response = self
            .client
            .get(&health_url)
            .timeout(Duration::from_secs(HEALTH_TIMEOUT_SECS))
            .send()
            .await
            .context("Local whisper service is not reachable")?;

        if !response.status().is_success() {
            bail!(
                "Local whisper service health check failed with status {}",
                response.status()
            );
        }

        Ok(())
    }
}

#[async_trait]
impl SttProvider for LocalWhisperProvider {
    fn name(&self) -> &'static str {
        "Local Whisper"
    }

    async fn transcribe(&self, audio_path: &Path, language: &str) -> Result<String> {
        self.check_health().await?;

        info!("Transcribing audio file via local whisper: {:?}", audio_path);

        let bytes = fs::read(audio_path)
            .await
            .context("Failed to read audio file")?;
        debug!("Audio file size: {} bytes", bytes.len());

        let body = TranscriptionPayload {
            content: BASE64.encode(&bytes),
            language: language.to_string(),
            timestamps: false,
        };

        let url = format!(
            "{}/v1/transcriptions",
            self.base_url.trim_end_matches('/')
        );
        let response = self
            .client
            .post(&url)
            .json(&body)
            .send()
            .await
            .context("Failed to send request to local whisper service")?;

        let status = response.status();
        let response_text = response
            .text()
            .await
            .context("Failed to read response body")?;

        if !status.is_success() {
            error!(
                "Local whisper request failed with status {}: {}",
                status, response_text
            );

            if let Ok(error_response) = serde_json::from_str::<ErrorResponse>(&response_text) {
                bail!("Local whisper error: {}", error_response.error.message);
            }
            bail!("Local whisper request failed with status {}", status);
        }

        let parsed: TranscriptionResponse = serde_json::from_str(&response_text)
            .context("Failed to parse transcription response")?;

        debug!(
            "Transcription successful, text length: {}",
            parsed.result.text.len()
        );

        Ok(parsed.result.text.trim().to_string())
    }
}
