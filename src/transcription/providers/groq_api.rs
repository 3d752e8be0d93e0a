use anyhow::{bail, Context, Result};
use async_trait::async_trait;
use reqwest::multipart;
use serde::Deserialize;
use std::path::Path;
use std::time::Duration;
use tokio::fs;
use tracing::{debug, error, info};

use super::SttProvider;

const DEFAULT_ENDPOINT: &str = "https://api.groq.com/openai/v1/audio/transcriptions";

#[derive(Debug, Deserialize)]
struct TranscriptionResponse {
    text: String,
}

#[derive(Debug, Deserialize)]
struct ErrorResponse {
    error: ErrorDetail,
}

#[derive(Debug, Deserialize)]
struct ErrorDetail {
    message: String,
    r#type: Option<String>,
}

/// Provider for the Groq hosted Whisper API.
pub struct GroqProvider {
    client: reqwest::Client,
    endpoint: String,
    api_key: String,
    model: String,
}

impl GroqProvider {
    pub fn new(
        api_key: String,
        endpoint: Option<String>,
        model: String,
        timeout_seconds: u64,
    ) -> Result<Self> {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(timeout_seconds))
            .build()
            .context("Failed to build HTTP client")?;
        let endpoint = endpoint.unwrap_or_else(|| DEFAULT_ENDPOINT.to_string());

        info!(
            "Initialized Groq provider with endpoint: {} (model: {})",
            endpoint, model
        );

        Ok(Self {
            client,
            endpoint,
            api_key,
            model,
        })
    }
}

#[async_trait]
impl SttProvider for GroqProvider {
    fn name(&self) -> &'static str {
        "Groq Whisper API"
    }

    async fn transcribe(&self, audio_path: &Path, language: &str) -> Result<String> {
        info!("Transcribing audio file via Groq API: {:?}", audio_path);

        let bytes = fs::read(audio_path)
            .await
            .context("Failed to read audio file")?;
        debug!("Audio file size: {} bytes", bytes.len());

        let file_name = audio_path
            .file_name()
            .and_then(|n| n.to_str())
            .unwrap_or("audio.wav")
            .to_string();

        let form = multipart::Form::new()
            .part(
                "file",
                multipart::Part::bytes(bytes).file_name(file_name),
            )
            .text("model", self.model.clone())
            .text("language", language.to_string())
            .text("response_format", "json");

        let response = self
            .client
            .post(&self.endpoint)
            .bearer_auth(&self.api_key)
            .multipart(form)
            .send()
            .await
            .context("Failed to send request to Groq API")?;

        let status = response.status();
        let response_text = response
            .text()
            .await
            .context("Failed to read response body")?;

        if !status.is_success() {
            error!(
                "Groq API request failed with status {}: {}",
                status, response_text
            );

            if let Ok(error_response) = serde_json::from_str::<ErrorResponse>(&response_text) {
                bail!(
                    "Groq API error: {} (type: {:?})",
                    error_response.error.message,
                    error_response.error.r#type
                );
            }
            bail!("Groq API request failed with status {}", status);
        }

        let parsed: TranscriptionResponse = serde_json::from_str(&response_text)
            .context("Failed to parse transcription response")?;

        debug!(
            "Groq transcription successful, text length: {}",
            parsed.text.len()
        );

        Ok(parsed.text.trim().to_string())
    }
}
