use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use std::time::Duration;
use tracing::{debug, error, info};

use super::{ChatOutcome, ChatProvider, LlmError};
use crate::processing::cascade;

const DEFAULT_ENDPOINT: &str = "https://openrouter.ai/api/v1/chat/completions";

#[derive(Debug, Serialize)]
struct ChatRequest<'a> {
    model: &'a str,
    messages: Vec<Message<'a>>,
}

#[derive(Debug, Serialize)]
struct Message<'a> {
    role: &'a str,
    content: &'a str,
}

#[derive(Debug, Deserialize)]
struct ChatResponse {
    choices: Vec<Choice>,
}

#[derive(Debug, Deserialize)]
struct Choice {
    message: ResponseMessage,
}

#[derive(Debug, Deserialize)]
struct ResponseMessage {
    content: Option<String>,
}

/// OpenRouter chat provider with an ordered model fallback cascade.
pub struct OpenRouterProvider {
    client: reqwest::Client,
    endpoint: String,
    api_key: String,
    models: Vec<String>,
    timeout_seconds: u64,
}

impl OpenRouterProvider {
    pub fn new(
        api_key: String,
        endpoint: Option<String>,
        models: Vec<String>,
        timeout_seconds: u64,
    ) -> Result<Self, anyhow::Error> {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(timeout_seconds))
            .build()?;
        let endpoint = endpoint.unwrap_or_else(|| DEFAULT_ENDPOINT.to_string());

        info!(
            "Initialized OpenRouter provider with {} model(s) in the fallback chain",
            models.len()
        );

        Ok(Self {
            client,
            endpoint,
            api_key,
            models,
            timeout_seconds,
        })
    }

    async fn attempt(
        &self,
        model: &str,
        system: Option<&str>,
        prompt: &str,
    ) -> Result<String, LlmError> {
        let mut messages = Vec::new();
        if let Some(system) = system {
            messages.push(Message {
                role: "system",
                content: system,
            });
        }
        messages.push(Message {
            role: "user",
            content: prompt,
        });

        let body = ChatRequest { model, messages };

        debug!("Sending OpenRouter request with model {}", model);

        let response = self
            .client
            .post(&self.endpoint)
            .bearer_auth(&self.api_key)
            .json(&body)
            .send()
            .await
            .map_err(|e| LlmError::from_reqwest(e, self.timeout_seconds))?;

        let status = response.status();
        let response_text = response
            .text()
            .await
            .map_err(|e| LlmError::Transport(e.to_string()))?;

        if !status.is_success() {
            error!(
                "OpenRouter request for {} failed with status {}: {}",
                model, status, response_text
            );
            return Err(LlmError::from_status(status, response_text));
        }

        let parsed: ChatResponse = serde_json::from_str(&response_text)
            .map_err(|e| LlmError::Transport(format!("invalid response body: {e}")))?;

        let content = parsed
            .choices
            .into_iter()
            .next()
            .and_then(|c| c.message.content)
            .map(|text| text.trim().to_string())
            .filter(|text| !text.is_empty())
            .ok_or(LlmError::EmptyResponse)?;

        debug!("OpenRouter response length: {}", content.len());

        Ok(content)
    }
}

#[async_trait]
impl ChatProvider for OpenRouterProvider {
    fn name(&self) -> &'static str {
        "OpenRouter"
    }

    async fn chat(&self, system: Option<&str>, prompt: &str) -> Result<ChatOutcome, LlmError> {
        cascade::run(&self.models, |model| async move {
            self.attempt(&model, system, prompt).await
        })
        .await
    }
}
