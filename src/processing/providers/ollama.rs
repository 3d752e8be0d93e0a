use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use std::time::Duration;
use tracing::{debug, error, info};

use super::{ChatOutcome, ChatProvider, LlmError};

const DEFAULT_ENDPOINT: &str = "http://localhost:11434/api/chat";
const DEFAULT_MODEL: &str = "llama3";

#[derive(Debug, Serialize)]
struct ChatRequest<'a> {
    model: &'a str,
    messages: Vec<Message<'a>>,
    stream: bool,
}

#[derive(Debug, Serialize)]
struct Message<'a> {
    role: &'a str,
    content: &'a str,
}

#[derive(Debug, Deserialize)]
struct ChatResponse {
    message: ResponseMessage,
}

#[derive(Debug, Deserialize)]
struct ResponseMessage {
    content: String,
}

/// Local Ollama chat provider. Single model, long timeout.
pub struct OllamaProvider {
    client: reqwest::Client,
    endpoint: String,
    model: String,
    timeout_seconds: u64,
}

impl OllamaProvider {
    pub fn new(
        endpoint: Option<String>,
        model: Option<String>,
        timeout_seconds: u64,
    ) -> Result<Self, anyhow::Error> {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(timeout_seconds))
            .build()?;
        let endpoint = endpoint.unwrap_or_else(|| DEFAULT_ENDPOINT.to_string());
        let model = model.unwrap_or_else(|| DEFAULT_MODEL.to_string());

        info!(
            "Initialized Ollama provider with endpoint: {} (model: {})",
            endpoint, model
        );

        Ok(Self {
            client,
            endpoint,
            model,
            timeout_seconds,
        })
    }
}

#[async_trait]
impl ChatProvider for OllamaProvider {
    fn name(&self) -> &'static str {
        "Ollama"
    }

    async fn chat(&self, system: Option<&str>, prompt: &str) -> Result<ChatOutcome, LlmError> {
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

        let body = ChatRequest {
            model: &self.model,
            messages,
            stream: false,
        };

        debug!("Sending Ollama request with model {}", self.model);

        let response = self
            .client
            .post(&self.endpoint)
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
                "Ollama request failed with status {}: {}",
                status, response_text
            );
            return Err(LlmError::from_status(status, response_text));
        }

        let parsed: ChatResponse = serde_json::from_str(&response_text)
            .map_err(|e| LlmError::Transport(format!("invalid response body: {e}")))?;

        let content = parsed.message.content.trim().to_string();
        if content.is_empty() {
            return Err(LlmError::EmptyResponse);
        }

        debug!("Ollama response length: {}", content.len());

        Ok(ChatOutcome {
            text: content,
            model: self.model.clone(),
            prior_failures: 0,
        })
    }
}
