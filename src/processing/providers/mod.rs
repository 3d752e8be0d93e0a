use async_trait::async_trait;
use thiserror::Error;

pub mod cline_cli;
pub mod ollama;
pub mod openrouter;

pub use cline_cli::ClineCliProvider;
pub use ollama::OllamaProvider;
pub use openrouter::OpenRouterProvider;

/// Classified failure from an LLM provider attempt.
///
/// The classes matter for diagnostics: a 401 needs a new key, a 404 is
/// probably a bad model id, a 429 means the model works but the cascade
/// should move on to the next one rather than wait.
#[derive(Debug, Error)]
pub enum LlmError {
    #[error("authentication failed (HTTP 401): {0}")]
    Auth(String),
    #[error("model not found (HTTP 404): {0}")]
    NotFound(String),
    #[error("rate limited (HTTP 429): {0}")]
    RateLimited(String),
    #[error("request timed out after {0}s")]
    Timeout(u64),
    #[error("HTTP {status}: {message}")]
    Http { status: u16, message: String },
    #[error("transport error: {0}")]
    Transport(String),
    #[error("provider returned an empty response")]
    EmptyResponse,
    #[error("No fallback models configured")]
    NoModels,
    #[error("All {attempts} models failed. Last error: {last_error}")]
    Exhausted { attempts: usize, last_error: String },
}

impl LlmError {
    /// Classify an HTTP error status.
    pub fn from_status(status: reqwest::StatusCode, message: String) -> Self {
        match status.as_u16() {
            401 => Self::Auth(message),
            404 => Self::NotFound(message),
            429 => Self::RateLimited(message),
            code => Self::Http {
                status: code,
                message,
            },
        }
    }

    /// Convert a reqwest transport failure, distinguishing timeouts.
    pub fn from_reqwest(err: reqwest::Error, timeout_seconds: u64) -> Self {
        if err.is_timeout() {
            Self::Timeout(timeout_seconds)
        } else {
            Self::Transport(err.to_string())
        }
    }
}

/// Result of a successful chat call.
#[derive(Debug, Clone)]
pub struct ChatOutcome {
    pub text: String,
    /// Model that produced the text.
    pub model: String,
    /// Number of models that failed before this one succeeded. Zero for
    /// single-model providers.
    pub prior_failures: usize,
}

#[async_trait]
pub trait ChatProvider: Send + Sync {
    fn name(&self) -> &'static str;

    /// Run one processing request. Providers backed by a model list drive
    /// their own fallback cascade internally.
    async fn chat(&self, system: Option<&str>, prompt: &str) -> Result<ChatOutcome, LlmError>;
}
