//! Processing stage: route text through the configured LLM provider.
//!
//! Provider selection happens once at construction; an unknown identifier
//! or missing credential fails there as a configuration error. At the stage
//! boundary, cleanup-task provider failures come back as `Error: ...`
//! string values so the caller's happy path and failure path share one
//! return type; `Err` is reserved for failures the orchestrator should
//! convert into a raw-transcript fallback.

use anyhow::{bail, Context, Result};
use thiserror::Error;
use tracing::{error, info};

pub mod cascade;
pub mod prompt;
pub mod providers;

pub use prompt::detect_meta_operation;
pub use providers::{
    ChatOutcome, ChatProvider, ClineCliProvider, LlmError, OllamaProvider, OpenRouterProvider,
};

use crate::config::LlmConfig;

/// Failure at the processing-stage boundary.
#[derive(Debug, Error)]
pub enum ProcessError {
    #[error("LLM processing failed: {0}")]
    Provider(#[from] LlmError),
    #[error("document processing returned an empty result")]
    EmptyResult,
}

pub struct Processor {
    backend: Box<dyn ChatProvider>,
}

impl Processor {
    /// Select the provider once from config.
    pub fn from_config(config: &LlmConfig) -> Result<Self> {
        let provider_name = config
            .provider
            .as_deref()
            .context("No LLM provider configured")?;

        let backend: Box<dyn ChatProvider> = match provider_name {
            "openrouter" => {
                let api_key = config.resolved_api_key().context(
                    "api_key (or OPENROUTER_API_KEY) is required for the openrouter provider",
                )?;
                Box::new(OpenRouterProvider::new(
                    api_key,
                    config.api_endpoint.clone(),
                    config.model_chain(),
                    config.resolved_timeout(),
                )?)
            }
            "ollama" => Box::new(OllamaProvider::new(
                config.api_endpoint.clone(),
                config.model.clone(),
                config.resolved_timeout(),
            )?),
            "cline-cli" => Box::new(ClineCliProvider::new(
                config.command_path.clone(),
                config.model.clone(),
                config.resolved_api_key(),
                config.resolved_timeout(),
            )?),
            _ => bail!(
                "Unknown LLM provider '{}'. Supported providers: openrouter, ollama, cline-cli",
                provider_name
            ),
        };

        info!("Using {} for processing", backend.name());

        Ok(Self { backend })
    }

    /// Build a processor around an already-constructed backend.
    pub fn with_backend(backend: Box<dyn ChatProvider>) -> Self {
        Self { backend }
    }

    /// Cleanup task: fix grammar and structure while preserving meaning.
    ///
    /// Transient provider failures (including cascade exhaustion) come back
    /// as `Error: ...` string values rather than errors. Only
    /// configuration-class failures, such as an empty model chain, return
    /// `Err` for the orchestrator to handle.
    pub async fn process(&self, text: &str, context: Option<&str>) -> Result<String, ProcessError> {
        let system = prompt::cleanup_system(text);
        let user = prompt::cleanup_user(text, context);

        match self.backend.chat(Some(&system), &user).await {
            Ok(outcome) => {
                self.report_fallback(&outcome);
                Ok(outcome.text)
            }
            Err(e @ LlmError::NoModels) => {
                error!("{} configuration error: {}", self.backend.name(), e);
                Err(ProcessError::Provider(e))
            }
            Err(e) => {
                error!("{} processing error: {}", self.backend.name(), e);
                Ok(format!("Error: {e}"))
            }
        }
    }

    /// Document-structuring task: extract a topic and produce H1/H2/bullets.
    ///
    /// Unlike cleanup, provider failures propagate so the orchestrator can
    /// fall back to the raw transcript.
    pub async fn process_document(&self, transcript: &str) -> Result<String, ProcessError> {
        let system = prompt::document_system();
        let user = prompt::document_user(transcript);

        let outcome = self.backend.chat(Some(system), &user).await?;
        self.report_fallback(&outcome);

        if outcome.text.trim().is_empty() {
            error!("Document processing returned empty result");
            return Err(ProcessError::EmptyResult);
        }

        Ok(outcome.text)
    }

    fn report_fallback(&self, outcome: &ChatOutcome) {
        if outcome.prior_failures > 0 {
            info!(
                "Used fallback model {} after {} failure(s)",
                outcome.model, outcome.prior_failures
            );
            eprintln!(
                "Note: Used fallback model {} after {} failure(s)",
                outcome.model, outcome.prior_failures
            );
        }
    }
}

/// Validate LLM configuration without constructing a provider.
///
/// Returns an error message for display, or None when the config is usable.
pub fn validate_llm_config(config: &LlmConfig) -> Option<String> {
    match config.provider.as_deref() {
        None | Some("") => Some("No LLM provider configured".to_string()),
        Some("openrouter") => {
            if config.resolved_api_key().is_none() {
                Some(
                    "API key required for the openrouter provider (set OPENROUTER_API_KEY)"
                        .to_string(),
                )
            } else if config.model_chain().is_empty() {
                Some("No models configured for the openrouter provider".to_string())
            } else {
                None
            }
        }
        Some("ollama") => None,
        Some("cline-cli") => {
            let command = config.command_path.as_deref().unwrap_or("cline");
            if which::which(command).is_err() {
                Some(format!("CLI tool '{command}' not found in PATH"))
            } else {
                None
            }
        }
        Some(other) => Some(format!("Unknown LLM provider: {other}")),
    }
}
