use anyhow::{Context, Result};
use async_trait::async_trait;
use std::path::PathBuf;
use std::time::Duration;
use tokio::process::Command;
use tracing::{debug, error, info};

use super::{ChatOutcome, ChatProvider, LlmError};

const DEFAULT_COMMAND: &str = "cline";
const DEFAULT_MODEL: &str = "default-model";

/// Chat provider backed by an external CLI tool.
///
/// The subprocess is a collaborator like any HTTP provider: it gets its own
/// timeout and its stdout/stderr are captured, rather than being special
/// cased in the dispatch logic.
pub struct ClineCliProvider {
    command: PathBuf,
    model: String,
    api_key: Option<String>,
    timeout_seconds: u64,
}

impl ClineCliProvider {
    pub fn new(
        command_path: Option<String>,
        model: Option<String>,
        api_key: Option<String>,
        timeout_seconds: u64,
    ) -> Result<Self> {
        let command_name = command_path.unwrap_or_else(|| DEFAULT_COMMAND.to_string());
        // Resolving the binary up front turns a missing tool into a
        // configuration error instead of a per-call surprise.
        let command = which::which(&command_name)
            .with_context(|| format!("CLI tool '{command_name}' not found in PATH"))?;
        let model = model.unwrap_or_else(|| DEFAULT_MODEL.to_string());

        info!(
            "Initialized CLI provider with command: {:?} (model: {})",
            command, model
        );

        Ok(Self {
            command,
            model,
            api_key,
            timeout_seconds,
        })
    }
}

#[async_trait]
impl ChatProvider for ClineCliProvider {
    fn name(&self) -> &'static str {
        "Cline CLI"
    }

    async fn chat(&self, system: Option<&str>, prompt: &str) -> Result<ChatOutcome, LlmError> {
        // The CLI has no separate system channel; prepend it to the input.
        let input = match system {
            Some(system) => format!("{system}\n\n{prompt}"),
            None => prompt.to_string(),
        };

        let mut cmd = Command::new(&self.command);
        cmd.arg("generate").arg("--model").arg(&self.model);
        if let Some(key) = &self.api_key {
            cmd.arg("--api-key").arg(key);
        }
        cmd.arg("--input").arg(&input);
        cmd.kill_on_drop(true);

        debug!("Running CLI command {:?} with model {}", self.command, self.model);

        let output = tokio::time::timeout(
            Duration::from_secs(self.timeout_seconds),
            cmd.output(),
        )
        .await
        .map_err(|_| LlmError::Timeout(self.timeout_seconds))?
        .map_err(|e| LlmError::Transport(format!("failed to run CLI tool: {e}")))?;

        if !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr).trim().to_string();
            error!("CLI tool exited with {}: {}", output.status, stderr);
            return Err(LlmError::Transport(format!(
                "CLI tool exited with {}: {stderr}",
                output.status
            )));
        }

        let text = String::from_utf8_lossy(&output.stdout).trim().to_string();
        if text.is_empty() {
            return Err(LlmError::EmptyResponse);
        }

        debug!("CLI response length: {}", text.len());

        Ok(ChatOutcome {
            text,
            model: self.model.clone(),
            prior_failures: 0,
        })
    }
}
