use crate::global;
use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use tracing::info;

#[derive(Debug, Default, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub stt: SttConfig,
    pub llm: LlmConfig,
    pub pipeline: PipelineConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct SttConfig {
    /// Transcription provider: "local-whisper" or "groq"
    pub provider: Option<String>,
    pub model: Option<String>,
    pub language: Option<String>,
    pub api_endpoint: Option<String>,
    pub api_key: Option<String>,
    pub timeout_seconds: u64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct LlmConfig {
    /// Processing provider: "openrouter", "ollama" or "cline-cli"
    pub provider: Option<String>,
    /// Preferred model; tried before the configured fallbacks
    pub model: Option<String>,
    /// Ordered fallback chain for providers that support one
    pub fallback_models: Vec<String>,
    pub api_endpoint: Option<String>,
    pub api_key: Option<String>,
    /// Path to the CLI binary for the cline-cli provider
    pub command_path: Option<String>,
    /// Request timeout override; each provider has its own default
    pub timeout_seconds: Option<u64>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct PipelineConfig {
    /// Directory for recovery and session context files
    pub temp_dir: PathBuf,
    /// Maximum number of characters of prior output carried between rounds
    pub max_context_length: usize,
}

impl Default for SttConfig {
    fn default() -> Self {
        Self {
            provider: Some("local-whisper".to_string()),
            model: Some("whisper-large-v3".to_string()),
            language: Some("en".to_string()),
            api_endpoint: None,
            api_key: None,
            timeout_seconds: 120,
        }
    }
}

impl Default for LlmConfig {
    fn default() -> Self {
        Self {
            provider: Some("ollama".to_string()),
            model: None,
            fallback_models: Vec::new(),
            api_endpoint: None,
            api_key: None,
            command_path: None,
            timeout_seconds: None,
        }
    }
}

impl Default for PipelineConfig {
    fn default() -> Self {
        Self {
            temp_dir: std::env::temp_dir().join("revoice"),
            max_context_length: 1000,
        }
    }
}

impl SttConfig {
    /// API key with environment override, e.g. GROQ_API_KEY for the groq provider.
    pub fn resolved_api_key(&self) -> Option<String> {
        std::env::var("GROQ_API_KEY")
            .ok()
            .filter(|k| !k.is_empty())
            .or_else(|| self.api_key.clone())
    }
}

impl LlmConfig {
    pub fn resolved_api_key(&self) -> Option<String> {
        let var = match self.provider.as_deref() {
            Some("openrouter") => "OPENROUTER_API_KEY",
            Some("cline-cli") => "CLINE_API_KEY",
            _ => return self.api_key.clone(),
        };
        std::env::var(var)
            .ok()
            .filter(|k| !k.is_empty())
            .or_else(|| self.api_key.clone())
    }

    /// Effective request timeout: the configured override, or the
    /// provider's own default. Remote API calls are expected to answer
    /// quickly; the local and subprocess providers get more room.
    pub fn resolved_timeout(&self) -> u64 {
        if let Some(timeout) = self.timeout_seconds {
            return timeout;
        }
        match self.provider.as_deref() {
            Some("openrouter") => 60,
            Some("cline-cli") => 120,
            _ => 300,
        }
    }

    /// Full model chain: the preferred model, when set and not already
    /// present, goes in front of the configured fallbacks.
    pub fn model_chain(&self) -> Vec<String> {
        let mut chain = self.fallback_models.clone();
        if let Some(preferred) = &self.model {
            if !chain.contains(preferred) {
                chain.insert(0, preferred.clone());
            }
        }
        chain
    }
}

impl Config {
    pub fn load() -> Result<Self> {
        let config_path = Self::config_path()?;
        if !config_path.exists() {
            info!(
                "Config file not found, creating default at {:?}",
                config_path
            );
            let config = Self::default();
            config.save()?;
            return Ok(config);
        }

        let content =
            std::fs::read_to_string(&config_path).context("Failed to read config file")?;

        let config: Self = toml::from_str(&content).context("Failed to parse config file")?;

        info!("Loaded config from {:?}", config_path);
        Ok(config)
    }

    pub fn save(&self) -> Result<()> {
        let config_path = Self::config_path()?;

        if let Some(parent) = config_path.parent() {
            std::fs::create_dir_all(parent).context("Failed to create config directory")?;
        }

        let content = toml::to_string_pretty(self).context("Failed to serialize config")?;

        std::fs::write(&config_path, content).context("Failed to write config file")?;

        Ok(())
    }

    fn config_path() -> Result<PathBuf> {
        global::config_file()
    }
}
