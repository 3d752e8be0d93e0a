//! Transcription stage: dispatch to the configured STT provider and
//! persist the raw result for recovery.

use anyhow::{bail, Context, Result};
use std::path::Path;
use tracing::{error, info, warn};

use crate::config::SttConfig;
use crate::store::RecoveryStore;

pub mod providers;

pub use providers::{GroqProvider, LocalWhisperProvider, SttProvider};

pub struct Transcriber {
    provider: Box<dyn SttProvider>,
    language: String,
    recovery: RecoveryStore,
}

impl Transcriber {
    /// Select the provider once from config.
    ///
    /// An unknown provider identifier or a missing credential is a
    /// configuration error and fails here rather than per call.
    pub fn from_config(config: &SttConfig, recovery: RecoveryStore) -> Result<Self> {
        let provider_name = config
            .provider
            .as_deref()
            .context("No transcription provider configured")?;

        let provider: Box<dyn SttProvider> = match provider_name {
            "local-whisper" => Box::new(LocalWhisperProvider::new(
                config.api_endpoint.clone(),
                config.timeout_seconds,
            )?),
            "groq" => {
                let api_key = config
                    .resolved_api_key()
                    .context("api_key (or GROQ_API_KEY) is required for the groq provider")?;
                let model = config
                    .model
                    .clone()
                    .unwrap_or_else(|| "whisper-large-v3".to_string());
                Box::new(GroqProvider::new(
                    api_key,
                    config.api_endpoint.clone(),
                    model,
                    config.timeout_seconds,
                )?)
            }
            _ => bail!(
                "Unknown transcription provider '{}'. Supported providers: local-whisper, groq",
                provider_name
            ),
        };

        let language = config.language.clone().unwrap_or_else(|| "en".to_string());

        Ok(Self::with_provider(provider, language, recovery))
    }

    /// Build a transcriber around an already-constructed provider.
    pub fn with_provider(
        provider: Box<dyn SttProvider>,
        language: String,
        recovery: RecoveryStore,
    ) -> Self {
        info!("Using {} for transcription", provider.name());

        Self {
            provider,
            language,
            recovery,
        }
    }

    /// Transcribe an audio file.
    ///
    /// A missing input file is an error. Transient provider failures are
    /// logged and surfaced as None so the caller checks the result instead
    /// of handling errors on the common failure path. On success with a
    /// recovery key, the raw transcript is persisted before returning.
    pub async fn transcribe(
        &self,
        audio_path: &Path,
        recovery_key: Option<&str>,
    ) -> Result<Option<String>> {
        if !audio_path.exists() {
            bail!("Audio file not found: {}", audio_path.display());
        }

        info!(
            "Transcribing {:?} with {}",
            audio_path,
            self.provider.name()
        );

        let transcript = match self.provider.transcribe(audio_path, &self.language).await {
            Ok(text) => text,
            Err(e) => {
                error!("{} transcription error: {:#}", self.provider.name(), e);
                return Ok(None);
            }
        };

        if transcript.is_empty() {
            warn!("{} returned an empty transcript", self.provider.name());
            return Ok(None);
        }

        if let Some(key) = recovery_key {
            self.recovery.save(&transcript, key);
        }

        Ok(Some(transcript))
    }

    pub fn recovery(&self) -> &RecoveryStore {
        &self.recovery
    }
}

/// Validate STT configuration without constructing a provider.
///
/// Returns an error message for display, or None when the config is usable.
pub fn validate_stt_config(config: &SttConfig) -> Option<String> {
    match config.provider.as_deref() {
        None | Some("") => Some("No transcription provider configured".to_string()),
        Some("local-whisper") => None,
        Some("groq") => {
            if config.resolved_api_key().is_none() {
                Some("API key required for the groq provider (set GROQ_API_KEY)".to_string())
            } else {
                None
            }
        }
        Some(other) => Some(format!("Unknown transcription provider: {other}")),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_unknown_provider_is_construction_error() {
        let config = SttConfig {
            provider: Some("siri".to_string()),
            ..Default::default()
        };
        let recovery = RecoveryStore::new(std::env::temp_dir());
        let err = Transcriber::from_config(&config, recovery)
            .err()
            .expect("expected a configuration error");
        assert!(err.to_string().contains("Unknown transcription provider"));
    }

    #[test]
    fn test_validate_local_whisper_needs_no_key() {
        let config = SttConfig::default();
        assert_eq!(validate_stt_config(&config), None);
    }

    #[test]
    fn test_validate_unknown_provider() {
        let config = SttConfig {
            provider: Some("siri".to_string()),
            ..Default::default()
        };
        assert!(validate_stt_config(&config)
            .unwrap()
            .contains("Unknown transcription provider"));
    }

    struct FixedProvider {
        text: &'static str,
    }

    #[async_trait::async_trait]
    impl SttProvider for FixedProvider {
        fn name(&self) -> &'static str {
            "Fixed"
        }

        async fn transcribe(&self, _audio_path: &Path, _language: &str) -> Result<String> {
            Ok(self.text.to_string())
        }
    }

    struct DownProvider;

    #[async_trait::async_trait]
    impl SttProvider for DownProvider {
        fn name(&self) -> &'static str {
            "Down"
        }

        async fn transcribe(&self, _audio_path: &Path, _language: &str) -> Result<String> {
            bail!("connection refused")
        }
    }

    #[tokio::test]
    async fn test_success_writes_recovery_file() {
        let dir = tempfile::tempdir().unwrap();
        let audio = dir.path().join("recording-2026-01-26_14-30-45.wav");
        std::fs::write(&audio, b"fake audio").unwrap();

        let transcriber = Transcriber::with_provider(
            Box::new(FixedProvider { text: "raw words" }),
            "en".to_string(),
            RecoveryStore::new(dir.path()),
        );

        let transcript = transcriber
            .transcribe(&audio, Some("2026-01-26_14-30-45"))
            .await
            .unwrap();
        assert_eq!(transcript.as_deref(), Some("raw words"));

        let recovered = transcriber
            .recovery()
            .find("2026-01-26_14-30-45")
            .expect("recovery file must exist after a successful transcription");
        assert_eq!(std::fs::read_to_string(recovered).unwrap(), "raw words");
    }

    #[tokio::test]
    async fn test_transient_failure_is_none_without_recovery_file() {
        let dir = tempfile::tempdir().unwrap();
        let audio = dir.path().join("memo.wav");
        std::fs::write(&audio, b"fake audio").unwrap();

        let transcriber = Transcriber::with_provider(
            Box::new(DownProvider),
            "en".to_string(),
            RecoveryStore::new(dir.path()),
        );

        let transcript = transcriber.transcribe(&audio, Some("key")).await.unwrap();
        assert_eq!(transcript, None);
        assert_eq!(transcriber.recovery().find("key"), None);
    }

    #[tokio::test]
    async fn test_missing_audio_file_is_error() {
        let config = SttConfig::default();
        let recovery = RecoveryStore::new(std::env::temp_dir());
        let transcriber = Transcriber::from_config(&config, recovery).unwrap();

        let err = transcriber
            .transcribe(Path::new("/nonexistent/memo.wav"), None)
            .await
            .unwrap_err();
        assert!(err.to_string().contains("Audio file not found"));
    }
}
