use anyhow::Result;
use async_trait::async_trait;
use std::path::Path;

pub mod groq_api;
pub mod local_whisper;

pub use groq_api::GroqProvider;
pub use local_whisper::LocalWhisperProvider;

#[async_trait]
pub trait SttProvider: Send + Sync {
    fn name(&self) -> &'static str;

    /// Transcribe one audio file. Errors here are transient remote
    /// failures; the [`Transcriber`](crate::transcription::Transcriber)
    /// converts them to a None result.
    async fn transcribe(&self, audio_path: &Path, language: &str) -> Result<String>;
}
