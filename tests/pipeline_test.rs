//! End-to-end tests for the pipeline orchestrator with stub LLM backends.

use async_trait::async_trait;
use revoice::header::Header;
use revoice::pipeline::Pipeline;
use revoice::processing::{ChatOutcome, ChatProvider, LlmError, Processor};
use std::path::Path;

/// Backend returning a fixed response.
struct FixedBackend {
    text: String,
}

#[async_trait]
impl ChatProvider for FixedBackend {
    fn name(&self) -> &'static str {
        "Fixed"
    }

    async fn chat(&self, _system: Option<&str>, _prompt: &str) -> Result<ChatOutcome, LlmError> {
        Ok(ChatOutcome {
            text: self.text.clone(),
            model: "stub/model".to_string(),
            prior_failures: 0,
        })
    }
}

/// Backend that always fails with a configuration-class error.
struct UnconfiguredBackend;

#[async_trait]
impl ChatProvider for UnconfiguredBackend {
    fn name(&self) -> &'static str {
        "Unconfigured"
    }

    async fn chat(&self, _system: Option<&str>, _prompt: &str) -> Result<ChatOutcome, LlmError> {
        Err(LlmError::NoModels)
    }
}

/// Backend that always fails with a transient transport error.
struct DownBackend;

#[async_trait]
impl ChatProvider for DownBackend {
    fn name(&self) -> &'static str {
        "Down"
    }

    async fn chat(&self, _system: Option<&str>, _prompt: &str) -> Result<ChatOutcome, LlmError> {
        Err(LlmError::Transport("connection refused".to_string()))
    }
}

fn pipeline_with(backend: Box<dyn ChatProvider>) -> Pipeline {
    Pipeline::new(Processor::with_backend(backend))
}

#[tokio::test]
async fn output_without_header_gets_one_injected() {
    let pipeline = pipeline_with(Box::new(FixedBackend {
        text: "Cleaned up voice transcript about the whisper bug".to_string(),
    }));

    let result = pipeline
        .process_with_headers("uh so the whisper thing", Some(Path::new("/tmp/memo.wav")), None)
        .await;

    let header = Header::parse(&result).expect("output must carry a header");
    assert_eq!(header.source, "revoice from memo.wav");
    assert_eq!(header.status, "Awaiting ingest");
    assert!(header.title.is_some());
    // Body text survives below the header.
    assert!(result.contains("Cleaned up voice transcript"));
}

#[tokio::test]
async fn output_with_header_is_left_alone() {
    let llm_output = "**Source**: memo.wav\n**Date:** 2026-01-01 00:00:00\n**Status:** Awaiting ingest\n\ncleaned body";
    let pipeline = pipeline_with(Box::new(FixedBackend {
        text: llm_output.to_string(),
    }));

    let result = pipeline
        .process_with_headers("raw words", Some(Path::new("/tmp/memo.wav")), None)
        .await;

    assert_eq!(result, llm_output);
}

#[tokio::test]
async fn existing_input_header_is_carried_forward() {
    let transcript = "**Source**: earlier-round.wav\n**Date:** 2026-01-01 00:00:00\n**Status:** Awaiting transformation\n\nsecond round of edits";
    let pipeline = pipeline_with(Box::new(FixedBackend {
        text: "no header here".to_string(),
    }));

    let result = pipeline.process_with_headers(transcript, None, None).await;

    let header = Header::parse(&result).unwrap();
    // Source of the injected output header derives from the input header,
    // not from the (absent) recording path.
    assert_eq!(header.source, "revoice from earlier-round.wav");
}

#[tokio::test]
async fn configuration_failure_falls_back_to_raw_transcript() {
    let pipeline = pipeline_with(Box::new(UnconfiguredBackend));

    let result = pipeline
        .process_with_headers("hello world", Some(Path::new("x.wav")), None)
        .await;

    assert!(result.contains("⚠️ **Warning**"));
    assert!(result.contains("hello world"));
    assert!(result.contains("No fallback models configured"));
}

#[tokio::test]
async fn transient_failure_becomes_error_document_with_header() {
    let pipeline = pipeline_with(Box::new(DownBackend));

    let result = pipeline
        .process_with_headers("hello world", Some(Path::new("x.wav")), None)
        .await;

    // Transient failures surface as an error-string document, which still
    // gets the header treatment so it can be re-processed later.
    let header = Header::parse(&result).unwrap();
    assert_eq!(header.status, "Awaiting ingest");
    assert!(result.contains("connection refused"));
}

#[tokio::test]
async fn document_creation_attaches_structured_header() {
    let pipeline = pipeline_with(Box::new(FixedBackend {
        text: "# Topic\n\n## Section\n- point".to_string(),
    }));

    let result = pipeline
        .create_document("spoken ideas", Some(Path::new("/tmp/memo.wav")), Some("docs"))
        .await;

    let header = Header::parse(&result).unwrap();
    assert_eq!(header.source, "memo.wav");
    assert_eq!(header.status, "Structured from voice");
    assert_eq!(header.project.as_deref(), Some("docs"));
    assert!(result.contains("# Topic"));
}

#[tokio::test]
async fn document_creation_failure_falls_back_to_raw_transcript() {
    let pipeline = pipeline_with(Box::new(DownBackend));

    let result = pipeline
        .create_document("my spoken ideas", None, None)
        .await;

    assert!(result.contains("⚠️ **Warning**"));
    assert!(result.contains("my spoken ideas"));
}
