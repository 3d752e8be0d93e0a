//! Pipeline orchestration: header lifecycle around the processing stage,
//! with a fallback that never loses the user's transcribed words.

use std::path::Path;
use tracing::{error, info};

use crate::header::{
    generate_title, infer_project_name, Header, STATUS_AWAITING_INGEST,
    STATUS_AWAITING_TRANSFORMATION, STATUS_STRUCTURED,
};
use crate::processing::Processor;

const DEFAULT_TITLE_LENGTH: usize = 60;

pub struct Pipeline {
    processor: Processor,
}

impl Pipeline {
    pub fn new(processor: Processor) -> Self {
        Self { processor }
    }

    /// Clean up a transcript, maintaining the metadata header lifecycle.
    ///
    /// Always returns a usable document: on processing failure the raw
    /// transcript comes back behind a visible warning banner instead.
    pub async fn process_with_headers(
        &self,
        transcript: &str,
        recording_path: Option<&Path>,
        context: Option<&str>,
    ) -> String {
        let header = Header::parse(transcript).unwrap_or_else(|| {
            Header::new(source_name(recording_path), STATUS_AWAITING_TRANSFORMATION)
                .with_title(generate_title(transcript, DEFAULT_TITLE_LENGTH))
                .with_project(infer_project_name(transcript))
        });

        // Only source/date/status go into the model input; title and
        // project are re-derived from the output.
        let augmented = format!("{}\n\n{}", header.render(false, false), transcript);

        match self.processor.process(&augmented, context).await {
            Ok(result) => {
                if Header::parse(&result).is_some() {
                    result
                } else {
                    info!("LLM output carried no header, injecting one");
                    let result_header = Header::new(
                        format!("revoice from {}", header.source),
                        STATUS_AWAITING_INGEST,
                    )
                    .with_title(generate_title(&result, DEFAULT_TITLE_LENGTH))
                    .with_project(infer_project_name(&result));
                    format!("{}\n\n{}", result_header.render(true, true), result)
                }
            }
            Err(e) => {
                error!("LLM processing failed: {}", e);
                info!("Falling back to raw transcript");
                fallback_banner(&e.to_string(), transcript)
            }
        }
    }

    /// Structure a transcript into a markdown document (title, sections,
    /// bullets) with a "Structured from voice" header.
    pub async fn create_document(
        &self,
        transcript: &str,
        recording_path: Option<&Path>,
        project: Option<&str>,
    ) -> String {
        match self.processor.process_document(transcript).await {
            Ok(result) => {
                let title = generate_title(&result, DEFAULT_TITLE_LENGTH);
                let inferred_project = project
                    .map(String::from)
                    .unwrap_or_else(|| infer_project_name(&result));

                let header = Header::new(document_source(recording_path), STATUS_STRUCTURED)
                    .with_title(title)
                    .with_project(inferred_project);

                format!("{}\n\n{}", header.render(true, true), result)
            }
            Err(e) => {
                error!("Document creation failed: {}", e);
                fallback_banner(&e.to_string(), transcript)
            }
        }
    }
}

fn source_name(recording_path: Option<&Path>) -> String {
    recording_path
        .and_then(|p| p.file_name())
        .and_then(|n| n.to_str())
        .unwrap_or("unknown")
        .to_string()
}

fn document_source(recording_path: Option<&Path>) -> String {
    recording_path
        .and_then(|p| p.file_name())
        .and_then(|n| n.to_str())
        .unwrap_or("voice-input")
        .to_string()
}

/// Warning banner carrying the error and the untouched transcript.
fn fallback_banner(error: &str, transcript: &str) -> String {
    format!(
        "⚠️ **Warning**: LLM processing failed, returning raw transcript.\n\n\
         Error: {error}\n\n\
         ---\n\n\
         {transcript}"
    )
}
