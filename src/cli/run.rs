//! CLI handler for the full pipeline: audio in, markdown document out.

use anyhow::{bail, Result};
use tracing::warn;

use crate::cli::args::RunCliArgs;
use crate::cli::{create_spinner, emit_output};
use crate::config::Config;
use crate::global;
use crate::pipeline::Pipeline;
use crate::processing::Processor;
use crate::store::{ContextStore, RecoveryStore};
use crate::transcription::Transcriber;

pub async fn handle_run_command(args: RunCliArgs) -> Result<()> {
    let config = Config::load()?;

    let recovery = RecoveryStore::new(&config.pipeline.temp_dir);
    let transcriber = Transcriber::from_config(&config.stt, recovery)?;
    let processor = Processor::from_config(&config.llm)?;
    let pipeline = Pipeline::new(processor);
    let context_store = ContextStore::new(
        &config.pipeline.temp_dir,
        config.pipeline.max_context_length,
    );

    let key = global::extract_timestamp(&args.file).unwrap_or_else(global::timestamp_now);

    let pb = create_spinner("Transcribing...");
    let transcript = transcriber.transcribe(&args.file, Some(&key)).await?;
    pb.finish_and_clear();

    let Some(transcript) = transcript else {
        bail!("Transcription failed; see the log for the provider error");
    };

    // The raw transcript survives on disk even if the LLM stage dies here.
    if let Some(path) = transcriber.recovery().find(&key) {
        eprintln!("Raw transcript saved to: {}", path.display());
    }

    let context = if args.no_context {
        None
    } else {
        context_store.load().filter(|c| !c.is_empty())
    };

    let pb = create_spinner("Processing...");
    let result = if args.document {
        pipeline
            .create_document(&transcript, Some(&args.file), args.project.as_deref())
            .await
    } else {
        pipeline
            .process_with_headers(&transcript, Some(&args.file), context.as_deref())
            .await
    };
    pb.finish_and_clear();

    emit_output(&result, args.output.as_deref())?;

    // Next round chains off this output.
    if let Err(e) = context_store.save(&result) {
        warn!("Could not save session context: {:#}", e);
    }

    Ok(())
}
