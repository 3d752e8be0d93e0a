//! CLI handler for processing pre-recorded text through the LLM stage.

use anyhow::{bail, Context, Result};
use tracing::warn;

use crate::cli::args::ProcessCliArgs;
use crate::cli::{create_spinner, emit_output};
use crate::config::Config;
use crate::pipeline::Pipeline;
use crate::processing::Processor;
use crate::store::ContextStore;

pub async fn handle_process_command(args: ProcessCliArgs) -> Result<()> {
    let text = match (&args.text, &args.file) {
        (Some(text), _) => text.clone(),
        (None, Some(path)) => {
            std::fs::read_to_string(path).context("Failed to read input file")?
        }
        (None, None) => bail!("Provide text to process, or --file <path>"),
    };

    if text.trim().is_empty() {
        bail!("Input text is empty");
    }

    let config = Config::load()?;
    let processor = Processor::from_config(&config.llm)?;
    let pipeline = Pipeline::new(processor);
    let context_store = ContextStore::new(
        &config.pipeline.temp_dir,
        config.pipeline.max_context_length,
    );

    let context = if args.no_context {
        None
    } else {
        context_store.load().filter(|c| !c.is_empty())
    };

    let source = args.file.as_deref();

    let pb = create_spinner("Processing...");
    let result = if args.document {
        pipeline
            .create_document(&text, source, args.project.as_deref())
            .await
    } else {
        pipeline
            .process_with_headers(&text, source, context.as_deref())
            .await
    };
    pb.finish_and_clear();

    emit_output(&result, args.output.as_deref())?;

    if let Err(e) = context_store.save(&result) {
        warn!("Could not save session context: {:#}", e);
    }

    Ok(())
}
