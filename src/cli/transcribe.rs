//! CLI handler for transcription without LLM processing.

use anyhow::{bail, Result};

use crate::cli::args::TranscribeCliArgs;
use crate::cli::{create_spinner, emit_output};
use crate::config::Config;
use crate::global;
use crate::store::RecoveryStore;
use crate::transcription::Transcriber;

pub async fn handle_transcribe_command(args: TranscribeCliArgs) -> Result<()> {
    let config = Config::load()?;

    let recovery = RecoveryStore::new(&config.pipeline.temp_dir);
    let transcriber = Transcriber::from_config(&config.stt, recovery)?;

    // Recordings named by our own convention keep their timestamp as the
    // recovery key so the transcript can be matched to the audio later.
    let key = global::extract_timestamp(&args.file).unwrap_or_else(global::timestamp_now);

    let pb = create_spinner("Transcribing...");
    let transcript = transcriber.transcribe(&args.file, Some(&key)).await?;
    pb.finish_and_clear();

    let Some(transcript) = transcript else {
        bail!("Transcription failed; see the log for the provider error");
    };

    emit_output(&transcript, args.output.as_deref())
}
