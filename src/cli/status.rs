//! CLI handler reporting provider configuration readiness.
//!
//! Readiness is judged from configuration alone; no network call is made
//! here. The local-whisper health check happens per transcription call.

use anyhow::Result;

use crate::config::Config;
use crate::processing::validate_llm_config;
use crate::transcription::validate_stt_config;

pub fn handle_status_command() -> Result<()> {
    let config = Config::load()?;

    let stt_provider = config.stt.provider.as_deref().unwrap_or("(none)");
    match validate_stt_config(&config.stt) {
        None => println!("STT provider:  {stt_provider} (ready)"),
        Some(error) => println!("STT provider:  {stt_provider} (not ready: {error})"),
    }

    let llm_provider = config.llm.provider.as_deref().unwrap_or("(none)");
    match validate_llm_config(&config.llm) {
        None => println!("LLM provider:  {llm_provider} (ready)"),
        Some(error) => println!("LLM provider:  {llm_provider} (not ready: {error})"),
    }

    let chain = config.llm.model_chain();
    if !chain.is_empty() {
        println!("Model chain:   {}", chain.join(" -> "));
    }

    println!("Temp dir:      {}", config.pipeline.temp_dir.display());

    Ok(())
}
