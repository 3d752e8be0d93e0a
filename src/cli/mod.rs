use indicatif::{ProgressBar, ProgressStyle};
use std::time::Duration;

pub mod args;
mod context;
mod process;
mod run;
mod status;
mod transcribe;

pub use args::{Cli, CliCommand};
pub use context::handle_context_command;
pub use process::handle_process_command;
pub use run::handle_run_command;
pub use status::handle_status_command;
pub use transcribe::handle_transcribe_command;

/// Spinner shown while a remote stage is in flight.
pub(crate) fn create_spinner(message: &str) -> ProgressBar {
    let pb = ProgressBar::new_spinner();
    pb.set_style(
        ProgressStyle::with_template("{spinner} {msg}")
            .unwrap_or_else(|_| ProgressStyle::default_spinner()),
    );
    pb.set_message(message.to_string());
    pb.enable_steady_tick(Duration::from_millis(100));
    pb
}

/// Print to stdout or write to a file when `-o` was given.
pub(crate) fn emit_output(
    text: &str,
    output: Option<&std::path::Path>,
) -> anyhow::Result<()> {
    use anyhow::Context;

    if let Some(path) = output {
        std::fs::write(path, text).context("Failed to write output file")?;
        eprintln!("Saved to: {}", path.display());
    } else {
        println!("{text}");
    }
    Ok(())
}
