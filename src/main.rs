use anyhow::Result;
use clap::Parser;
use revoice::cli::{
    handle_context_command, handle_process_command, handle_run_command, handle_status_command,
    handle_transcribe_command, Cli, CliCommand,
};
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    let log_level = if cli.verbose { "debug" } else { "info" };
    let env_filter = EnvFilter::try_new(log_level).unwrap_or_else(|_| EnvFilter::new("info"));

    tracing_subscriber::fmt().with_env_filter(env_filter).init();

    match cli.command {
        CliCommand::Transcribe(args) => handle_transcribe_command(args).await,
        CliCommand::Run(args) => handle_run_command(args).await,
        CliCommand::Process(args) => handle_process_command(args).await,
        CliCommand::Context(args) => handle_context_command(args),
        CliCommand::Status => handle_status_command(),
        CliCommand::Version => {
            println!("revoice {}", env!("CARGO_PKG_VERSION"));
            Ok(())
        }
    }
}
