use clap::{Args as ClapArgs, Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(name = "revoice")]
#[command(about = "Turn voice notes into polished markdown documents", long_about = None)]
pub struct Cli {
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: CliCommand,
}

#[derive(Subcommand, Debug)]
pub enum CliCommand {
    /// Transcribe an audio file and print the raw transcript
    Transcribe(TranscribeCliArgs),
    /// Run the full pipeline: transcribe, clean up, attach headers
    Run(RunCliArgs),
    /// Process text through the LLM stage without transcription
    Process(ProcessCliArgs),
    /// Inspect or clear the session context carried between rounds
    Context(ContextCliArgs),
    /// Show configured providers and their readiness
    Status,
    /// Print version information
    Version,
}

#[derive(ClapArgs, Debug)]
pub struct TranscribeCliArgs {
    /// Audio file to transcribe
    pub file: PathBuf,
    /// Write the transcript to a file instead of stdout
    #[arg(short, long)]
    pub output: Option<PathBuf>,
}

#[derive(ClapArgs, Debug)]
pub struct RunCliArgs {
    /// Audio file to run through the pipeline
    pub file: PathBuf,
    /// Write the result to a file instead of stdout
    #[arg(short, long)]
    pub output: Option<PathBuf>,
    /// Structure the transcript into a markdown document instead of
    /// cleaning it up
    #[arg(long)]
    pub document: bool,
    /// Project name for the document header (otherwise inferred)
    #[arg(long)]
    pub project: Option<String>,
    /// Do not carry the previous round's output into this one
    #[arg(long)]
    pub no_context: bool,
}

#[derive(ClapArgs, Debug)]
pub struct ProcessCliArgs {
    /// Text to process (reads --file when omitted)
    pub text: Option<String>,
    /// Read the input text from a file
    #[arg(short, long)]
    pub file: Option<PathBuf>,
    /// Write the result to a file instead of stdout
    #[arg(short, long)]
    pub output: Option<PathBuf>,
    /// Structure the text into a markdown document instead of cleaning it up
    #[arg(long)]
    pub document: bool,
    /// Project name for the document header (otherwise inferred)
    #[arg(long)]
    pub project: Option<String>,
    /// Do not carry the previous round's output into this one
    #[arg(long)]
    pub no_context: bool,
}

#[derive(ClapArgs, Debug)]
pub struct ContextCliArgs {
    #[command(subcommand)]
    pub command: ContextCommand,
}

#[derive(Subcommand, Debug)]
pub enum ContextCommand {
    /// Print the saved session context
    Show,
    /// Clear the saved session context
    Clear,
}
