//! CLI handler for the session context carried between rounds.

use anyhow::Result;

use crate::cli::args::{ContextCliArgs, ContextCommand};
use crate::config::Config;
use crate::store::ContextStore;

pub fn handle_context_command(args: ContextCliArgs) -> Result<()> {
    let config = Config::load()?;
    let store = ContextStore::new(
        &config.pipeline.temp_dir,
        config.pipeline.max_context_length,
    );

    match args.command {
        ContextCommand::Show => match store.load() {
            Some(context) if !context.is_empty() => {
                println!("{context}");
            }
            _ => {
                println!("No session context saved.");
            }
        },
        ContextCommand::Clear => {
            store.clear()?;
            println!("Session context cleared.");
        }
    }

    Ok(())
}
