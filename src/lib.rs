pub mod cli;
pub mod config;
pub mod global;
pub mod header;
pub mod pipeline;
pub mod processing;
pub mod store;
pub mod transcription;
