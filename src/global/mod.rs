use anyhow::{Context, Result};
use chrono::Local;
use std::path::{Path, PathBuf};

const APP_DIR: &str = "revoice";

pub fn config_dir() -> Result<PathBuf> {
    dirs::config_dir()
        .map(|dir| dir.join(APP_DIR))
        .context("Unable to determine config directory")
}

pub fn config_file() -> Result<PathBuf> {
    Ok(config_dir()?.join("config.toml"))
}

/// Timestamp used to key recordings and their recovery files.
pub fn timestamp_now() -> String {
    Local::now().format("%Y-%m-%d_%H-%M-%S").to_string()
}

/// Recovery filename for a given recording timestamp, e.g. `whisper-2026-01-26_14-30-45.txt`.
pub fn whisper_filename(temp_dir: &Path, timestamp: &str) -> PathBuf {
    temp_dir.join(format!("whisper-{timestamp}.txt"))
}

/// Extract the timestamp from a `recording-<TIMESTAMP>.<ext>` filename.
///
/// Returns None for files that do not follow the recording naming convention.
pub fn extract_timestamp(path: &Path) -> Option<String> {
    let stem = path.file_stem()?.to_str()?;
    stem.strip_prefix("recording-").map(String::from)
}
