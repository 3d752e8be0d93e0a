//! Best-effort persistence of raw transcripts for manual recovery.
//!
//! The recovery file is written immediately after a successful
//! transcription, before any LLM call, and is never deleted automatically.
//! If the downstream stage crashes, the user's words are still on disk.

use std::path::{Path, PathBuf};
use tracing::{info, warn};

use crate::global;

pub struct RecoveryStore {
    temp_dir: PathBuf,
}

impl RecoveryStore {
    pub fn new(temp_dir: impl Into<PathBuf>) -> Self {
        Self {
            temp_dir: temp_dir.into(),
        }
    }

    /// Write the transcript keyed by the caller-supplied timestamp.
    ///
    /// Recovery is best-effort: write failures are logged and swallowed so
    /// they can never take down the pipeline.
    pub fn save(&self, transcript: &str, key: &str) -> Option<PathBuf> {
        if let Err(e) = std::fs::create_dir_all(&self.temp_dir) {
            warn!("Could not create recovery directory: {}", e);
            return None;
        }

        let path = global::whisper_filename(&self.temp_dir, key);
        match std::fs::write(&path, transcript) {
            Ok(()) => {
                info!("Recovery transcript saved: {:?}", path);
                Some(path)
            }
            Err(e) => {
                warn!("Could not save recovery transcript: {}", e);
                None
            }
        }
    }

    /// Path of the recovery file for a key, if one exists.
    pub fn find(&self, key: &str) -> Option<PathBuf> {
        let path = global::whisper_filename(&self.temp_dir, key);
        path.exists().then_some(path)
    }

    pub fn temp_dir(&self) -> &Path {
        &self.temp_dir
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn test_save_and_find() {
        let dir = tempdir().unwrap();
        let store = RecoveryStore::new(dir.path());

        let path = store.save("raw words", "2026-01-26_14-30-45").unwrap();
        assert_eq!(std::fs::read_to_string(&path).unwrap(), "raw words");
        assert_eq!(store.find("2026-01-26_14-30-45"), Some(path));
    }

    #[test]
    fn test_find_missing_key() {
        let dir = tempdir().unwrap();
        let store = RecoveryStore::new(dir.path());
        assert_eq!(store.find("2026-01-01_00-00-00"), None);
    }

    #[test]
    fn test_save_creates_temp_dir() {
        let dir = tempdir().unwrap();
        let store = RecoveryStore::new(dir.path().join("nested"));
        assert!(store.save("text", "key").is_some());
    }

    #[test]
    fn test_save_failure_is_swallowed() {
        let dir = tempdir().unwrap();
        // A file where the directory should be makes the write fail.
        let blocked = dir.path().join("blocked");
        std::fs::write(&blocked, "not a dir").unwrap();

        let store = RecoveryStore::new(&blocked);
        assert!(store.save("text", "key").is_none());
    }
}
