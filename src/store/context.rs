//! Session context carried between refinement rounds.
//!
//! A single text blob, overwritten after every successful round and fed
//! back into the next one. Only the most recent `max_length` characters
//! are kept so the prompt stays bounded.

use anyhow::{Context as _, Result};
use std::path::{Path, PathBuf};
use tracing::debug;

const CONTEXT_FILENAME: &str = "tmp-context.txt";

pub struct ContextStore {
    path: PathBuf,
    max_length: usize,
}

impl ContextStore {
    pub fn new(temp_dir: impl AsRef<Path>, max_length: usize) -> Self {
        Self {
            path: temp_dir.as_ref().join(CONTEXT_FILENAME),
            max_length,
        }
    }

    /// Save context, keeping the trailing `max_length` characters.
    ///
    /// Truncation counts characters, not bytes, so multi-byte content is
    /// never split mid code point.
    pub fn save(&self, context: &str) -> Result<()> {
        let char_count = context.chars().count();
        let truncated: String = if char_count > self.max_length {
            context
                .chars()
                .skip(char_count - self.max_length)
                .collect()
        } else {
            context.to_string()
        };

        if let Some(parent) = self.path.parent() {
            std::fs::create_dir_all(parent).context("Failed to create context directory")?;
        }

        debug!(
            "Saving session context ({} of {} chars)",
            truncated.chars().count(),
            char_count
        );
        std::fs::write(&self.path, truncated).context("Failed to write context file")
    }

    /// Load the saved context, or None when no round has been saved yet.
    pub fn load(&self) -> Option<String> {
        std::fs::read_to_string(&self.path).ok()
    }

    pub fn clear(&self) -> Result<()> {
        self.save("")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn test_save_and_load() {
        let dir = tempdir().unwrap();
        let store = ContextStore::new(dir.path(), 1000);

        store.save("previous round output").unwrap();
        assert_eq!(store.load().as_deref(), Some("previous round output"));
    }

    #[test]
    fn test_load_when_absent() {
        let dir = tempdir().unwrap();
        let store = ContextStore::new(dir.path(), 1000);
        assert_eq!(store.load(), None);
    }

    #[test]
    fn test_truncation_keeps_suffix() {
        let dir = tempdir().unwrap();
        let store = ContextStore::new(dir.path(), 10);

        let input = "abcdefghijklmnopqrstuvwxyz";
        store.save(input).unwrap();

        let loaded = store.load().unwrap();
        assert_eq!(loaded.chars().count(), 10);
        assert_eq!(loaded, "qrstuvwxyz");
    }

    #[test]
    fn test_truncation_counts_chars_not_bytes() {
        let dir = tempdir().unwrap();
        let store = ContextStore::new(dir.path(), 4);

        store.save("lärm über alles").unwrap();
        assert_eq!(store.load().as_deref(), Some("lles"));
    }

    #[test]
    fn test_clear() {
        let dir = tempdir().unwrap();
        let store = ContextStore::new(dir.path(), 1000);

        store.save("something").unwrap();
        store.clear().unwrap();
        assert_eq!(store.load().as_deref(), Some(""));
    }
}
