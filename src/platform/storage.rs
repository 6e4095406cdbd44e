//! Durable key-value storage for user preferences.

use std::collections::BTreeMap;
use std::path::{
    Path,
    PathBuf,
};

use thiserror::Error;

#[derive(Error, Debug)]
pub enum StorageError {
    #[error("Failed to access preference file: {0}")]
    Io(#[from] std::io::Error),
    #[error("Failed to encode preferences: {0}")]
    Encode(#[from] serde_json::Error),
}

/// String key-value storage that survives the session (`localStorage`).
pub trait PreferenceStore {
    fn get(&self, key: &str) -> Option<String>;

    /// # Errors
    /// Returns error if the value could not be made durable.
    fn set(&mut self, key: &str, value: &str) -> Result<(), StorageError>;
}

/// Volatile store; counts writes so callers can check persistence frequency.
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    values: BTreeMap<String, String>,
    writes: usize,
}

impl MemoryStore {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn with_value(mut self, key: &str, value: &str) -> Self {
        self.values.insert(key.to_string(), value.to_string());
        self
    }

    #[must_use]
    pub const fn writes(&self) -> usize {
        self.writes
    }
}

impl PreferenceStore for MemoryStore {
    fn get(&self, key: &str) -> Option<String> {
        self.values.get(key).cloned()
    }

    fn set(&mut self, key: &str, value: &str) -> Result<(), StorageError> {
        self.values.insert(key.to_string(), value.to_string());
        self.writes += 1;
        Ok(())
    }
}

/// Store persisted as a flat JSON object on disk.
///
/// The file is read once on open and rewritten on every `set`.
#[derive(Debug, Clone)]
pub struct FileStore {
    path: PathBuf,
    values: BTreeMap<String, String>,
}

impl FileStore {
    /// Opens the store, starting empty when the file does not exist yet.
    ///
    /// # Errors
    /// Returns error if the file exists but cannot be read or parsed.
    pub fn open(path: impl Into<PathBuf>) -> Result<Self, StorageError> {
        let path = path.into();
        let values = if path.exists() {
            let content = std::fs::read_to_string(&path)?;
            serde_json::from_str(&content)?
        } else {
            tracing::debug!("Preference file not found, starting empty: {:?}", path);
            BTreeMap::new()
        };
        Ok(Self { path, values })
    }

    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl PreferenceStore for FileStore {
    fn get(&self, key: &str) -> Option<String> {
        self.values.get(key).cloned()
    }

    fn set(&mut self, key: &str, value: &str) -> Result<(), StorageError> {
        self.values.insert(key.to_string(), value.to_string());
        let content = serde_json::to_string_pretty(&self.values)?;
        std::fs::write(&self.path, content)?;
        Ok(())
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use googletest::prelude::*;
    use rstest::rstest;
    use tempfile::TempDir;

    use super::*;

    #[rstest]
    fn memory_store_counts_writes() {
        let mut store = MemoryStore::new().with_value("language", "bs");

        assert_that!(store.get("language"), some(eq("bs")));
        store.set("language", "de").unwrap();

        assert_that!(store.get("language"), some(eq("de")));
        assert_that!(store.writes(), eq(1));
    }

    #[rstest]
    fn file_store_round_trips_through_disk() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("state.json");

        let mut store = FileStore::open(&path).unwrap();
        assert_that!(store.get("language"), none());
        store.set("language", "tr").unwrap();

        let reopened = FileStore::open(&path).unwrap();
        assert_that!(reopened.get("language"), some(eq("tr")));
    }

    #[rstest]
    fn file_store_rejects_corrupt_file() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("state.json");
        std::fs::write(&path, "[1, 2").unwrap();

        let result = FileStore::open(&path);

        assert!(matches!(result, Err(StorageError::Encode(_))));
    }

    #[rstest]
    fn file_store_write_failure_is_reported() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("missing-dir").join("state.json");

        let mut store = FileStore::open(&path).unwrap();

        assert!(matches!(store.set("language", "en"), Err(StorageError::Io(_))));
    }
}
