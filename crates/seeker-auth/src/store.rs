//! Key/value persistence for the credential.
//!
//! The credential is stored as two string entries, the token and its expiry
//! in epoch milliseconds. [`FileCredentialStore`] keeps them in a small JSON
//! object on disk; [`MemoryCredentialStore`] is for tests and embedding.

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use async_trait::async_trait;
use tokio::sync::Mutex;

use crate::error::{AuthError, Result};

/// String key/value storage that survives between sessions.
#[async_trait]
pub trait CredentialStore: Send + Sync + std::fmt::Debug {
    /// Read a value.
    async fn get(&self, key: &str) -> Result<Option<String>>;

    /// Write a value, replacing any previous one.
    async fn set(&self, key: &str, value: &str) -> Result<()>;

    /// Remove a value. Removing a missing key is not an error.
    async fn remove(&self, key: &str) -> Result<()>;
}

// ============================================================================
// FileCredentialStore
// ============================================================================

/// JSON-file-backed store.
#[derive(Debug)]
pub struct FileCredentialStore {
    path: PathBuf,
    // Serializes read-modify-write cycles within this process.
    lock: Mutex<()>,
}

impl FileCredentialStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            lock: Mutex::new(()),
        }
    }

    /// Get the store file path.
    pub fn path(&self) -> &Path {
        &self.path
    }

    fn read_entries(&self) -> Result<BTreeMap<String, String>> {
        if !self.path.exists() {
            return Ok(BTreeMap::new());
        }

        let content = std::fs::read_to_string(&self.path)
            .map_err(|e| AuthError::storage(format!("Failed to read credential file: {}", e)))?;

        if content.trim().is_empty() {
            return Ok(BTreeMap::new());
        }

        serde_json::from_str(&content).map_err(|e| {
            AuthError::Serialization(format!(
                "Failed to parse credential file {}: {}",
                self.path.display(),
                e
            ))
        })
    }

    fn write_entries(&self, entries: &BTreeMap<String, String>) -> Result<()> {
        if entries.is_empty() {
            if self.path.exists() {
                std::fs::remove_file(&self.path).map_err(|e| {
                    AuthError::storage(format!("Failed to delete credential file: {}", e))
                })?;
            }
            return Ok(());
        }

        if let Some(parent) = self.path.parent() {
            std::fs::create_dir_all(parent).map_err(|e| {
                AuthError::storage(format!("Failed to create credential directory: {}", e))
            })?;
        }

        let json = serde_json::to_string_pretty(entries)?;
        std::fs::write(&self.path, json)
            .map_err(|e| AuthError::storage(format!("Failed to write credential file: {}", e)))
    }
}

#[async_trait]
impl CredentialStore for FileCredentialStore {
    async fn get(&self, key: &str) -> Result<Option<String>> {
        let _guard = self.lock.lock().await;
        Ok(self.read_entries()?.remove(key))
    }

    async fn set(&self, key: &str, value: &str) -> Result<()> {
        let _guard = self.lock.lock().await;
        let mut entries = self.read_entries()?;
        entries.insert(key.to_string(), value.to_string());
        self.write_entries(&entries)?;
        tracing::debug!(key, path = %self.path.display(), "credential entry saved");
        Ok(())
    }

    async fn remove(&self, key: &str) -> Result<()> {
        let _guard = self.lock.lock().await;
        let mut entries = self.read_entries()?;
        if entries.remove(key).is_some() {
            self.write_entries(&entries)?;
            tracing::debug!(key, "credential entry removed");
        }
        Ok(())
    }
}

// ============================================================================
// MemoryCredentialStore
// ============================================================================

/// In-memory store, lost when dropped.
#[derive(Debug, Default)]
pub struct MemoryCredentialStore {
    entries: Mutex<BTreeMap<String, String>>,
}

impl MemoryCredentialStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Seed with entries.
    pub fn with_entries<I, K, V>(entries: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<String>,
    {
        Self {
            entries: Mutex::new(
                entries
                    .into_iter()
                    .map(|(k, v)| (k.into(), v.into()))
                    .collect(),
            ),
        }
    }

    /// Number of stored entries.
    pub async fn len(&self) -> usize {
        self.entries.lock().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.entries.lock().await.is_empty()
    }
}

#[async_trait]
impl CredentialStore for MemoryCredentialStore {
    async fn get(&self, key: &str) -> Result<Option<String>> {
        Ok(self.entries.lock().await.get(key).cloned())
    }

    async fn set(&self, key: &str, value: &str) -> Result<()> {
        self.entries
            .lock()
            .await
            .insert(key.to_string(), value.to_string());
        Ok(())
    }

    async fn remove(&self, key: &str) -> Result<()> {
        self.entries.lock().await.remove(key);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[tokio::test]
    async fn test_file_store_set_get_remove() {
        let temp = tempdir().unwrap();
        let store = FileCredentialStore::new(temp.path().join("credentials.json"));

        assert_eq!(store.get("access_token").await.unwrap(), None);

        store.set("access_token", "abc").await.unwrap();
        store.set("token_expiry", "123").await.unwrap();
        assert_eq!(
            store.get("access_token").await.unwrap().as_deref(),
            Some("abc")
        );
        assert_eq!(
            store.get("token_expiry").await.unwrap().as_deref(),
            Some("123")
        );

        store.remove("access_token").await.unwrap();
        assert_eq!(store.get("access_token").await.unwrap(), None);
        assert!(store.path().exists());
    }

    #[tokio::test]
    async fn test_file_store_deletes_file_when_empty() {
        let temp = tempdir().unwrap();
        let store = FileCredentialStore::new(temp.path().join("credentials.json"));

        store.set("k", "v").await.unwrap();
        assert!(store.path().exists());

        store.remove("k").await.unwrap();
        assert!(!store.path().exists());

        // Removing again is a no-op.
        store.remove("k").await.unwrap();
    }

    #[tokio::test]
    async fn test_file_store_creates_parent_dirs() {
        let temp = tempdir().unwrap();
        let store = FileCredentialStore::new(temp.path().join("a/b/credentials.json"));
        store.set("k", "v").await.unwrap();
        assert!(store.path().exists());
    }

    #[tokio::test]
    async fn test_file_store_corrupt_file_is_an_error() {
        let temp = tempdir().unwrap();
        let path = temp.path().join("credentials.json");
        std::fs::write(&path, "{not json").unwrap();

        let store = FileCredentialStore::new(&path);
        let err = store.get("access_token").await.unwrap_err();
        assert!(matches!(err, AuthError::Serialization(_)));
    }

    #[tokio::test]
    async fn test_memory_store() {
        let store = MemoryCredentialStore::with_entries([("a", "1")]);
        assert_eq!(store.len().await, 1);
        assert_eq!(store.get("a").await.unwrap().as_deref(), Some("1"));

        store.remove("a").await.unwrap();
        assert!(store.is_empty().await);
    }
}
