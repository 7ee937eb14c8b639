//! Asynchronous string-keyed store for the persisted entry log.
//!
//! The application treats persistence as an opaque collaborator: `get`
//! and `set` over string keys, both fallible. [`FileStore`] keeps one
//! file per key under the data directory; [`MemoryStore`] backs tests.

use std::collections::HashMap;
use std::path::PathBuf;
use std::sync::Mutex;

use crate::error::StoreError;
use crate::storage::data_dir;

/// Key holding the JSON-serialized entry log.
pub const ENTRIES_KEY: &str = "entries";

/// Asynchronous string-keyed storage.
///
/// `get` resolves to `None` when the key has never been written. Both
/// operations may fail; failures are recoverable at the caller.
pub trait KvStore {
    fn get(
        &self,
        key: &str,
    ) -> impl std::future::Future<Output = Result<Option<String>, StoreError>> + Send;

    fn set(
        &self,
        key: &str,
        value: &str,
    ) -> impl std::future::Future<Output = Result<(), StoreError>> + Send;
}

/// Shared handles delegate to the underlying store.
impl<S: KvStore + Send + Sync> KvStore for std::sync::Arc<S> {
    async fn get(&self, key: &str) -> Result<Option<String>, StoreError> {
        self.as_ref().get(key).await
    }

    async fn set(&self, key: &str, value: &str) -> Result<(), StoreError> {
        self.as_ref().set(key, value).await
    }
}

/// File-per-key store under the data directory.
pub struct FileStore {
    dir: PathBuf,
}

impl FileStore {
    /// Open the store at the default data directory.
    pub fn open() -> Result<Self, StoreError> {
        Ok(Self { dir: data_dir()? })
    }

    /// Open the store at a specific directory (for testing).
    pub fn open_at(dir: PathBuf) -> Self {
        Self { dir }
    }

    fn path_for(&self, key: &str) -> PathBuf {
        self.dir.join(format!("{key}.json"))
    }
}

impl KvStore for FileStore {
    async fn get(&self, key: &str) -> Result<Option<String>, StoreError> {
        match tokio::fs::read_to_string(self.path_for(key)).await {
            Ok(content) => Ok(Some(content)),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(None),
            Err(e) => Err(StoreError::ReadFailed {
                key: key.to_string(),
                source: e,
            }),
        }
    }

    async fn set(&self, key: &str, value: &str) -> Result<(), StoreError> {
        tokio::fs::write(self.path_for(key), value)
            .await
            .map_err(|e| StoreError::WriteFailed {
                key: key.to_string(),
                source: e,
            })
    }
}

/// In-memory store for tests and ephemeral sessions.
#[derive(Default)]
pub struct MemoryStore {
    values: Mutex<HashMap<String, String>>,
    fail_writes: bool,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// A store whose writes always fail, for exercising the error path.
    pub fn failing_writes() -> Self {
        Self {
            values: Mutex::new(HashMap::new()),
            fail_writes: true,
        }
    }

    /// Seed a key before handing the store to the application.
    pub fn with_value(self, key: &str, value: &str) -> Self {
        self.values
            .lock()
            .expect("store mutex poisoned")
            .insert(key.to_string(), value.to_string());
        self
    }
}

impl KvStore for MemoryStore {
    async fn get(&self, key: &str) -> Result<Option<String>, StoreError> {
        Ok(self
            .values
            .lock()
            .expect("store mutex poisoned")
            .get(key)
            .cloned())
    }

    async fn set(&self, key: &str, value: &str) -> Result<(), StoreError> {
        if self.fail_writes {
            return Err(StoreError::WriteFailed {
                key: key.to_string(),
                source: std::io::Error::other("writes disabled"),
            });
        }
        self.values
            .lock()
            .expect("store mutex poisoned")
            .insert(key.to_string(), value.to_string());
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn memory_store_roundtrip() {
        let store = MemoryStore::new();
        assert!(store.get("entries").await.unwrap().is_none());

        store.set("entries", "[]").await.unwrap();
        assert_eq!(store.get("entries").await.unwrap().as_deref(), Some("[]"));
    }

    #[tokio::test]
    async fn memory_store_failing_writes() {
        let store = MemoryStore::failing_writes();
        let err = store.set("entries", "[]").await.unwrap_err();
        assert!(matches!(err, StoreError::WriteFailed { .. }));
    }

    #[tokio::test]
    async fn file_store_roundtrip() {
        let dir = tempfile::tempdir().unwrap();
        let store = FileStore::open_at(dir.path().to_path_buf());

        assert!(store.get("entries").await.unwrap().is_none());
        store.set("entries", r#"[{"date":"20240101","isSuccess":true}]"#).await.unwrap();

        let read = store.get("entries").await.unwrap().unwrap();
        assert!(read.contains("20240101"));
        assert!(dir.path().join("entries.json").exists());
    }

    #[tokio::test]
    async fn file_store_overwrites_previous_value() {
        let dir = tempfile::tempdir().unwrap();
        let store = FileStore::open_at(dir.path().to_path_buf());

        store.set("entries", "old").await.unwrap();
        store.set("entries", "new").await.unwrap();
        assert_eq!(store.get("entries").await.unwrap().as_deref(), Some("new"));
    }
}
