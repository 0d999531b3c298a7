//! # Key/Value Store
//!
//! The ordering core keeps its durable state the way the storefront kept it in the
//! browser: a handful of string keys holding JSON documents. [`KeyValueStore`] is
//! that surface; [`MemoryStore`] backs tests and ephemeral runs, [`FileStore`]
//! writes one `<key>.json` file per key into a directory.
//!
//! There is no locking across processes. Two processes sharing a `FileStore`
//! directory overwrite each other's keys: last writer wins.

use crate::error::StorageError;
use async_trait::async_trait;
use serde::de::DeserializeOwned;
use serde::Serialize;
use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::sync::Mutex;
use tracing::debug;

/// String-keyed document store.
#[async_trait]
pub trait KeyValueStore: Send + Sync + std::fmt::Debug {
    /// Returns the raw value under `key`, or `None` when absent.
    async fn get(&self, key: &str) -> Result<Option<String>, StorageError>;

    /// Replaces the value under `key`.
    async fn set(&self, key: &str, value: String) -> Result<(), StorageError>;

    /// Removes `key`. Removing an absent key is not an error.
    async fn remove(&self, key: &str) -> Result<(), StorageError>;
}

/// Reads and decodes a JSON value.
///
/// An undecodable value surfaces as [`StorageError::Corrupt`]; callers decide
/// whether to reset.
pub async fn load_json<V: DeserializeOwned>(
    store: &dyn KeyValueStore,
    key: &str,
) -> Result<Option<V>, StorageError> {
    match store.get(key).await? {
        Some(raw) => serde_json::from_str(&raw)
            .map(Some)
            .map_err(|source| StorageError::Corrupt {
                key: key.to_string(),
                source,
            }),
        None => Ok(None),
    }
}

/// Encodes `value` as JSON and stores it under `key`.
pub async fn save_json<V: Serialize + ?Sized>(
    store: &dyn KeyValueStore,
    key: &str,
    value: &V,
) -> Result<(), StorageError> {
    let raw = serde_json::to_string(value).map_err(|source| StorageError::Serialize {
        key: key.to_string(),
        source,
    })?;
    store.set(key, raw).await
}

/// Process-local store.
#[derive(Debug, Default)]
pub struct MemoryStore {
    entries: Mutex<HashMap<String, String>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    fn entries(&self) -> std::sync::MutexGuard<'_, HashMap<String, String>> {
        // A panic while holding this lock cannot leave the map half-written.
        self.entries.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
    }
}

#[async_trait]
impl KeyValueStore for MemoryStore {
    async fn get(&self, key: &str) -> Result<Option<String>, StorageError> {
        Ok(self.entries().get(key).cloned())
    }

    async fn set(&self, key: &str, value: String) -> Result<(), StorageError> {
        self.entries().insert(key.to_string(), value);
        Ok(())
    }

    async fn remove(&self, key: &str) -> Result<(), StorageError> {
        self.entries().remove(key);
        Ok(())
    }
}

/// Directory-backed store, one JSON file per key.
#[derive(Debug, Clone)]
pub struct FileStore {
    dir: PathBuf,
}

impl FileStore {
    /// Opens (and creates, if needed) the store directory.
    pub async fn open(dir: impl Into<PathBuf>) -> Result<Self, StorageError> {
        let dir = dir.into();
        tokio::fs::create_dir_all(&dir).await?;
        debug!(path = %dir.display(), "File store opened");
        Ok(Self { dir })
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    fn path_for(&self, key: &str) -> PathBuf {
        self.dir.join(format!("{key}.json"))
    }
}

#[async_trait]
impl KeyValueStore for FileStore {
    async fn get(&self, key: &str) -> Result<Option<String>, StorageError> {
        match tokio::fs::read_to_string(self.path_for(key)).await {
            Ok(raw) => Ok(Some(raw)),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(None),
            Err(e) => Err(e.into()),
        }
    }

    async fn set(&self, key: &str, value: String) -> Result<(), StorageError> {
        // Write then rename so a crash never leaves a truncated document behind.
        let path = self.path_for(key);
        let tmp = self.dir.join(format!(".{key}.json.tmp"));
        tokio::fs::write(&tmp, value).await?;
        tokio::fs::rename(&tmp, &path).await?;
        Ok(())
    }

    async fn remove(&self, key: &str) -> Result<(), StorageError> {
        match tokio::fs::remove_file(self.path_for(key)).await {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(()),
            Err(e) => Err(e.into()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_memory_store_set_get_remove() {
        let store = MemoryStore::new();
        assert_eq!(store.get("kcb_cart").await.unwrap(), None);

        store.set("kcb_cart", "[]".to_string()).await.unwrap();
        assert_eq!(store.get("kcb_cart").await.unwrap().as_deref(), Some("[]"));

        store.remove("kcb_cart").await.unwrap();
        store.remove("kcb_cart").await.unwrap();
        assert_eq!(store.get("kcb_cart").await.unwrap(), None);
    }

    #[tokio::test]
    async fn test_file_store_writes_one_file_per_key() {
        let dir = tempfile::tempdir().unwrap();
        let store = FileStore::open(dir.path().join("state")).await.unwrap();

        save_json(&store, "kcb_order_counter", &7u32).await.unwrap();
        assert!(store.dir().join("kcb_order_counter.json").exists());

        let counter: Option<u32> = load_json(&store, "kcb_order_counter").await.unwrap();
        assert_eq!(counter, Some(7));

        store.remove("kcb_order_counter").await.unwrap();
        let counter: Option<u32> = load_json(&store, "kcb_order_counter").await.unwrap();
        assert_eq!(counter, None);
    }

    #[tokio::test]
    async fn test_load_json_reports_corrupt_value() {
        let store = MemoryStore::new();
        store
            .set("kcb_staff_orders", "{not json".to_string())
            .await
            .unwrap();

        let result: Result<Option<Vec<u32>>, _> = load_json(&store, "kcb_staff_orders").await;
        match result {
            Err(StorageError::Corrupt { key, .. }) => assert_eq!(key, "kcb_staff_orders"),
            other => panic!("Expected Corrupt, got {:?}", other),
        }
    }
}
