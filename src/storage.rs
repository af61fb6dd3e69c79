//! Small persisted key-value storage for dashboard settings
//!
//! Values are plain text. The fjall-backed store survives restarts; the
//! in-memory store is for tests and one-shot CLI runs.

use std::collections::HashMap;
use std::path::Path;

use async_trait::async_trait;
use fjall::Keyspace;
use tokio::sync::RwLock;
use tokio::task;

use crate::{DashboardError, Result};

/// Text key-value persistence used by the coordinate store
#[async_trait]
pub trait KeyValueStore: Send + Sync {
    /// Value stored under `key`, `None` when never written
    async fn get(&self, key: &str) -> Result<Option<String>>;

    /// Store `value` under `key`, replacing any previous value
    async fn put(&self, key: &str, value: String) -> Result<()>;
}

fn storage_err(err: impl std::fmt::Display) -> DashboardError {
    DashboardError::storage(err.to_string())
}

fn get_from_store(store: Keyspace, key: Vec<u8>) -> Result<Option<Vec<u8>>> {
    Ok(store.get(key).map_err(storage_err)?.map(|v| v.to_vec()))
}

/// Key-value store persisted to disk with fjall
pub struct FjallStore {
    store: Keyspace,
}

impl FjallStore {
    /// Open (or create) the store in directory `path`
    pub fn open(path: impl AsRef<Path>) -> Result<Self> {
        let db = fjall::Database::builder(&path).open().map_err(storage_err)?;
        let items = db
            .keyspace("settings", fjall::KeyspaceCreateOptions::default)
            .map_err(storage_err)?;
        Ok(FjallStore { store: items })
    }
}

#[async_trait]
impl KeyValueStore for FjallStore {
    #[tracing::instrument(name = "query_store", level = "debug", skip(self))]
    async fn get(&self, key: &str) -> Result<Option<String>> {
        let store = self.store.clone();
        let key_bytes = key.as_bytes().to_vec();

        let maybe_bytes = task::spawn_blocking(move || get_from_store(store, key_bytes))
            .await
            .map_err(storage_err)??;

        match maybe_bytes {
            Some(bytes) => {
                tracing::debug!("Key found");
                let text = String::from_utf8(bytes).map_err(storage_err)?;
                Ok(Some(text))
            }
            None => {
                tracing::debug!("Key not found");
                Ok(None)
            }
        }
    }

    #[tracing::instrument(name = "put_store", level = "debug", skip(self))]
    async fn put(&self, key: &str, value: String) -> Result<()> {
        let store = self.store.clone();
        let key = key.as_bytes().to_vec();

        task::spawn_blocking(move || store.insert(key, value.into_bytes()))
            .await
            .map_err(storage_err)?
            .map_err(storage_err)?;
        Ok(())
    }
}

/// Key-value store that lives only as long as the process
#[derive(Debug, Default)]
pub struct MemoryStore {
    entries: RwLock<HashMap<String, String>>,
}

impl MemoryStore {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl KeyValueStore for MemoryStore {
    async fn get(&self, key: &str) -> Result<Option<String>> {
        Ok(self.entries.read().await.get(key).cloned())
    }

    async fn put(&self, key: &str, value: String) -> Result<()> {
        self.entries.write().await.insert(key.to_string(), value);
        Ok(())
    }
}
