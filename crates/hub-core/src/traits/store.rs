// # Key-Value Store Trait
//
// Defines the interface for the persistence adapter.
//
// ## Purpose
//
// All hub state lives in six logical collections addressed by fixed string
// keys (see `store::keys`). The core never touches a backend directly; it
// reads a whole collection, mutates it in memory, and writes it back.
//
// ## Contract
//
// - An absent key reads as `None`; the helpers below map that to an empty
//   collection. A completely empty store must never produce an error.
// - `write` replaces the value for a key atomically from the caller's point
//   of view.
// - Implementations must be safe to share across async tasks.
//
// ## Implementations
//
// - `MemoryStore`: HashMap behind an RwLock, no persistence
// - `FileStore`: JSON file with atomic writes and backup recovery

use async_trait::async_trait;
use serde::Serialize;
use serde::de::DeserializeOwned;
use serde_json::Value;

use crate::config::StoreConfig;
use crate::error::{Error, Result};

/// Trait for store backends
///
/// Values are raw JSON; typed access goes through the free helper
/// functions in this module.
#[async_trait]
pub trait KvStore: Send + Sync {
    /// Read the value for a key, `None` when absent
    async fn read(&self, key: &str) -> Result<Option<Value>>;

    /// Write (create or replace) the value for a key
    async fn write(&self, key: &str, value: Value) -> Result<()>;

    /// Remove a key; succeeds even when the key is absent
    async fn clear(&self, key: &str) -> Result<()>;

    /// List all keys currently present
    async fn list_keys(&self) -> Result<Vec<String>>;

    /// Persist any pending changes
    ///
    /// Some implementations buffer writes; this ensures everything has
    /// reached durable storage.
    async fn flush(&self) -> Result<()>;
}

/// Helper trait for constructing store backends from configuration
#[async_trait]
pub trait StoreFactory: Send + Sync {
    /// Create a store instance from configuration
    async fn create(&self, config: &StoreConfig) -> Result<std::sync::Arc<dyn KvStore>>;
}

/// Read a collection, treating an absent key as empty
pub async fn read_collection<T: DeserializeOwned>(
    store: &dyn KvStore,
    key: &str,
) -> Result<Vec<T>> {
    match store.read(key).await? {
        Some(value) => serde_json::from_value(value).map_err(Error::from),
        None => Ok(Vec::new()),
    }
}

/// Write a whole collection back under its key
pub async fn write_collection<T: Serialize>(
    store: &dyn KvStore,
    key: &str,
    items: &[T],
) -> Result<()> {
    store.write(key, serde_json::to_value(items)?).await
}

/// Read a singleton record, `None` when absent
pub async fn read_singleton<T: DeserializeOwned>(
    store: &dyn KvStore,
    key: &str,
) -> Result<Option<T>> {
    match store.read(key).await? {
        Some(value) => serde_json::from_value(value).map(Some).map_err(Error::from),
        None => Ok(None),
    }
}

/// Write a singleton record under its key (last write wins)
pub async fn write_singleton<T: Serialize>(
    store: &dyn KvStore,
    key: &str,
    record: &T,
) -> Result<()> {
    store.write(key, serde_json::to_value(record)?).await
}
