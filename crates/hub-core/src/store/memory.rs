// # Memory Store
//
// In-memory implementation of KvStore.
//
// ## Purpose
//
// Fast store with no persistence across restarts. Used by the test suite
// and for demo runs where losing state on exit is acceptable.

use std::collections::HashMap;
use std::sync::Arc;

use async_trait::async_trait;
use serde_json::Value;
use tokio::sync::RwLock;

use crate::config::StoreConfig;
use crate::error::Result;
use crate::traits::store::{KvStore, StoreFactory};

/// In-memory store implementation
///
/// All values live in a HashMap behind an RwLock. Cloning is cheap and
/// clones share the same underlying map.
#[derive(Debug, Clone)]
pub struct MemoryStore {
    inner: Arc<RwLock<HashMap<String, Value>>>,
}

impl MemoryStore {
    /// Create a new empty memory store
    pub fn new() -> Self {
        Self {
            inner: Arc::new(RwLock::new(HashMap::new())),
        }
    }

    /// Number of keys currently present
    pub async fn len(&self) -> usize {
        self.inner.read().await.len()
    }

    /// Check if the store holds no keys
    pub async fn is_empty(&self) -> bool {
        self.inner.read().await.is_empty()
    }

    /// Drop every key
    pub async fn clear_all(&self) {
        self.inner.write().await.clear();
    }
}

impl Default for MemoryStore {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl KvStore for MemoryStore {
    async fn read(&self, key: &str) -> Result<Option<Value>> {
        let guard = self.inner.read().await;
        Ok(guard.get(key).cloned())
    }

    async fn write(&self, key: &str, value: Value) -> Result<()> {
        let mut guard = self.inner.write().await;
        guard.insert(key.to_string(), value);
        Ok(())
    }

    async fn clear(&self, key: &str) -> Result<()> {
        let mut guard = self.inner.write().await;
        guard.remove(key);
        Ok(())
    }

    async fn list_keys(&self) -> Result<Vec<String>> {
        let guard = self.inner.read().await;
        Ok(guard.keys().cloned().collect())
    }

    async fn flush(&self) -> Result<()> {
        // Nothing buffered
        Ok(())
    }
}

/// Factory for the `memory` backend
pub struct MemoryStoreFactory;

#[async_trait]
impl StoreFactory for MemoryStoreFactory {
    async fn create(&self, _config: &StoreConfig) -> Result<Arc<dyn KvStore>> {
        Ok(Arc::new(MemoryStore::new()))
    }
}
