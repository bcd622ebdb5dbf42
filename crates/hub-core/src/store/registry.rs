//! Store backend registry
//!
//! Backends are registered by name and instantiated from [`StoreConfig`],
//! avoiding hardcoded if-else chains at the call site. The built-in
//! `memory` and `file` backends are pre-registered by
//! [`StoreRegistry::with_builtins`]; embedders can add their own.

use std::collections::HashMap;
use std::sync::{Arc, RwLock};

use crate::config::StoreConfig;
use crate::error::{Error, Result};
use crate::store::file::FileStoreFactory;
use crate::store::memory::MemoryStoreFactory;
use crate::traits::store::{KvStore, StoreFactory};

/// Registry of store backend factories
///
/// Uses interior mutability with an RwLock so registration and creation
/// can share a single registry handle.
#[derive(Default)]
pub struct StoreRegistry {
    factories: RwLock<HashMap<String, Arc<dyn StoreFactory>>>,
}

impl StoreRegistry {
    /// Create a new empty registry
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a registry with the built-in `memory` and `file` backends
    pub fn with_builtins() -> Self {
        let registry = Self::new();
        registry.register("memory", Arc::new(MemoryStoreFactory));
        registry.register("file", Arc::new(FileStoreFactory));
        registry
    }

    /// Register a backend factory under a name
    pub fn register(&self, name: impl Into<String>, factory: Arc<dyn StoreFactory>) {
        let mut factories = self.factories.write().unwrap();
        factories.insert(name.into(), factory);
    }

    /// Create a store from configuration
    pub async fn create(&self, config: &StoreConfig) -> Result<Arc<dyn KvStore>> {
        let backend = config.type_name().to_string();

        let factory = {
            let factories = self.factories.read().unwrap();
            factories
                .get(&backend)
                .cloned()
                .ok_or_else(|| Error::config(format!("Unknown store backend: {}", backend)))?
        };

        factory.create(config).await
    }

    /// List all registered backend names
    pub fn list_backends(&self) -> Vec<String> {
        let factories = self.factories.read().unwrap();
        factories.keys().cloned().collect()
    }

    /// Check if a backend name is registered
    pub fn has_backend(&self, name: &str) -> bool {
        let factories = self.factories.read().unwrap();
        factories.contains_key(name)
    }
}
