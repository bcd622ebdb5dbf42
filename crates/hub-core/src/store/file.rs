// # File Store
//
// File-based implementation of KvStore with crash recovery.
//
// ## Purpose
//
// Persists the hub collections across restarts, standing in for the
// browser-local storage of the modeled system.
//
// ## Crash Recovery
//
// - Atomic writes: write-then-rename
// - Corruption detection: JSON validated on load
// - Automatic backup: keeps a `.backup` of the last known good state
// - Recovery: falls back to the backup if corruption is detected
//
// ## File Format
//
// ```json
// {
//   "version": "1.0",
//   "entries": {
//     "hub_posts": [ ... ],
//     "hub_accounts": [ ... ]
//   }
// }
// ```

use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use async_trait::async_trait;
use serde_json::Value;
use tokio::fs;
use tokio::io::AsyncWriteExt;
use tokio::sync::RwLock;

use crate::config::StoreConfig;
use crate::error::{Error, Result};
use crate::traits::store::{KvStore, StoreFactory};

/// Store file format version, for future migration
const STORE_FILE_VERSION: &str = "1.0";

/// File-backed store with atomic writes and backup recovery
#[derive(Debug)]
pub struct FileStore {
    path: PathBuf,
    state: Arc<RwLock<FileState>>,
}

#[derive(Debug)]
struct FileState {
    entries: HashMap<String, Value>,
    dirty: bool,
}

/// Serializable on-disk format
#[derive(Debug, Clone, serde::Serialize, serde::Deserialize)]
struct StoreFileFormat {
    version: String,
    entries: HashMap<String, Value>,
}

impl FileStore {
    /// Create or load a file store
    ///
    /// Loads the existing file if present, recovers from the backup on
    /// corruption, and otherwise starts empty. Parent directories are
    /// created as needed.
    pub async fn new<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref().to_path_buf();

        if let Some(parent) = path.parent() {
            if !parent.as_os_str().is_empty() && !parent.exists() {
                fs::create_dir_all(parent).await.map_err(|e| {
                    Error::config(format!(
                        "Failed to create store directory {}: {}",
                        parent.display(),
                        e
                    ))
                })?;
            }
        }

        let entries = Self::load_with_recovery(&path).await?;

        Ok(Self {
            path,
            state: Arc::new(RwLock::new(FileState {
                entries,
                dirty: false,
            })),
        })
    }

    /// Load entries from disk, falling back to the backup on corruption
    async fn load_with_recovery(path: &Path) -> Result<HashMap<String, Value>> {
        match Self::load(path).await {
            Ok(entries) => {
                tracing::debug!("Loaded store file: {} keys", entries.len());
                Ok(entries)
            }
            Err(Error::Json(parse_err)) => {
                tracing::warn!(
                    "Store file appears corrupted: {}. Attempting recovery from backup.",
                    parse_err
                );

                let backup_path = Self::backup_path(path);
                if !backup_path.exists() {
                    tracing::warn!("No backup file found. Starting with empty store.");
                    return Ok(HashMap::new());
                }

                match Self::load(&backup_path).await {
                    Ok(entries) => {
                        tracing::info!("Recovered store from backup: {} keys", entries.len());
                        if let Err(restore_err) = fs::copy(&backup_path, path).await {
                            tracing::error!(
                                "Failed to restore store file from backup: {}",
                                restore_err
                            );
                        }
                        Ok(entries)
                    }
                    Err(backup_err) => {
                        tracing::error!(
                            "Backup also corrupted: {}. Starting with empty store.",
                            backup_err
                        );
                        Ok(HashMap::new())
                    }
                }
            }
            Err(other) => Err(other),
        }
    }

    /// Load entries from a single file
    async fn load(path: &Path) -> Result<HashMap<String, Value>> {
        if !path.exists() {
            tracing::debug!("Store file does not exist: {}", path.display());
            return Ok(HashMap::new());
        }

        let content = fs::read_to_string(path).await.map_err(|e| {
            Error::store(format!("Failed to read store file {}: {}", path.display(), e))
        })?;

        let file: StoreFileFormat = serde_json::from_str(&content)?;

        if file.version != STORE_FILE_VERSION {
            tracing::warn!(
                "Store file version mismatch: expected {}, got {}. Loading anyway.",
                STORE_FILE_VERSION,
                file.version
            );
        }

        Ok(file.entries)
    }

    /// Write the current state to disk atomically
    async fn write_file(&self) -> Result<()> {
        let json = {
            let guard = self.state.read().await;
            let file = StoreFileFormat {
                version: STORE_FILE_VERSION.to_string(),
                entries: guard.entries.clone(),
            };
            serde_json::to_string_pretty(&file)?
        };

        let temp_path = self.temp_path();
        {
            let mut file = fs::File::create(&temp_path).await.map_err(|e| {
                Error::store(format!(
                    "Failed to create temp file {}: {}",
                    temp_path.display(),
                    e
                ))
            })?;

            file.write_all(json.as_bytes()).await.map_err(|e| {
                Error::store(format!(
                    "Failed to write temp file {}: {}",
                    temp_path.display(),
                    e
                ))
            })?;

            file.flush().await.map_err(|e| {
                Error::store(format!(
                    "Failed to flush temp file {}: {}",
                    temp_path.display(),
                    e
                ))
            })?;
        }

        // Keep the previous good state around before replacing it
        if self.path.exists() {
            let backup_path = Self::backup_path(&self.path);
            if let Err(e) = fs::copy(&self.path, &backup_path).await {
                tracing::warn!("Failed to create backup: {}", e);
            }
        }

        fs::rename(&temp_path, &self.path).await.map_err(|e| {
            Error::store(format!(
                "Failed to rename {} to {}: {}",
                temp_path.display(),
                self.path.display(),
                e
            ))
        })?;

        {
            let mut guard = self.state.write().await;
            guard.dirty = false;
        }

        tracing::trace!("Store written to file: {}", self.path.display());
        Ok(())
    }

    fn temp_path(&self) -> PathBuf {
        let mut temp = self.path.clone();
        temp.set_extension("tmp");
        temp
    }

    fn backup_path(path: &Path) -> PathBuf {
        let mut backup = path.to_path_buf();
        backup.set_extension("backup");
        backup
    }
}

#[async_trait]
impl KvStore for FileStore {
    async fn read(&self, key: &str) -> Result<Option<Value>> {
        let guard = self.state.read().await;
        Ok(guard.entries.get(key).cloned())
    }

    async fn write(&self, key: &str, value: Value) -> Result<()> {
        {
            let mut guard = self.state.write().await;
            guard.entries.insert(key.to_string(), value);
            guard.dirty = true;
        }

        // Immediate write for durability
        self.write_file().await
    }

    async fn clear(&self, key: &str) -> Result<()> {
        {
            let mut guard = self.state.write().await;
            guard.entries.remove(key);
            guard.dirty = true;
        }

        self.write_file().await
    }

    async fn list_keys(&self) -> Result<Vec<String>> {
        let guard = self.state.read().await;
        Ok(guard.entries.keys().cloned().collect())
    }

    async fn flush(&self) -> Result<()> {
        let dirty = self.state.read().await.dirty;
        if dirty { self.write_file().await } else { Ok(()) }
    }
}

/// Factory for the `file` backend
pub struct FileStoreFactory;

#[async_trait]
impl StoreFactory for FileStoreFactory {
    async fn create(&self, config: &StoreConfig) -> Result<Arc<dyn KvStore>> {
        match config {
            StoreConfig::File { path } => Ok(Arc::new(FileStore::new(path).await?)),
            other => Err(Error::config(format!(
                "File store factory received {} config",
                other.type_name()
            ))),
        }
    }
}
