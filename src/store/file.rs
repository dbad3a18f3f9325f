// src/store/file.rs
use std::collections::HashMap;
use std::fs;
use std::path::{Path, PathBuf};

use parking_lot::Mutex;
use tracing::debug;

use super::StorageBackend;
use crate::error::{Result, VaultError};

/// Local-scoped backend: records are mirrored to a JSON snapshot file and
/// survive process restarts.
///
/// The full map is held in memory; every mutation writes the snapshot
/// through. Reads never touch the filesystem after `open`.
pub struct FileStore {
    path: PathBuf,
    entries: Mutex<HashMap<String, String>>,
}

impl FileStore {
    /// Opens the store at `path`, loading any existing snapshot.
    ///
    /// Missing parent directories are created. A snapshot that exists but
    /// cannot be read or parsed fails the open; it is never silently
    /// discarded.
    pub fn open<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref().to_path_buf();

        if let Some(parent) = path.parent() {
            if !parent.as_os_str().is_empty() && !parent.exists() {
                fs::create_dir_all(parent).map_err(|e| {
                    VaultError::Unavailable(format!("Failed to create store directory: {}", e))
                })?;
            }
        }

        let entries = if path.exists() {
            let raw = fs::read_to_string(&path).map_err(|e| {
                VaultError::Unavailable(format!("Failed to read snapshot: {}", e))
            })?;
            serde_json::from_str(&raw).map_err(|e| {
                VaultError::Unavailable(format!("Snapshot is not valid JSON: {}", e))
            })?
        } else {
            HashMap::new()
        };

        debug!(path = %path.display(), "Opened file store");
        Ok(Self {
            path,
            entries: Mutex::new(entries),
        })
    }

    /// The snapshot file backing this store.
    pub fn path(&self) -> &Path {
        &self.path
    }

    fn flush(&self, entries: &HashMap<String, String>) -> Result<()> {
        let snapshot = serde_json::to_string(entries).map_err(|e| {
            VaultError::Unavailable(format!("Snapshot serialization failed: {}", e))
        })?;
        fs::write(&self.path, snapshot)?;
        Ok(())
    }
}

impl StorageBackend for FileStore {
    fn read(&self, key: &str) -> Result<Option<String>> {
        Ok(self.entries.lock().get(key).cloned())
    }

    fn write(&self, key: &str, value: &str) -> Result<()> {
        let mut entries = self.entries.lock();
        entries.insert(key.to_string(), value.to_string());
        self.flush(&entries)
    }

    fn delete(&self, key: &str) -> Result<()> {
        let mut entries = self.entries.lock();
        if entries.remove(key).is_some() {
            self.flush(&entries)?;
        }
        Ok(())
    }
}
