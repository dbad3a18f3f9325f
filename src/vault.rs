// src/vault.rs
use std::path::Path;
use std::sync::Arc;

use serde::{de::DeserializeOwned, Serialize};

use crate::error::Result;
use crate::field::{BoundField, FieldOptions};
use crate::store::{FileStore, MemoryStore, StorageBackend};

/// A scoped backing store from which typed fields are bound.
///
/// The two scope factories differ only in retention: [`Vault::local`]
/// mirrors records to disk and survives process restarts, [`Vault::session`]
/// holds them in memory for the lifetime of the value. Cloning a vault
/// shares the backend, not any field cache.
#[derive(Clone)]
pub struct Vault {
    backend: Arc<dyn StorageBackend>,
}

impl Vault {
    /// Session-scoped vault: records are discarded with the last clone.
    pub fn session() -> Self {
        Self {
            backend: Arc::new(MemoryStore::new()),
        }
    }

    /// Local-scoped vault: records are mirrored to a snapshot at `path` and
    /// reloaded by the next open of the same path.
    pub fn local<P: AsRef<Path>>(path: P) -> Result<Self> {
        Ok(Self {
            backend: Arc::new(FileStore::open(path)?),
        })
    }

    /// Wraps a caller-provided backend. The seam for tests and for hosts
    /// that bring their own key-value surface.
    pub fn with_backend(backend: Arc<dyn StorageBackend>) -> Self {
        Self { backend }
    }

    /// Binds the field named `name` to this vault's backend.
    pub fn bind<T>(&self, name: &str, options: FieldOptions<T>) -> BoundField<T>
    where
        T: Serialize + DeserializeOwned + Clone + PartialEq,
    {
        BoundField::bind(self.backend.clone(), name, options)
    }
}
