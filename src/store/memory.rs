// src/store/memory.rs
use std::collections::HashMap;

use parking_lot::RwLock;

use super::StorageBackend;
use crate::error::Result;

/// Session-scoped backend: records last only as long as the store value.
///
/// Dropping the store (or the last `Arc` clone holding it) discards every
/// record, mirroring a session surface that is cleared when its owning
/// execution context ends.
#[derive(Default)]
pub struct MemoryStore {
    entries: RwLock<HashMap<String, String>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of records currently held.
    pub fn len(&self) -> usize {
        self.entries.read().len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.read().is_empty()
    }

    /// Discards every record, leaving the store usable.
    pub fn clear(&self) {
        self.entries.write().clear();
    }
}

impl StorageBackend for MemoryStore {
    fn read(&self, key: &str) -> Result<Option<String>> {
        Ok(self.entries.read().get(key).cloned())
    }

    fn write(&self, key: &str, value: &str) -> Result<()> {
        self.entries
            .write()
            .insert(key.to_string(), value.to_string());
        Ok(())
    }

    fn delete(&self, key: &str) -> Result<()> {
        self.entries.write().remove(key);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn write_read_delete() {
        let store = MemoryStore::new();

        assert_eq!(store.read("missing").unwrap(), None);

        store.write("greeting", "\"hello\"").unwrap();
        assert_eq!(store.read("greeting").unwrap().as_deref(), Some("\"hello\""));
        assert_eq!(store.len(), 1);

        store.write("greeting", "\"goodbye\"").unwrap();
        assert_eq!(
            store.read("greeting").unwrap().as_deref(),
            Some("\"goodbye\"")
        );
        assert_eq!(store.len(), 1);

        store.delete("greeting").unwrap();
        assert_eq!(store.read("greeting").unwrap(), None);
        assert!(store.is_empty());
    }

    #[test]
    fn deleting_absent_key_is_ok() {
        let store = MemoryStore::new();
        store.delete("never_written").unwrap();
    }

    #[test]
    fn clear_discards_all_records() {
        let store = MemoryStore::new();
        store.write("a", "1").unwrap();
        store.write("b", "2").unwrap();

        store.clear();

        assert!(store.is_empty());
        assert_eq!(store.read("a").unwrap(), None);
    }
}
