// src/store/mod.rs
mod file;
mod memory;

pub use file::FileStore;
pub use memory::MemoryStore;

use crate::error::Result;

/// Key-value persistence surface consumed by bound fields.
///
/// Implementations guarantee single-key atomicity only: there are no
/// cross-key transactions and no change notification channel. Fields bound
/// to the same key observe each other's writes at their next read.
#[cfg_attr(test, mockall::automock)]
pub trait StorageBackend: Send + Sync {
    /// Returns the text stored under `key`, if any.
    fn read(&self, key: &str) -> Result<Option<String>>;

    /// Stores `value` under `key`, replacing any previous record.
    fn write(&self, key: &str, value: &str) -> Result<()>;

    /// Removes the record under `key`. Removing an absent key is not an error.
    fn delete(&self, key: &str) -> Result<()>;
}
