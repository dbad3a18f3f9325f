//! Transparent struct-field persistence over scoped key-value stores.
//!
//! A [`Vault`] wraps a backing store (session-scoped in memory, or
//! local-scoped on disk) and hands out typed [`BoundField`] accessors.
//! Reads and writes on a bound field go through the store, with optional
//! default values, custom storage keys and encryption at rest.
//!
//! ```
//! use fieldvault::{FieldOptions, Vault};
//!
//! let vault = Vault::session();
//! let last_login = vault.bind::<String>("last_login", FieldOptions::new());
//!
//! last_login.set("2026-08-06".to_string())?;
//! assert_eq!(last_login.get()?.as_deref(), Some("2026-08-06"));
//! # Ok::<(), fieldvault::VaultError>(())
//! ```

pub mod error;
pub mod field;
pub mod store;
pub mod vault;

pub use error::{Result, VaultError};
pub use field::{BoundField, FieldGuard, FieldOptions};
pub use store::{FileStore, MemoryStore, StorageBackend};
pub use vault::Vault;
