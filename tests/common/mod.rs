// tests/common/mod.rs
use std::sync::Arc;

use fieldvault::{MemoryStore, Vault};
use serde::{Deserialize, Serialize};

/// Session vault plus a handle on its backend, for asserting raw stored text.
pub fn session_vault() -> (Arc<MemoryStore>, Vault) {
    let store = Arc::new(MemoryStore::new());
    let vault = Vault::with_backend(store.clone());
    (store, vault)
}

/// A value type carrying behavior beyond plain data, to check that decoded
/// records come back as the declared type with its methods intact.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Contact {
    pub first: String,
    pub last: String,
}

impl Contact {
    pub fn new(first: &str, last: &str) -> Self {
        Self {
            first: first.to_string(),
            last: last.to_string(),
        }
    }

    pub fn full_name(&self) -> String {
        format!("{}, {}", self.last, self.first)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Settings {
    pub enabled: bool,
    pub label: String,
    pub ratio: f64,
}

impl Settings {
    pub fn sample() -> Self {
        Self {
            enabled: true,
            label: "test".to_string(),
            ratio: 3.14,
        }
    }
}
