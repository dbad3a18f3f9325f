// src/field/accessor.rs
use std::sync::Arc;

use parking_lot::{MappedMutexGuard, Mutex, MutexGuard};
use serde::{de::DeserializeOwned, Serialize};
use tracing::debug;

use super::cipher::RecordCipher;
use super::codec;
use super::options::FieldOptions;
use crate::error::Result;
use crate::store::StorageBackend;

/// Cache slot for the last value seen through this binding. `Vacant` until
/// the first read populates it; `Cached(None)` means the field is known to
/// be absent.
enum CacheSlot<T> {
    Vacant,
    Cached(Option<T>),
}

/// A struct field bound to one key of a backing store.
///
/// Every read polls the store, decodes the current record and reconciles it
/// with the last value seen in memory; writes go straight through. The
/// binding owns its cache; two bindings over the same key coordinate only
/// through the store, at their next read.
pub struct BoundField<T> {
    store: Arc<dyn StorageBackend>,
    key: String,
    default: Option<T>,
    cipher: Option<RecordCipher>,
    cache: Mutex<CacheSlot<T>>,
}

impl<T> BoundField<T>
where
    T: Serialize + DeserializeOwned + Clone + PartialEq,
{
    /// Binds the field named `name` to `store`, consuming its options.
    ///
    /// The storage key resolves to the configured override, else `name`
    /// itself, and never changes afterwards. Binding does not touch the
    /// store; errors surface on the first get/set.
    pub fn bind(store: Arc<dyn StorageBackend>, name: &str, options: FieldOptions<T>) -> Self {
        let FieldOptions {
            key,
            default,
            encrypt_with,
        } = options;

        Self {
            store,
            key: key.unwrap_or_else(|| name.to_string()),
            default,
            cipher: encrypt_with.as_deref().map(RecordCipher::new),
            cache: Mutex::new(CacheSlot::Vacant),
        }
    }

    /// The resolved storage key.
    pub fn key(&self) -> &str {
        &self.key
    }

    /// Reads the field.
    ///
    /// Returns the configured default when the store holds no record, or
    /// `None` without one. When the cached value no longer matches what the
    /// store decodes to (a composite returned by [`get_mut`] was mutated, or
    /// another binding wrote the key), the cached value is authoritative: it
    /// is written back to the store and returned.
    ///
    /// [`get_mut`]: BoundField::get_mut
    pub fn get(&self) -> Result<Option<T>> {
        let fresh = self.load()?;
        let mut cache = self.cache.lock();

        if let CacheSlot::Cached(current) = &*cache {
            if *current != fresh {
                debug!(key = %self.key, "Cached value drifted from store, writing back");
                self.persist(current.as_ref())?;
            }
            return Ok(current.clone());
        }

        *cache = CacheSlot::Cached(fresh.clone());
        Ok(fresh)
    }

    /// Mutable access to the field's cached value.
    ///
    /// The guard does not write through when dropped; the next [`get`]
    /// notices the store no longer matches the cache and catches it up.
    /// Yields `None` for a field with no record and no default.
    ///
    /// [`get`]: BoundField::get
    pub fn get_mut(&self) -> Result<Option<FieldGuard<'_, T>>> {
        let mut cache = self.cache.lock();

        if let CacheSlot::Vacant = &*cache {
            *cache = CacheSlot::Cached(self.load()?);
        }

        let guard = MutexGuard::try_map(cache, |slot| match slot {
            CacheSlot::Cached(Some(value)) => Some(value),
            _ => None,
        })
        .ok();

        Ok(guard.map(|inner| FieldGuard { inner }))
    }

    /// Writes `value` to the store and caches it.
    pub fn set(&self, value: T) -> Result<()> {
        self.persist(Some(&value))?;
        *self.cache.lock() = CacheSlot::Cached(Some(value));
        Ok(())
    }

    /// Removes the field's record from the store.
    ///
    /// The next read sees the configured default again, or `None`.
    pub fn clear(&self) -> Result<()> {
        self.persist(None)?;
        *self.cache.lock() = CacheSlot::Cached(None);
        Ok(())
    }

    /// Decodes the store's current record for this field.
    fn load(&self) -> Result<Option<T>> {
        let raw = self.store.read(&self.key)?;
        codec::decode(raw.as_deref(), self.default.as_ref(), self.cipher.as_ref())
    }

    /// Writes a value, or its absence, through the codec to the store.
    fn persist(&self, value: Option<&T>) -> Result<()> {
        match value {
            Some(value) => {
                let text = codec::encode(value, self.cipher.as_ref())?;
                self.store.write(&self.key, &text)
            }
            None => self.store.delete(&self.key),
        }
    }
}

/// Exclusive view into a bound field's cached value, handed out by
/// [`BoundField::get_mut`].
pub struct FieldGuard<'a, T> {
    inner: MappedMutexGuard<'a, T>,
}

impl<T> std::ops::Deref for FieldGuard<'_, T> {
    type Target = T;

    fn deref(&self) -> &T {
        &self.inner
    }
}

impl<T> std::ops::DerefMut for FieldGuard<'_, T> {
    fn deref_mut(&mut self) -> &mut T {
        &mut self.inner
    }
}
