// src/field/options.rs

/// Per-field settings, fixed when the field is bound.
#[derive(Debug, Clone)]
pub struct FieldOptions<T> {
    pub(crate) key: Option<String>,
    pub(crate) default: Option<T>,
    pub(crate) encrypt_with: Option<String>,
}

impl<T> FieldOptions<T> {
    pub fn new() -> Self {
        Self {
            key: None,
            default: None,
            encrypt_with: None,
        }
    }

    /// Value returned when the backing store holds no record for the field.
    ///
    /// Struct defaults also participate in decoding: fields missing from a
    /// stored record are filled in from the default. See
    /// [`BoundField::get`](crate::BoundField::get).
    pub fn default_value(mut self, value: T) -> Self {
        self.default = Some(value);
        self
    }

    /// Stores the field under `key` instead of the field's own name.
    pub fn key(mut self, key: impl Into<String>) -> Self {
        self.key = Some(key.into());
        self
    }

    /// Encrypts records with a key derived from `passphrase` before they
    /// reach the backing store.
    pub fn encrypt_with(mut self, passphrase: impl Into<String>) -> Self {
        self.encrypt_with = Some(passphrase.into());
        self
    }
}

impl<T> Default for FieldOptions<T> {
    fn default() -> Self {
        Self::new()
    }
}
