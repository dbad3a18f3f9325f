// src/field/codec.rs
use serde::{de::DeserializeOwned, Serialize};
use serde_json::Value;

use super::cipher::RecordCipher;
use crate::error::{Result, VaultError};

/// Serializes `value` to the text stored under a field's key.
pub(crate) fn encode<T: Serialize>(value: &T, cipher: Option<&RecordCipher>) -> Result<String> {
    let json = serde_json::to_string(value)
        .map_err(|e| VaultError::UnsupportedValue(e.to_string()))?;

    match cipher {
        Some(cipher) => cipher.encrypt(&json),
        None => Ok(json),
    }
}

/// Reconstructs a value from the stored text, substituting or merging the
/// configured default.
///
/// An absent record (and a stored JSON `null`) yields the default, if any.
/// Stored objects are shallow-merged over an object-shaped default so that
/// records written before a field existed on `T` pick up the default's value
/// for it. Primitives and arrays are returned as stored, with no merge.
pub(crate) fn decode<T>(
    raw: Option<&str>,
    default: Option<&T>,
    cipher: Option<&RecordCipher>,
) -> Result<Option<T>>
where
    T: Serialize + DeserializeOwned + Clone,
{
    let Some(raw) = raw else {
        return Ok(default.cloned());
    };

    let json = match cipher {
        Some(cipher) => cipher.decrypt(raw)?,
        None => raw.to_string(),
    };

    let stored: Value =
        serde_json::from_str(&json).map_err(|e| VaultError::MalformedRecord(e.to_string()))?;

    let merged = match (stored, default) {
        (Value::Null, _) => return Ok(default.cloned()),
        (Value::Object(fields), Some(default)) => {
            let mut base = serde_json::to_value(default)
                .map_err(|e| VaultError::UnsupportedValue(e.to_string()))?;
            match base.as_object_mut() {
                Some(defaults) => {
                    for (name, value) in fields {
                        defaults.insert(name, value);
                    }
                    base
                }
                // Object record over a non-object default: the record wins.
                None => Value::Object(fields),
            }
        }
        (stored, _) => stored,
    };

    let value = serde_json::from_value(merged)
        .map_err(|e| VaultError::MalformedRecord(e.to_string()))?;

    Ok(Some(value))
}
