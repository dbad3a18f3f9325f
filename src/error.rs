// src/error.rs
use thiserror::Error;

#[derive(Debug, Error)]
pub enum VaultError {
    #[error("Storage unavailable: {0}")]
    Unavailable(String),

    #[error("Encryption error: {0}")]
    Encryption(String),

    #[error("Decryption error: {0}")]
    Decryption(String),

    #[error("Malformed record: {0}")]
    MalformedRecord(String),

    #[error("Unsupported value: {0}")]
    UnsupportedValue(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

pub type Result<T> = std::result::Result<T, VaultError>;
