//! Storage layer for atomic file operations.

mod atomic_file;
mod config_storage;
mod secret_storage;

pub use atomic_file::AtomicFile;
pub use config_storage::ConfigStorage;
pub use secret_storage::SecretStorage;

use educhat_core::EduChatError;
use std::path::PathBuf;
use thiserror::Error;

/// Errors that can occur during file storage operations.
#[derive(Debug, Error)]
pub enum StorageError {
    /// File I/O error.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
    /// TOML parsing error.
    #[error("TOML parse error: {0}")]
    TomlParse(#[from] toml::de::Error),
    /// TOML serialization error.
    #[error("TOML serialization error: {0}")]
    TomlSer(#[from] toml::ser::Error),
    /// JSON parsing or serialization error.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
    /// File locking error.
    #[error("Lock error: {0}")]
    Lock(String),
    /// Path has no parent directory or file name.
    #[error("Invalid storage path: {}", .0.display())]
    InvalidPath(PathBuf),
    /// Schema migration error.
    #[error("Migration error: {0}")]
    Migration(#[from] version_migrate::MigrationError),
    /// Stored bytes are not in the expected shape.
    #[error("Invalid data: {0}")]
    InvalidData(String),
}

impl From<StorageError> for EduChatError {
    fn from(err: StorageError) -> Self {
        match err {
            StorageError::Io(e) => e.into(),
            StorageError::TomlParse(e) => e.into(),
            StorageError::TomlSer(e) => e.into(),
            StorageError::Json(e) => e.into(),
            StorageError::Migration(e) => EduChatError::Serialization {
                format: "migration".to_string(),
                message: e.to_string(),
            },
            other => EduChatError::io(other.to_string()),
        }
    }
}
