//! Application config file storage.

use super::{AtomicFile, StorageError};
use educhat_core::config::AppConfig;
use std::path::PathBuf;

/// Reads and writes `config.toml`.
///
/// A missing or blank file yields [`AppConfig::default`]; a partial file
/// fills the remaining fields with their defaults.
pub struct ConfigStorage {
    file: AtomicFile,
}

impl ConfigStorage {
    pub fn new(path: PathBuf) -> Self {
        Self {
            file: AtomicFile::new(path),
        }
    }

    pub fn load(&self) -> Result<AppConfig, StorageError> {
        match self.file.read_to_string()? {
            Some(content) => Ok(toml::from_str(&content)?),
            None => {
                tracing::debug!(
                    "[ConfigStorage] No config at {}, using defaults",
                    self.file.path().display()
                );
                Ok(AppConfig::default())
            }
        }
    }

    pub fn save(&self, config: &AppConfig) -> Result<(), StorageError> {
        let content = toml::to_string_pretty(config)?;
        self.file.write(content.as_bytes())
    }
}
