//! Secret configuration file storage.
//!
//! Provides loading of secret configuration from `secret.json`.

use super::{AtomicFile, StorageError};
use educhat_core::config::SecretConfig;
use std::path::PathBuf;

/// Storage for the secret configuration file (secret.json).
///
/// Responsibilities:
/// - Load secret.json from the config directory
/// - Parse JSON into the SecretConfig domain model
///
/// Does NOT:
/// - Validate API keys
/// - Handle encryption (plaintext JSON storage)
///
/// # Security Note
///
/// This storage reads plaintext JSON files. The secret.json file should have
/// appropriate file permissions (e.g., 600) to prevent unauthorized access.
pub struct SecretStorage {
    file: AtomicFile,
}

impl SecretStorage {
    pub fn new(path: PathBuf) -> Self {
        Self {
            file: AtomicFile::new(path),
        }
    }

    /// Loads the secret configuration.
    ///
    /// # Returns
    ///
    /// - `Ok(Some(SecretConfig))`: Successfully loaded and parsed
    /// - `Ok(None)`: File doesn't exist or is blank
    /// - `Err`: Failed to read file or invalid JSON
    pub fn load(&self) -> Result<Option<SecretConfig>, StorageError> {
        match self.file.read_to_string()? {
            Some(content) => Ok(Some(serde_json::from_str(&content)?)),
            None => Ok(None),
        }
    }

    /// Returns the OpenAI key from the file, if present and non-empty.
    pub fn openai_api_key(&self) -> Result<Option<String>, StorageError> {
        Ok(self
            .load()?
            .and_then(|config| config.openai)
            .map(|openai| openai.api_key)
            .filter(|key| !key.trim().is_empty()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_load_nonexistent_file() {
        let temp_dir = TempDir::new().unwrap();
        let storage = SecretStorage::new(temp_dir.path().join("secret.json"));

        assert!(storage.load().unwrap().is_none());
        assert!(storage.openai_api_key().unwrap().is_none());
    }

    #[test]
    fn test_load_openai_key() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("secret.json");
        std::fs::write(
            &path,
            r#"{"openai": {"api_key": "sk-test", "model_name": "gpt-4"}}"#,
        )
        .unwrap();

        let storage = SecretStorage::new(path);
        assert_eq!(storage.openai_api_key().unwrap().as_deref(), Some("sk-test"));
    }

    #[test]
    fn test_empty_key_is_ignored() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("secret.json");
        std::fs::write(&path, r#"{"openai": {"api_key": ""}}"#).unwrap();

        assert!(SecretStorage::new(path).openai_api_key().unwrap().is_none());
    }

    #[test]
    fn test_invalid_json() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("secret.json");
        std::fs::write(&path, "{ not json").unwrap();

        let result = SecretStorage::new(path).load();
        assert!(matches!(result, Err(StorageError::Json(_))));
    }
}
