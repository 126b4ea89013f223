//! Unified path management for EduChat configuration files.
//!
//! Every file the application writes lives under one configuration
//! directory resolved through the `dirs` crate, so the layout is the same on
//! Linux, macOS and Windows.

use std::path::{Path, PathBuf};
use thiserror::Error;

const APP_DIR_NAME: &str = "educhat";

/// Errors that can occur during path resolution.
#[derive(Debug, Error)]
pub enum PathError {
    /// Home directory could not be determined.
    #[error("Cannot find home directory")]
    HomeDirNotFound,
}

/// Path layout rooted at a configuration directory.
///
/// # Directory Structure
///
/// ```text
/// ~/.config/educhat/           # Config directory
/// ├── config.toml              # Application configuration
/// ├── secret.json              # API keys
/// ├── store/                   # Key-value slots (one file per key)
/// │   ├── chat_sessions.json
/// │   └── openai_api_key.json
/// └── logs/                    # Application logs
///     └── educhat.log.YYYY-MM-DD
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EduChatPaths {
    root: PathBuf,
}

impl EduChatPaths {
    /// Resolves the platform configuration directory.
    pub fn resolve() -> Result<Self, PathError> {
        let base = dirs::config_dir().ok_or(PathError::HomeDirNotFound)?;
        Ok(Self::with_root(base.join(APP_DIR_NAME)))
    }

    /// Uses `root` as the configuration directory (for testing).
    pub fn with_root(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    pub fn config_dir(&self) -> &Path {
        &self.root
    }

    /// Returns the path to the main configuration file.
    pub fn config_file(&self) -> PathBuf {
        self.root.join("config.toml")
    }

    /// Returns the path to the secrets file.
    ///
    /// # Security Note
    ///
    /// Ensure this file has appropriate permissions (e.g., 600) to prevent
    /// unauthorized access.
    pub fn secret_file(&self) -> PathBuf {
        self.root.join("secret.json")
    }

    /// Directory holding the key-value store files.
    pub fn store_dir(&self) -> PathBuf {
        self.root.join("store")
    }

    pub fn logs_dir(&self) -> PathBuf {
        self.root.join("logs")
    }
}
