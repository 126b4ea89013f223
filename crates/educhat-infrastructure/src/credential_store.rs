//! API credential resolution.

use crate::storage::SecretStorage;
use async_trait::async_trait;
use educhat_core::Result;
use educhat_core::secret::CredentialStore;
use educhat_core::storage::{API_KEY_KEY, KeyValueStore};
use std::sync::Arc;

/// Environment variable consulted when no key is stored.
pub const API_KEY_ENV_VAR: &str = "OPENAI_API_KEY";

/// Resolves the OpenAI key from, in order:
///
/// 1. the [`API_KEY_KEY`] slot of the key-value store
/// 2. `secret.json`
/// 3. the `OPENAI_API_KEY` environment variable
///
/// Only the first source is writable.
pub struct KeyValueCredentialStore {
    store: Arc<dyn KeyValueStore>,
    secrets: Option<SecretStorage>,
    read_env: bool,
}

impl KeyValueCredentialStore {
    pub fn new(store: Arc<dyn KeyValueStore>) -> Self {
        Self {
            store,
            secrets: None,
            read_env: false,
        }
    }

    /// Falls back to `secret.json` when the store slot is empty.
    pub fn with_secret_storage(mut self, secrets: SecretStorage) -> Self {
        self.secrets = Some(secrets);
        self
    }

    /// Falls back to `OPENAI_API_KEY` as a last resort.
    pub fn with_env_fallback(mut self) -> Self {
        self.read_env = true;
        self
    }

    fn stored_key(&self) -> Result<Option<String>> {
        let Some(bytes) = self.store.get(API_KEY_KEY)? else {
            return Ok(None);
        };
        let key: String = serde_json::from_slice(&bytes)?;
        Ok(non_empty(key))
    }

    fn secret_file_key(&self) -> Option<String> {
        let secrets = self.secrets.as_ref()?;
        match secrets.openai_api_key() {
            Ok(key) => key,
            Err(e) => {
                tracing::warn!("[CredentialStore] Ignoring unreadable secret file: {}", e);
                None
            }
        }
    }

    fn env_key(&self) -> Option<String> {
        if !self.read_env {
            return None;
        }
        std::env::var(API_KEY_ENV_VAR).ok().and_then(non_empty)
    }
}

fn non_empty(key: String) -> Option<String> {
    let trimmed = key.trim();
    if trimmed.is_empty() {
        None
    } else {
        Some(trimmed.to_string())
    }
}

#[async_trait]
impl CredentialStore for KeyValueCredentialStore {
    async fn api_key(&self) -> Result<Option<String>> {
        if let Some(key) = self.stored_key()? {
            return Ok(Some(key));
        }
        if let Some(key) = self.secret_file_key() {
            tracing::debug!("[CredentialStore] Using key from secret file");
            return Ok(Some(key));
        }
        Ok(self.env_key())
    }

    async fn set_api_key(&self, key: &str) -> Result<()> {
        let bytes = serde_json::to_vec(key.trim())?;
        self.store.set(API_KEY_KEY, &bytes)?;
        tracing::info!("[CredentialStore] API key updated");
        Ok(())
    }

    async fn clear_api_key(&self) -> Result<()> {
        self.store.remove(API_KEY_KEY)?;
        tracing::info!("[CredentialStore] API key cleared");
        Ok(())
    }
}
