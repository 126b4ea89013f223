//! Credential store trait.
//!
//! Defines the interface for reading and updating the model-service API key.

use crate::error::Result;
use async_trait::async_trait;

/// Prefix every OpenAI secret key carries.
pub const API_KEY_PREFIX: &str = "sk-";

/// Returns `true` when `key` looks like an OpenAI secret key.
pub fn is_valid_api_key(key: &str) -> bool {
    key.trim().starts_with(API_KEY_PREFIX)
}

/// Access to the locally stored API credential.
///
/// # Security Note
///
/// Implementations must never log the key itself.
#[async_trait]
pub trait CredentialStore: Send + Sync {
    /// Returns the configured key, or `None` when nothing usable is set.
    async fn api_key(&self) -> Result<Option<String>>;

    /// Stores a new key, replacing any previous one.
    async fn set_api_key(&self, key: &str) -> Result<()>;

    /// Removes the stored key.
    async fn clear_api_key(&self) -> Result<()>;

    /// Checks whether a credential is configured.
    async fn has_api_key(&self) -> bool {
        matches!(self.api_key().await, Ok(Some(key)) if !key.trim().is_empty())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_api_key_prefix() {
        assert!(is_valid_api_key("sk-abc"));
        assert!(is_valid_api_key("  sk-abc  "));
        assert!(!is_valid_api_key("pk-abc"));
        assert!(!is_valid_api_key(""));
    }
}
