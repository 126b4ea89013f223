//! Key-value persistence seam.

use crate::error::Result;

/// Slot holding the serialized session history.
pub const SESSIONS_KEY: &str = "chat_sessions";

/// Slot holding the OpenAI API key.
pub const API_KEY_KEY: &str = "openai_api_key";

/// Durable byte storage addressed by string keys.
///
/// Writes replace the whole value. Reading a key that was never written
/// yields `Ok(None)`.
pub trait KeyValueStore: Send + Sync {
    fn get(&self, key: &str) -> Result<Option<Vec<u8>>>;

    fn set(&self, key: &str, value: &[u8]) -> Result<()>;

    /// Removes the key. Removing a missing key is not an error.
    fn remove(&self, key: &str) -> Result<()>;
}
