//! Session repository trait.
//!
//! Defines the interface for session persistence operations.

use super::model::Session;
use crate::error::Result;
use async_trait::async_trait;

/// An abstract repository for the persisted session history.
///
/// The whole history is written and read as one unit, so implementations
/// only have to provide snapshot semantics rather than per-session updates.
#[async_trait]
pub trait SessionRepository: Send + Sync {
    /// Loads every stored session.
    ///
    /// # Returns
    ///
    /// - `Ok(Some(sessions))`: History found, in stored order
    /// - `Ok(None)`: Nothing has been stored yet
    /// - `Err(_)`: Stored data exists but could not be read
    async fn load_sessions(&self) -> Result<Option<Vec<Session>>>;

    /// Replaces the stored history with `sessions`.
    async fn save_sessions(&self, sessions: &[Session]) -> Result<()>;
}
