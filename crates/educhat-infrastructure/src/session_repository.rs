//! Session repository backed by a key-value store.

use crate::dto::{SESSION_ENTITY, SessionV1_1_0, create_session_migrator, session_entries};
use crate::storage::StorageError;
use async_trait::async_trait;
use educhat_core::Result;
use educhat_core::session::{Session, SessionRepository};
use educhat_core::storage::{KeyValueStore, SESSIONS_KEY};
use std::sync::Arc;

/// Stores the whole session history as one JSON list of versioned session
/// entries under [`SESSIONS_KEY`].
pub struct KeyValueSessionRepository {
    store: Arc<dyn KeyValueStore>,
}

impl KeyValueSessionRepository {
    pub fn new(store: Arc<dyn KeyValueStore>) -> Self {
        Self { store }
    }
}

#[async_trait]
impl SessionRepository for KeyValueSessionRepository {
    async fn load_sessions(&self) -> Result<Option<Vec<Session>>> {
        let Some(bytes) = self.store.get(SESSIONS_KEY)? else {
            return Ok(None);
        };
        let document: serde_json::Value = serde_json::from_slice(&bytes)?;
        let entries = session_entries(document).ok_or_else(|| {
            StorageError::InvalidData("session history is not a list".to_string())
        })?;
        let sessions: Vec<Session> = create_session_migrator()
            .and_then(|migrator| migrator.load_vec_flat_from(SESSION_ENTITY, entries))
            .map_err(StorageError::from)?;
        tracing::debug!(
            "[KeyValueSessionRepository] Loaded {} sessions",
            sessions.len()
        );
        Ok(Some(sessions))
    }

    async fn save_sessions(&self, sessions: &[Session]) -> Result<()> {
        let dtos: Vec<SessionV1_1_0> = sessions.iter().map(SessionV1_1_0::from).collect();
        let json = create_session_migrator()
            .and_then(|migrator| migrator.save_vec_flat(dtos))
            .map_err(StorageError::from)?;
        self.store.set(SESSIONS_KEY, json.as_bytes())
    }
}
