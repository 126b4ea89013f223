//! Key-value store implementations.

use crate::storage::{AtomicFile, StorageError};
use educhat_core::storage::KeyValueStore;
use educhat_core::{EduChatError, Result};
use std::collections::HashMap;
use std::path::PathBuf;
use std::sync::Mutex;

/// Stores each key in its own file under a directory.
///
/// Keys map to `<dir>/<key>.json`; writes go through [`AtomicFile`].
pub struct FileKeyValueStore {
    dir: PathBuf,
}

impl FileKeyValueStore {
    pub fn new(dir: PathBuf) -> Self {
        Self { dir }
    }

    fn file_for(&self, key: &str) -> std::result::Result<AtomicFile, StorageError> {
        let valid = !key.is_empty()
            && key
                .chars()
                .all(|c| c.is_ascii_alphanumeric() || c == '_' || c == '-');
        if !valid {
            return Err(StorageError::InvalidData(format!(
                "Invalid store key: {key:?}"
            )));
        }
        Ok(AtomicFile::new(self.dir.join(format!("{key}.json"))))
    }
}

impl KeyValueStore for FileKeyValueStore {
    fn get(&self, key: &str) -> Result<Option<Vec<u8>>> {
        Ok(self.file_for(key)?.read()?)
    }

    fn set(&self, key: &str, value: &[u8]) -> Result<()> {
        self.file_for(key)?.write(value)?;
        tracing::debug!("[FileKeyValueStore] Wrote {} bytes to '{}'", value.len(), key);
        Ok(())
    }

    fn remove(&self, key: &str) -> Result<()> {
        Ok(self.file_for(key)?.remove()?)
    }
}

/// In-process store, mainly for tests.
#[derive(Default)]
pub struct MemoryKeyValueStore {
    entries: Mutex<HashMap<String, Vec<u8>>>,
}

impl MemoryKeyValueStore {
    pub fn new() -> Self {
        Self::default()
    }

    fn entries(&self) -> Result<std::sync::MutexGuard<'_, HashMap<String, Vec<u8>>>> {
        self.entries
            .lock()
            .map_err(|e| EduChatError::internal(format!("Memory store lock poisoned: {e}")))
    }
}

impl KeyValueStore for MemoryKeyValueStore {
    fn get(&self, key: &str) -> Result<Option<Vec<u8>>> {
        Ok(self.entries()?.get(key).cloned())
    }

    fn set(&self, key: &str, value: &[u8]) -> Result<()> {
        self.entries()?.insert(key.to_string(), value.to_vec());
        Ok(())
    }

    fn remove(&self, key: &str) -> Result<()> {
        self.entries()?.remove(key);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn exercise(store: &dyn KeyValueStore) {
        assert!(store.get("chat_sessions").unwrap().is_none());

        store.set("chat_sessions", b"[1,2]").unwrap();
        assert_eq!(store.get("chat_sessions").unwrap().unwrap(), b"[1,2]");

        store.set("chat_sessions", b"[3]").unwrap();
        assert_eq!(store.get("chat_sessions").unwrap().unwrap(), b"[3]");

        store.remove("chat_sessions").unwrap();
        store.remove("chat_sessions").unwrap();
        assert!(store.get("chat_sessions").unwrap().is_none());
    }

    #[test]
    fn test_memory_store() {
        exercise(&MemoryKeyValueStore::new());
    }

    #[test]
    fn test_file_store() {
        let temp_dir = TempDir::new().unwrap();
        exercise(&FileKeyValueStore::new(temp_dir.path().join("store")));
    }

    #[test]
    fn test_file_store_survives_reopen() {
        let temp_dir = TempDir::new().unwrap();
        let dir = temp_dir.path().join("store");

        FileKeyValueStore::new(dir.clone())
            .set("openai_api_key", b"\"sk-1\"")
            .unwrap();

        let reopened = FileKeyValueStore::new(dir.clone());
        assert_eq!(reopened.get("openai_api_key").unwrap().unwrap(), b"\"sk-1\"");
        assert!(dir.join("openai_api_key.json").exists());
    }

    #[test]
    fn test_file_store_rejects_path_like_keys() {
        let temp_dir = TempDir::new().unwrap();
        let store = FileKeyValueStore::new(temp_dir.path().to_path_buf());

        assert!(store.set("../escape", b"x").is_err());
        assert!(store.get("").is_err());
    }
}
