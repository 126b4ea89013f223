//! Infrastructure layer for EduChat.
//!
//! File-backed implementations of the persistence seams declared in
//! `educhat-core`: the key-value store, the session repository and the
//! credential store, plus config and secret file loading.

pub mod credential_store;
pub mod dto;
pub mod kv_store;
pub mod paths;
pub mod session_repository;
pub mod storage;

pub use credential_store::KeyValueCredentialStore;
pub use kv_store::{FileKeyValueStore, MemoryKeyValueStore};
pub use paths::EduChatPaths;
pub use session_repository::KeyValueSessionRepository;
