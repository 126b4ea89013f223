//! Session domain module.
//!
//! # Module Structure
//!
//! - `model`: Core session domain model (`Session`)
//! - `message`: Conversation message types (`Message`, `SearchResultItem`)
//! - `mode`: Conversation mode (`ChatMode`)
//! - `repository`: Repository trait for session persistence

mod message;
mod mode;
mod model;
mod repository;

pub use message::{Message, SearchResultItem};
pub use mode::ChatMode;
pub use model::{DEFAULT_MODEL, Session, TITLE_MAX_CHARS};
pub use repository::SessionRepository;
