//! Domain layer for EduChat.
//!
//! Holds the conversation data model, the canned-topic table, the response
//! formatter and the traits behind which persistence and the model service
//! live. Nothing in this crate performs I/O.

pub mod config;
pub mod error;
pub mod formatter;
pub mod gateway;
pub mod secret;
pub mod session;
pub mod storage;
pub mod topic;

pub use error::{EduChatError, Result};
pub use gateway::{GatewayError, ModelGateway};
pub use session::{ChatMode, Message, SearchResultItem, Session};
