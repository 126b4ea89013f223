//! Application layer for EduChat.
//!
//! This crate wires the domain types together into the conversation
//! orchestrator used by the front ends.

pub mod orchestrator;
pub mod response_cache;

pub use orchestrator::{
    ChatOrchestrator, ChatSnapshot, OrchestratorDeps, OrchestratorOptions, PendingReply,
    SendOutcome,
};
pub use response_cache::ResponseCache;
