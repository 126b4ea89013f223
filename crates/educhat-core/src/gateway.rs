//! Model gateway trait.
//!
//! The gateway turns a prompt into assistant text. It is slow and fallible;
//! callers run it outside any lock and report failures to the user.

use crate::session::ChatMode;
use async_trait::async_trait;
use thiserror::Error;

/// Failures of a single model call.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum GatewayError {
    #[error("API key is not configured")]
    MissingCredential,

    #[error("Request timed out after {seconds}s")]
    Timeout { seconds: u64 },

    #[error("Model returned an empty response")]
    EmptyResponse,

    #[error("Network error: {0}")]
    Network(String),

    #[error("Invalid response: {0}")]
    InvalidResponse(String),
}

/// Asynchronous access to a chat model.
#[async_trait]
pub trait ModelGateway: Send + Sync {
    /// Generates raw assistant text for `prompt`.
    ///
    /// `mode` selects the system instruction and the request timeout.
    async fn generate(&self, prompt: &str, mode: ChatMode) -> Result<String, GatewayError>;
}
