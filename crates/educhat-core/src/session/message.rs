//! Conversation message types.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// A web search hit attached to a message.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SearchResultItem {
    pub title: String,
    pub snippet: String,
    pub url: String,
}

/// A single line of conversation.
///
/// Messages are never mutated after creation; a session only appends them
/// or drops them as a whole.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Message {
    /// Unique message identifier (UUID format)
    pub id: String,
    /// The text of the message.
    pub content: String,
    /// `true` when the user wrote it, `false` for assistant output.
    pub is_from_user: bool,
    /// Creation time.
    pub timestamp: DateTime<Utc>,
    /// Optional search hits shown beneath the message.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub search_results: Option<Vec<SearchResultItem>>,
}

impl Message {
    fn new(content: impl Into<String>, is_from_user: bool) -> Self {
        Self {
            id: Uuid::new_v4().to_string(),
            content: content.into(),
            is_from_user,
            timestamp: Utc::now(),
            search_results: None,
        }
    }

    /// Creates a message written by the user.
    pub fn user(content: impl Into<String>) -> Self {
        Self::new(content, true)
    }

    /// Creates a message produced by the assistant.
    pub fn assistant(content: impl Into<String>) -> Self {
        Self::new(content, false)
    }

    /// Attaches search results to the message.
    pub fn with_search_results(mut self, results: Vec<SearchResultItem>) -> Self {
        self.search_results = Some(results);
        self
    }
}
