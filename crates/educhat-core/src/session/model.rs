//! Session domain model.

use super::message::Message;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Model tag recorded on new sessions when none is configured.
pub const DEFAULT_MODEL: &str = "gpt-5-nano";

/// Longest title kept verbatim, in characters.
pub const TITLE_MAX_CHARS: usize = 30;

const TITLE_TRUNCATED_CHARS: usize = TITLE_MAX_CHARS - 3;

/// One persisted, titled conversation thread.
///
/// A session contains:
/// - The ordered message log (insertion order is conversational order)
/// - The model tag selected when the session was created
/// - A title derived from the first user message
/// - The creation timestamp
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Session {
    /// Unique session identifier (UUID format)
    pub id: String,
    /// Conversation log
    pub messages: Vec<Message>,
    /// Model tag, e.g. `gpt-5-nano`
    pub selected_model: String,
    /// Empty until the first user message has been added
    pub title: String,
    /// Timestamp when the session was created
    pub created_at: DateTime<Utc>,
}

impl Session {
    /// Creates an empty session for the given model.
    pub fn new(selected_model: impl Into<String>) -> Self {
        Self {
            id: Uuid::new_v4().to_string(),
            messages: Vec::new(),
            selected_model: selected_model.into(),
            title: String::new(),
            created_at: Utc::now(),
        }
    }

    /// Appends a message to the log.
    pub fn add_message(&mut self, message: Message) {
        self.messages.push(message);
    }

    /// Sets the title from the first user message.
    ///
    /// Does nothing when a title already exists or no user message has been
    /// added yet. Titles longer than 30 characters keep their first 27
    /// characters followed by `...`.
    pub fn derive_title_from_first_user_message(&mut self) {
        if !self.title.is_empty() {
            return;
        }
        let Some(first) = self.messages.iter().find(|m| m.is_from_user) else {
            return;
        };

        let content = &first.content;
        self.title = if content.chars().count() <= TITLE_MAX_CHARS {
            content.clone()
        } else {
            let head: String = content.chars().take(TITLE_TRUNCATED_CHARS).collect();
            format!("{head}...")
        };
    }

    /// True iff the user has written at least one message.
    pub fn has_started(&self) -> bool {
        self.messages.iter().any(|m| m.is_from_user)
    }

    /// Iterates over the user's messages in conversational order.
    pub fn user_messages(&self) -> impl Iterator<Item = &Message> {
        self.messages.iter().filter(|m| m.is_from_user)
    }

    /// Returns up to `n` of the most recent user messages, oldest first.
    pub fn last_user_messages(&self, n: usize) -> Vec<&Message> {
        let users: Vec<&Message> = self.user_messages().collect();
        let skip = users.len().saturating_sub(n);
        users.into_iter().skip(skip).collect()
    }

    /// True if any message contains one of the given markers.
    pub fn contains_any(&self, markers: &[&str]) -> bool {
        self.messages
            .iter()
            .any(|m| markers.iter().any(|marker| m.content.contains(marker)))
    }

    /// Drops the whole message log. The title is kept.
    pub fn clear_messages(&mut self) {
        self.messages.clear();
    }

    /// Keeps the log below `max_pairs` user/assistant pairs by removing the
    /// oldest pair while the log holds `max_pairs * 2` messages or more.
    ///
    /// Returns the number of messages removed.
    pub fn trim_to_recent_pairs(&mut self, max_pairs: usize) -> usize {
        let limit = max_pairs * 2;
        let mut removed = 0;
        while limit > 0 && self.messages.len() >= limit {
            self.messages.drain(..2);
            removed += 2;
        }
        removed
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn text_of_len(n: usize) -> String {
        "가".repeat(n)
    }

    #[test]
    fn test_new_session_is_untitled_and_empty() {
        let session = Session::new(DEFAULT_MODEL);
        assert!(session.title.is_empty());
        assert!(session.messages.is_empty());
        assert!(!session.has_started());
        assert_eq!(session.selected_model, "gpt-5-nano");
    }

    #[test]
    fn test_title_not_derived_without_user_message() {
        let mut session = Session::new(DEFAULT_MODEL);
        session.add_message(Message::assistant("welcome"));
        session.derive_title_from_first_user_message();
        assert!(session.title.is_empty());
    }

    #[test]
    fn test_title_boundary_lengths() {
        let mut at_limit = Session::new(DEFAULT_MODEL);
        at_limit.add_message(Message::user(text_of_len(30)));
        at_limit.derive_title_from_first_user_message();
        assert_eq!(at_limit.title, text_of_len(30));

        let mut over_limit = Session::new(DEFAULT_MODEL);
        over_limit.add_message(Message::user(text_of_len(31)));
        over_limit.derive_title_from_first_user_message();
        assert_eq!(over_limit.title, format!("{}...", text_of_len(27)));
        assert_eq!(over_limit.title.chars().count(), 30);

        let mut long = Session::new(DEFAULT_MODEL);
        long.add_message(Message::user(text_of_len(50)));
        long.derive_title_from_first_user_message();
        assert_eq!(long.title, format!("{}...", text_of_len(27)));
    }

    #[test]
    fn test_title_is_derived_once() {
        let mut session = Session::new(DEFAULT_MODEL);
        session.add_message(Message::user("first question"));
        session.derive_title_from_first_user_message();
        session.add_message(Message::user("second question"));
        session.clear_messages();
        session.add_message(Message::user("third question"));
        session.derive_title_from_first_user_message();
        assert_eq!(session.title, "first question");
    }

    #[test]
    fn test_last_user_messages_keeps_order() {
        let mut session = Session::new(DEFAULT_MODEL);
        session.add_message(Message::user("one"));
        session.add_message(Message::assistant("a"));
        session.add_message(Message::user("two"));
        session.add_message(Message::assistant("b"));
        session.add_message(Message::user("three"));

        let recent: Vec<&str> = session
            .last_user_messages(2)
            .into_iter()
            .map(|m| m.content.as_str())
            .collect();
        assert_eq!(recent, vec!["two", "three"]);
        assert!(session.has_started());
    }

    #[test]
    fn test_trim_to_recent_pairs() {
        let mut session = Session::new(DEFAULT_MODEL);
        for i in 0..3 {
            session.add_message(Message::user(format!("q{i}")));
            session.add_message(Message::assistant(format!("a{i}")));
        }

        assert_eq!(session.trim_to_recent_pairs(3), 2);
        assert_eq!(session.messages.len(), 4);
        assert_eq!(session.messages[0].content, "q1");

        assert_eq!(session.trim_to_recent_pairs(3), 0);
    }

    #[test]
    fn test_contains_any() {
        let mut session = Session::new(DEFAULT_MODEL);
        session.add_message(Message::assistant("**딥러닝 모드: 주제 선택**"));
        assert!(session.contains_any(&["딥러닝 모드:"]));
        assert!(!session.contains_any(&["퍼셉트론"]));
    }
}
