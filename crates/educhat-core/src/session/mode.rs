//! Conversation mode.

use serde::{Deserialize, Serialize};

/// The two answering styles the assistant supports.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ChatMode {
    /// Short two-section answers.
    #[default]
    Normal,
    /// Long six-section answers behind a clarifying sub-dialogue.
    DeepLearning,
}

impl ChatMode {
    /// Maps the deep-mode switch onto a mode.
    pub fn from_deep(deep: bool) -> Self {
        if deep {
            ChatMode::DeepLearning
        } else {
            ChatMode::Normal
        }
    }

    /// Stable tag used in cache keys and logs.
    pub fn tag(self) -> &'static str {
        match self {
            ChatMode::Normal => "normal",
            ChatMode::DeepLearning => "deep",
        }
    }
}

impl std::fmt::Display for ChatMode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.tag())
    }
}
