//! Application configuration types.

use crate::session::DEFAULT_MODEL;
use serde::{Deserialize, Serialize};

pub const DEFAULT_API_BASE_URL: &str = "https://api.openai.com/v1";

/// Settings read from `config.toml`.
///
/// Every field has a default, so an empty or partial file is valid.
#[derive(Deserialize, Serialize, Debug, Clone, PartialEq, Eq)]
pub struct AppConfig {
    /// Model tag sent to the chat-completions endpoint.
    #[serde(default = "default_model")]
    pub model: String,
    #[serde(default = "default_api_base_url")]
    pub api_base_url: String,
    /// Request timeout for normal-mode answers, in seconds.
    #[serde(default = "default_normal_timeout_secs")]
    pub normal_timeout_secs: u64,
    /// Request timeout for deep-mode answers, in seconds.
    #[serde(default = "default_deep_timeout_secs")]
    pub deep_timeout_secs: u64,
    /// Number of model answers kept in the response cache.
    #[serde(default = "default_cache_capacity")]
    pub cache_capacity: usize,
    /// User/assistant pairs kept in a normal-mode session before the oldest
    /// pair is dropped.
    #[serde(default = "default_history_pairs")]
    pub history_pairs: usize,
}

fn default_model() -> String {
    DEFAULT_MODEL.to_string()
}

fn default_api_base_url() -> String {
    DEFAULT_API_BASE_URL.to_string()
}

fn default_normal_timeout_secs() -> u64 {
    60
}

fn default_deep_timeout_secs() -> u64 {
    300
}

fn default_cache_capacity() -> usize {
    20
}

fn default_history_pairs() -> usize {
    3
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            model: default_model(),
            api_base_url: default_api_base_url(),
            normal_timeout_secs: default_normal_timeout_secs(),
            deep_timeout_secs: default_deep_timeout_secs(),
            cache_capacity: default_cache_capacity(),
            history_pairs: default_history_pairs(),
        }
    }
}

/// Contents of `secret.json`.
#[derive(Deserialize, Serialize, Debug, Clone, Default, PartialEq, Eq)]
pub struct SecretConfig {
    /// OpenAI API configuration
    #[serde(default)]
    pub openai: Option<OpenAiConfig>,
}

/// OpenAI API configuration
#[derive(Deserialize, Serialize, Debug, Clone, PartialEq, Eq)]
pub struct OpenAiConfig {
    pub api_key: String,
    #[serde(default)]
    pub model_name: Option<String>,
}
