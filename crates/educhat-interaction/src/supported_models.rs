//! Supported OpenAI model IDs.
//!
//! | Model ID | Notes |
//! |----------|-------|
//! | `gpt-5-nano` | Default |
//! | `gpt-4` | |
//! | `gpt-3.5-turbo` | |
//!
//! Reference: <https://platform.openai.com/docs/models>
//!
//! When adding a model, extend [`SUPPORTED_MODELS`] and check the default in
//! `educhat_core::session::DEFAULT_MODEL`.

pub const SUPPORTED_MODELS: &[&str] = &["gpt-5-nano", "gpt-4", "gpt-3.5-turbo"];

pub fn is_supported_model(model: &str) -> bool {
    SUPPORTED_MODELS.contains(&model)
}
