//! Model service integration for EduChat.

pub mod openai_gateway;
pub mod prompts;
pub mod supported_models;

pub use openai_gateway::OpenAiGateway;
pub use supported_models::{SUPPORTED_MODELS, is_supported_model};
