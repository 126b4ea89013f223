//! OpenAiGateway - Direct REST API implementation for OpenAI chat completions.
//!
//! The API key is read from the credential store on every call, so a key
//! entered while the application runs takes effect on the next message.

use crate::prompts::system_instruction;
use crate::supported_models::is_supported_model;
use async_trait::async_trait;
use educhat_core::config::AppConfig;
use educhat_core::secret::{CredentialStore, is_valid_api_key};
use educhat_core::{ChatMode, GatewayError, ModelGateway};
use reqwest::{Client, StatusCode};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use std::time::Duration;

/// Gateway implementation that talks to the OpenAI HTTP API.
#[derive(Clone)]
pub struct OpenAiGateway {
    client: Client,
    credentials: Arc<dyn CredentialStore>,
    model: String,
    endpoint: String,
    normal_timeout: Duration,
    deep_timeout: Duration,
}

impl OpenAiGateway {
    /// Creates a gateway using the model, base URL and timeouts in `config`.
    pub fn new(credentials: Arc<dyn CredentialStore>, config: &AppConfig) -> Self {
        if !is_supported_model(&config.model) {
            tracing::warn!(
                "[OpenAiGateway] Model '{}' is not in the supported list, sending it anyway",
                config.model
            );
        }
        Self {
            client: Client::new(),
            credentials,
            model: config.model.clone(),
            endpoint: completions_endpoint(&config.api_base_url),
            normal_timeout: Duration::from_secs(config.normal_timeout_secs),
            deep_timeout: Duration::from_secs(config.deep_timeout_secs),
        }
    }

    fn timeout_for(&self, mode: ChatMode) -> Duration {
        match mode {
            ChatMode::Normal => self.normal_timeout,
            ChatMode::DeepLearning => self.deep_timeout,
        }
    }

    async fn resolve_api_key(&self) -> Result<String, GatewayError> {
        let key = match self.credentials.api_key().await {
            Ok(key) => key,
            Err(e) => {
                tracing::warn!("[OpenAiGateway] Failed to read API key: {}", e);
                None
            }
        };
        key.filter(|k| is_valid_api_key(k))
            .ok_or(GatewayError::MissingCredential)
    }

    async fn send_request(
        &self,
        api_key: &str,
        body: &ChatCompletionRequest<'_>,
        timeout: Duration,
    ) -> Result<String, GatewayError> {
        let seconds = timeout.as_secs();
        let map_transport = move |err: reqwest::Error| {
            if err.is_timeout() {
                GatewayError::Timeout { seconds }
            } else {
                GatewayError::Network(format!("OpenAI API request failed: {err}"))
            }
        };

        let response = self
            .client
            .post(&self.endpoint)
            .bearer_auth(api_key)
            .timeout(timeout)
            .json(body)
            .send()
            .await
            .map_err(map_transport)?;

        let status = response.status();
        let body_text = response.text().await.map_err(map_transport)?;

        if !status.is_success() {
            return Err(map_http_error(status, &body_text));
        }

        let parsed: ChatCompletionResponse = serde_json::from_str(&body_text).map_err(|err| {
            GatewayError::InvalidResponse(format!("Failed to parse OpenAI response: {err}"))
        })?;
        extract_text_response(parsed)
    }
}

#[async_trait]
impl ModelGateway for OpenAiGateway {
    async fn generate(&self, prompt: &str, mode: ChatMode) -> Result<String, GatewayError> {
        let api_key = self.resolve_api_key().await?;
        let request = build_request(&self.model, prompt, mode);
        let timeout = self.timeout_for(mode);

        tracing::debug!(
            "[OpenAiGateway] Requesting {} completion from {} (timeout {}s)",
            mode,
            self.model,
            timeout.as_secs()
        );

        let result = self.send_request(&api_key, &request, timeout).await;
        if let Err(e) = &result {
            tracing::error!("[OpenAiGateway] {} completion failed: {}", mode, e);
        }
        result
    }
}

fn completions_endpoint(base_url: &str) -> String {
    format!("{}/chat/completions", base_url.trim_end_matches('/'))
}

fn build_request<'a>(model: &'a str, prompt: &'a str, mode: ChatMode) -> ChatCompletionRequest<'a> {
    ChatCompletionRequest {
        model,
        messages: vec![
            ChatMessage {
                role: "system",
                content: system_instruction(mode),
            },
            ChatMessage {
                role: "user",
                content: prompt,
            },
        ],
    }
}

#[derive(Serialize)]
struct ChatCompletionRequest<'a> {
    model: &'a str,
    messages: Vec<ChatMessage<'a>>,
}

#[derive(Serialize)]
struct ChatMessage<'a> {
    role: &'static str,
    content: &'a str,
}

#[derive(Deserialize)]
struct ChatCompletionResponse {
    choices: Vec<Choice>,
}

#[derive(Deserialize)]
struct Choice {
    message: ResponseMessage,
}

#[derive(Deserialize)]
struct ResponseMessage {
    content: Option<String>,
}

#[derive(Deserialize)]
struct ErrorResponse {
    error: ErrorBody,
}

#[derive(Deserialize)]
struct ErrorBody {
    message: String,
}

fn extract_text_response(response: ChatCompletionResponse) -> Result<String, GatewayError> {
    response
        .choices
        .into_iter()
        .next()
        .and_then(|choice| choice.message.content)
        .filter(|content| !content.trim().is_empty())
        .ok_or(GatewayError::EmptyResponse)
}

fn map_http_error(status: StatusCode, body: &str) -> GatewayError {
    let message = serde_json::from_str::<ErrorResponse>(body)
        .map(|wrapper| wrapper.error.message)
        .unwrap_or_else(|_| body.to_string());

    GatewayError::InvalidResponse(format!("HTTP {}: {}", status.as_u16(), message))
}
