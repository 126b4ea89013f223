//! Conversation orchestrator.
//!
//! [`ChatOrchestrator`] owns the session list, the active session, the deep
//! mode flag and the clarifying sub-dialogue. It routes every user message
//! to a canned answer, a fixed reply or the model, and publishes a
//! [`ChatSnapshot`] after each change.

mod heuristics;
mod preliminary;
pub mod replies;
mod state;

pub use preliminary::PreliminaryFlow;
pub use state::{ChatSnapshot, Dispatch, GenerationRequest};

use crate::response_cache::DEFAULT_CACHE_CAPACITY;
use educhat_core::config::AppConfig;
use educhat_core::secret::{CredentialStore, is_valid_api_key, API_KEY_PREFIX};
use educhat_core::session::{DEFAULT_MODEL, SessionRepository};
use educhat_core::{EduChatError, GatewayError, Message, ModelGateway, Result, Session};
use state::ChatState;
use std::sync::Arc;
use tokio::sync::{Mutex, watch};
use tokio::task::JoinHandle;

/// Default number of user/assistant pairs kept in a normal-mode session.
pub const DEFAULT_HISTORY_PAIRS: usize = 3;

/// Tunables for a [`ChatOrchestrator`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OrchestratorOptions {
    /// Capacity of the response cache. Zero disables caching.
    pub cache_capacity: usize,
    /// Pairs kept in a normal-mode session before the oldest is dropped.
    pub history_pairs: usize,
    /// Model tag recorded on new sessions.
    pub default_model: String,
    /// Seed for the greeting picker. `None` seeds from the OS.
    pub rng_seed: Option<u64>,
}

impl OrchestratorOptions {
    pub fn from_config(config: &AppConfig) -> Self {
        Self {
            cache_capacity: config.cache_capacity,
            history_pairs: config.history_pairs,
            default_model: config.model.clone(),
            rng_seed: None,
        }
    }

    pub fn with_rng_seed(mut self, seed: u64) -> Self {
        self.rng_seed = Some(seed);
        self
    }
}

impl Default for OrchestratorOptions {
    fn default() -> Self {
        Self {
            cache_capacity: DEFAULT_CACHE_CAPACITY,
            history_pairs: DEFAULT_HISTORY_PAIRS,
            default_model: DEFAULT_MODEL.to_string(),
            rng_seed: None,
        }
    }
}

/// Collaborators injected into the orchestrator.
#[derive(Clone)]
pub struct OrchestratorDeps {
    pub gateway: Arc<dyn ModelGateway>,
    pub session_repository: Arc<dyn SessionRepository>,
    pub credential_store: Arc<dyn CredentialStore>,
}

/// What happened to a message passed to [`ChatOrchestrator::send`].
#[derive(Debug)]
pub enum SendOutcome {
    /// Blank input; nothing changed.
    Ignored,
    /// The reply is already in the session.
    Replied,
    /// A model call is running in the background.
    Pending(PendingReply),
}

impl SendOutcome {
    pub fn is_pending(&self) -> bool {
        matches!(self, SendOutcome::Pending(_))
    }

    /// Waits for any background model call to finish.
    pub async fn wait(self) -> std::result::Result<(), GatewayError> {
        match self {
            SendOutcome::Pending(pending) => pending.wait().await,
            SendOutcome::Ignored | SendOutcome::Replied => Ok(()),
        }
    }
}

/// Handle to a background model call.
///
/// Dropping the handle does not cancel the call; its reply still lands in
/// the session that issued it.
#[derive(Debug)]
pub struct PendingReply {
    handle: JoinHandle<std::result::Result<(), GatewayError>>,
}

impl PendingReply {
    /// Waits until the reply (or the error message) has been applied.
    pub async fn wait(self) -> std::result::Result<(), GatewayError> {
        match self.handle.await {
            Ok(result) => result,
            Err(e) => Err(GatewayError::InvalidResponse(format!(
                "generation task failed: {e}"
            ))),
        }
    }
}

struct Inner {
    state: Mutex<ChatState>,
    gateway: Arc<dyn ModelGateway>,
    session_repository: Arc<dyn SessionRepository>,
    credential_store: Arc<dyn CredentialStore>,
    snapshots: watch::Sender<ChatSnapshot>,
}

/// Routes user messages and manages the session list.
///
/// `ChatOrchestrator` is responsible for:
/// - Restoring and persisting sessions
/// - Switching between normal and deep mode
/// - Answering canned topics, greetings and history questions locally
/// - Running model calls in the background and applying their results
///
/// Cloning is cheap; clones share the same state.
#[derive(Clone)]
pub struct ChatOrchestrator {
    inner: Arc<Inner>,
}

impl ChatOrchestrator {
    /// Restores stored sessions and opens a fresh session on top.
    ///
    /// A failing repository is logged and treated as empty storage.
    pub async fn start(deps: OrchestratorDeps, options: OrchestratorOptions) -> Self {
        let restored = match deps.session_repository.load_sessions().await {
            Ok(Some(sessions)) => {
                tracing::info!("[ChatOrchestrator] Restored {} sessions", sessions.len());
                sessions
            }
            Ok(None) => {
                tracing::debug!("[ChatOrchestrator] No stored sessions");
                Vec::new()
            }
            Err(e) => {
                tracing::warn!(
                    "[ChatOrchestrator] Failed to load sessions, starting empty: {}",
                    e
                );
                Vec::new()
            }
        };

        let state = ChatState::restore(restored, &options);
        let (snapshots, _) = watch::channel(state.snapshot());
        let orchestrator = Self {
            inner: Arc::new(Inner {
                state: Mutex::new(state),
                gateway: deps.gateway,
                session_repository: deps.session_repository,
                credential_store: deps.credential_store,
                snapshots,
            }),
        };

        {
            let state = orchestrator.inner.state.lock().await;
            orchestrator.persist(&state).await;
        }
        orchestrator
    }

    /// Handles one user message.
    ///
    /// # Errors
    ///
    /// Returns [`EduChatError::MissingCredential`] when no API key is set;
    /// the error message is published and no message is recorded.
    pub async fn send(&self, text: &str) -> Result<SendOutcome> {
        if text.trim().is_empty() {
            return Ok(SendOutcome::Ignored);
        }

        if !self.inner.credential_store.has_api_key().await {
            let mut state = self.inner.state.lock().await;
            state.set_error(replies::MISSING_API_KEY_MESSAGE);
            self.publish(&state);
            return Err(EduChatError::MissingCredential);
        }

        let mut state = self.inner.state.lock().await;
        let dispatch = state.route(text);
        self.persist(&state).await;
        self.publish(&state);
        drop(state);

        match dispatch {
            Dispatch::Done => Ok(SendOutcome::Replied),
            Dispatch::Generate(request) => {
                tracing::debug!(
                    "[ChatOrchestrator] Requesting {} answer for session {}",
                    request.mode,
                    request.session_id
                );
                Ok(SendOutcome::Pending(self.spawn_generation(request)))
            }
        }
    }

    fn spawn_generation(&self, request: GenerationRequest) -> PendingReply {
        let this = self.clone();
        let handle = tokio::spawn(async move {
            let result = this
                .inner
                .gateway
                .generate(&request.prompt, request.mode)
                .await;
            if let Err(e) = &result {
                tracing::debug!("[ChatOrchestrator] Generation failed: {}", e);
            }
            let outcome = result.as_ref().map(|_| ()).map_err(Clone::clone);

            let mut state = this.inner.state.lock().await;
            state.complete_generation(&request, result);
            this.persist(&state).await;
            this.publish(&state);
            outcome
        });
        PendingReply { handle }
    }

    /// Opens a new session and makes it active. Returns its id.
    pub async fn create_new_session(&self) -> String {
        let mut state = self.inner.state.lock().await;
        let id = state.create_session();
        self.persist(&state).await;
        self.publish(&state);
        id
    }

    pub async fn switch_to_session(&self, session_id: &str) -> Result<()> {
        let mut state = self.inner.state.lock().await;
        state.switch_to_session(session_id)?;
        self.publish(&state);
        Ok(())
    }

    pub async fn delete_session(&self, session_id: &str) -> Result<()> {
        let mut state = self.inner.state.lock().await;
        state.delete_session(session_id)?;
        tracing::info!("[ChatOrchestrator] Deleted session {}", session_id);
        self.persist(&state).await;
        self.publish(&state);
        Ok(())
    }

    pub async fn set_deep_mode(&self, enabled: bool) {
        let mut state = self.inner.state.lock().await;
        if state.set_deep_mode(enabled) {
            self.persist(&state).await;
            self.publish(&state);
        }
    }

    /// Flips deep mode and returns the new value.
    pub async fn toggle_deep_mode(&self) -> bool {
        let mut state = self.inner.state.lock().await;
        let enabled = !state.is_deep_mode();
        state.set_deep_mode(enabled);
        self.persist(&state).await;
        self.publish(&state);
        enabled
    }

    pub async fn is_deep_mode(&self) -> bool {
        self.inner.state.lock().await.is_deep_mode()
    }

    pub async fn current_session(&self) -> Option<Session> {
        self.inner.state.lock().await.current_session().cloned()
    }

    /// Messages of the active session.
    pub async fn messages(&self) -> Vec<Message> {
        self.current_session()
            .await
            .map(|s| s.messages)
            .unwrap_or_default()
    }

    pub async fn sessions(&self) -> Vec<Session> {
        self.inner.state.lock().await.sessions().to_vec()
    }

    /// The most recently published snapshot.
    pub fn snapshot(&self) -> ChatSnapshot {
        self.inner.snapshots.borrow().clone()
    }

    /// Receives a snapshot after every change.
    pub fn subscribe(&self) -> watch::Receiver<ChatSnapshot> {
        self.inner.snapshots.subscribe()
    }

    pub async fn dismiss_error(&self) {
        let mut state = self.inner.state.lock().await;
        state.clear_error();
        self.publish(&state);
    }

    pub async fn has_api_key(&self) -> bool {
        self.inner.credential_store.has_api_key().await
    }

    /// Stores a new API key.
    ///
    /// # Errors
    ///
    /// Returns a config error when the key lacks the `sk-` prefix, or the
    /// store's error when saving fails.
    pub async fn set_api_key(&self, key: &str) -> Result<()> {
        if !is_valid_api_key(key) {
            return Err(EduChatError::config(format!(
                "API key must start with '{API_KEY_PREFIX}'"
            )));
        }
        self.inner.credential_store.set_api_key(key.trim()).await?;
        tracing::info!("[ChatOrchestrator] API key updated");

        let mut state = self.inner.state.lock().await;
        state.clear_error();
        self.publish(&state);
        Ok(())
    }

    async fn persist(&self, state: &ChatState) {
        if let Err(e) = self
            .inner
            .session_repository
            .save_sessions(state.sessions())
            .await
        {
            tracing::warn!("[ChatOrchestrator] Failed to save sessions: {}", e);
        }
    }

    fn publish(&self, state: &ChatState) {
        self.inner.snapshots.send_replace(state.snapshot());
    }
}
