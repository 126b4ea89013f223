//! Orchestrator state and message routing.
//!
//! Everything here is synchronous; the orchestrator owns a [`ChatState`]
//! behind a mutex and only leaves it to call the model.

use super::OrchestratorOptions;
use super::heuristics::{is_casual_greeting, is_previous_query_question};
use super::preliminary::PreliminaryFlow;
use super::replies;
use crate::response_cache::ResponseCache;
use educhat_core::formatter::format_response;
use educhat_core::session::{ChatMode, Message, Session};
use educhat_core::topic::match_topic;
use educhat_core::{EduChatError, GatewayError, Result};
use rand::SeedableRng;
use rand::rngs::StdRng;
use rand::seq::SliceRandom;

/// Observable view of the orchestrator, published after every change.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChatSnapshot {
    /// Most recent first.
    pub sessions: Vec<Session>,
    pub current_session_id: String,
    pub is_loading: bool,
    pub error_message: Option<String>,
    pub deep_mode: bool,
    pub awaiting_preliminary_answer: bool,
    pub preliminary_step: u8,
}

impl ChatSnapshot {
    pub fn current_session(&self) -> Option<&Session> {
        self.sessions
            .iter()
            .find(|s| s.id == self.current_session_id)
    }

    /// Messages of the active session.
    pub fn messages(&self) -> &[Message] {
        self.current_session()
            .map(|s| s.messages.as_slice())
            .unwrap_or_default()
    }
}

/// A model call the orchestrator has to make outside the lock.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GenerationRequest {
    /// Session that receives the reply.
    pub session_id: String,
    pub prompt: String,
    pub mode: ChatMode,
}

/// Result of routing one user message.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Dispatch {
    /// The reply is already in the session.
    Done,
    /// The reply needs a model call.
    Generate(GenerationRequest),
}

pub struct ChatState {
    sessions: Vec<Session>,
    current_session_id: String,
    deep_mode: bool,
    in_flight: usize,
    error_message: Option<String>,
    preliminary: PreliminaryFlow,
    cache: ResponseCache,
    rng: StdRng,
    history_pairs: usize,
    default_model: String,
}

impl ChatState {
    /// Builds the startup state from previously stored sessions.
    ///
    /// Stored sessions with an empty log get the welcome message, and a
    /// fresh session is always opened on top.
    pub fn restore(mut sessions: Vec<Session>, options: &OrchestratorOptions) -> Self {
        for session in sessions.iter_mut().filter(|s| s.messages.is_empty()) {
            session.add_message(Message::assistant(replies::WELCOME_MESSAGE));
        }

        let rng = match options.rng_seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        };

        let mut state = Self {
            sessions,
            current_session_id: String::new(),
            deep_mode: false,
            in_flight: 0,
            error_message: None,
            preliminary: PreliminaryFlow::Idle,
            cache: ResponseCache::new(options.cache_capacity),
            rng,
            history_pairs: options.history_pairs,
            default_model: options.default_model.clone(),
        };
        state.create_session();
        state
    }

    pub fn mode(&self) -> ChatMode {
        ChatMode::from_deep(self.deep_mode)
    }

    pub fn is_deep_mode(&self) -> bool {
        self.deep_mode
    }

    pub fn sessions(&self) -> &[Session] {
        &self.sessions
    }

    pub fn current_session(&self) -> Option<&Session> {
        self.sessions
            .iter()
            .find(|s| s.id == self.current_session_id)
    }

    pub fn cache(&self) -> &ResponseCache {
        &self.cache
    }

    pub fn set_error(&mut self, message: impl Into<String>) {
        self.error_message = Some(message.into());
    }

    pub fn clear_error(&mut self) {
        self.error_message = None;
    }

    pub fn snapshot(&self) -> ChatSnapshot {
        ChatSnapshot {
            sessions: self.sessions.clone(),
            current_session_id: self.current_session_id.clone(),
            is_loading: self.in_flight > 0,
            error_message: self.error_message.clone(),
            deep_mode: self.deep_mode,
            awaiting_preliminary_answer: self.preliminary.is_awaiting(),
            preliminary_step: self.preliminary.step(),
        }
    }

    fn current_index(&mut self) -> usize {
        if let Some(index) = self
            .sessions
            .iter()
            .position(|s| s.id == self.current_session_id)
        {
            return index;
        }
        tracing::warn!("[ChatState] Active session is missing, opening a new one");
        self.create_session();
        0
    }

    // ------------------------------------------------------------------
    // Session list
    // ------------------------------------------------------------------

    /// Opens a new session at the front of the list and makes it active.
    ///
    /// Outside deep mode the session starts with the welcome message.
    pub fn create_session(&mut self) -> String {
        let mut session = Session::new(self.default_model.clone());
        if !self.deep_mode {
            session.add_message(Message::assistant(replies::WELCOME_MESSAGE));
        }
        let id = session.id.clone();
        self.sessions.insert(0, session);
        self.current_session_id = id.clone();
        self.preliminary.reset();
        tracing::debug!("[ChatState] Created session {}", id);
        id
    }

    pub fn switch_to_session(&mut self, session_id: &str) -> Result<()> {
        if !self.sessions.iter().any(|s| s.id == session_id) {
            return Err(EduChatError::not_found("Session", session_id));
        }
        if self.current_session_id != session_id {
            self.preliminary.reset();
            self.current_session_id = session_id.to_string();
        }
        Ok(())
    }

    /// Deletes a session. Deleting the active one activates the first
    /// remaining session, or a new one when none is left.
    pub fn delete_session(&mut self, session_id: &str) -> Result<()> {
        let position = self
            .sessions
            .iter()
            .position(|s| s.id == session_id)
            .ok_or_else(|| EduChatError::not_found("Session", session_id))?;
        self.sessions.remove(position);

        if self.current_session_id == session_id {
            self.preliminary.reset();
            match self.sessions.first() {
                Some(first) => self.current_session_id = first.id.clone(),
                None => {
                    self.create_session();
                }
            }
        }
        Ok(())
    }

    /// Switches deep mode. Returns `false` when the mode was already set.
    ///
    /// Entering deep mode opens a session holding only the deep greeting.
    /// Leaving it returns to the most recent session without deep-mode
    /// content, or opens a new one.
    pub fn set_deep_mode(&mut self, enabled: bool) -> bool {
        if self.deep_mode == enabled {
            return false;
        }
        self.deep_mode = enabled;

        if enabled {
            self.create_session();
            let index = self.current_index();
            self.sessions[index].add_message(Message::assistant(replies::DEEP_GREETING));
        } else {
            self.preliminary.reset();
            let normal_session = self
                .sessions
                .iter()
                .find(|s| !s.contains_any(replies::DEEP_SESSION_MARKERS))
                .map(|s| s.id.clone());
            match normal_session {
                Some(id) => self.current_session_id = id,
                None => {
                    self.create_session();
                }
            }
        }
        tracing::info!("[ChatState] Mode changed to {}", self.mode());
        true
    }

    // ------------------------------------------------------------------
    // Routing
    // ------------------------------------------------------------------

    /// Routes one user message and applies every synchronous effect.
    pub fn route(&mut self, text: &str) -> Dispatch {
        let mode = self.mode();
        let index = self.current_index();

        if !self.deep_mode {
            let session = &mut self.sessions[index];
            if session.messages.len() == 1 && !session.messages[0].is_from_user {
                session.clear_messages();
            }
        }

        if is_previous_query_question(text) {
            tracing::debug!("[ChatState] Answering from earlier questions");
            let reply = {
                let recent = self.sessions[index].last_user_messages(2);
                let contents: Vec<&str> = recent.iter().map(|m| m.content.as_str()).collect();
                replies::previous_queries_reply(&contents)
            };
            self.append_exchange(index, text, reply);
            return Dispatch::Done;
        }

        if mode == ChatMode::Normal && is_casual_greeting(text) {
            tracing::debug!("[ChatState] Casual greeting");
            let reply = replies::CASUAL_GREETING_REPLIES
                .choose(&mut self.rng)
                .copied()
                .unwrap_or(replies::CASUAL_GREETING_REPLIES[0]);
            self.append_exchange(index, text, reply.to_string());
            return Dispatch::Done;
        }

        if !self.preliminary.is_awaiting() {
            if let Some(topic) = match_topic(text) {
                match topic.canned_response(mode) {
                    Some(canned) => {
                        tracing::debug!("[ChatState] Canned answer for {} ({})", topic, mode);
                        self.append_exchange(index, text, canned.to_string());
                        return Dispatch::Done;
                    }
                    None => {
                        tracing::debug!("[ChatState] No {} text for {}, falling through", mode, topic);
                    }
                }
            }
        }

        if self.deep_mode {
            return self.advance_preliminary(index, text);
        }

        let dropped = self.sessions[index].trim_to_recent_pairs(self.history_pairs);
        if dropped > 0 {
            tracing::debug!("[ChatState] Dropped {} old messages", dropped);
        }
        self.append_user(index, text);
        self.request_generation(index, text.to_string(), ChatMode::Normal)
    }

    fn advance_preliminary(&mut self, index: usize, text: &str) -> Dispatch {
        self.append_user(index, text);

        match std::mem::take(&mut self.preliminary) {
            PreliminaryFlow::Idle => {
                self.sessions[index]
                    .add_message(Message::assistant(replies::topic_selection_question()));
                self.preliminary = PreliminaryFlow::AwaitingFocus {
                    question: text.to_string(),
                };
                Dispatch::Done
            }
            PreliminaryFlow::AwaitingFocus { question } => {
                let canned = match_topic(text)
                    .and_then(|topic| topic.canned_response(ChatMode::DeepLearning));
                if let Some(canned) = canned {
                    tracing::debug!("[ChatState] Focus answer names a canned topic");
                    self.sessions[index].add_message(Message::assistant(canned));
                    return Dispatch::Done;
                }
                self.sessions[index]
                    .add_message(Message::assistant(replies::background_question(text)));
                self.preliminary = PreliminaryFlow::AwaitingBackground {
                    question,
                    focus: text.to_string(),
                };
                Dispatch::Done
            }
            PreliminaryFlow::AwaitingBackground { question, focus } => {
                let prompt = replies::deep_analysis_prompt(&question, &focus, text);
                self.request_generation(index, prompt, ChatMode::DeepLearning)
            }
        }
    }

    fn append_user(&mut self, index: usize, text: &str) {
        let session = &mut self.sessions[index];
        session.add_message(Message::user(text));
        session.derive_title_from_first_user_message();
    }

    fn append_exchange(&mut self, index: usize, text: &str, reply: String) {
        self.append_user(index, text);
        self.sessions[index].add_message(Message::assistant(reply));
    }

    fn request_generation(&mut self, index: usize, prompt: String, mode: ChatMode) -> Dispatch {
        let cached = self
            .cache
            .get(&prompt, mode)
            .map(|raw| format_response(raw, mode));
        if let Some(formatted) = cached {
            tracing::debug!("[ChatState] Cache hit ({})", mode);
            self.sessions[index].add_message(Message::assistant(formatted));
            return Dispatch::Done;
        }

        self.in_flight += 1;
        self.error_message = None;
        Dispatch::Generate(GenerationRequest {
            session_id: self.sessions[index].id.clone(),
            prompt,
            mode,
        })
    }

    /// Applies the outcome of a model call.
    ///
    /// The reply goes to the session that issued the request, even if
    /// another session has become active meanwhile.
    pub fn complete_generation(
        &mut self,
        request: &GenerationRequest,
        result: std::result::Result<String, GatewayError>,
    ) {
        self.in_flight = self.in_flight.saturating_sub(1);

        match result {
            Ok(raw) => {
                let formatted = format_response(&raw, request.mode);
                self.cache.put(&request.prompt, request.mode, raw);
                match self
                    .sessions
                    .iter_mut()
                    .find(|s| s.id == request.session_id)
                {
                    Some(session) => session.add_message(Message::assistant(formatted)),
                    None => tracing::warn!(
                        "[ChatState] Session {} was deleted, dropping reply",
                        request.session_id
                    ),
                }
            }
            Err(e) => {
                self.error_message = Some(replies::generation_error_message(&e));
            }
        }
    }
}
