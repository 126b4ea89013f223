use async_trait::async_trait;
use educhat_application::orchestrator::replies;
use educhat_application::{ChatOrchestrator, OrchestratorDeps, OrchestratorOptions, SendOutcome};
use educhat_core::secret::CredentialStore;
use educhat_core::session::SessionRepository;
use educhat_core::storage::KeyValueStore;
use educhat_core::topic::CannedTopic;
use educhat_core::{ChatMode, EduChatError, GatewayError, ModelGateway, Session};
use educhat_infrastructure::{
    KeyValueCredentialStore, KeyValueSessionRepository, MemoryKeyValueStore,
};
use std::collections::VecDeque;
use std::sync::Arc;
use std::sync::Mutex;
use std::sync::atomic::{AtomicUsize, Ordering};
use tokio::sync::Notify;

/// Returns queued results in order, then echoes the prompt.
#[derive(Default)]
struct ScriptedGateway {
    script: Mutex<VecDeque<Result<String, GatewayError>>>,
    prompts: Mutex<Vec<(String, ChatMode)>>,
    calls: AtomicUsize,
    release: Option<Arc<Notify>>,
}

impl ScriptedGateway {
    fn new() -> Self {
        Self::default()
    }

    fn with_script(results: Vec<Result<String, GatewayError>>) -> Self {
        Self {
            script: Mutex::new(results.into()),
            ..Self::default()
        }
    }

    fn gated(release: Arc<Notify>) -> Self {
        Self {
            release: Some(release),
            ..Self::default()
        }
    }

    fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }

    fn prompts(&self) -> Vec<(String, ChatMode)> {
        self.prompts.lock().unwrap().clone()
    }
}

#[async_trait]
impl ModelGateway for ScriptedGateway {
    async fn generate(&self, prompt: &str, mode: ChatMode) -> Result<String, GatewayError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        self.prompts
            .lock()
            .unwrap()
            .push((prompt.to_string(), mode));
        if let Some(release) = &self.release {
            release.notified().await;
        }
        let next = self.script.lock().unwrap().pop_front();
        next.unwrap_or_else(|| Ok(format!("answer to {prompt}")))
    }
}

struct BrokenRepository;

#[async_trait]
impl SessionRepository for BrokenRepository {
    async fn load_sessions(&self) -> educhat_core::Result<Option<Vec<Session>>> {
        Err(EduChatError::io("disk on fire"))
    }

    async fn save_sessions(&self, _sessions: &[Session]) -> educhat_core::Result<()> {
        Err(EduChatError::io("disk on fire"))
    }
}

struct Fixture {
    orchestrator: ChatOrchestrator,
    gateway: Arc<ScriptedGateway>,
    store: Arc<MemoryKeyValueStore>,
}

async fn start_with(
    gateway: ScriptedGateway,
    store: Arc<MemoryKeyValueStore>,
    with_key: bool,
) -> Fixture {
    let gateway = Arc::new(gateway);
    let credentials = KeyValueCredentialStore::new(store.clone());
    if with_key {
        credentials.set_api_key("sk-test").await.unwrap();
    }
    let deps = OrchestratorDeps {
        gateway: gateway.clone(),
        session_repository: Arc::new(KeyValueSessionRepository::new(store.clone())),
        credential_store: Arc::new(credentials),
    };
    let orchestrator =
        ChatOrchestrator::start(deps, OrchestratorOptions::default().with_rng_seed(42)).await;
    Fixture {
        orchestrator,
        gateway,
        store,
    }
}

async fn start(gateway: ScriptedGateway) -> Fixture {
    start_with(gateway, Arc::new(MemoryKeyValueStore::new()), true).await
}

async fn send_and_wait(orchestrator: &ChatOrchestrator, text: &str) {
    orchestrator.send(text).await.unwrap().wait().await.unwrap();
}

async fn contents(orchestrator: &ChatOrchestrator) -> Vec<String> {
    orchestrator
        .messages()
        .await
        .into_iter()
        .map(|m| m.content)
        .collect()
}

#[tokio::test]
async fn test_startup_opens_welcome_session() {
    let fx = start(ScriptedGateway::new()).await;
    let snapshot = fx.orchestrator.snapshot();

    assert_eq!(snapshot.sessions.len(), 1);
    assert!(!snapshot.deep_mode);
    assert!(!snapshot.is_loading);
    assert_eq!(snapshot.messages().len(), 1);
    assert_eq!(snapshot.messages()[0].content, replies::WELCOME_MESSAGE);
    assert!(fx.store.get("chat_sessions").unwrap().is_some());
}

#[tokio::test]
async fn test_canned_topic_skips_the_model() {
    let fx = start(ScriptedGateway::new()).await;

    let outcome = fx.orchestrator.send("퍼셉트론이 뭐야").await.unwrap();
    assert!(matches!(outcome, SendOutcome::Replied));

    let messages = fx.orchestrator.messages().await;
    assert_eq!(messages.len(), 2);
    assert!(messages[0].is_from_user);
    assert_eq!(messages[0].content, "퍼셉트론이 뭐야");
    assert_eq!(
        messages[1].content,
        CannedTopic::Perceptron
            .canned_response(ChatMode::Normal)
            .unwrap()
    );
    assert_eq!(fx.gateway.calls(), 0);

    let session = fx.orchestrator.current_session().await.unwrap();
    assert_eq!(session.title, "퍼셉트론이 뭐야");
}

#[tokio::test]
async fn test_greeting_depends_on_mode() {
    let fx = start(ScriptedGateway::new()).await;

    send_and_wait(&fx.orchestrator, "안녕").await;
    let normal = contents(&fx.orchestrator).await;
    assert_eq!(normal.len(), 2);
    assert!(replies::CASUAL_GREETING_REPLIES.contains(&normal[1].as_str()));

    fx.orchestrator.set_deep_mode(true).await;
    send_and_wait(&fx.orchestrator, "안녕").await;
    let deep = contents(&fx.orchestrator).await;
    assert_eq!(deep[0], replies::DEEP_GREETING);
    assert!(deep[2].contains("주제 선택"));
    assert!(fx.orchestrator.snapshot().awaiting_preliminary_answer);
    assert_eq!(fx.gateway.calls(), 0);
}

#[tokio::test]
async fn test_normal_history_is_bounded() {
    let fx = start(ScriptedGateway::new()).await;

    for i in 1..=4 {
        send_and_wait(&fx.orchestrator, &format!("경사하강법 질문 {i}")).await;
        assert!(fx.orchestrator.messages().await.len() <= 6);
    }

    let messages = contents(&fx.orchestrator).await;
    assert_eq!(messages.len(), 6);
    assert_eq!(messages[0], "경사하강법 질문 2");
    assert_eq!(messages[5], "answer to 경사하강법 질문 4");
    assert_eq!(fx.gateway.calls(), 4);

    let session = fx.orchestrator.current_session().await.unwrap();
    assert_eq!(session.title, "경사하강법 질문 1");
}

#[tokio::test]
async fn test_deep_mode_canned_topic() {
    let fx = start(ScriptedGateway::new()).await;
    let normal_id = fx.orchestrator.snapshot().current_session_id;

    assert!(fx.orchestrator.toggle_deep_mode().await);
    assert!(fx.orchestrator.is_deep_mode().await);
    assert_ne!(fx.orchestrator.snapshot().current_session_id, normal_id);

    send_and_wait(&fx.orchestrator, "신경망이 뭐야").await;
    let messages = contents(&fx.orchestrator).await;
    assert_eq!(
        messages,
        vec![
            replies::DEEP_GREETING.to_string(),
            "신경망이 뭐야".to_string(),
            CannedTopic::NeuralNetwork
                .canned_response(ChatMode::DeepLearning)
                .unwrap()
                .to_string(),
        ]
    );
    assert_eq!(fx.gateway.calls(), 0);

    assert!(!fx.orchestrator.toggle_deep_mode().await);
    assert_eq!(fx.orchestrator.snapshot().current_session_id, normal_id);
}

#[tokio::test]
async fn test_deep_mode_clarifying_dialogue() {
    let raw = "개념의 핵심 본질 파악\n핵심입니다.\n한계와 미래 전망: 전망입니다.";
    let fx = start(ScriptedGateway::with_script(vec![Ok(raw.to_string())])).await;
    fx.orchestrator.set_deep_mode(true).await;

    send_and_wait(&fx.orchestrator, "트랜스포머 알려줘").await;
    let snapshot = fx.orchestrator.snapshot();
    assert!(snapshot.awaiting_preliminary_answer);
    assert_eq!(snapshot.preliminary_step, 0);

    send_and_wait(&fx.orchestrator, "어텐션").await;
    let snapshot = fx.orchestrator.snapshot();
    assert!(snapshot.awaiting_preliminary_answer);
    assert_eq!(snapshot.preliminary_step, 1);
    assert!(
        snapshot
            .messages()
            .last()
            .unwrap()
            .content
            .contains("'어텐션'")
    );

    send_and_wait(&fx.orchestrator, "처음 들어봐요").await;
    let snapshot = fx.orchestrator.snapshot();
    assert!(!snapshot.awaiting_preliminary_answer);
    assert!(!snapshot.is_loading);

    let prompts = fx.gateway.prompts();
    assert_eq!(prompts.len(), 1);
    let (prompt, mode) = &prompts[0];
    assert_eq!(*mode, ChatMode::DeepLearning);
    assert!(prompt.contains("트랜스포머 알려줘"));
    assert!(prompt.contains("어텐션"));
    assert!(prompt.contains("처음 들어봐요"));

    assert_eq!(
        snapshot.messages().last().unwrap().content,
        "## 1. 🧠 개념의 핵심 본질 파악\n\n핵심입니다.\n\n## 6. 🔮 한계와 미래 전망\n\n전망입니다."
    );
}

#[tokio::test]
async fn test_repeated_question_uses_cache() {
    let fx = start(ScriptedGateway::new()).await;

    send_and_wait(&fx.orchestrator, "과적합이란 무엇인가").await;
    let outcome = fx.orchestrator.send("과적합이란 무엇인가").await.unwrap();

    assert!(!outcome.is_pending());
    assert_eq!(fx.gateway.calls(), 1);
    let messages = contents(&fx.orchestrator).await;
    assert_eq!(messages.len(), 4);
    assert_eq!(messages[1], messages[3]);
}

#[tokio::test]
async fn test_gateway_errors_become_messages() {
    let fx = start(ScriptedGateway::with_script(vec![
        Err(GatewayError::Timeout { seconds: 60 }),
        Err(GatewayError::EmptyResponse),
    ]))
    .await;

    let result = fx
        .orchestrator
        .send("과적합이란 무엇인가")
        .await
        .unwrap()
        .wait()
        .await;
    assert_eq!(result, Err(GatewayError::Timeout { seconds: 60 }));
    let snapshot = fx.orchestrator.snapshot();
    assert_eq!(snapshot.error_message.as_deref(), Some(replies::TIMEOUT_MESSAGE));
    assert!(!snapshot.is_loading);
    assert_eq!(snapshot.messages().len(), 1);

    let result = fx
        .orchestrator
        .send("정규화란 무엇인가")
        .await
        .unwrap()
        .wait()
        .await;
    assert!(result.is_err());
    assert_eq!(
        fx.orchestrator.snapshot().error_message.as_deref(),
        Some("LLM 호출 실패: Model returned an empty response")
    );

    fx.orchestrator.dismiss_error().await;
    assert!(fx.orchestrator.snapshot().error_message.is_none());
}

#[tokio::test]
async fn test_missing_key_blocks_sending() {
    let fx = start_with(
        ScriptedGateway::new(),
        Arc::new(MemoryKeyValueStore::new()),
        false,
    )
    .await;

    let err = fx.orchestrator.send("과적합이란").await.unwrap_err();
    assert!(err.is_missing_credential());
    let snapshot = fx.orchestrator.snapshot();
    assert_eq!(
        snapshot.error_message.as_deref(),
        Some(replies::MISSING_API_KEY_MESSAGE)
    );
    assert_eq!(snapshot.messages().len(), 1);
    assert_eq!(fx.gateway.calls(), 0);

    assert!(fx.orchestrator.set_api_key("pk-wrong").await.is_err());
    assert!(!fx.orchestrator.has_api_key().await);

    fx.orchestrator.set_api_key(" sk-valid ").await.unwrap();
    assert!(fx.orchestrator.has_api_key().await);
    assert!(fx.orchestrator.snapshot().error_message.is_none());

    send_and_wait(&fx.orchestrator, "과적합이란").await;
    assert_eq!(fx.gateway.calls(), 1);
}

#[tokio::test]
async fn test_blank_input_is_ignored() {
    let fx = start(ScriptedGateway::new()).await;

    let outcome = fx.orchestrator.send("   ").await.unwrap();
    assert!(matches!(outcome, SendOutcome::Ignored));
    assert_eq!(
        contents(&fx.orchestrator).await,
        vec![replies::WELCOME_MESSAGE.to_string()]
    );
}

#[tokio::test]
async fn test_previous_question_recall() {
    let fx = start(ScriptedGateway::new()).await;

    send_and_wait(&fx.orchestrator, "내가 뭘 물어봤지?").await;
    assert!(contents(&fx.orchestrator).await[1].starts_with("죄송하지만"));

    send_and_wait(&fx.orchestrator, "딥러닝").await;
    send_and_wait(&fx.orchestrator, "내가 무엇을 질문했어?").await;
    let messages = contents(&fx.orchestrator).await;
    assert_eq!(
        messages.last().unwrap(),
        "최근 하신 질문들은:\n\n1. **내가 뭘 물어봤지?**\n2. **딥러닝**\n\n입니다."
    );
    assert_eq!(fx.gateway.calls(), 0);
}

#[tokio::test]
async fn test_switch_and_delete_sessions() {
    let fx = start(ScriptedGateway::new()).await;
    let first = fx.orchestrator.snapshot().current_session_id;
    let second = fx.orchestrator.create_new_session().await;
    assert_eq!(fx.orchestrator.sessions().await[0].id, second);

    fx.orchestrator.switch_to_session(&first).await.unwrap();
    assert_eq!(fx.orchestrator.snapshot().current_session_id, first);
    assert!(
        fx.orchestrator
            .switch_to_session("no-such-session")
            .await
            .unwrap_err()
            .is_not_found()
    );

    fx.orchestrator.delete_session(&first).await.unwrap();
    assert_eq!(fx.orchestrator.snapshot().current_session_id, second);

    fx.orchestrator.delete_session(&second).await.unwrap();
    let snapshot = fx.orchestrator.snapshot();
    assert_eq!(snapshot.sessions.len(), 1);
    assert_eq!(snapshot.messages()[0].content, replies::WELCOME_MESSAGE);
}

#[tokio::test]
async fn test_reply_lands_in_issuing_session() {
    let release = Arc::new(Notify::new());
    let fx = start(ScriptedGateway::gated(release.clone())).await;
    let issuing = fx.orchestrator.snapshot().current_session_id;

    let outcome = fx.orchestrator.send("배치 정규화란").await.unwrap();
    assert!(fx.orchestrator.snapshot().is_loading);

    let other = fx.orchestrator.create_new_session().await;
    release.notify_one();
    outcome.wait().await.unwrap();

    let snapshot = fx.orchestrator.snapshot();
    assert!(!snapshot.is_loading);
    assert_eq!(snapshot.current_session_id, other);
    let issuing_session = snapshot
        .sessions
        .iter()
        .find(|s| s.id == issuing)
        .unwrap();
    assert_eq!(
        issuing_session.messages.last().unwrap().content,
        "answer to 배치 정규화란"
    );
    assert_eq!(snapshot.messages().len(), 1);
}

#[tokio::test]
async fn test_subscribers_see_updates() {
    let fx = start(ScriptedGateway::new()).await;
    let mut updates = fx.orchestrator.subscribe();

    fx.orchestrator.set_deep_mode(true).await;
    updates.changed().await.unwrap();
    assert!(updates.borrow_and_update().deep_mode);
}

#[tokio::test]
async fn test_sessions_survive_restart() {
    let store = Arc::new(MemoryKeyValueStore::new());
    let first = start_with(ScriptedGateway::new(), store.clone(), true).await;
    send_and_wait(&first.orchestrator, "퍼셉트론이 뭐야").await;
    let old_id = first.orchestrator.snapshot().current_session_id;

    let second = start_with(ScriptedGateway::new(), store.clone(), true).await;
    let snapshot = second.orchestrator.snapshot();
    assert_eq!(snapshot.sessions.len(), 2);
    assert_ne!(snapshot.current_session_id, old_id);
    assert_eq!(snapshot.sessions[1].id, old_id);
    assert_eq!(snapshot.sessions[1].title, "퍼셉트론이 뭐야");
    assert_eq!(snapshot.sessions[1].messages.len(), 2);
}

#[tokio::test]
async fn test_empty_stored_session_gets_welcome() {
    let store = Arc::new(MemoryKeyValueStore::new());
    let repository = KeyValueSessionRepository::new(store.clone());
    repository
        .save_sessions(&[Session::new("gpt-4")])
        .await
        .unwrap();

    let fx = start_with(ScriptedGateway::new(), store, true).await;
    let sessions = fx.orchestrator.sessions().await;
    assert_eq!(sessions.len(), 2);
    assert_eq!(sessions[1].messages.len(), 1);
    assert_eq!(sessions[1].messages[0].content, replies::WELCOME_MESSAGE);
}

#[tokio::test]
async fn test_storage_failures_are_not_fatal() {
    let store = Arc::new(MemoryKeyValueStore::new());
    let credentials = KeyValueCredentialStore::new(store);
    credentials.set_api_key("sk-test").await.unwrap();
    let gateway = Arc::new(ScriptedGateway::new());
    let deps = OrchestratorDeps {
        gateway: gateway.clone(),
        session_repository: Arc::new(BrokenRepository),
        credential_store: Arc::new(credentials),
    };

    let orchestrator = ChatOrchestrator::start(deps, OrchestratorOptions::default()).await;
    assert_eq!(orchestrator.sessions().await.len(), 1);

    send_and_wait(&orchestrator, "과적합이란 무엇인가").await;
    assert_eq!(orchestrator.messages().await.len(), 2);
    assert_eq!(gateway.calls(), 1);
}
