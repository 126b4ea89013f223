mod commands;

use std::borrow::Cow::{self, Borrowed, Owned};
use std::path::Path;
use std::sync::Arc;

use anyhow::Result;
use colored::Colorize;
use rustyline::completion::{Completer, Pair};
use rustyline::highlight::Highlighter;
use rustyline::hint::Hinter;
use rustyline::validate::Validator;
use rustyline::Editor;
use rustyline::{Context, Helper};
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::{EnvFilter, Layer};

use commands::{COMMANDS, Command, Input};
use educhat_application::{ChatOrchestrator, OrchestratorDeps, OrchestratorOptions};
use educhat_core::Message;
use educhat_core::secret::CredentialStore;
use educhat_core::storage::KeyValueStore;
use educhat_infrastructure::storage::{ConfigStorage, SecretStorage};
use educhat_infrastructure::{
    EduChatPaths, FileKeyValueStore, KeyValueCredentialStore, KeyValueSessionRepository,
};
use educhat_interaction::OpenAiGateway;

const FILE_LOG_FILTER: &str = "info,educhat_core=debug,educhat_infrastructure=debug,\
                               educhat_interaction=debug,educhat_application=debug";

/// CLI helper for rustyline that provides completion, highlighting, and hints.
#[derive(Clone)]
struct CliHelper {
    commands: Vec<String>,
}

impl CliHelper {
    fn new() -> Self {
        Self {
            commands: COMMANDS.iter().map(|c| c.to_string()).collect(),
        }
    }
}

impl Helper for CliHelper {}

impl Completer for CliHelper {
    type Candidate = Pair;

    fn complete(
        &self,
        line: &str,
        pos: usize,
        _ctx: &Context<'_>,
    ) -> rustyline::Result<(usize, Vec<Pair>)> {
        let line = &line[..pos];
        if !line.starts_with('/') || line.contains(' ') {
            return Ok((0, vec![]));
        }

        let candidates = self
            .commands
            .iter()
            .filter(|cmd| cmd.starts_with(line))
            .map(|cmd| Pair {
                display: cmd.clone(),
                replacement: cmd.clone(),
            })
            .collect();
        Ok((0, candidates))
    }
}

impl Highlighter for CliHelper {
    fn highlight<'l>(&self, line: &'l str, _pos: usize) -> Cow<'l, str> {
        if line.starts_with('/') {
            Owned(line.bright_cyan().to_string())
        } else {
            Borrowed(line)
        }
    }

    fn highlight_char(&self, _line: &str, _pos: usize, _forced: bool) -> bool {
        true
    }
}

impl Hinter for CliHelper {
    type Hint = String;

    fn hint(&self, line: &str, pos: usize, _ctx: &Context<'_>) -> Option<String> {
        let line = &line[..pos];
        if !line.starts_with('/') || line.contains(' ') {
            return None;
        }
        self.commands
            .iter()
            .find(|cmd| cmd.starts_with(line) && cmd.len() > line.len())
            .map(|cmd| cmd[line.len()..].to_string())
    }
}

impl Validator for CliHelper {}

/// Human-readable stderr output filtered by `RUST_LOG` (default `warn`),
/// plus a daily rolling debug log under `log_dir`.
///
/// The returned guard must stay alive for the file writer to flush.
fn init_tracing(log_dir: &Path) -> Option<WorkerGuard> {
    let stderr_layer = tracing_subscriber::fmt::layer()
        .with_target(false)
        .with_writer(std::io::stderr)
        .with_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        );

    let file = match std::fs::create_dir_all(log_dir) {
        Ok(()) => {
            let appender = tracing_appender::rolling::daily(log_dir, "educhat.log");
            let (writer, guard) = tracing_appender::non_blocking(appender);
            let layer = tracing_subscriber::fmt::layer()
                .with_ansi(false)
                .with_writer(writer)
                .with_filter(EnvFilter::new(FILE_LOG_FILTER));
            Some((layer, guard))
        }
        Err(e) => {
            eprintln!(
                "{}",
                format!("Cannot create log directory {}: {}", log_dir.display(), e).yellow()
            );
            None
        }
    };
    let (file_layer, guard) = file.unzip();

    tracing_subscriber::registry()
        .with(stderr_layer)
        .with(file_layer)
        .init();
    guard
}

fn print_message(message: &Message) {
    if message.is_from_user {
        println!("{}", format!("> {}", message.content).green());
    } else {
        for line in message.content.lines() {
            println!("{}", line.bright_blue());
        }
    }
    println!();
}

fn print_messages(messages: &[Message]) {
    for message in messages {
        print_message(message);
    }
}

/// Prints the assistant messages that follow the last user message.
fn print_latest_reply(messages: &[Message]) {
    let start = messages
        .iter()
        .rposition(|m| m.is_from_user)
        .map_or(0, |index| index + 1);
    print_messages(&messages[start..]);
}

fn print_help() {
    let rows = [
        ("/new", "start a new session"),
        ("/deep", "toggle deep-learning mode"),
        ("/list", "list sessions"),
        ("/switch <n>", "switch to session n"),
        ("/delete <n>", "delete session n"),
        ("/history", "show the current session"),
        ("/key <sk-...>", "set the OpenAI API key"),
        ("/quit", "exit"),
    ];
    for (command, description) in rows {
        println!("  {:<16}{}", command.bright_cyan(), description.bright_black());
    }
}

async fn send_message(orchestrator: &ChatOrchestrator, text: &str) {
    match orchestrator.send(text).await {
        Ok(outcome) => {
            if outcome.is_pending() {
                println!("{}", "Thinking...".bright_black());
            }
            if let Err(e) = outcome.wait().await {
                tracing::debug!("[EduChat] Generation failed: {}", e);
            }
            print_latest_reply(orchestrator.snapshot().messages());
        }
        Err(e) => tracing::debug!("[EduChat] Message rejected: {}", e),
    }

    if let Some(error) = orchestrator.snapshot().error_message {
        for line in error.lines() {
            eprintln!("{}", line.red());
        }
        if !orchestrator.has_api_key().await {
            println!("{}", "Use /key <sk-...> to set your API key.".yellow());
        }
        orchestrator.dismiss_error().await;
    }
}

/// Resolves a 1-based session number to a session id.
fn session_id_at(orchestrator: &ChatOrchestrator, number: usize) -> Option<String> {
    orchestrator
        .snapshot()
        .sessions
        .get(number - 1)
        .map(|s| s.id.clone())
}

async fn run_command(orchestrator: &ChatOrchestrator, command: Command) {
    match command {
        Command::New => {
            orchestrator.create_new_session().await;
            println!("{}", "Started a new session.".bright_green());
            print_messages(&orchestrator.messages().await);
        }
        Command::ToggleDeep => {
            if orchestrator.toggle_deep_mode().await {
                println!("{}", "📚 Deep-learning mode on".bright_magenta());
            } else {
                println!("{}", "Normal mode".bright_magenta());
            }
            print_messages(&orchestrator.messages().await);
        }
        Command::List => {
            let snapshot = orchestrator.snapshot();
            for (index, session) in snapshot.sessions.iter().enumerate() {
                let marker = if session.id == snapshot.current_session_id {
                    "*"
                } else {
                    " "
                };
                let title = if session.title.is_empty() {
                    "(new conversation)"
                } else {
                    session.title.as_str()
                };
                println!(
                    "{} {:>2}. {} {}",
                    marker.bright_green(),
                    index + 1,
                    title,
                    format!("({} messages)", session.messages.len()).bright_black()
                );
            }
        }
        Command::Switch(number) => match session_id_at(orchestrator, number) {
            Some(id) => match orchestrator.switch_to_session(&id).await {
                Ok(()) => print_messages(&orchestrator.messages().await),
                Err(e) => eprintln!("{}", e.to_string().red()),
            },
            None => println!("{}", format!("No session #{number}").yellow()),
        },
        Command::Delete(number) => match session_id_at(orchestrator, number) {
            Some(id) => match orchestrator.delete_session(&id).await {
                Ok(()) => println!("{}", format!("Deleted session #{number}").bright_green()),
                Err(e) => eprintln!("{}", e.to_string().red()),
            },
            None => println!("{}", format!("No session #{number}").yellow()),
        },
        Command::History => print_messages(&orchestrator.messages().await),
        Command::SetKey(key) => match orchestrator.set_api_key(&key).await {
            Ok(()) => println!("{}", "API key saved.".bright_green()),
            Err(e) => eprintln!("{}", e.to_string().red()),
        },
        Command::Help => print_help(),
        Command::Quit => {}
    }
}

/// Entry point for the EduChat REPL.
///
/// Sets up logging, loads `config.toml`, wires the file-backed stores and
/// the OpenAI gateway into a [`ChatOrchestrator`], then reads user input
/// until `/quit` or EOF.
#[tokio::main]
async fn main() -> Result<()> {
    // ===== Backend Initialization =====
    let paths = EduChatPaths::resolve()?;
    let _log_guard = init_tracing(&paths.logs_dir());

    let config = ConfigStorage::new(paths.config_file()).load()?;
    tracing::info!("[EduChat] Starting with model {}", config.model);

    let store: Arc<dyn KeyValueStore> = Arc::new(FileKeyValueStore::new(paths.store_dir()));
    let credential_store: Arc<dyn CredentialStore> = Arc::new(
        KeyValueCredentialStore::new(store.clone())
            .with_secret_storage(SecretStorage::new(paths.secret_file()))
            .with_env_fallback(),
    );
    let deps = OrchestratorDeps {
        gateway: Arc::new(OpenAiGateway::new(credential_store.clone(), &config)),
        session_repository: Arc::new(KeyValueSessionRepository::new(store)),
        credential_store,
    };
    let orchestrator =
        ChatOrchestrator::start(deps, OrchestratorOptions::from_config(&config)).await;

    // ===== REPL Setup =====
    let mut rl = Editor::new()?;
    rl.set_helper(Some(CliHelper::new()));

    println!("{}", "=== EduChat ===".bright_magenta().bold());
    println!(
        "{}",
        "Ask a question, type /help for commands, or /quit to exit.".bright_black()
    );
    println!();
    print_messages(&orchestrator.messages().await);
    if !orchestrator.has_api_key().await {
        println!(
            "{}",
            "No API key configured. Use /key <sk-...> to set one.".yellow()
        );
    }

    // ===== Main REPL Loop =====
    loop {
        let prompt = if orchestrator.is_deep_mode().await {
            "deep>> "
        } else {
            ">> "
        };

        match rl.readline(prompt) {
            Ok(line) => {
                let input = commands::parse(&line);
                if input != Input::Empty {
                    let _ = rl.add_history_entry(line.as_str());
                }

                match input {
                    Input::Empty => continue,
                    Input::Invalid(hint) => println!("{}", hint.yellow()),
                    Input::Message(text) => send_message(&orchestrator, &text).await,
                    Input::Command(Command::Quit) => {
                        println!("{}", "Goodbye!".bright_green());
                        break;
                    }
                    Input::Command(command) => run_command(&orchestrator, command).await,
                }
            }
            Err(rustyline::error::ReadlineError::Interrupted) => {
                println!("{}", "CTRL-C detected. Type /quit to exit.".yellow());
            }
            Err(rustyline::error::ReadlineError::Eof) => {
                println!("{}", "CTRL-D detected. Exiting...".bright_green());
                break;
            }
            Err(err) => {
                eprintln!("{}", format!("Error: {:?}", err).red());
                break;
            }
        }
    }

    Ok(())
}
