//! REPL input parsing.

/// Slash commands offered for completion, in help order.
pub const COMMANDS: &[&str] = &[
    "/new", "/deep", "/list", "/switch", "/delete", "/history", "/key", "/help", "/quit",
];

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    New,
    ToggleDeep,
    List,
    /// 1-based index into the session list.
    Switch(usize),
    /// 1-based index into the session list.
    Delete(usize),
    History,
    SetKey(String),
    Help,
    Quit,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Input {
    Empty,
    Command(Command),
    Message(String),
    /// A slash command that could not be parsed; carries the usage hint.
    Invalid(String),
}

pub fn parse(line: &str) -> Input {
    let trimmed = line.trim();
    if trimmed.is_empty() {
        return Input::Empty;
    }
    if trimmed == "quit" || trimmed == "exit" {
        return Input::Command(Command::Quit);
    }
    if !trimmed.starts_with('/') {
        return Input::Message(trimmed.to_string());
    }

    let (name, arg) = match trimmed.split_once(char::is_whitespace) {
        Some((name, arg)) => (name, arg.trim()),
        None => (trimmed, ""),
    };

    let command = match name {
        "/new" => Command::New,
        "/deep" => Command::ToggleDeep,
        "/list" => Command::List,
        "/history" => Command::History,
        "/help" => Command::Help,
        "/quit" | "/exit" => Command::Quit,
        "/switch" => match parse_index(arg) {
            Some(index) => Command::Switch(index),
            None => return Input::Invalid("usage: /switch <number>".to_string()),
        },
        "/delete" => match parse_index(arg) {
            Some(index) => Command::Delete(index),
            None => return Input::Invalid("usage: /delete <number>".to_string()),
        },
        "/key" if !arg.is_empty() => Command::SetKey(arg.to_string()),
        "/key" => return Input::Invalid("usage: /key <sk-...>".to_string()),
        other => return Input::Invalid(format!("unknown command: {other}")),
    };
    Input::Command(command)
}

fn parse_index(arg: &str) -> Option<usize> {
    arg.parse::<usize>().ok().filter(|&n| n > 0)
}
