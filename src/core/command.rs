//! Command parser for the : command system

use super::{Action, NotifyLevel};

/// Parsed command from user input
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    Account(String),
    Refresh,
    Qr,
    Copy,
    Alias(String),
    Unalias,
    Quit,

    // Unknown command
    Unknown(String),
}

impl Command {
    pub fn into_action(self) -> Action {
        match self {
            Command::Account(address) => Action::Open(address),
            Command::Refresh => Action::Refresh,
            Command::Qr => Action::ShowQr,
            Command::Copy => Action::Copy,
            Command::Alias(alias) => Action::SetAlias(alias),
            Command::Unalias => Action::RemoveAlias,
            Command::Quit => Action::Quit,
            Command::Unknown(input) => {
                Action::Notify(format!("Unknown command: {input}"), NotifyLevel::Warn)
            }
        }
    }
}

/// Parse a command string (without the leading :)
pub fn parse_command(input: &str) -> Command {
    let input = input.trim();
    let mut parts = input.splitn(2, ' ');
    let cmd = parts.next().unwrap_or("");
    let args = parts
        .next()
        .map(|s| s.trim().to_string())
        .filter(|s| !s.is_empty());

    match cmd.to_lowercase().as_str() {
        "account" | "acc" | "a" => match args {
            Some(address) => Command::Account(address),
            None => Command::Unknown(input.to_string()),
        },
        "refresh" | "r" => Command::Refresh,
        "qr" => Command::Qr,
        "copy" | "cp" => Command::Copy,
        "alias" => match args {
            Some(alias) => Command::Alias(alias),
            None => Command::Unknown(input.to_string()),
        },
        "unalias" => Command::Unalias,
        "quit" | "q" => Command::Quit,
        _ => Command::Unknown(input.to_string()),
    }
}
