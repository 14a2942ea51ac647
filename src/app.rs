use std::time::{Duration, Instant};

use crossterm::event::{KeyCode, KeyEvent, KeyEventKind, KeyModifiers};
use tracing::{info, warn};

use crate::config::normalize_address;
use crate::core::{parse_command, Action, Module, NotifyLevel};
use crate::domain::account::{AccountHeader, Clipboard, KnownAccount};
use crate::domain::sources::merge_known_accounts;
use crate::domain::Sources;
use crate::infrastructure::qr::render_qr;
use crate::infrastructure::runtime::{RuntimeCommand, RuntimeEvent};
use crate::store::KnownAccountStore;

const STATUS_TTL: Duration = Duration::from_secs(3);

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputMode {
    Normal,
    Command,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StatusLevel {
    Info,
    Warn,
    Error,
}

impl From<NotifyLevel> for StatusLevel {
    fn from(level: NotifyLevel) -> Self {
        match level {
            NotifyLevel::Info => StatusLevel::Info,
            NotifyLevel::Warn => StatusLevel::Warn,
            NotifyLevel::Error => StatusLevel::Error,
        }
    }
}

#[derive(Debug, Clone)]
pub struct StatusMessage {
    pub text: String,
    pub level: StatusLevel,
    pub since: Instant,
}

#[derive(Debug, Default, Clone)]
pub struct CommandBar {
    pub input: String,
    pub last: Option<String>,
}

/// Rendered QR popup for one address
#[derive(Debug, Clone)]
pub struct QrOverlay {
    pub address: String,
    pub code: String,
}

/// Alias layers, merged in this priority order
#[derive(Debug, Default)]
struct AliasLayers {
    local: Vec<KnownAccount>,
    config: Vec<KnownAccount>,
    registry: Vec<KnownAccount>,
}

pub struct App {
    pub sources: Sources,
    pub header: AccountHeader,
    pub input_mode: InputMode,
    pub command: CommandBar,
    pub qr: Option<QrOverlay>,
    pub status: Option<StatusMessage>,
    pub endpoint: String,
    pub should_quit: bool,
    aliases: AliasLayers,
    store: Option<KnownAccountStore>,
}

impl App {
    pub fn new(address: &str) -> Self {
        Self {
            sources: Sources::new(),
            header: AccountHeader::new(normalize_address(address)),
            input_mode: InputMode::Normal,
            command: CommandBar::default(),
            qr: None,
            status: None,
            endpoint: String::new(),
            should_quit: false,
            aliases: AliasLayers::default(),
            store: None,
        }
    }

    pub fn set_config_aliases(&mut self, aliases: Vec<KnownAccount>) {
        self.aliases.config = aliases;
        self.rebuild_known_accounts();
    }

    /// Attach the local registry and pick up its aliases and cached registry.
    pub fn attach_store(&mut self, store: KnownAccountStore) -> anyhow::Result<()> {
        self.aliases.local = store.load_aliases()?;
        self.aliases.registry = store.load_registry()?;
        self.store = Some(store);
        self.rebuild_known_accounts();
        Ok(())
    }

    pub fn is_loading(&self) -> bool {
        self.sources.representatives.is_loading
    }

    pub fn set_status(&mut self, text: impl Into<String>, level: StatusLevel) {
        self.status = Some(StatusMessage {
            text: text.into(),
            level,
            since: Instant::now(),
        });
    }

    pub fn status_text(&self) -> Option<(&str, StatusLevel)> {
        self.status
            .as_ref()
            .map(|status| (status.text.as_str(), status.level))
    }

    pub fn on_tick(&mut self, now: Instant) {
        self.header.tick(now);
        if let Some(status) = self.status.as_ref() {
            if now.saturating_duration_since(status.since) > STATUS_TTL {
                self.status = None;
            }
        }
    }

    /// Apply a provider update, then reclassify.
    pub fn apply_event(&mut self, event: RuntimeEvent) {
        match event {
            RuntimeEvent::RepresentativesLoading => {
                self.sources.begin_representatives_load();
                return;
            }
            RuntimeEvent::RepresentativesReady { records } => {
                self.sources.set_representatives(records);
            }
            RuntimeEvent::RepresentativesFailed { message } => {
                let records = std::mem::take(&mut self.sources.representatives.records);
                self.sources.set_representatives(records);
                self.set_status(message, StatusLevel::Error);
            }
            RuntimeEvent::QuorumReady { quorum } => {
                self.sources.set_quorum(quorum);
            }
            RuntimeEvent::KnownAccountsReady { accounts } => {
                if let Some(store) = self.store.as_mut() {
                    if let Err(err) = store.replace_registry(&accounts) {
                        warn!(error = %err, "failed to cache known accounts");
                    }
                }
                self.aliases.registry = accounts;
                self.rebuild_known_accounts();
                return;
            }
            RuntimeEvent::Error { message } => {
                self.set_status(message, StatusLevel::Error);
                return;
            }
        }
        self.header.refresh(&self.sources);
    }

    fn rebuild_known_accounts(&mut self) {
        let merged = merge_known_accounts([
            self.aliases.local.clone(),
            self.aliases.config.clone(),
            self.aliases.registry.clone(),
        ]);
        self.sources.set_known_accounts(merged);
        self.header.refresh(&self.sources);
    }

    /// Carry out `action`. Returns a command for the runtime worker, if any.
    pub fn dispatch(
        &mut self,
        action: Action,
        clipboard: Option<&mut dyn Clipboard>,
        now: Instant,
    ) -> Option<RuntimeCommand> {
        match action {
            Action::None => {}
            Action::Copy => self.copy_address(clipboard, now),
            Action::ShowQr => self.show_qr(),
            Action::CloseOverlay => {
                self.qr = None;
            }
            Action::Refresh => {
                self.set_status("Refreshing…", StatusLevel::Info);
                return Some(RuntimeCommand::Refresh);
            }
            Action::Open(address) => self.open_account(&address),
            Action::SetAlias(alias) => self.set_alias(&alias),
            Action::RemoveAlias => self.remove_alias(),
            Action::OpenCommand => {
                self.input_mode = InputMode::Command;
                self.command.input.clear();
            }
            Action::Notify(text, level) => self.set_status(text, level.into()),
            Action::Quit => {
                self.should_quit = true;
                return Some(RuntimeCommand::Shutdown);
            }
        }
        None
    }

    fn copy_address(&mut self, clipboard: Option<&mut dyn Clipboard>, now: Instant) {
        let Some(clipboard) = clipboard else {
            self.set_status("Clipboard not available", StatusLevel::Error);
            return;
        };
        match self.header.copy(clipboard, now) {
            Ok(true) => info!(address = %self.header.address(), "address copied"),
            Ok(false) => {}
            Err(err) => self.set_status(format!("{err:#}"), StatusLevel::Error),
        }
    }

    fn show_qr(&mut self) {
        let address = self.header.qr_request().to_string();
        if address.is_empty() {
            self.set_status("Nothing to encode", StatusLevel::Warn);
            return;
        }
        match render_qr(&address) {
            Ok(code) => self.qr = Some(QrOverlay { address, code }),
            Err(err) => self.set_status(format!("{err:#}"), StatusLevel::Error),
        }
    }

    fn open_account(&mut self, address: &str) {
        let address = normalize_address(address);
        info!(%address, "opening account");
        self.qr = None;
        self.header.set_address(address, &self.sources);
    }

    fn set_alias(&mut self, alias: &str) {
        let account = self.header.address().to_string();
        let alias = alias.trim().to_string();
        if account.is_empty() || alias.is_empty() {
            self.set_status("Usage: :alias <name>", StatusLevel::Warn);
            return;
        }
        if let Some(store) = self.store.as_ref() {
            if let Err(err) = store.set_alias(&account, &alias) {
                self.set_status(format!("Alias not saved: {err:#}"), StatusLevel::Error);
                return;
            }
        }
        self.aliases.local.retain(|known| known.account != account);
        self.aliases.local.push(KnownAccount {
            account,
            alias: alias.clone(),
        });
        self.rebuild_known_accounts();
        self.set_status(format!("Alias set: {alias}"), StatusLevel::Info);
    }

    fn remove_alias(&mut self) {
        let account = self.header.address().to_string();
        if let Some(store) = self.store.as_ref() {
            if let Err(err) = store.remove_alias(&account) {
                self.set_status(format!("Alias not removed: {err:#}"), StatusLevel::Error);
                return;
            }
        }
        let before = self.aliases.local.len();
        self.aliases.local.retain(|known| known.account != account);
        if self.aliases.local.len() == before {
            self.set_status("No local alias for this account", StatusLevel::Warn);
            return;
        }
        self.rebuild_known_accounts();
        self.set_status("Alias removed", StatusLevel::Info);
    }

    fn handle_command_key(&mut self, key: KeyEvent) -> Action {
        match key.code {
            KeyCode::Esc => {
                self.input_mode = InputMode::Normal;
                self.command.input.clear();
                Action::None
            }
            KeyCode::Enter => {
                self.input_mode = InputMode::Normal;
                let input = std::mem::take(&mut self.command.input);
                if input.trim().is_empty() {
                    return Action::None;
                }
                self.command.last = Some(input.clone());
                parse_command(&input).into_action()
            }
            KeyCode::Backspace => {
                self.command.input.pop();
                Action::None
            }
            KeyCode::Char(c) => {
                self.command.input.push(c);
                Action::None
            }
            _ => Action::None,
        }
    }
}

impl Module for App {
    fn handle_key(&mut self, key: KeyEvent) -> Action {
        if key.kind != KeyEventKind::Press {
            return Action::None;
        }
        if self.input_mode == InputMode::Command {
            return self.handle_command_key(key);
        }
        if key.modifiers.contains(KeyModifiers::CONTROL) && key.code == KeyCode::Char('c') {
            return Action::Quit;
        }
        match key.code {
            KeyCode::Esc if self.qr.is_some() => Action::CloseOverlay,
            KeyCode::Char('q') if self.qr.is_some() => Action::CloseOverlay,
            KeyCode::Char('q') => Action::Quit,
            KeyCode::Char('c') | KeyCode::Char('y') => Action::Copy,
            KeyCode::Char('v') => Action::ShowQr,
            KeyCode::Char('r') => Action::Refresh,
            KeyCode::Char(':') => Action::OpenCommand,
            _ => Action::None,
        }
    }
}
