use std::fs;
use std::path::PathBuf;

use serde::Deserialize;
use tracing::warn;

use crate::domain::account::KnownAccount;

pub const DEFAULT_RPC: &str = "http://127.0.0.1:7076";
pub const DEFAULT_REFRESH_SECS: u64 = 60;

#[derive(Debug, Clone, Deserialize)]
pub struct KnownAccountSpec {
    pub account: String,
    pub alias: String,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct Config {
    /// Node RPC endpoint
    pub rpc: Option<String>,

    /// URL serving a JSON array of `{ account, alias }`
    pub known_accounts_url: Option<String>,

    /// Seconds between background dataset refreshes (0 disables)
    pub refresh_secs: Option<u64>,

    #[serde(default)]
    pub known_accounts: Vec<KnownAccountSpec>,
}

impl Config {
    pub fn rpc_url(&self) -> String {
        self.rpc
            .clone()
            .filter(|s| !s.trim().is_empty())
            .unwrap_or_else(|| DEFAULT_RPC.to_string())
    }

    pub fn refresh_secs(&self) -> u64 {
        self.refresh_secs.unwrap_or(DEFAULT_REFRESH_SECS)
    }

    /// Configured aliases, skipping blank entries
    pub fn known_accounts(&self) -> Vec<KnownAccount> {
        self.known_accounts
            .iter()
            .filter(|spec| !spec.account.trim().is_empty() && !spec.alias.trim().is_empty())
            .map(|spec| KnownAccount {
                account: normalize_address(&spec.account),
                alias: spec.alias.trim().to_string(),
            })
            .collect()
    }
}

pub fn load() -> Config {
    let Some(path) = config_path() else {
        return Config::default();
    };
    let content = match fs::read_to_string(&path) {
        Ok(content) => content,
        Err(_) => return Config::default(),
    };
    parse(&content).unwrap_or_else(|err| {
        warn!(path = %path.display(), error = %err, "ignoring invalid config");
        Config::default()
    })
}

pub fn parse(content: &str) -> Result<Config, toml::de::Error> {
    toml::from_str::<Config>(content)
}

pub fn config_path() -> Option<PathBuf> {
    if let Some(path) = std::env::var_os("NANOSCOPE_CONFIG").map(PathBuf::from) {
        return Some(path);
    }
    if let Some(xdg) = std::env::var_os("XDG_CONFIG_HOME").map(PathBuf::from) {
        return Some(xdg.join("nanoscope").join("config.toml"));
    }
    if let Some(home) = std::env::var_os("HOME").map(PathBuf::from) {
        return Some(home.join(".config").join("nanoscope").join("config.toml"));
    }

    directories::ProjectDirs::from("io", "nanoscope", "nanoscope")
        .map(|dirs| dirs.config_dir().join("config.toml"))
}

pub fn data_dir() -> Option<PathBuf> {
    if let Some(xdg) = std::env::var_os("XDG_DATA_HOME").map(PathBuf::from) {
        return Some(xdg.join("nanoscope"));
    }
    if let Some(home) = std::env::var_os("HOME").map(PathBuf::from) {
        return Some(home.join(".local").join("share").join("nanoscope"));
    }
    directories::ProjectDirs::from("io", "nanoscope", "nanoscope")
        .map(|dirs| dirs.data_dir().to_path_buf())
}

pub fn known_accounts_db_path() -> Option<PathBuf> {
    data_dir().map(|dir| dir.join("known_accounts.sqlite3"))
}

pub fn log_path() -> Option<PathBuf> {
    data_dir().map(|dir| dir.join("nanoscope.log"))
}

/// Trim and rewrite the legacy `xrb_` prefix to `nano_`.
pub fn normalize_address(address: &str) -> String {
    let trimmed = address.trim();
    match trimmed.strip_prefix("xrb_") {
        Some(rest) => format!("nano_{}", rest),
        None => trimmed.to_string(),
    }
}
