//! Configuration types for the review watcher

use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fmt;
use std::path::Path;
use std::time::Duration;

/// Environment variable holding the review API token
pub const PRACTICUM_TOKEN_VAR: &str = "TOKEN_PRACTICUM";
/// Environment variable holding the Telegram bot token
pub const TELEGRAM_TOKEN_VAR: &str = "TOKEN_TELEGRAM";
/// Environment variable holding the destination chat id
pub const TELEGRAM_CHAT_ID_VAR: &str = "CHAT_ID";

/// Main configuration structure
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub practicum: PracticumConfig,
    #[serde(default)]
    pub telegram: TelegramConfig,
    #[serde(default)]
    pub polling: PollingConfig,
}

/// Review status endpoint
#[derive(Clone, Serialize, Deserialize)]
pub struct PracticumConfig {
    #[serde(default = "default_endpoint")]
    pub endpoint: String,
    #[serde(default)]
    pub token: String,
    #[serde(default = "default_request_timeout", with = "humantime_serde")]
    pub request_timeout: Duration,
}

/// Telegram bot used as the notification channel
#[derive(Clone, Serialize, Deserialize)]
pub struct TelegramConfig {
    #[serde(default = "default_telegram_api_url")]
    pub api_url: String,
    #[serde(default)]
    pub token: String,
    #[serde(default)]
    pub chat_id: String,
}

/// Poll loop timing
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PollingConfig {
    #[serde(default = "default_interval", with = "humantime_serde")]
    pub interval: Duration,
}

impl Default for PracticumConfig {
    fn default() -> Self {
        Self {
            endpoint: default_endpoint(),
            token: String::new(),
            request_timeout: default_request_timeout(),
        }
    }
}

impl Default for TelegramConfig {
    fn default() -> Self {
        Self {
            api_url: default_telegram_api_url(),
            token: String::new(),
            chat_id: String::new(),
        }
    }
}

impl Default for PollingConfig {
    fn default() -> Self {
        Self {
            interval: default_interval(),
        }
    }
}

impl fmt::Debug for PracticumConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("PracticumConfig")
            .field("endpoint", &self.endpoint)
            .field("token", &redact(&self.token))
            .field("request_timeout", &self.request_timeout)
            .finish()
    }
}

impl fmt::Debug for TelegramConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TelegramConfig")
            .field("api_url", &self.api_url)
            .field("token", &redact(&self.token))
            .field("chat_id", &self.chat_id)
            .finish()
    }
}

fn redact(secret: &str) -> &'static str {
    if secret.is_empty() {
        "<unset>"
    } else {
        "<redacted>"
    }
}

fn default_endpoint() -> String {
    "https://practicum.yandex.ru/api/user_api/homework_statuses/".to_string()
}

fn default_request_timeout() -> Duration {
    Duration::from_secs(30)
}

fn default_telegram_api_url() -> String {
    "https://api.telegram.org".to_string()
}

fn default_interval() -> Duration {
    Duration::from_secs(600)
}

impl Config {
    /// Fill empty credentials from the process environment
    pub fn resolve_secrets(&mut self) {
        self.resolve_secrets_with(|name| std::env::var(name).ok());
    }

    /// Fill empty credentials using `lookup` to read variables
    pub fn resolve_secrets_with<F>(&mut self, lookup: F)
    where
        F: Fn(&str) -> Option<String>,
    {
        let slots = [
            (&mut self.practicum.token, PRACTICUM_TOKEN_VAR),
            (&mut self.telegram.token, TELEGRAM_TOKEN_VAR),
            (&mut self.telegram.chat_id, TELEGRAM_CHAT_ID_VAR),
        ];
        for (slot, var) in slots {
            if !slot.is_empty() {
                continue;
            }
            if let Some(value) = lookup(var).filter(|v| !v.trim().is_empty()) {
                tracing::debug!("Using {} from environment", var);
                *slot = value;
            }
        }
    }

    /// Ensure every credential the watcher cannot run without is present
    pub fn check_required(&self) -> crate::Result<()> {
        let missing: Vec<&str> = [
            (&self.practicum.token, PRACTICUM_TOKEN_VAR),
            (&self.telegram.token, TELEGRAM_TOKEN_VAR),
            (&self.telegram.chat_id, TELEGRAM_CHAT_ID_VAR),
        ]
        .into_iter()
        .filter(|(value, _)| value.trim().is_empty())
        .map(|(_, var)| var)
        .collect();

        if !missing.is_empty() {
            return Err(crate::WatcherError::Config(format!(
                "missing required settings: {}",
                missing.join(", ")
            )));
        }

        if self.polling.interval.is_zero() {
            return Err(crate::WatcherError::Config(
                "polling interval must be greater than zero".to_string(),
            ));
        }

        Ok(())
    }
}

/// Load a `.env` file into the process environment
///
/// Variables already set in the environment win. A missing or unreadable
/// file only logs; credentials may still come from the config file.
pub fn load_env_file(path: Option<&Path>) {
    let result = match path {
        Some(path) => dotenv::from_path(path).map(|_| path.to_path_buf()),
        None => dotenv::dotenv(),
    };

    match result {
        Ok(loaded) => tracing::info!("Loaded environment from {}", loaded.display()),
        Err(e) if e.not_found() => tracing::debug!("No .env file found"),
        Err(e) => tracing::warn!("Failed to load .env file: {}", e),
    }
}

/// Read the variables of a `.env` file without touching the process environment
pub fn read_env_file(path: &Path) -> crate::Result<HashMap<String, String>> {
    let entries = dotenv::from_path_iter(path).map_err(|e| {
        crate::WatcherError::Config(format!("Failed to read env file {:?}: {}", path, e))
    })?;

    entries
        .map(|entry| {
            entry.map_err(|e| {
                crate::WatcherError::Config(format!("Invalid env file {:?}: {}", path, e))
            })
        })
        .collect()
}

/// Load configuration from a JSON file
pub fn load_config(path: &Path) -> crate::Result<Config> {
    let content = std::fs::read_to_string(path).map_err(|e| {
        crate::WatcherError::Config(format!("Failed to read config file {:?}: {}", path, e))
    })?;
    let config: Config = serde_json::from_str(&content)?;
    Ok(config)
}
