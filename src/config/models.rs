use std::{fmt::Display, time};

use serde::{Deserialize, Serialize};

use super::constants::*;
use super::defaults::*;

#[derive(Deserialize, Serialize, Debug, Clone, Default)]
pub struct Configuration {
    #[serde(default)]
    pub server: ServerConfig,

    #[serde(default)]
    pub log: LogConfig,

    #[serde(default)]
    pub backend: BackendConfig,

    #[serde(default)]
    pub context: ContextConfig,

    #[serde(default)]
    pub assistant: AssistantConfig,

    #[serde(default)]
    pub storage: StorageConfig,
}

#[derive(Deserialize, Serialize, Debug, Clone)]
pub struct ServerConfig {
    #[serde(default = "bind_address")]
    pub bind: String,

    /// Directory holding a built frontend, served at `/`
    #[serde(default)]
    pub static_dir: Option<String>,

    #[serde(default)]
    pub cors: bool,
}

#[derive(Deserialize, Serialize, Debug, Clone)]
pub struct LogConfig {
    #[serde(default = "log_level")]
    pub level: Option<String>,

    #[serde(default)]
    pub filters: Option<Vec<LogFilter>>,

    /// Logs go to stderr when no file is configured
    #[serde(default)]
    pub file: Option<LogFile>,
}

#[derive(Deserialize, Serialize, Debug, Clone)]
pub struct LogFilter {
    #[serde(default)]
    pub module: Option<String>,

    #[serde(default)]
    pub level: Option<String>,
}

#[derive(Deserialize, Serialize, Debug, Clone)]
pub struct LogFile {
    pub path: String,

    #[serde(default)]
    pub append: bool,
}

#[derive(Deserialize, Serialize, Debug, Clone)]
pub struct BackendConfig {
    #[serde(default = "openai_endpoint")]
    pub endpoint: String,

    /// May reference environment variables, e.g. `${OPENAI_API_KEY}`
    #[serde(default)]
    pub api_key: Option<String>,

    #[serde(default = "default_model")]
    pub model: String,

    #[serde(default)]
    pub timeout_secs: Option<u16>,

    #[serde(default = "default_true")]
    pub json_mode: bool,
}

#[derive(Deserialize, Serialize, Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ContextProviderKind {
    #[default]
    #[serde(rename = "static")]
    Static,
    #[serde(rename = "duckduckgo")]
    DuckDuckGo,
    #[serde(rename = "wikipedia")]
    Wikipedia,
}

#[derive(Deserialize, Serialize, Debug, Clone)]
pub struct ContextConfig {
    #[serde(default)]
    pub provider: ContextProviderKind,

    /// Overrides the provider's public base URL
    #[serde(default)]
    pub endpoint: Option<String>,

    #[serde(default)]
    pub timeout_secs: Option<u16>,

    #[serde(default = "history_turns")]
    pub history_turns: usize,
}

#[derive(Deserialize, Serialize, Debug, Clone)]
pub struct AssistantConfig {
    #[serde(default = "assistant_name")]
    pub name: String,

    #[serde(default = "assistant_creator")]
    pub creator: String,

    #[serde(default = "fallback_answer")]
    pub fallback_answer: String,

    #[serde(default = "fallback_source")]
    pub fallback_source: String,
}

#[derive(Deserialize, Serialize, Debug, Clone)]
pub enum StorageConfig {
    #[serde(rename = "sqlite")]
    Sqlite(SqliteStorage),
}

#[derive(Deserialize, Serialize, Debug, Clone, Default)]
pub struct SqliteStorage {
    pub path: Option<String>,
}

impl SqliteStorage {
    pub fn path(&self) -> Option<&str> {
        self.path.as_deref()
    }
}

impl BackendConfig {
    pub fn timeout(&self) -> Option<time::Duration> {
        self.timeout_secs
            .map(|secs| time::Duration::from_secs(secs as u64))
    }
}

impl ContextConfig {
    pub fn timeout(&self) -> Option<time::Duration> {
        self.timeout_secs
            .map(|secs| time::Duration::from_secs(secs as u64))
    }
}

impl Display for ContextProviderKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ContextProviderKind::Static => write!(f, "static"),
            ContextProviderKind::DuckDuckGo => write!(f, "duckduckgo"),
            ContextProviderKind::Wikipedia => write!(f, "wikipedia"),
        }
    }
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            bind: DEFAULT_BIND_ADDRESS.to_string(),
            static_dir: None,
            cors: false,
        }
    }
}

impl Default for LogConfig {
    fn default() -> Self {
        Self {
            level: Some("info".to_string()),
            filters: None,
            file: None,
        }
    }
}

impl Default for BackendConfig {
    fn default() -> Self {
        Self {
            endpoint: OPENAI_ENDPOINT.to_string(),
            api_key: None,
            model: DEFAULT_MODEL.to_string(),
            timeout_secs: None,
            json_mode: true,
        }
    }
}

impl Default for ContextConfig {
    fn default() -> Self {
        Self {
            provider: ContextProviderKind::default(),
            endpoint: None,
            timeout_secs: None,
            history_turns: HISTORY_TURNS,
        }
    }
}

impl Default for AssistantConfig {
    fn default() -> Self {
        Self {
            name: ASSISTANT_NAME.to_string(),
            creator: ASSISTANT_CREATOR.to_string(),
            fallback_answer: FALLBACK_ANSWER.to_string(),
            fallback_source: FALLBACK_SOURCE.to_string(),
        }
    }
}

impl Default for StorageConfig {
    fn default() -> Self {
        Self::Sqlite(SqliteStorage::default())
    }
}
