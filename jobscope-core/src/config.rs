//! Application configuration. Every section and field is optional in the
//! YAML source; omitted values take the defaults below.

use serde::Deserialize;
use std::path::{Path, PathBuf};

use crate::yaml::{self, ConfigError};

pub const DEFAULT_API_BASE: &str = "http://localhost:8080";
pub const DEFAULT_TIMEOUT_MS: u64 = 10_000;

#[derive(Debug, Clone, Default, Deserialize, PartialEq)]
#[serde(default)]
pub struct AppConfig {
    pub api: ApiConfig,
    pub i18n: I18nConfig,
    pub log: LogConfig,
}

impl AppConfig {
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        yaml::load_from_file(path)
    }

    pub fn parse(content: &str) -> Result<Self, ConfigError> {
        yaml::load_from_str(content)
    }
}

#[derive(Debug, Clone, Deserialize, PartialEq)]
#[serde(default)]
pub struct ApiConfig {
    /// Prefix applied to every request path.
    pub base_url: String,
    /// Wall-clock limit per request, in milliseconds. `0` means no limit.
    pub timeout_ms: u64,
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_API_BASE.to_string(),
            timeout_ms: DEFAULT_TIMEOUT_MS,
        }
    }
}

#[derive(Debug, Clone, Default, Deserialize, PartialEq)]
#[serde(default)]
pub struct I18nConfig {
    /// Directory holding the persisted locale preference. `None` means the
    /// per-user config directory.
    pub store_dir: Option<PathBuf>,
    /// Optional directory of `<tag>.toml` message files overriding the
    /// built-in catalog.
    pub messages_dir: Option<PathBuf>,
}

#[derive(Debug, Clone, Deserialize, PartialEq)]
#[serde(default)]
pub struct LogConfig {
    pub level: String,
    pub console: bool,
    pub file: bool,
    pub dir: PathBuf,
    pub file_prefix: String,
    pub max_files: Option<u16>,
}

impl Default for LogConfig {
    fn default() -> Self {
        Self {
            level: "INFO".to_string(),
            console: true,
            file: false,
            dir: PathBuf::from("./logs"),
            file_prefix: "jobscope.log".to_string(),
            max_files: None,
        }
    }
}
