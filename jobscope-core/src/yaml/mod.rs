//! YAML configuration loading with `${VAR}` / `${VAR:default}` substitution.
//!
//! Variables are looked up in the process environment after a best-effort
//! `.env` load. Unset variables without a default expand to an empty string.

use dotenvy::dotenv;
use regex::{Captures, Regex};
use serde::de::DeserializeOwned;
use std::env;
use std::fs;
use std::path::{Path, PathBuf};
use std::sync::OnceLock;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config file {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("invalid YAML config: {0}")]
    Parse(#[from] serde_yaml::Error),
}

/// Matches `${NAME}` and `${NAME:default}`.
fn var_pattern() -> &'static Regex {
    static VAR_REGEX: OnceLock<Regex> = OnceLock::new();
    VAR_REGEX.get_or_init(|| {
        Regex::new(r"\$\{([A-Z0-9_]+)(?::([^\}]*))?\}").expect("variable pattern is valid")
    })
}

/// Expands every placeholder in `content`.
pub fn expand_vars(content: &str) -> String {
    // production hosts usually have no .env file
    let _ = dotenv();

    var_pattern()
        .replace_all(content, |caps: &Captures| {
            let default = caps.get(2).map_or("", |m| m.as_str());
            env::var(&caps[1]).unwrap_or_else(|_| default.to_string())
        })
        .into_owned()
}

pub fn load_from_file<T: DeserializeOwned, P: AsRef<Path>>(path: P) -> Result<T, ConfigError> {
    let path = path.as_ref();
    let content = fs::read_to_string(path).map_err(|source| ConfigError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    load_from_str(&content)
}

pub fn load_from_str<T: DeserializeOwned>(content: &str) -> Result<T, ConfigError> {
    let expanded = expand_vars(content);
    Ok(serde_yaml::from_str(&expanded)?)
}
