//! Persistence of the user's chosen locale.
//!
//! Reading never fails from the caller's point of view: unreadable or empty
//! values come back as `None` and resolution falls through to the host
//! language. Writes are immediate; the last writer wins.

use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use std::sync::Mutex;
use thiserror::Error;
use tracing::warn;

use crate::locale::Locale;

/// Name of the persisted preference.
pub const STORAGE_KEY: &str = "user-locale";
const APP_DIR: &str = "jobscope";

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("no per-user config directory is available")]
    NoConfigDir,
    #[error("failed to write {path}: {source}")]
    Write {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
}

pub trait LocaleStore: Send + Sync {
    /// Raw persisted value, unvalidated.
    fn load(&self) -> Option<String>;

    fn save(&self, locale: Locale) -> Result<(), StoreError>;
}

/// Stores the preference as a one-line file named [`STORAGE_KEY`].
#[derive(Debug, Clone)]
pub struct FileLocaleStore {
    path: PathBuf,
}

impl FileLocaleStore {
    pub fn new(dir: impl AsRef<Path>) -> Self {
        Self {
            path: dir.as_ref().join(STORAGE_KEY),
        }
    }

    /// Store under `<config_dir>/jobscope`.
    pub fn in_config_dir() -> Result<Self, StoreError> {
        dirs::config_dir()
            .map(|dir| Self::new(dir.join(APP_DIR)))
            .ok_or(StoreError::NoConfigDir)
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl LocaleStore for FileLocaleStore {
    fn load(&self) -> Option<String> {
        match fs::read_to_string(&self.path) {
            Ok(value) => {
                let value = value.trim();
                (!value.is_empty()).then(|| value.to_string())
            }
            Err(e) if e.kind() == io::ErrorKind::NotFound => None,
            Err(e) => {
                warn!("Failed to read locale preference {}: {}", self.path.display(), e);
                None
            }
        }
    }

    fn save(&self, locale: Locale) -> Result<(), StoreError> {
        let write = || -> io::Result<()> {
            if let Some(parent) = self.path.parent() {
                fs::create_dir_all(parent)?;
            }
            fs::write(&self.path, locale.tag())
        };
        write().map_err(|source| StoreError::Write {
            path: self.path.clone(),
            source,
        })
    }
}

/// Process-local store, for tests and embedders without a filesystem.
#[derive(Debug, Default)]
pub struct MemoryLocaleStore {
    value: Mutex<Option<String>>,
}

impl MemoryLocaleStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Seeds the store with an arbitrary raw value.
    pub fn with_value(value: impl Into<String>) -> Self {
        Self {
            value: Mutex::new(Some(value.into())),
        }
    }
}

impl LocaleStore for MemoryLocaleStore {
    fn load(&self) -> Option<String> {
        self.value
            .lock()
            .map(|value| value.clone())
            .unwrap_or_else(|poisoned| poisoned.into_inner().clone())
    }

    fn save(&self, locale: Locale) -> Result<(), StoreError> {
        let mut value = self
            .value
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner());
        *value = Some(locale.tag().to_string());
        Ok(())
    }
}
