use anyhow::Context;
use jobscope_client::{ApiClient, ClientConfig};
use jobscope_core::{AppConfig, LogConfig};
use jobscope_i18n::{
    Catalog, FileLocaleStore, Locale, LocaleStore, StoreError, resolve_locale, system_language,
    translate_keywords,
};
use jobscope_logger::{LoggerConfig, WorkerGuard};
use std::path::Path;
use tracing::{info, warn};

pub struct App {
    config: AppConfig,
    store: Box<dyn LocaleStore>,
    catalog: Catalog,
    api: ApiClient,
    _log_guard: Option<WorkerGuard>,
}

/// A logger installed earlier (tests, embedding hosts) is kept.
fn init_logging(config: &LogConfig) -> Option<WorkerGuard> {
    match LoggerConfig::from(config).init() {
        Ok(guard) => guard,
        Err(e) => {
            warn!("Keeping existing logger: {}", e);
            None
        }
    }
}

impl App {
    /// Loads the YAML config at `config_path` and starts the application.
    pub fn bootstrap(config_path: impl AsRef<Path>) -> anyhow::Result<Self> {
        let config_path = config_path.as_ref();
        let config = AppConfig::load(config_path)
            .with_context(|| format!("loading config {}", config_path.display()))?;
        Self::from_config(config)
    }

    /// Starts from an already loaded config, using the file-backed locale
    /// store and the operating system language.
    pub fn from_config(config: AppConfig) -> anyhow::Result<Self> {
        let log_guard = init_logging(&config.log);

        let store = match &config.i18n.store_dir {
            Some(dir) => FileLocaleStore::new(dir),
            None => FileLocaleStore::in_config_dir().context("locating the locale store")?,
        };

        let mut app = Self::with_store(config, Box::new(store), system_language().as_deref())?;
        app._log_guard = log_guard;
        Ok(app)
    }

    /// Starts with an explicit preference store and host language. Does not
    /// touch the global logger.
    pub fn with_store(
        config: AppConfig,
        store: Box<dyn LocaleStore>,
        host_language: Option<&str>,
    ) -> anyhow::Result<Self> {
        let persisted = store.load();
        let locale = resolve_locale(persisted.as_deref(), host_language);
        info!(
            persisted = persisted.as_deref().unwrap_or("-"),
            host = host_language.unwrap_or("-"),
            "Resolved UI locale {}",
            locale
        );

        let catalog = match &config.i18n.messages_dir {
            Some(dir) => Catalog::with_overrides(locale, dir),
            None => Catalog::new(locale),
        };

        let api = ApiClient::new(ClientConfig::from(&config.api))
            .with_context(|| format!("creating API client for {}", config.api.base_url))?;

        Ok(Self {
            config,
            store,
            catalog,
            api,
            _log_guard: None,
        })
    }

    pub fn config(&self) -> &AppConfig {
        &self.config
    }

    pub fn locale(&self) -> Locale {
        self.catalog.locale()
    }

    pub fn catalog(&self) -> &Catalog {
        &self.catalog
    }

    pub fn api(&self) -> &ApiClient {
        &self.api
    }

    pub fn t(&self, key: &str) -> String {
        self.catalog.t(key)
    }

    /// Persists `locale` and switches to it. Nothing changes if the write
    /// fails.
    pub fn set_locale(&mut self, locale: Locale) -> Result<(), StoreError> {
        self.store.save(locale)?;
        self.catalog.set_locale(locale);
        info!("UI locale switched to {}", locale);
        Ok(())
    }

    /// Job description keywords rendered in the active locale.
    pub fn translate_keywords(&self, text: &str) -> String {
        translate_keywords(text, self.locale())
    }
}
