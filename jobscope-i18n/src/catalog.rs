//! UI message catalog.
//!
//! Messages live in one TOML file per locale; nested tables flatten into
//! dotted keys (`[nav] home = ".."` is `nav.home`). Lookups try the active
//! locale, then [`Locale::DEFAULT`], then render the key itself.

use std::collections::HashMap;
use std::fs;
use std::path::Path;
use std::sync::OnceLock;
use tracing::{error, info};

use crate::locale::Locale;

pub type Messages = HashMap<String, String>;

const BUILTIN_SOURCES: [(Locale, &str); 3] = [
    (Locale::En, include_str!("../locales/en.toml")),
    (Locale::ZhCn, include_str!("../locales/zh-CN.toml")),
    (Locale::Ms, include_str!("../locales/ms.toml")),
];

/// Embedded catalogs, parsed on first use.
fn builtin() -> &'static HashMap<Locale, Messages> {
    static BUILTIN: OnceLock<HashMap<Locale, Messages>> = OnceLock::new();
    BUILTIN.get_or_init(|| {
        BUILTIN_SOURCES
            .iter()
            .map(|(locale, source)| {
                let messages = parse_messages(source).unwrap_or_else(|e| {
                    error!("Built-in messages for {} are invalid: {}", locale, e);
                    Messages::new()
                });
                (*locale, messages)
            })
            .collect()
    })
}

pub fn parse_messages(source: &str) -> Result<Messages, toml::de::Error> {
    let table: toml::Table = toml::from_str(source)?;
    let mut messages = Messages::new();
    flatten("", &table, &mut messages);
    Ok(messages)
}

/// Nested tables become dotted keys; non-string leaves keep their TOML text.
fn flatten(prefix: &str, table: &toml::Table, out: &mut Messages) {
    for (key, value) in table {
        let key = if prefix.is_empty() {
            key.clone()
        } else {
            format!("{prefix}.{key}")
        };
        match value {
            toml::Value::Table(inner) => flatten(&key, inner, out),
            toml::Value::String(text) => {
                out.insert(key, text.clone());
            }
            other => {
                out.insert(key, other.to_string());
            }
        }
    }
}

/// Reads `<tag>.toml` from disk. Files whose stem is not a supported tag,
/// and files that fail to parse, are skipped with a log line.
fn load_locale_file(path: &Path) -> Option<(Locale, Messages)> {
    if path.extension()? != "toml" {
        return None;
    }
    let stem = path.file_stem()?.to_str()?;
    let Ok(locale) = stem.parse::<Locale>() else {
        info!("Skipping messages for unsupported locale {}", stem);
        return None;
    };

    let content = fs::read_to_string(path)
        .inspect_err(|e| error!("Failed to read messages {}: {}", path.display(), e))
        .ok()?;
    let messages = parse_messages(&content)
        .inspect_err(|e| error!("Failed to parse messages {}: {}", path.display(), e))
        .ok()?;

    info!("Loaded {} messages for {}", messages.len(), locale);
    Some((locale, messages))
}

#[derive(Debug, Clone)]
pub struct Catalog {
    locale: Locale,
    messages: HashMap<Locale, Messages>,
}

impl Catalog {
    /// Built-in messages with `locale` active.
    pub fn new(locale: Locale) -> Self {
        Self::from_messages(locale, builtin().clone())
    }

    pub fn from_messages(locale: Locale, messages: HashMap<Locale, Messages>) -> Self {
        Self { locale, messages }
    }

    /// Built-in messages overlaid, key by key, with the files found in `dir`.
    /// A missing or unreadable directory leaves the built-in set unchanged.
    pub fn with_overrides(locale: Locale, dir: impl AsRef<Path>) -> Self {
        let mut catalog = Self::new(locale);
        let dir = dir.as_ref();

        let Ok(entries) = fs::read_dir(dir).inspect_err(|e| {
            error!("Failed to read messages directory {}: {}", dir.display(), e);
        }) else {
            return catalog;
        };

        for (locale, overrides) in entries
            .filter_map(Result::ok)
            .filter_map(|entry| load_locale_file(&entry.path()))
        {
            catalog.messages.entry(locale).or_default().extend(overrides);
        }
        catalog
    }

    pub fn locale(&self) -> Locale {
        self.locale
    }

    pub fn set_locale(&mut self, locale: Locale) {
        self.locale = locale;
    }

    /// Active locale first, then [`Locale::DEFAULT`].
    fn lookup(&self, key: &str) -> Option<&str> {
        [self.locale, Locale::DEFAULT]
            .iter()
            .find_map(|locale| self.messages.get(locale)?.get(key))
            .map(String::as_str)
    }

    pub fn t(&self, key: &str) -> String {
        self.t_with(key, &[])
    }

    /// Like [`Catalog::t`], replacing each `{name}` with its value from
    /// `args`. Placeholders without a value are kept verbatim.
    pub fn t_with(&self, key: &str, args: &[(&str, &str)]) -> String {
        let Some(template) = self.lookup(key) else {
            return key.to_string();
        };
        args.iter().fold(template.to_string(), |acc, (name, value)| {
            acc.replace(&format!("{{{name}}}"), value)
        })
    }
}
