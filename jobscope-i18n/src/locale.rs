//! Supported UI locales and startup locale selection.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum Locale {
    #[default]
    #[serde(rename = "en")]
    En,
    #[serde(rename = "zh-CN")]
    ZhCn,
    #[serde(rename = "ms")]
    Ms,
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unsupported locale: {0:?}")]
pub struct UnsupportedLocale(pub String);

impl Locale {
    pub const ALL: [Locale; 3] = [Locale::En, Locale::ZhCn, Locale::Ms];
    /// Used when nothing else matches, and for message keys missing from
    /// the active locale.
    pub const DEFAULT: Locale = Locale::En;

    pub const fn tag(self) -> &'static str {
        match self {
            Locale::En => "en",
            Locale::ZhCn => "zh-CN",
            Locale::Ms => "ms",
        }
    }
}

impl fmt::Display for Locale {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.tag())
    }
}

/// Exact tag match: `"zh-cn"` or `"en-US"` are not supported locales.
impl FromStr for Locale {
    type Err = UnsupportedLocale;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Locale::ALL
            .into_iter()
            .find(|locale| locale.tag() == s)
            .ok_or_else(|| UnsupportedLocale(s.to_string()))
    }
}

/// Primary subtags checked against the host language, in priority order.
/// A supported locale without an entry here is never picked from the host
/// language.
const HOST_LANGUAGE_PREFIXES: [(&str, Locale); 3] = [
    ("en", Locale::En),
    ("ms", Locale::Ms),
    ("zh", Locale::ZhCn),
];

/// `zh` for `zh-CN`, `zh_CN.UTF-8` or `zh`.
fn primary_subtag(tag: &str) -> &str {
    tag.split(['-', '_', '.', '@']).next().unwrap_or(tag)
}

/// Picks the startup locale: a supported persisted preference first, then the
/// host language by primary subtag, then [`Locale::DEFAULT`].
pub fn resolve_locale(persisted: Option<&str>, host_language: Option<&str>) -> Locale {
    if let Some(locale) = persisted.and_then(|value| value.parse().ok()) {
        return locale;
    }

    if let Some(tag) = host_language {
        let primary = primary_subtag(tag.trim());
        if let Some((_, locale)) = HOST_LANGUAGE_PREFIXES
            .iter()
            .find(|(prefix, _)| primary.eq_ignore_ascii_case(prefix))
        {
            return *locale;
        }
    }

    Locale::DEFAULT
}

/// Language tag reported by the operating system, if any.
pub fn system_language() -> Option<String> {
    sys_locale::get_locale()
}
