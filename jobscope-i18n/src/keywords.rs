//! Read-only keyword translation table used to localize job descriptions.
//!
//! Keyed by the canonical English keyword; each entry maps a locale tag to its
//! translation. English lookups always return the canonical keyword.

use std::collections::HashMap;
use std::sync::OnceLock;
use tracing::error;

use crate::locale::Locale;

type Translations = HashMap<String, HashMap<String, String>>;

fn table() -> &'static Translations {
    static TABLE: OnceLock<Translations> = OnceLock::new();
    TABLE.get_or_init(|| {
        toml::from_str(include_str!("../assets/keyword_translations.toml")).unwrap_or_else(|e| {
            error!("Keyword translation table is invalid: {}", e);
            Translations::new()
        })
    })
}

pub fn keyword_count() -> usize {
    table().len()
}

/// Translation of `keyword` into `locale`, matched case-insensitively. Unknown
/// keywords and missing translations return `keyword` unchanged.
pub fn translate_keyword<'a>(keyword: &'a str, locale: Locale) -> &'a str {
    if locale == Locale::En {
        return keyword;
    }
    table()
        .get(&keyword.to_lowercase())
        .and_then(|entry| entry.get(locale.tag()))
        .map_or(keyword, String::as_str)
}

/// Translates every alphanumeric run of `text` in place. Whitespace, line
/// breaks and punctuation between words are copied through unchanged.
pub fn translate_keywords(text: &str, locale: Locale) -> String {
    let mut out = String::with_capacity(text.len());
    let mut word_start: Option<usize> = None;

    for (i, c) in text.char_indices() {
        match (c.is_alphanumeric(), word_start) {
            (true, None) => word_start = Some(i),
            (false, Some(start)) => {
                out.push_str(translate_keyword(&text[start..i], locale));
                out.push(c);
                word_start = None;
            }
            (false, None) => out.push(c),
            (true, Some(_)) => {}
        }
    }
    if let Some(start) = word_start {
        out.push_str(translate_keyword(&text[start..], locale));
    }
    out
}
