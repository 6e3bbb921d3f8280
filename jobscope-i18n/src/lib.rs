pub mod catalog;
pub mod keywords;
pub mod locale;
pub mod store;

pub use catalog::Catalog;
pub use keywords::{translate_keyword, translate_keywords};
pub use locale::{Locale, UnsupportedLocale, resolve_locale, system_language};
pub use store::{FileLocaleStore, LocaleStore, MemoryLocaleStore, STORAGE_KEY, StoreError};
