//! Shared building blocks for the jobscope crates: business status codes and
//! the application configuration with its YAML loader.

pub mod code;
pub mod config;
pub mod yaml;

pub use code::Code;
pub use config::{ApiConfig, AppConfig, I18nConfig, LogConfig};
pub use yaml::ConfigError;
