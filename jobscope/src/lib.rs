//! Application entry point for jobscope.
//!
//! [`App::bootstrap`] performs the whole startup sequence: configuration,
//! logging, locale resolution (synchronous, before anything is shown), the
//! message catalog, then the API client.

mod app;

pub use app::App;

pub use jobscope_client as client;
pub use jobscope_i18n as i18n;
pub use jobscope_logger as logger;
