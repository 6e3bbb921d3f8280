//! Logging setup shared by the jobscope crates.
//!
//! Console and daily rolling file output, both filtered by one level, with an
//! optional background task that keeps only the newest dated log files.

use chrono::NaiveDate;
use jobscope_core::LogConfig;
use log::error;
use std::path::{Path, PathBuf};
use std::time::Duration;
use thiserror::Error;
pub use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::{
    Layer, Registry,
    filter::LevelFilter,
    fmt::{self, time::ChronoLocal},
    layer::SubscriberExt,
    util::{SubscriberInitExt, TryInitError},
};

const DEFAULT_TIME_FORMAT: &str = "%Y-%m-%d %H:%M:%S%.3f";
const DEFAULT_CLEANUP_INTERVAL: Duration = Duration::from_secs(3600);
/// Suffix written by `tracing_appender::rolling::daily`.
const ROLLING_DATE_FORMAT: &str = "%Y-%m-%d";

#[derive(Debug, Error)]
pub enum LoggerError {
    #[error("a global subscriber is already installed: {0}")]
    AlreadyInitialized(#[from] TryInitError),
}

/// Builder for the global `tracing` subscriber.
pub struct LoggerConfig {
    /// Applies to both outputs.
    level: LevelFilter,
    /// `chrono` strftime pattern.
    time_format: String,
    /// Write to stdout.
    console: bool,
    /// Write to a daily rolling file under `log_dir`.
    file: bool,
    log_dir: PathBuf,
    /// Rolled files are named `<prefix>.<YYYY-MM-DD>`.
    file_prefix: String,
    /// Dated files to keep; `None` disables cleanup.
    max_files: Option<usize>,
    /// Pause between two cleanup sweeps.
    cleanup_interval: Duration,
}

impl Default for LoggerConfig {
    fn default() -> Self {
        Self::from(&LogConfig::default())
    }
}

impl From<&LogConfig> for LoggerConfig {
    fn from(config: &LogConfig) -> Self {
        Self {
            level: parse_level(&config.level),
            time_format: DEFAULT_TIME_FORMAT.to_string(),
            console: config.console,
            file: config.file,
            log_dir: config.dir.clone(),
            file_prefix: config.file_prefix.clone(),
            max_files: config.max_files.map(usize::from),
            cleanup_interval: DEFAULT_CLEANUP_INTERVAL,
        }
    }
}

/// Unknown level names fall back to `INFO`.
pub fn parse_level(level: &str) -> LevelFilter {
    level.parse().unwrap_or(LevelFilter::INFO)
}

impl LoggerConfig {
    /// Settings of `LogConfig::default()`.
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the level by name (`trace` .. `error`, `off`).
    pub fn level(mut self, level: &str) -> Self {
        self.level = parse_level(level);
        self
    }

    /// `chrono` strftime pattern used for timestamps.
    pub fn time_format(mut self, format: impl Into<String>) -> Self {
        self.time_format = format.into();
        self
    }

    /// Turns stdout output on or off.
    pub fn enable_console(mut self, enable: bool) -> Self {
        self.console = enable;
        self
    }

    /// Turns daily rolling file output on or off.
    pub fn enable_file(mut self, enable: bool) -> Self {
        self.file = enable;
        self
    }

    /// Directory that receives the rolled files.
    pub fn log_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.log_dir = dir.into();
        self
    }

    /// Rolled files are named `<prefix>.<YYYY-MM-DD>`.
    pub fn file_prefix(mut self, prefix: impl Into<String>) -> Self {
        self.file_prefix = prefix.into();
        self
    }

    /// Keep at most `count` dated files; older ones are removed.
    pub fn max_files(mut self, count: usize) -> Self {
        self.max_files = Some(count);
        self
    }

    /// Pause between two cleanup sweeps. Defaults to one hour.
    pub fn cleanup_interval(mut self, interval: Duration) -> Self {
        self.cleanup_interval = interval;
        self
    }

    /// Installs the global subscriber.
    ///
    /// Hold the returned guard for the life of the process so buffered file
    /// output is flushed on exit. Fails if a subscriber is already installed.
    pub fn init(self) -> Result<Option<WorkerGuard>, LoggerError> {
        let console_layer = self.console.then(|| {
            fmt::layer()
                .with_timer(ChronoLocal::new(self.time_format.clone()))
                .with_writer(std::io::stdout)
                .with_filter(self.level)
        });

        let (file_layer, guard) = if self.file {
            let appender = tracing_appender::rolling::daily(&self.log_dir, &self.file_prefix);
            let (writer, guard) = tracing_appender::non_blocking(appender);
            let layer = fmt::layer()
                .with_timer(ChronoLocal::new(self.time_format.clone()))
                .with_ansi(false)
                .with_writer(writer)
                .with_filter(self.level);
            (Some(layer), Some(guard))
        } else {
            (None, None)
        };

        Registry::default()
            .with(console_layer)
            .with(file_layer)
            .try_init()?;

        self.spawn_cleanup();
        Ok(guard)
    }

    /// Starts the cleanup thread when file output and `max_files` are both set.
    fn spawn_cleanup(&self) {
        let Some(max_files) = self.max_files else {
            return;
        };
        if !self.file {
            return;
        }

        let log_dir = self.log_dir.clone();
        let prefix = self.file_prefix.clone();
        let interval = self.cleanup_interval;
        std::thread::spawn(move || {
            loop {
                cleanup_old_logs(&log_dir, &prefix, max_files);
                std::thread::sleep(interval);
            }
        });
    }
}

/// Date of a rolled file, if `file_name` is `<prefix>.<YYYY-MM-DD>`.
fn rolled_date(file_name: &str, prefix: &str) -> Option<NaiveDate> {
    let suffix = file_name.strip_prefix(prefix)?.strip_prefix('.')?;
    NaiveDate::parse_from_str(suffix, ROLLING_DATE_FORMAT).ok()
}

/// Removes all but the newest `max_files` rolled files in `log_dir`.
/// Files sharing the prefix without a date suffix are never touched.
pub fn cleanup_old_logs(log_dir: &Path, prefix: &str, max_files: usize) {
    let entries = match std::fs::read_dir(log_dir) {
        Ok(entries) => entries,
        Err(e) => {
            error!("Failed to read log directory {}: {}", log_dir.display(), e);
            return;
        }
    };

    let mut dated: Vec<(NaiveDate, PathBuf)> = entries
        .filter_map(Result::ok)
        .filter_map(|entry| {
            let name = entry.file_name().into_string().ok()?;
            let date = rolled_date(&name, prefix)?;
            Some((date, entry.path()))
        })
        .collect();

    dated.sort_by(|a, b| b.0.cmp(&a.0));

    for (_, path) in dated.iter().skip(max_files) {
        if let Err(e) = std::fs::remove_file(path) {
            error!("Failed to remove old log file {}: {}", path.display(), e);
        }
    }
}
