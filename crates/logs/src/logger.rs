use crate::Result;
use seedlock_core::constants::{LOGS_DIR, LOG_FILE_NAME};
use std::path::{Path, PathBuf};
use tracing_appender::{non_blocking::WorkerGuard, rolling};
use tracing_subscriber::{
    fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter,
};

const DEFAULT_LOG_LEVEL: &str = "seedlock=info";

/// Writes tracing output to the terminal and a daily log file.
pub struct Logger {
    logs_dir: PathBuf,
    name: String,
}

impl Logger {
    /// Logger writing into the logs directory of a data directory.
    pub fn new(data_dir: impl AsRef<Path>) -> Self {
        Self::new_dir(data_dir.as_ref().join(LOGS_DIR), LOG_FILE_NAME)
    }

    /// Logger writing into a specific directory and file name.
    pub fn new_dir(logs_dir: PathBuf, name: impl Into<String>) -> Self {
        Self {
            logs_dir,
            name: name.into(),
        }
    }

    /// Directory for log files.
    pub fn logs_dir(&self) -> &Path {
        &self.logs_dir
    }

    /// Log files in the logs directory, oldest first.
    ///
    /// Rotated files carry a date suffix after the file name.
    pub fn log_files(&self) -> Result<Vec<PathBuf>> {
        let mut files = Vec::new();
        if !self.logs_dir.exists() {
            return Ok(files);
        }
        for entry in std::fs::read_dir(&self.logs_dir)? {
            let path = entry?.path();
            let matches = path
                .file_name()
                .map(|name| name.to_string_lossy().starts_with(&self.name))
                .unwrap_or(false);
            if matches && path.is_file() {
                files.push(path);
            }
        }
        files.sort();
        Ok(files)
    }

    /// Install the global subscriber.
    ///
    /// The `RUST_LOG` environment variable takes precedence over
    /// the default log level. The returned guard flushes the log
    /// file when dropped so it must be held until exit.
    pub fn init_subscriber(
        &self,
        default_log_level: Option<String>,
    ) -> Result<WorkerGuard> {
        std::fs::create_dir_all(&self.logs_dir)?;

        let directives = std::env::var("RUST_LOG").unwrap_or_else(|_| {
            default_log_level.unwrap_or_else(|| DEFAULT_LOG_LEVEL.to_owned())
        });
        let filter = EnvFilter::try_new(directives)?;

        let appender = rolling::daily(&self.logs_dir, &self.name);
        let (writer, guard) = tracing_appender::non_blocking(appender);

        tracing_subscriber::registry()
            .with(filter)
            .with(fmt::layer().with_writer(std::io::stderr).without_time())
            .with(fmt::layer().with_writer(writer).with_ansi(false))
            .try_init()?;

        Ok(guard)
    }
}
