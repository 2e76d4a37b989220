//! Per-session log file.
//!
//! One timestamped, append-only text file per session: a banner with the
//! effective configuration, then one line per logged event.

use std::fs::{File, OpenOptions};
use std::io::{ErrorKind, Write};
use std::path::{Path, PathBuf};

use thiserror::Error;
use time::macros::format_description;
use time::OffsetDateTime;

use crate::config::Config;
use crate::defaults::Defaults;

#[derive(Debug, Error)]
pub enum LogError {
    #[error("attempted to log before the session log file was created")]
    NotStarted,

    #[error("log directory {} does not exist", .0.display())]
    MissingDirectory(PathBuf),

    #[error("writing session log {}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

enum Sink {
    /// Logging is turned off in config; messages are dropped.
    Disabled,
    /// Logging is on but `begin` has not run yet.
    Pending,
    File { path: PathBuf, file: File },
}

pub struct SessionLog {
    sink: Sink,
}

impl SessionLog {
    pub fn disabled() -> Self {
        Self { sink: Sink::Disabled }
    }

    /// A log that must be started with [`SessionLog::start`] before use.
    pub fn pending() -> Self {
        Self { sink: Sink::Pending }
    }

    /// Pending when `config.logging` is on, disabled otherwise.
    pub fn for_config(config: &Config) -> Self {
        if config.logging {
            Self::pending()
        } else {
            Self::disabled()
        }
    }

    /// Open the log file for a pending log. Disabled and already started
    /// logs are left alone.
    pub fn start(&mut self, config: &Config) -> Result<(), LogError> {
        if matches!(self.sink, Sink::Pending) {
            *self = Self::begin(&config.logdir, config)?;
        }
        Ok(())
    }

    /// Create `<log_dir>/SANCdpd_log_<stamp>.txt` and write the session banner.
    ///
    /// Never reuses a file: if the stamped name is taken, `_1`, `_2`, ... is
    /// appended until a fresh name is found.
    pub fn begin(log_dir: &Path, config: &Config) -> Result<Self, LogError> {
        if !log_dir.is_dir() {
            return Err(LogError::MissingDirectory(log_dir.to_path_buf()));
        }

        let now = now();
        let stamp = now
            .format(format_description!("[year][month][day]_[hour][minute][second]"))
            .unwrap_or_else(|_| now.unix_timestamp().to_string());

        let (path, file) = create_unique(log_dir, &format!("{}{stamp}", Defaults::LOG_FILE_PREFIX))?;
        tracing::info!(path = %path.display(), "starting session log");

        let mut log = Self {
            sink: Sink::File { path, file },
        };
        log.write_banner(config)?;
        Ok(log)
    }

    pub fn path(&self) -> Option<&Path> {
        match &self.sink {
            Sink::File { path, .. } => Some(path),
            _ => None,
        }
    }

    pub fn is_enabled(&self) -> bool {
        !matches!(self.sink, Sink::Disabled)
    }

    pub fn log(&mut self, message: &str) -> Result<(), LogError> {
        tracing::debug!(target: "sancdpd::session", "{message}");
        match &mut self.sink {
            Sink::Disabled => Ok(()),
            Sink::Pending => Err(LogError::NotStarted),
            Sink::File { path, file } => {
                writeln!(file, "{}  {message}", timestamp())
                    .and_then(|_| file.flush())
                    .map_err(|source| LogError::Io { path: path.clone(), source })
            }
        }
    }

    fn write_banner(&mut self, config: &Config) -> Result<(), LogError> {
        let Sink::File { path, file } = &mut self.sink else {
            return Ok(());
        };
        let dump = serde_json::to_string_pretty(config)
            .unwrap_or_else(|e| format!("<unprintable config: {e}>"));
        let rule = "=".repeat(60);
        writeln!(
            file,
            "{rule}\n{} (ver {}) session log\nStarted: {}\nConfiguration:\n{dump}\n{rule}",
            Defaults::SOFTW_AGENT_NAME,
            Defaults::VERSION,
            timestamp(),
        )
        .and_then(|_| file.flush())
        .map_err(|source| LogError::Io { path: path.clone(), source })
    }
}

fn create_unique(dir: &Path, base: &str) -> Result<(PathBuf, File), LogError> {
    let mut n = 0u32;
    loop {
        let name = if n == 0 {
            format!("{base}.txt")
        } else {
            format!("{base}_{n}.txt")
        };
        let path = dir.join(name);
        match OpenOptions::new().write(true).create_new(true).open(&path) {
            Ok(file) => return Ok((path, file)),
            Err(e) if e.kind() == ErrorKind::AlreadyExists => n += 1,
            Err(source) => return Err(LogError::Io { path, source }),
        }
    }
}

fn now() -> OffsetDateTime {
    OffsetDateTime::now_local().unwrap_or_else(|_| OffsetDateTime::now_utc())
}

fn timestamp() -> String {
    let now = now();
    now.format(format_description!("[year]-[month]-[day] [hour]:[minute]:[second]"))
        .unwrap_or_else(|_| now.unix_timestamp().to_string())
}
