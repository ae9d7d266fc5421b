// Unless explicitly stated otherwise all files in this repository are licensed
// under the Apache License Version 2.0.
// This product includes software developed by the BeePF project.
// Copyright 2026-present BeePF authors.

//! Process-wide logger for the BeePF console.
//!
//! Lines follow the agent layout:
//! `2026-10-19 12:34:56 UTC | BEEPF | INFO | (beepf_console::client:88) | message`

use std::fs::{File, OpenOptions};
use std::io::{self, Write};
use std::path::{Path, PathBuf};
use std::sync::Mutex;

use log::{Level, LevelFilter, Log, Metadata, Record, SetLoggerError};
use thiserror::Error;
use time::OffsetDateTime;
use time::macros::format_description;

const COMPONENT: &str = "BEEPF";

#[derive(Debug, Clone)]
pub struct LogConfig {
    pub level: LevelFilter,
    /// Append to this file instead of writing to stderr.
    pub file: Option<PathBuf>,
}

impl Default for LogConfig {
    fn default() -> Self {
        LogConfig {
            level: LevelFilter::Info,
            file: None,
        }
    }
}

#[derive(Debug, Error)]
pub enum InitError {
    /// A logger was already installed for this process.
    #[error("logger already initialized: {0}")]
    AlreadySet(#[source] SetLoggerError),
    #[error("could not open log file {}: {source}", .path.display())]
    OpenFile {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
}

/// Parse a level name as found in config files and environment variables.
/// Accepts `off` and `warning` in addition to the `log` crate names.
pub fn parse_level(value: &str) -> Option<LevelFilter> {
    match value.trim().to_ascii_lowercase().as_str() {
        "off" | "none" => Some(LevelFilter::Off),
        "trace" => Some(LevelFilter::Trace),
        "debug" => Some(LevelFilter::Debug),
        "info" => Some(LevelFilter::Info),
        "warn" | "warning" => Some(LevelFilter::Warn),
        "error" | "critical" => Some(LevelFilter::Error),
        _ => None,
    }
}

/// Install a stderr logger at `level`.
pub fn init_with_level(level: Level) -> Result<(), InitError> {
    init(LogConfig {
        level: level.to_level_filter(),
        file: None,
    })
}

pub fn init(config: LogConfig) -> Result<(), InitError> {
    let logger = Logger::new(&config)?;
    log::set_boxed_logger(Box::new(logger)).map_err(InitError::AlreadySet)?;
    log::set_max_level(config.level);
    Ok(())
}

/// Render one log line, without the trailing newline.
pub fn format_line(record: &Record<'_>, now: OffsetDateTime) -> String {
    let stamp = now
        .format(format_description!(
            "[year]-[month]-[day] [hour]:[minute]:[second]"
        ))
        .unwrap_or_else(|_| now.unix_timestamp().to_string());
    let location = match record.line() {
        Some(line) => format!("{}:{line}", record.target()),
        None => record.target().to_string(),
    };
    format!(
        "{stamp} UTC | {COMPONENT} | {} | ({location}) | {}",
        record.level(),
        record.args()
    )
}

enum Sink {
    Stderr,
    File(File),
}

struct Logger {
    level: LevelFilter,
    sink: Mutex<Sink>,
}

impl Logger {
    fn new(config: &LogConfig) -> Result<Self, InitError> {
        let sink = match &config.file {
            Some(path) => Sink::File(open_append(path)?),
            None => Sink::Stderr,
        };
        Ok(Logger {
            level: config.level,
            sink: Mutex::new(sink),
        })
    }
}

fn open_append(path: &Path) -> Result<File, InitError> {
    OpenOptions::new()
        .create(true)
        .append(true)
        .open(path)
        .map_err(|source| InitError::OpenFile {
            path: path.to_path_buf(),
            source,
        })
}

impl Log for Logger {
    fn enabled(&self, metadata: &Metadata<'_>) -> bool {
        metadata.level() <= self.level
    }

    fn log(&self, record: &Record<'_>) {
        if !self.enabled(record.metadata()) {
            return;
        }
        let line = format_line(record, OffsetDateTime::now_utc());
        let Ok(mut sink) = self.sink.lock() else {
            return;
        };
        // A logger has nowhere to report its own write failures.
        let _ = match &mut *sink {
            Sink::Stderr => writeln!(io::stderr().lock(), "{line}"),
            Sink::File(file) => writeln!(file, "{line}"),
        };
    }

    fn flush(&self) {
        if let Ok(mut sink) = self.sink.lock() {
            let _ = match &mut *sink {
                Sink::Stderr => io::stderr().flush(),
                Sink::File(file) => file.flush(),
            };
        }
    }
}
