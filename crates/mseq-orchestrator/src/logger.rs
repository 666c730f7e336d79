// logger.rs — The logging capability injected into the orchestrator.
//
// The orchestrator never reaches for a process-wide logger; it writes to
// whatever MotionLogger it was given. TracingLogger forwards to `tracing`,
// so the binary's subscriber decides where the lines end up.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Severity of a log line.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LogLevel {
    Debug,
    Info,
    Warn,
    Error,
}

impl fmt::Display for LogLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            LogLevel::Debug => write!(f, "debug"),
            LogLevel::Info => write!(f, "info"),
            LogLevel::Warn => write!(f, "warn"),
            LogLevel::Error => write!(f, "error"),
        }
    }
}

/// Write-only sink for (level, message) pairs.
pub trait MotionLogger {
    fn log(&self, level: LogLevel, message: &str);
}

/// Forwards every line to `tracing` under the `mseq` target.
#[derive(Debug, Clone, Copy, Default)]
pub struct TracingLogger;

impl MotionLogger for TracingLogger {
    fn log(&self, level: LogLevel, message: &str) {
        match level {
            LogLevel::Debug => tracing::debug!(target: "mseq", "{}", message),
            LogLevel::Info => tracing::info!(target: "mseq", "{}", message),
            LogLevel::Warn => tracing::warn!(target: "mseq", "{}", message),
            LogLevel::Error => tracing::error!(target: "mseq", "{}", message),
        }
    }
}

impl<T: MotionLogger + ?Sized> MotionLogger for &T {
    fn log(&self, level: LogLevel, message: &str) {
        (**self).log(level, message)
    }
}
