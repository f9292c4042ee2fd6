//! Severity levels and name mapping.

use std::fmt;

/// Record severity, ordered from least to most severe.
///
/// `DPanic` and above are reserved for unrecoverable call sites; see
/// [`Logger::panic`](crate::logging::Logger::panic) and
/// [`Logger::fatal`](crate::logging::Logger::fatal).
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Level {
    Debug,
    Info,
    Warn,
    Error,
    DPanic,
    Panic,
    Fatal,
}

impl Level {
    /// Map a configured level name to a severity.
    ///
    /// Unrecognized names degrade to `Info` rather than failing: a
    /// misspelled level is a low-risk misconfiguration, not a reason to
    /// refuse startup.
    pub fn from_name(name: &str) -> Level {
        match name {
            "debug" => Level::Debug,
            "info" => Level::Info,
            "warn" => Level::Warn,
            "error" => Level::Error,
            "dpanic" => Level::DPanic,
            "panic" => Level::Panic,
            "fatal" => Level::Fatal,
            _ => Level::Info,
        }
    }

    /// Upper-case tag used by both encoders.
    pub fn as_str(&self) -> &'static str {
        match self {
            Level::Debug => "DEBUG",
            Level::Info => "INFO",
            Level::Warn => "WARN",
            Level::Error => "ERROR",
            Level::DPanic => "DPANIC",
            Level::Panic => "PANIC",
            Level::Fatal => "FATAL",
        }
    }
}

impl fmt::Display for Level {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
