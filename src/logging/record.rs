//! Log records and structured fields.

use std::fmt;
use std::panic::Location;

use chrono::{DateTime, Local};
use serde_json::Value;

use crate::logging::level::Level;

/// Timestamp layout shared by both encoders: `YYYY-MM-DD HH:MM:SS.mmm`.
pub const TIMESTAMP_FORMAT: &str = "%Y-%m-%d %H:%M:%S%.3f";

/// One structured key-value pair attached to a record.
#[derive(Debug, Clone, PartialEq)]
pub struct Field {
    pub key: &'static str,
    pub value: Value,
}

/// Build a structured field from anything serde_json can represent
/// directly (strings, integers, floats, booleans, …).
pub fn field(key: &'static str, value: impl Into<Value>) -> Field {
    Field {
        key,
        value: value.into(),
    }
}

/// Call site of the emission, reported in short form
/// (`parent/file.rs:line`).
#[derive(Debug, Clone, Copy)]
pub struct Caller {
    file: &'static str,
    line: u32,
}

impl Caller {
    pub fn from_location(loc: &'static Location<'static>) -> Self {
        Self {
            file: loc.file(),
            line: loc.line(),
        }
    }
}

impl fmt::Display for Caller {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        // Keep the last two path components, like zap's short caller.
        let mut parts = self.file.rsplit(['/', '\\']);
        let file = parts.next().unwrap_or(self.file);
        match parts.next() {
            Some(dir) => write!(f, "{}/{}:{}", dir, file, self.line),
            None => write!(f, "{}:{}", file, self.line),
        }
    }
}

/// A fully assembled record handed to each sink's encoder.
#[derive(Debug)]
pub struct Record<'a> {
    pub time: DateTime<Local>,
    pub level: Level,
    pub caller: Caller,
    pub message: &'a str,
    pub fields: &'a [Field],
    /// Captured for records at `Error` severity or above.
    pub stacktrace: Option<String>,
}
