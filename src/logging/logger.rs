//! Dual-sink structured logger.

use std::backtrace::Backtrace;
use std::fs;
use std::io::{self, BufWriter};
use std::panic::Location;
use std::path::{Path, PathBuf};
use std::process;

use chrono::Local;

use crate::config::LogConfig;
use crate::logging::encoder::{ConsoleEncoder, JsonEncoder};
use crate::logging::level::Level;
use crate::logging::record::{Caller, Field, Record};
use crate::logging::rotate::RollingWriter;
use crate::logging::sink::Sink;

/// Fallback destination when `log.file_path` is left empty.
const DEFAULT_FILE_PATH: &str = "logs/mcp-mesh.log";

/// Error type for log facility construction.
#[derive(Debug, thiserror::Error)]
pub enum LogInitError {
    #[error("failed to create log directory {path}: {source}")]
    CreateDir {
        path: String,
        #[source]
        source: io::Error,
    },

    #[error("failed to open log file {path}: {source}")]
    OpenFile {
        path: String,
        #[source]
        source: io::Error,
    },

    /// A previous initialization attempt already failed; the facility
    /// holds no logger and will never retry.
    #[error("log facility unavailable: initial construction failed")]
    Unavailable,
}

/// A structured logger fanning each record out to a rotating file sink
/// (JSON) and a console sink (human-readable), both filtering at the
/// severity derived from [`LogConfig::level`].
///
/// Records at `Error` severity or above carry a captured stack trace.
pub struct Logger {
    sinks: Vec<Sink>,
    stack_threshold: Level,
}

impl Logger {
    /// Build the file and console sinks described by `config`.
    ///
    /// Creates the log file's parent directory (and ancestors) when
    /// absent and opens the file eagerly, so misconfiguration surfaces
    /// here rather than on the first emission.
    pub fn new(config: &LogConfig) -> Result<Logger, LogInitError> {
        let path: PathBuf = resolve_file_path(config).to_path_buf();

        if let Some(dir) = path.parent().filter(|d| !d.as_os_str().is_empty()) {
            fs::create_dir_all(dir).map_err(|source| LogInitError::CreateDir {
                path: dir.display().to_string(),
                source,
            })?;
        }

        let rolling = RollingWriter::open(
            &path,
            config.max_size,
            config.max_backups,
            config.max_age,
            config.compress,
        )
        .map_err(|source| LogInitError::OpenFile {
            path: path.display().to_string(),
            source,
        })?;

        let threshold = Level::from_name(&config.level);
        let file_sink = Sink::new(
            threshold,
            Box::new(JsonEncoder),
            Box::new(BufWriter::new(rolling)),
        );
        let console_sink = Sink::new(
            threshold,
            Box::new(ConsoleEncoder),
            Box::new(io::stdout()),
        );

        Ok(Self::from_sinks(vec![file_sink, console_sink]))
    }

    /// Assemble a logger from pre-built sinks. Lets tests (or a hosting
    /// application) wire their own destinations.
    pub fn from_sinks(sinks: Vec<Sink>) -> Logger {
        Logger {
            sinks,
            stack_threshold: Level::Error,
        }
    }

    /// Emit one record to every sink; each sink applies its own
    /// threshold. Sink I/O failures are swallowed: logging must not
    /// take the process down.
    #[track_caller]
    pub fn log(&self, level: Level, msg: &str, fields: &[Field]) {
        let stacktrace = (level >= self.stack_threshold)
            .then(|| Backtrace::force_capture().to_string());
        let record = Record {
            time: Local::now(),
            level,
            caller: Caller::from_location(Location::caller()),
            message: msg,
            fields,
            stacktrace,
        };
        for sink in &self.sinks {
            let _ = sink.write(&record);
        }
    }

    #[track_caller]
    pub fn debug(&self, msg: &str, fields: &[Field]) {
        self.log(Level::Debug, msg, fields);
    }

    #[track_caller]
    pub fn info(&self, msg: &str, fields: &[Field]) {
        self.log(Level::Info, msg, fields);
    }

    #[track_caller]
    pub fn warn(&self, msg: &str, fields: &[Field]) {
        self.log(Level::Warn, msg, fields);
    }

    #[track_caller]
    pub fn error(&self, msg: &str, fields: &[Field]) {
        self.log(Level::Error, msg, fields);
    }

    /// Log at DPANIC severity. Unlike [`panic`](Self::panic) this does
    /// not terminate; it marks a should-never-happen condition observed
    /// in production.
    #[track_caller]
    pub fn dpanic(&self, msg: &str, fields: &[Field]) {
        self.log(Level::DPanic, msg, fields);
    }

    /// Emit at PANIC severity, flush, then panic with `msg`. Only for
    /// genuinely unrecoverable call sites.
    #[track_caller]
    pub fn panic(&self, msg: &str, fields: &[Field]) -> ! {
        self.log(Level::Panic, msg, fields);
        let _ = self.sync();
        panic!("{msg}");
    }

    /// Emit at FATAL severity, flush, then exit the process with a
    /// non-zero status. Only for genuinely unrecoverable call sites.
    #[track_caller]
    pub fn fatal(&self, msg: &str, fields: &[Field]) -> ! {
        self.log(Level::Fatal, msg, fields);
        let _ = self.sync();
        process::exit(1);
    }

    /// Flush buffered records through every sink. Call before process
    /// exit to avoid losing buffered file writes.
    pub fn sync(&self) -> io::Result<()> {
        let mut result = Ok(());
        for sink in &self.sinks {
            if let Err(err) = sink.flush() {
                result = Err(err);
            }
        }
        result
    }
}

/// Resolve the configured destination path, with the empty-path
/// fallback applied.
fn resolve_file_path(config: &LogConfig) -> &Path {
    if config.file_path.is_empty() {
        Path::new(DEFAULT_FILE_PATH)
    } else {
        Path::new(&config.file_path)
    }
}
