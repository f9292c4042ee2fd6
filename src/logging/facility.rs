//! Process-wide log facility.
//!
//! # Responsibilities
//! - Construct the process logger exactly once, blocking racing callers
//! - Expose leveled emission entry points over the committed logger
//! - Fail loudly on emission before initialization
//!
//! # Design Decisions
//! - Same guard shape as `config::ConfigStore`: `Once` serializes the
//!   construction, `OnceLock` publishes the committed value
//! - A second `init` with different settings is silently ignored; sinks
//!   are never reconfigured after commit
//! - Emitting before `init` panics: silently dropped diagnostics would
//!   hide defects

use std::sync::{Once, OnceLock};

use crate::config::LogConfig;
use crate::logging::logger::{LogInitError, Logger};
use crate::logging::record::Field;

/// The process-wide facility backing the free functions in
/// [`crate::logging`].
static FACILITY: LogFacility = LogFacility::new();

/// Exactly-once holder of one [`Logger`].
pub struct LogFacility {
    guard: Once,
    slot: OnceLock<Logger>,
}

impl LogFacility {
    pub const fn new() -> Self {
        Self {
            guard: Once::new(),
            slot: OnceLock::new(),
        }
    }

    /// Construct the logger from `config`, at most once.
    ///
    /// The first caller builds the sinks; concurrent callers block
    /// until the commit. Repeat calls ignore `config` and succeed
    /// without side effects.
    pub fn init(&self, config: &LogConfig) -> Result<(), LogInitError> {
        let mut first_failure = None;
        self.guard.call_once(|| match Logger::new(config) {
            Ok(logger) => {
                let _ = self.slot.set(logger);
            }
            Err(err) => first_failure = Some(err),
        });

        if let Some(err) = first_failure {
            return Err(err);
        }
        match self.slot.get() {
            Some(_) => Ok(()),
            // A previous initializer already failed; first outcome wins.
            None => Err(LogInitError::Unavailable),
        }
    }

    /// The committed logger.
    ///
    /// # Panics
    ///
    /// Panics when called before [`init`](Self::init) completes;
    /// emitting into an uninitialized facility is a programming error.
    fn logger(&self) -> &Logger {
        match self.slot.get() {
            Some(logger) => logger,
            None => panic!("log facility not initialized: call logging::init first"),
        }
    }

    pub fn initialized(&self) -> bool {
        self.slot.get().is_some()
    }

    #[track_caller]
    pub fn debug(&self, msg: &str, fields: &[Field]) {
        self.logger().debug(msg, fields);
    }

    #[track_caller]
    pub fn info(&self, msg: &str, fields: &[Field]) {
        self.logger().info(msg, fields);
    }

    #[track_caller]
    pub fn warn(&self, msg: &str, fields: &[Field]) {
        self.logger().warn(msg, fields);
    }

    #[track_caller]
    pub fn error(&self, msg: &str, fields: &[Field]) {
        self.logger().error(msg, fields);
    }

    #[track_caller]
    pub fn dpanic(&self, msg: &str, fields: &[Field]) {
        self.logger().dpanic(msg, fields);
    }

    #[track_caller]
    pub fn panic(&self, msg: &str, fields: &[Field]) -> ! {
        self.logger().panic(msg, fields);
    }

    #[track_caller]
    pub fn fatal(&self, msg: &str, fields: &[Field]) -> ! {
        self.logger().fatal(msg, fields);
    }

    /// Flush every sink. A no-op when uninitialized, so teardown paths
    /// may call it unconditionally.
    pub fn sync(&self) {
        if let Some(logger) = self.slot.get() {
            let _ = logger.sync();
        }
    }
}

impl Default for LogFacility {
    fn default() -> Self {
        Self::new()
    }
}

/// Initialize the process-wide log facility. Idempotent; see
/// [`LogFacility::init`].
pub fn init(config: &LogConfig) -> Result<(), LogInitError> {
    FACILITY.init(config)
}

/// Whether the process-wide facility has committed its logger.
pub fn initialized() -> bool {
    FACILITY.initialized()
}

#[track_caller]
pub fn debug(msg: &str, fields: &[Field]) {
    FACILITY.debug(msg, fields);
}

#[track_caller]
pub fn info(msg: &str, fields: &[Field]) {
    FACILITY.info(msg, fields);
}

#[track_caller]
pub fn warn(msg: &str, fields: &[Field]) {
    FACILITY.warn(msg, fields);
}

#[track_caller]
pub fn error(msg: &str, fields: &[Field]) {
    FACILITY.error(msg, fields);
}

#[track_caller]
pub fn dpanic(msg: &str, fields: &[Field]) {
    FACILITY.dpanic(msg, fields);
}

/// Emit at PANIC severity, then panic. See [`Logger::panic`].
#[track_caller]
pub fn panic(msg: &str, fields: &[Field]) -> ! {
    FACILITY.panic(msg, fields);
}

/// Emit at FATAL severity, then exit non-zero. See [`Logger::fatal`].
#[track_caller]
pub fn fatal(msg: &str, fields: &[Field]) -> ! {
    FACILITY.fatal(msg, fields);
}

/// Flush the process-wide facility; safe to call before `init`.
pub fn sync() {
    FACILITY.sync();
}

#[cfg(test)]
mod tests {
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::Arc;
    use std::thread;

    use super::*;

    fn temp_config(dir: &tempfile::TempDir, name: &str) -> LogConfig {
        LogConfig {
            file_path: dir.path().join(name).to_string_lossy().into_owned(),
            level: "debug".to_string(),
            ..LogConfig::default()
        }
    }

    #[test]
    fn test_emit_before_init_panics() {
        let facility = LogFacility::new();
        let result = std::panic::catch_unwind(std::panic::AssertUnwindSafe(|| {
            facility.info("too early", &[]);
        }));
        assert!(result.is_err());
        assert!(!facility.initialized());
    }

    #[test]
    fn test_sync_before_init_is_noop() {
        let facility = LogFacility::new();
        facility.sync();
    }

    #[test]
    fn test_second_init_is_ignored() {
        let dir = tempfile::TempDir::new().unwrap();
        let facility = LogFacility::new();
        facility.init(&temp_config(&dir, "first.log")).unwrap();
        facility.init(&temp_config(&dir, "second.log")).unwrap();

        facility.info("routed", &[]);
        facility.sync();

        // Only the first configuration took effect.
        assert!(dir.path().join("first.log").exists());
        assert!(!dir.path().join("second.log").exists());
    }

    #[test]
    fn test_failed_first_init_never_retries() {
        let dir = tempfile::TempDir::new().unwrap();
        let facility = LogFacility::new();

        // An uncreatable log directory (parent is a regular file).
        let blocker = dir.path().join("blocker");
        std::fs::write(&blocker, b"").unwrap();
        let bad = LogConfig {
            file_path: blocker.join("mesh.log").to_string_lossy().into_owned(),
            ..LogConfig::default()
        };
        assert!(matches!(
            facility.init(&bad),
            Err(LogInitError::CreateDir { .. })
        ));

        // The first outcome stands even for a valid configuration.
        assert!(matches!(
            facility.init(&temp_config(&dir, "late.log")),
            Err(LogInitError::Unavailable)
        ));
        assert!(!facility.initialized());
    }

    #[test]
    fn test_racing_initializers_construct_once() {
        let dir = tempfile::TempDir::new().unwrap();
        let facility = Arc::new(LogFacility::new());
        let successes = Arc::new(AtomicUsize::new(0));

        let mut handles = Vec::new();
        for i in 0..8 {
            let facility = Arc::clone(&facility);
            let successes = Arc::clone(&successes);
            let config = temp_config(&dir, &format!("racer-{i}.log"));
            handles.push(thread::spawn(move || {
                if facility.init(&config).is_ok() {
                    successes.fetch_add(1, Ordering::SeqCst);
                }
            }));
        }
        for handle in handles {
            handle.join().unwrap();
        }

        // Every call reports success, but exactly one log file exists.
        assert_eq!(successes.load(Ordering::SeqCst), 8);
        let created: Vec<_> = std::fs::read_dir(dir.path())
            .unwrap()
            .map(|e| e.unwrap().file_name())
            .collect();
        assert_eq!(created.len(), 1);
        assert!(facility.initialized());
    }
}
