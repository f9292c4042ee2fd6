//! Process-wide configuration store.
//!
//! # Responsibilities
//! - Load the configuration document exactly once per process
//! - Block racing initializers until the first load commits
//! - Expose read-only access for the remaining process lifetime
//!
//! # Design Decisions
//! - `ConfigStore` is an ordinary value so tests can build isolated
//!   instances; the process-wide singleton is one `static` of it
//! - Load failures surface as typed `ConfigError`s; exiting is the
//!   entry point's decision, not the store's
//! - First outcome wins: after a failed load the store never retries

use std::path::Path;
use std::sync::{LazyLock, Once, OnceLock};

use crate::config::loader::{load_config, ConfigError};
use crate::config::schema::Config;

/// Zero-value configuration handed out before initialization commits.
static EMPTY: LazyLock<Config> = LazyLock::new(Config::default);

/// The process-wide store backing [`init`] and [`get`].
static STORE: ConfigStore = ConfigStore::new();

/// Exactly-once holder of one immutable [`Config`].
///
/// The `Once` guard serializes racing initializers: one caller performs
/// the load while the rest block, and the `OnceLock` commit is
/// visible-before any read that observes it.
pub struct ConfigStore {
    guard: Once,
    slot: OnceLock<Config>,
}

impl ConfigStore {
    pub const fn new() -> Self {
        Self {
            guard: Once::new(),
            slot: OnceLock::new(),
        }
    }

    /// Load the document at `path` into this store, at most once.
    ///
    /// The first caller performs the load; concurrent callers block
    /// until it commits and then observe the identical value. Repeat
    /// calls ignore `path` and return the committed configuration. If
    /// the first load failed, every later call reports
    /// [`ConfigError::Unavailable`].
    pub fn init(&self, path: &Path) -> Result<&Config, ConfigError> {
        let mut first_failure = None;
        self.guard.call_once(|| match load_config(path) {
            Ok(config) => {
                // Single writer inside call_once; set cannot fail.
                let _ = self.slot.set(config);
            }
            Err(err) => first_failure = Some(err),
        });

        if let Some(err) = first_failure {
            return Err(err);
        }
        self.slot.get().ok_or(ConfigError::Unavailable)
    }

    /// The committed configuration, or the zero-value [`Config`] when
    /// called before [`init`](Self::init) completes. Never panics.
    pub fn get(&self) -> &Config {
        self.slot.get().unwrap_or_else(|| &*EMPTY)
    }
}

impl Default for ConfigStore {
    fn default() -> Self {
        Self::new()
    }
}

/// Initialize the process-wide configuration from the document at `path`.
pub fn init<P: AsRef<Path>>(path: P) -> Result<&'static Config, ConfigError> {
    STORE.init(path.as_ref())
}

/// The process-wide configuration committed by [`init`], or its
/// zero-value form before initialization completes.
pub fn get() -> &'static Config {
    STORE.get()
}
