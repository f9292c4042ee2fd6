//! Configuration management subsystem.
//!
//! # Data Flow
//! ```text
//! config file (YAML)
//!     → loader.rs (read & deserialize, typed ConfigError)
//!     → store.rs (exactly-once commit, read-only thereafter)
//!     → Config shared by reference with the rest of the process
//! ```
//!
//! # Design Decisions
//! - Config is immutable once committed; there is no reload path
//! - All fields have zero-value defaults so minimal documents load
//! - Parsing is non-strict: unknown keys are ignored

pub mod loader;
pub mod schema;
pub mod store;

pub use loader::ConfigError;
pub use schema::{Config, LogConfig, ServerConfig, ServiceConfig};
pub use store::{get, init, ConfigStore};
