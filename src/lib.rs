//! MCP mesh gateway bootstrap library.
//!
//! Process-wide initialization for a gateway that routes calls to named
//! MCP backend targets:
//!
//! ```text
//! --config path ──▶ config::init ──▶ Config (exactly-once, immutable)
//!                                      │
//!                        Config.log    ▼
//!                   ──▶ logging::init ──▶ rotating file sink (JSON)
//!                                     └──▶ console sink (human lines)
//! ```
//!
//! Request routing and dispatch to the configured targets build on top
//! of these two subsystems and are out of scope here.

pub mod config;
pub mod logging;

pub use config::{Config, ConfigError, ConfigStore};
pub use logging::{LogFacility, LogInitError, Logger};
