//! Configuration schema definitions.
//!
//! This module defines the complete configuration structure for the mesh.
//! All types derive Serde traits for deserialization from the YAML
//! configuration document.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

/// Root configuration for the mesh gateway.
#[derive(Debug, Clone, Deserialize, Serialize, Default, PartialEq)]
#[serde(default)]
pub struct Config {
    /// Listener settings for the gateway server.
    pub server: ServerConfig,

    /// Log facility settings.
    pub log: LogConfig,

    /// Named MCP backend targets, keyed by service name.
    pub mcp_config: HashMap<String, ServiceConfig>,
}

/// Gateway server settings.
///
/// The port is accepted as-is at load time; range checking is deferred
/// to whatever later binds it.
#[derive(Debug, Clone, Deserialize, Serialize, Default, PartialEq)]
#[serde(default)]
pub struct ServerConfig {
    pub port: i64,
}

/// Log facility settings.
#[derive(Debug, Clone, Deserialize, Serialize, Default, PartialEq)]
#[serde(default)]
pub struct LogConfig {
    /// Destination log file path.
    pub file_path: String,

    /// Maximum size of the active log file in megabytes before rotation.
    /// Zero selects the 100 MB default.
    pub max_size: u64,

    /// Maximum number of rotated backups to retain. Zero retains all.
    pub max_backups: usize,

    /// Maximum age of a rotated backup in days. Zero retains regardless
    /// of age.
    pub max_age: u32,

    /// Gzip rotated backups.
    pub compress: bool,

    /// Severity level name (debug|info|warn|error|dpanic|panic|fatal).
    /// An unrecognized name degrades to "info".
    pub level: String,
}

/// Connection details for one named MCP backend target.
#[derive(Debug, Clone, Deserialize, Serialize, Default, PartialEq)]
#[serde(default)]
pub struct ServiceConfig {
    /// Base URL of the backend. Not validated at load time.
    pub base_url: String,

    /// Extra headers attached to every request forwarded to this target.
    pub extra_header: HashMap<String, String>,

    /// Path to the target's local configuration file. Existence is not
    /// checked at load time.
    pub config_path: String,
}
