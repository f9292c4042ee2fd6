//! Configuration loading from disk.

use std::fs;
use std::path::Path;

use crate::config::schema::Config;

/// Error type for configuration loading.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("failed to read config file {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse config file {path}: {source}")]
    Parse {
        path: String,
        #[source]
        source: serde_yaml::Error,
    },

    /// A previous initialization attempt already failed; the store holds
    /// no configuration and will never retry.
    #[error("configuration unavailable: initial load failed")]
    Unavailable,
}

/// Load configuration from a YAML file.
///
/// Parsing is non-strict: unknown keys are ignored and absent fields
/// take their zero values.
pub fn load_config(path: &Path) -> Result<Config, ConfigError> {
    let content = fs::read(path).map_err(|source| ConfigError::Io {
        path: path.display().to_string(),
        source,
    })?;
    let config: Config =
        serde_yaml::from_slice(&content).map_err(|source| ConfigError::Parse {
            path: path.display().to_string(),
            source,
        })?;

    Ok(config)
}

#[cfg(test)]
mod tests {
    use std::io::Write;

    use super::*;

    fn write_doc(dir: &tempfile::TempDir, doc: &str) -> std::path::PathBuf {
        let path = dir.path().join("config.yaml");
        let mut f = fs::File::create(&path).unwrap();
        f.write_all(doc.as_bytes()).unwrap();
        path
    }

    #[test]
    fn test_load_full_document() {
        let dir = tempfile::TempDir::new().unwrap();
        let path = write_doc(
            &dir,
            r#"
server:
  port: 8080
log:
  file_path: logs/mesh.log
  max_size: 64
  max_backups: 7
  max_age: 30
  compress: true
  level: warn
mcp_config:
  svcA:
    base_url: "http://x"
    extra_header:
      Authorization: "Bearer t"
    config_path: /etc/a.yaml
"#,
        );

        let cfg = load_config(&path).unwrap();
        assert_eq!(cfg.server.port, 8080);
        assert_eq!(cfg.log.file_path, "logs/mesh.log");
        assert_eq!(cfg.log.max_size, 64);
        assert_eq!(cfg.log.max_backups, 7);
        assert_eq!(cfg.log.max_age, 30);
        assert!(cfg.log.compress);
        assert_eq!(cfg.log.level, "warn");

        let svc = &cfg.mcp_config["svcA"];
        assert_eq!(svc.base_url, "http://x");
        assert_eq!(svc.extra_header["Authorization"], "Bearer t");
        assert_eq!(svc.config_path, "/etc/a.yaml");
    }

    #[test]
    fn test_missing_file_is_io_error() {
        let err = load_config(Path::new("/nonexistent/config.yaml")).unwrap_err();
        assert!(matches!(err, ConfigError::Io { .. }));
    }

    #[test]
    fn test_malformed_document_is_parse_error() {
        let dir = tempfile::TempDir::new().unwrap();
        let path = write_doc(&dir, "server:\n  port: not-a-number\n");
        let err = load_config(&path).unwrap_err();
        assert!(matches!(err, ConfigError::Parse { .. }));
    }
}
