//! Configuration loading from disk.

use std::fs;
use std::path::{Path, PathBuf};
use thiserror::Error;

use crate::config::schema::ServiceConfig;
use crate::config::validation::{validate_config, ValidationError};

/// Error type for configuration loading.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("cannot read {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("parse error: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("validation failed: {}", join_errors(.0))]
    Validation(Vec<ValidationError>),
}

fn join_errors(errors: &[ValidationError]) -> String {
    errors
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join(", ")
}

/// Load and validate configuration from a TOML file.
///
/// A relative `data.root` is resolved against the directory holding the
/// config file, so a deployment can be started from any working directory.
pub fn load_config(path: &Path) -> Result<ServiceConfig, ConfigError> {
    let content = fs::read_to_string(path).map_err(|source| ConfigError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    let mut config = parse_config(&content)?;

    if let Some(dir) = path.parent() {
        config.data.anchor_root(dir);
    }

    Ok(config)
}

/// Parse and validate configuration from TOML text.
pub fn parse_config(content: &str) -> Result<ServiceConfig, ConfigError> {
    let config: ServiceConfig = toml::from_str(content)?;
    validate_config(&config).map_err(ConfigError::Validation)?;
    Ok(config)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_minimal_config_uses_defaults() {
        let config = parse_config("[listener]\nbind_address = \"127.0.0.1:9000\"\n").unwrap();
        assert_eq!(config.listener.bind_address, "127.0.0.1:9000");
        assert_eq!(config.data.customers_file, "df_ui.csv");
        assert_eq!(config.data.choice_log_file, "choice_log.csv");
        assert!(!config.observability.metrics_enabled);
    }

    #[test]
    fn test_invalid_config_rejected() {
        let err = parse_config("[timeouts]\nrequest_secs = 0\n").unwrap_err();
        assert!(matches!(err, ConfigError::Validation(ref e) if e.len() == 1));
        assert!(err.to_string().contains("timeouts.request_secs"));

        let err = parse_config("[listener\n").unwrap_err();
        assert!(matches!(err, ConfigError::Parse(_)));
    }

    #[test]
    fn test_relative_root_resolved_against_config_dir() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("service.toml");
        fs::write(&path, "[data]\nroot = \"api\"\n").unwrap();

        let config = load_config(&path).unwrap();
        assert_eq!(config.data.root, dir.path().join("api"));
        assert_eq!(config.data.customers_path(), dir.path().join("api").join("df_ui.csv"));

        fs::write(&path, "[data]\nroot = \"/srv/rfm\"\n").unwrap();
        let config = load_config(&path).unwrap();
        assert_eq!(config.data.root, PathBuf::from("/srv/rfm"));
    }
}
