//! Startup orchestration.
//!
//! # Responsibilities
//! - Load and validate configuration
//! - Load the customer dataset and prepare the choice log
//! - Install the metrics exporter when enabled
//! - Bind the listener
//!
//! # Design Decisions
//! - Fail fast: any startup error is fatal
//! - Without a config file, data lives next to the executable, not the shell's cwd
//! - The dataset loads before the listener binds (traffic only when ready)

use std::path::{Path, PathBuf};
use thiserror::Error;
use tokio::net::TcpListener;

use crate::choices::{ChoiceLog, ChoiceLogError};
use crate::config::{self, ConfigError, DataConfig, ListenerConfig, ObservabilityConfig, ServiceConfig};
use crate::dataset::{self, DatasetError};
use crate::http::AppState;
use crate::observability::metrics;

/// Errors that stop the service from starting.
#[derive(Debug, Error)]
pub enum StartupError {
    #[error("configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error("customer dataset unavailable: {0}")]
    Dataset(#[from] DatasetError),

    #[error("choice log unavailable: {0}")]
    ChoiceLog(#[from] ChoiceLogError),

    #[error("cannot locate the service executable: {0}")]
    InstallDir(#[source] std::io::Error),

    #[error("failed to bind {address}: {source}")]
    Bind {
        address: String,
        #[source]
        source: std::io::Error,
    },

    #[error("invalid metrics address '{0}'")]
    MetricsAddress(String),

    #[error("metrics exporter failed to start: {0}")]
    Metrics(#[from] metrics_exporter_prometheus::BuildError),
}

/// Load configuration from `path`, or use defaults when no path is given.
///
/// Defaults place the data files in the directory holding the executable.
pub fn load_config(path: Option<&Path>) -> Result<ServiceConfig, StartupError> {
    match path {
        Some(path) => Ok(config::load_config(path)?),
        None => {
            let mut config = ServiceConfig::default();
            config.data.anchor_root(&install_dir()?);
            Ok(config)
        }
    }
}

fn install_dir() -> Result<PathBuf, StartupError> {
    let exe = std::env::current_exe().map_err(StartupError::InstallDir)?;
    Ok(exe.parent().map(Path::to_path_buf).unwrap_or_default())
}

/// Load the customer dataset and make sure the choice log exists.
pub fn prepare_state(data: &DataConfig) -> Result<AppState, StartupError> {
    let customers = dataset::load(&data.customers_path())?;
    metrics::record_customers_loaded(customers.len());

    let choices = ChoiceLog::new(data.choice_log_path());
    choices.ensure_exists()?;

    Ok(AppState::new(customers, choices))
}

/// Install the Prometheus exporter if metrics are enabled.
pub fn start_metrics(config: &ObservabilityConfig) -> Result<(), StartupError> {
    if !config.metrics_enabled {
        return Ok(());
    }
    let addr = config
        .metrics_address
        .parse()
        .map_err(|_| StartupError::MetricsAddress(config.metrics_address.clone()))?;
    metrics::init_metrics(addr)?;
    Ok(())
}

/// Bind the public listener.
pub async fn bind(config: &ListenerConfig) -> Result<TcpListener, StartupError> {
    TcpListener::bind(&config.bind_address)
        .await
        .map_err(|source| StartupError::Bind {
            address: config.bind_address.clone(),
            source,
        })
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;

    fn data_config(dir: &Path) -> DataConfig {
        DataConfig {
            root: dir.to_path_buf(),
            ..DataConfig::default()
        }
    }

    #[test]
    fn test_prepare_state_creates_choice_log() {
        let dir = tempfile::tempdir().unwrap();
        fs::write(dir.path().join("df_ui.csv"), "Customer_ID,Segment\n1,High\n").unwrap();

        let state = prepare_state(&data_config(dir.path())).unwrap();
        assert_eq!(state.customers.as_ref().unwrap().len(), 1);
        assert!(dir.path().join("choice_log.csv").exists());
    }

    #[test]
    fn test_missing_dataset_is_fatal() {
        let dir = tempfile::tempdir().unwrap();
        let err = prepare_state(&data_config(dir.path())).unwrap_err();
        assert!(matches!(err, StartupError::Dataset(DatasetError::Missing(_))));
        // Nothing is created when startup fails
        assert!(!dir.path().join("choice_log.csv").exists());
    }

    #[test]
    fn test_defaults_without_config_file() {
        let config = load_config(None).unwrap();
        assert_eq!(config.data.customers_file, "df_ui.csv");
    }

    #[test]
    fn test_default_root_is_executable_dir() {
        let exe = std::env::current_exe().unwrap();
        let exe_dir = exe.parent().unwrap();

        let config = load_config(None).unwrap();
        assert!(config.data.root.is_absolute());
        assert_eq!(config.data.customers_path(), exe_dir.join("df_ui.csv"));
        assert_eq!(config.data.choice_log_path(), exe_dir.join("choice_log.csv"));
    }
}
