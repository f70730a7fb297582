use std::path::{Path, PathBuf};
use std::time::Duration;

use config::{Config, Environment, File};
use serde::{Deserialize, Serialize};

use super::CollectorError;
use crate::{collection::SourceEndpoints, gate::GateConfig, persistence::DuplicateStaticPolicy};

pub const ENV_PREFIX: &str = "BAMBAM_GTFS_COLLECT";
pub const DEFAULT_POLLING_INTERVAL: &str = "30s";
pub const DEFAULT_REQUEST_TIMEOUT: &str = "30s";

/// settings of a GTFS collection run. read from an optional TOML file and
/// `BAMBAM_GTFS_COLLECT_*` environment variables, where `__` separates nested keys,
/// e.g. `BAMBAM_GTFS_COLLECT_GATE__FAILURE_THRESHOLD=3`.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct CollectorConfig {
    /// urls of the source. when absent, a source preset must be chosen.
    #[serde(default)]
    pub endpoints: Option<SourceEndpoints>,
    /// directory under which files are saved
    #[serde(default)]
    pub data_root: Option<PathBuf>,
    /// minimum time between the starts of consecutive collection cycles,
    /// in human-readable time values such as 30s, 2m
    #[serde(default = "default_polling_interval")]
    pub polling_interval: String,
    #[serde(default = "default_request_timeout")]
    pub request_timeout: String,
    #[serde(default)]
    pub gate: GateConfig,
    #[serde(default)]
    pub persistence: PersistenceConfig,
}

#[derive(Clone, Debug, Default, Serialize, Deserialize)]
pub struct PersistenceConfig {
    #[serde(default)]
    pub duplicate_static_policy: DuplicateStaticPolicy,
}

fn default_polling_interval() -> String {
    String::from(DEFAULT_POLLING_INTERVAL)
}

fn default_request_timeout() -> String {
    String::from(DEFAULT_REQUEST_TIMEOUT)
}

impl Default for CollectorConfig {
    fn default() -> Self {
        Self {
            endpoints: None,
            data_root: None,
            polling_interval: default_polling_interval(),
            request_timeout: default_request_timeout(),
            gate: GateConfig::default(),
            persistence: PersistenceConfig::default(),
        }
    }
}

impl CollectorConfig {
    /// load the configuration from `config_file` (if provided) with environment
    /// variable overrides applied on top.
    pub fn load(config_file: Option<&Path>) -> Result<CollectorConfig, CollectorError> {
        let mut builder = Config::builder();
        if let Some(path) = config_file {
            if !path.is_file() {
                let msg = format!("config file '{}' does not exist", path.display());
                return Err(CollectorError::InvalidUserInput(msg));
            }
            builder = builder.add_source(File::from(path));
        }
        let config = builder
            .add_source(
                Environment::with_prefix(ENV_PREFIX)
                    .prefix_separator("_")
                    .separator("__")
                    .try_parsing(true),
            )
            .build()?;
        let collector_config: CollectorConfig = config.try_deserialize()?;
        Ok(collector_config)
    }

    pub fn polling_interval(&self) -> Result<Duration, CollectorError> {
        parse_duration(&self.polling_interval)
    }

    pub fn request_timeout(&self) -> Result<Duration, CollectorError> {
        parse_duration(&self.request_timeout)
    }

    /// checks that the configuration describes a runnable collection.
    pub fn validate(&self) -> Result<(), CollectorError> {
        let endpoints = self.endpoints.as_ref().ok_or_else(|| {
            CollectorError::InvalidUserInput(String::from(
                "no source endpoints configured, provide [endpoints] or a source preset",
            ))
        })?;
        let missing = endpoints.missing_categories();
        if !missing.is_empty() {
            let names = missing.iter().map(|c| c.as_str()).collect::<Vec<_>>().join(", ");
            return Err(CollectorError::InvalidUserInput(format!(
                "endpoints missing a url for: {names}"
            )));
        }
        if self.data_root.is_none() {
            return Err(CollectorError::InvalidUserInput(String::from(
                "no data root configured",
            )));
        }
        self.polling_interval()?;
        self.request_timeout()?;
        self.gate.validate()?;
        Ok(())
    }
}

fn parse_duration(s: &str) -> Result<Duration, CollectorError> {
    humantime::parse_duration(s)
        .map_err(|e| CollectorError::InvalidUserInput(format!("Invalid duration '{s}': {e}")))
}
