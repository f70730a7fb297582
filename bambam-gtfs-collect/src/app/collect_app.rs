use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::time::Duration;

use chrono::TimeDelta;
use clap::{Parser, Subcommand, ValueEnum};
use serde::{Deserialize, Serialize};

use super::{CollectionLoop, CollectorConfig, CollectorError, SourcePreset};
use crate::collection::{ConditionalDownloader, ReqwestTransport, TransitSource};
use crate::gate::CallGate;
use crate::persistence::{DuplicateStaticPolicy, FileSystemStorage, PersistenceRouter};
use crate::util::time_source::{SystemTimeSource, SystemTimeSourceDefault};

/// command line tool collecting static and real-time GTFS files of a transit agency
#[derive(Parser)]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct CollectApp {
    /// select the operation to run
    #[command(subcommand)]
    pub op: CollectOperation,
}

#[derive(Debug, Clone, Serialize, Deserialize, Subcommand)]
pub enum CollectOperation {
    /// poll a GTFS source, saving every new file under a data directory.
    Collect {
        /// a known source. overrides endpoints from the config file.
        #[arg(short, long, value_enum)]
        source: Option<SourcePreset>,
        /// TOML configuration file
        #[arg(short, long)]
        config_file: Option<String>,
        /// path where GTFS files will be saved. overrides `data_root` from the config file.
        #[arg(short, long)]
        data_path: Option<String>,
        /// minimum time between consecutive downloads. provide in human-readable
        /// time values: 30s, 2m, 1h...
        #[arg(short, long, value_parser = parse_duration)]
        wait: Option<Duration>,
        /// stop after this many collection cycles instead of running forever
        #[arg(long)]
        max_cycles: Option<u64>,
        #[arg(long, value_enum)]
        duplicate_static_policy: Option<DuplicateStaticPolicy>,
    },
    /// list the known GTFS sources and their urls
    Sources,
}

impl CollectOperation {
    pub fn run(&self) -> Result<(), CollectorError> {
        match self {
            CollectOperation::Collect {
                source,
                config_file,
                data_path,
                wait,
                max_cycles,
                duplicate_static_policy,
            } => {
                let mut config = CollectorConfig::load(config_file.as_ref().map(Path::new))?;
                if let Some(preset) = source {
                    config.endpoints = Some(preset.endpoints());
                }
                if let Some(path) = data_path {
                    config.data_root = Some(PathBuf::from(path));
                }
                if let Some(w) = wait {
                    config.polling_interval = humantime::format_duration(*w).to_string();
                }
                if let Some(policy) = duplicate_static_policy {
                    config.persistence.duplicate_static_policy = *policy;
                }
                run_collection(&config, *max_cycles)
            }
            CollectOperation::Sources => {
                for preset in SourcePreset::value_variants() {
                    let endpoints = preset.endpoints();
                    println!("{preset}");
                    for category in crate::collection::ResourceCategory::ALL {
                        println!("  {category}: {}", endpoints.get(&category));
                    }
                }
                Ok(())
            }
        }
    }
}

/// download files from the configured source and save them under the data root,
/// until `max_cycles` cycles have run (or forever).
pub fn run_collection(
    config: &CollectorConfig,
    max_cycles: Option<u64>,
) -> Result<(), CollectorError> {
    config.validate()?;
    let (endpoints, data_root) = match (&config.endpoints, &config.data_root) {
        (Some(e), Some(d)) => (e.clone(), d.clone()),
        _ => {
            return Err(CollectorError::InvalidUserInput(String::from(
                "collection requires endpoints and a data root",
            )))
        }
    };
    let polling_interval = TimeDelta::from_std(config.polling_interval()?).map_err(|e| {
        CollectorError::InvalidUserInput(format!("polling interval out of range: {e}"))
    })?;
    log::info!(
        "collecting {} into {data_root:?} every {}",
        endpoints.static_bundle,
        config.polling_interval
    );

    let time_source: Arc<dyn SystemTimeSource> = Arc::new(SystemTimeSourceDefault);
    let transport = ReqwestTransport::new(config.request_timeout()?)?;
    let gate = CallGate::new(&config.gate, time_source.clone())?;
    let source = TransitSource::new(
        ConditionalDownloader::new(endpoints, transport),
        gate,
        time_source.clone(),
    )
    .with_max_attempts(config.gate.max_attempts);
    let router = PersistenceRouter::new(
        &data_root,
        FileSystemStorage,
        time_source.clone(),
        config.persistence.duplicate_static_policy,
    );

    let mut collection_loop = CollectionLoop::new(source, router, time_source, polling_interval);
    let cycles = collection_loop.run(max_cycles);
    log::info!("completed {cycles} collection cycle(s)");
    Ok(())
}

fn parse_duration(s: &str) -> Result<Duration, String> {
    humantime::parse_duration(s).map_err(|e| format!("Invalid duration: {}", e))
}

#[cfg(test)]
mod test {
    use super::{CollectApp, CollectOperation};
    use crate::app::SourcePreset;
    use clap::Parser;
    use std::time::Duration;

    #[test]
    fn test_parse_collect_arguments() {
        let args = CollectApp::parse_from([
            "bambam_gtfs_collect",
            "collect",
            "--source",
            "krakow-bus",
            "--data-path",
            "/data",
            "--wait",
            "45s",
            "--max-cycles",
            "2",
        ]);
        match args.op {
            CollectOperation::Collect {
                source,
                data_path,
                wait,
                max_cycles,
                config_file,
                duplicate_static_policy,
            } => {
                assert_eq!(source, Some(SourcePreset::KrakowBus));
                assert_eq!(data_path.as_deref(), Some("/data"));
                assert_eq!(wait, Some(Duration::from_secs(45)));
                assert_eq!(max_cycles, Some(2));
                assert!(config_file.is_none());
                assert!(duplicate_static_policy.is_none());
            }
            CollectOperation::Sources => panic!("expected collect operation"),
        }
    }

    #[test]
    fn test_invalid_wait_is_rejected() {
        let result =
            CollectApp::try_parse_from(["bambam_gtfs_collect", "collect", "--wait", "often"]);
        assert!(result.is_err());
    }
}
