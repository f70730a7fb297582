mod collect_app;
mod collection_loop;
mod collector_config;
mod collector_error;
mod source_preset;

pub use collect_app::{CollectApp, CollectOperation};
pub use collection_loop::CollectionLoop;
pub use collector_config::{CollectorConfig, PersistenceConfig};
pub use collector_error::CollectorError;
pub use source_preset::SourcePreset;
