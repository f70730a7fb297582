//! determine full paths for GTFS file saving and save files.
mod duplicate_static_policy;
mod feed_header;
mod persistence_error;
mod persistence_router;
mod save_report;
mod storage_backend;
mod target_path;

pub use duplicate_static_policy::DuplicateStaticPolicy;
pub use feed_header::{decode_header_timestamp, FeedHeader, FeedMessage};
pub use persistence_error::PersistenceError;
pub use persistence_router::PersistenceRouter;
pub use save_report::SaveReport;
pub use storage_backend::{FileSystemStorage, InMemoryStorage, StorageBackend};
pub use target_path::{
    content_fingerprint, iso_bucket, realtime_target, static_targets, StaticTargets,
};

#[cfg(test)]
pub(crate) use feed_header::test as feed_fixtures;
