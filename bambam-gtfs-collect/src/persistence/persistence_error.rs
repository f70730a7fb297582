use std::path::PathBuf;

use crate::collection::ResourceCategory;

#[derive(thiserror::Error, Debug)]
pub enum PersistenceError {
    #[error("failed to decode GTFS-realtime header of {category} file: {source}")]
    DecodeFailure {
        category: ResourceCategory,
        source: prost::DecodeError,
    },
    #[error("GTFS-realtime header of {0} file has no timestamp")]
    MissingTimestamp(ResourceCategory),
    #[error("GTFS-realtime header timestamp {0} is not a representable date")]
    TimestampOutOfRange(u64),
    #[error("error building output directory '{path:?}': {message}")]
    CreateDirFailure { path: PathBuf, message: String },
    #[error("error writing file '{path:?}': {message}")]
    WriteFailure { path: PathBuf, message: String },
}
