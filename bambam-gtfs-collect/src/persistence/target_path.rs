use std::path::{Path, PathBuf};

use chrono::{DateTime, Datelike, TimeDelta, Utc};
use sha2::{Digest, Sha256};

use super::{decode_header_timestamp, PersistenceError};
use crate::collection::FetchedResource;

/// ISO-8601 (year, week) of `datetime`, evaluated in UTC.
pub fn iso_bucket(datetime: &DateTime<Utc>) -> (i32, u32) {
    let iso = datetime.iso_week();
    (iso.year(), iso.week())
}

/// hex-encoded SHA-256 of the file contents.
pub fn content_fingerprint(content: &[u8]) -> String {
    hex::encode(Sha256::digest(content))
}

fn bucketed_path(data_root: &Path, file: &FetchedResource, bucket: (i32, u32), name: &str) -> PathBuf {
    let (year, week) = bucket;
    data_root
        .join(file.category.as_str())
        .join(year.to_string())
        .join(week.to_string())
        .join(name)
}

/// target path for a real-time GTFS `file`: `data_root/category/year/week/timestamp`,
/// where the timestamp is read from the feed header. the path depends only on
/// the contents of the file.
pub fn realtime_target(
    file: &FetchedResource,
    data_root: &Path,
) -> Result<PathBuf, PersistenceError> {
    let timestamp = decode_header_timestamp(file.category, &file.content)?;
    let server_time = i64::try_from(timestamp)
        .ok()
        .and_then(|secs| DateTime::<Utc>::from_timestamp(secs, 0))
        .ok_or(PersistenceError::TimestampOutOfRange(timestamp))?;
    Ok(bucketed_path(
        data_root,
        file,
        iso_bucket(&server_time),
        &timestamp.to_string(),
    ))
}

/// candidate paths of a static GTFS bundle, named by its content fingerprint.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct StaticTargets {
    /// where the bundle goes when saved during the ISO week of `now`
    pub current: PathBuf,
    /// the `current` path as it would have been computed 7 days earlier
    pub previous: PathBuf,
}

/// target paths for a static GTFS `file`. unlike real-time targets these depend on
/// `now`, so the same bundle maps to a new path in every ISO week.
pub fn static_targets(file: &FetchedResource, data_root: &Path, now: DateTime<Utc>) -> StaticTargets {
    let fingerprint = content_fingerprint(&file.content);
    let previous_week = now - TimeDelta::days(7);
    StaticTargets {
        current: bucketed_path(data_root, file, iso_bucket(&now), &fingerprint),
        previous: bucketed_path(data_root, file, iso_bucket(&previous_week), &fingerprint),
    }
}
