//! the subset of the GTFS-realtime `FeedMessage` schema needed to bucket a feed by
//! its creation time. fields not declared here are skipped by the decoder.
//! see [https://gtfs.org/documentation/realtime/proto/].
use prost::Message;

use super::PersistenceError;
use crate::collection::ResourceCategory;

#[derive(Clone, PartialEq, Message)]
pub struct FeedMessage {
    #[prost(message, required, tag = "1")]
    pub header: FeedHeader,
}

#[derive(Clone, PartialEq, Message)]
pub struct FeedHeader {
    #[prost(string, required, tag = "1")]
    pub gtfs_realtime_version: String,
    /// POSIX time at which the feed content was created on the server
    #[prost(uint64, optional, tag = "3")]
    pub timestamp: Option<u64>,
}

/// reads the header timestamp (seconds since epoch) of a GTFS-realtime feed.
pub fn decode_header_timestamp(
    category: ResourceCategory,
    content: &[u8],
) -> Result<u64, PersistenceError> {
    let feed = FeedMessage::decode(content)
        .map_err(|source| PersistenceError::DecodeFailure { category, source })?;
    feed.header
        .timestamp
        .ok_or(PersistenceError::MissingTimestamp(category))
}
