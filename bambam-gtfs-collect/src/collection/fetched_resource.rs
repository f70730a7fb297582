use super::ResourceCategory;

/// GTFS file contents and metadata, as returned by a "changed" conditional download.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct FetchedResource {
    pub category: ResourceCategory,
    pub content: Vec<u8>,
    /// entity tag supplied by the origin server for this content version
    pub validator: String,
}

impl FetchedResource {
    pub fn new(category: ResourceCategory, content: Vec<u8>, validator: String) -> Self {
        Self {
            category,
            content,
            validator,
        }
    }
}
