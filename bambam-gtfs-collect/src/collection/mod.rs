mod collection_error;
mod conditional_transport;
mod downloader;
mod fetched_resource;
mod resource_category;
mod source_endpoints;
mod transit_source;
mod validator_table;

pub use collection_error::CollectionError;
pub use conditional_transport::{ConditionalTransport, ReqwestTransport, TransportResponse};
pub use downloader::ConditionalDownloader;
pub use fetched_resource::FetchedResource;
pub use resource_category::ResourceCategory;
pub use source_endpoints::SourceEndpoints;
pub use transit_source::TransitSource;
pub use validator_table::ValidatorTable;

#[cfg(test)]
pub(crate) use downloader::test as transport_fixtures;
