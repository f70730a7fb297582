#[derive(thiserror::Error, Debug)]
pub enum CollectionError {
    #[error("failed to fetch resource '{url}', status: {status}")]
    FetchFailure { url: String, status: String },
    #[error("resource '{url}' changed but the response carries no ETag header")]
    MissingValidator { url: String },
    #[error("resource '{url}' returned an ETag that is not valid text: {message}")]
    InvalidValidator { url: String, message: String },
    #[error("transport failure requesting '{url}': {message}")]
    TransportFailure { url: String, message: String },
    #[error("failed to build HTTP client: {0}")]
    ClientBuildError(String),
}
