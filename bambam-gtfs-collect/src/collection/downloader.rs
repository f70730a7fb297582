use super::{
    CollectionError, ConditionalTransport, FetchedResource, ResourceCategory, SourceEndpoints,
    TransportResponse, ValidatorTable,
};

/// utility for downloading GTFS files in a controlled way. a file is only returned
/// when its entity tag differs from the one seen on the previous download.
pub struct ConditionalDownloader<T> {
    endpoints: SourceEndpoints,
    validators: ValidatorTable,
    transport: T,
}

impl<T: ConditionalTransport> ConditionalDownloader<T> {
    pub fn new(endpoints: SourceEndpoints, transport: T) -> Self {
        Self {
            endpoints,
            validators: ValidatorTable::default(),
            transport,
        }
    }

    pub fn validators(&self) -> &ValidatorTable {
        &self.validators
    }

    pub fn transport(&self) -> &T {
        &self.transport
    }

    /// download the GTFS file of type `category` if it changed since the last download.
    ///
    /// # Result
    /// `Some` with new content, `None` when the origin reports the file as not modified,
    /// or an error for any other response. the validator table is only updated when
    /// `Some` is returned.
    pub fn fetch(
        &mut self,
        category: ResourceCategory,
    ) -> Result<Option<FetchedResource>, CollectionError> {
        let url = self.endpoints.get(&category);
        let validator = self.validators.get(&category);
        match self.transport.conditional_get(url, validator)? {
            TransportResponse::Modified { content, validator } => {
                let raw = validator.ok_or_else(|| CollectionError::MissingValidator {
                    url: String::from(url),
                })?;
                let etag = String::from_utf8(raw).map_err(|e| {
                    CollectionError::InvalidValidator {
                        url: String::from(url),
                        message: e.to_string(),
                    }
                })?;
                log::info!("{category} changed, new ETag {etag}");
                self.validators.set(category, etag.clone());
                Ok(Some(FetchedResource::new(category, content, etag)))
            }
            TransportResponse::NotModified => {
                log::debug!("{category} not modified at {url}");
                Ok(None)
            }
            TransportResponse::Unexpected { status } => Err(CollectionError::FetchFailure {
                url: String::from(url),
                status: format!("HTTP {status}"),
            }),
        }
    }
}
