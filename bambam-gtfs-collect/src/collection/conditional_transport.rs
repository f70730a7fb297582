use std::time::Duration;

use reqwest::{
    blocking::Client,
    header::{ETAG, IF_NONE_MATCH},
    StatusCode,
};

use super::CollectionError;

/// the three response classes a conditional download distinguishes.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum TransportResponse {
    /// new content. `validator` is the raw ETag header, if the origin sent one.
    Modified {
        content: Vec<u8>,
        validator: Option<Vec<u8>>,
    },
    /// the origin confirmed the validator still matches (HTTP 304).
    NotModified,
    /// any other status code.
    Unexpected { status: u16 },
}

/// a transport capable of issuing a GET request carrying an `If-None-Match` validator.
pub trait ConditionalTransport {
    fn conditional_get(
        &self,
        url: &str,
        validator: &str,
    ) -> Result<TransportResponse, CollectionError>;
}

/// blocking reqwest client. the validator header is omitted while no validator is known.
pub struct ReqwestTransport {
    client: Client,
}

impl ReqwestTransport {
    pub fn new(timeout: Duration) -> Result<Self, CollectionError> {
        let client = Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| CollectionError::ClientBuildError(e.to_string()))?;
        Ok(Self { client })
    }
}

impl ConditionalTransport for ReqwestTransport {
    fn conditional_get(
        &self,
        url: &str,
        validator: &str,
    ) -> Result<TransportResponse, CollectionError> {
        let mut request = self.client.get(url);
        if !validator.is_empty() {
            request = request.header(IF_NONE_MATCH, validator);
        }
        log::debug!("GET {url} with If-None-Match '{validator}'");
        let response = request
            .send()
            .map_err(|e| CollectionError::TransportFailure {
                url: String::from(url),
                message: e.to_string(),
            })?;

        match response.status() {
            StatusCode::OK => {
                let validator = response
                    .headers()
                    .get(ETAG)
                    .map(|v| v.as_bytes().to_vec());
                let content = response
                    .bytes()
                    .map_err(|e| CollectionError::TransportFailure {
                        url: String::from(url),
                        message: format!("failure reading response body: {e}"),
                    })?;
                Ok(TransportResponse::Modified {
                    content: content.to_vec(),
                    validator,
                })
            }
            StatusCode::NOT_MODIFIED => Ok(TransportResponse::NotModified),
            other => Ok(TransportResponse::Unexpected {
                status: other.as_u16(),
            }),
        }
    }
}
