use crate::types::endpoint::Endpoint;
use thiserror::Error;

/// Failure to obtain a raw JSON document from an endpoint.
#[derive(Debug, Error)]
pub enum FetchError {
    #[error("Network request failed for {0}")]
    NetworkRequest(String, #[source] reqwest::Error),

    #[error("HTTP request failed for {url} with status {status}")]
    HttpStatus {
        url: String,
        status: reqwest::StatusCode,
        #[source]
        source: reqwest::Error,
    },

    #[error("Failed to decode JSON body from {url}")]
    Decode {
        url: String,
        #[source]
        source: reqwest::Error,
    },

    // Raised by non-HTTP fetchers (fixtures, replay files) that have nothing for the endpoint.
    #[error("No {endpoint} data available: {message}")]
    Unavailable { endpoint: Endpoint, message: String },
}
