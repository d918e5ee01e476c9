use crate::types::endpoint::Endpoint;
use thiserror::Error;

/// A response document did not have the nested shape its endpoint promises.
///
/// `path` locates the offending value inside the document, e.g.
/// `data[3].regions[0].generationmix[2].fuel`.
#[derive(Debug, Error, PartialEq)]
pub enum MalformedResponseError {
    #[error("Malformed {endpoint} response: missing field '{path}'")]
    MissingField { endpoint: Endpoint, path: String },

    #[error("Malformed {endpoint} response: '{path}' should be {expected}")]
    UnexpectedType {
        endpoint: Endpoint,
        path: String,
        expected: &'static str,
    },

    #[error("Malformed {endpoint} response: fuel '{fuel}' listed twice in '{path}'")]
    DuplicateFuel {
        endpoint: Endpoint,
        path: String,
        fuel: String,
    },

    #[error("Malformed {endpoint} response: fuel name '{fuel}' at '{path}' clashes with a record column")]
    ReservedFuelName {
        endpoint: Endpoint,
        path: String,
        fuel: String,
    },
}
