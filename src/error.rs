use crate::grid_data::error::FetchError;
use crate::normalize::error::MalformedResponseError;
use crate::types::endpoint::Endpoint;
use crate::types::time_window::TimeWindow;
use polars::error::PolarsError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum CarbonIntensityError {
    #[error("Fetching {endpoint} data failed")]
    Fetch {
        endpoint: Endpoint,
        #[source]
        source: FetchError,
    },

    #[error(transparent)]
    MalformedResponse(#[from] MalformedResponseError),

    #[error("Request mode selects no dataset, set at least one flag")]
    DegenerateMode,

    #[error("Invalid time window: {0}")]
    InvalidWindow(String),

    #[error("Timestamp '{0}' is not in YYYY-MM-DDTHH:MMZ form")]
    TimestampParse(String, #[source] chrono::ParseError),

    #[error("Batch run needs at least one time window")]
    EmptyBatch,

    #[error("Batch run failed for window {window}")]
    BatchWindow {
        window: TimeWindow,
        #[source]
        source: Box<CarbonIntensityError>,
    },

    #[error("Column '{column}' is provided by more than one assembled dataset")]
    ColumnCollision { column: String },

    #[error("Required column '{0}' not found in DataFrame")]
    ColumnNotFound(String, #[source] PolarsError),

    #[error("Failed processing DataFrame: {0}")]
    PolarsError(#[from] PolarsError),
}

/// A label that is not one of the levels of an ordered category.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[error("'{label}' is not a known {kind} level")]
pub struct UnknownLevelError {
    pub kind: &'static str,
    pub label: String,
}
