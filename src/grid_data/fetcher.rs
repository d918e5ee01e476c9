use crate::grid_data::error::FetchError;
use crate::types::endpoint::Endpoint;
use crate::types::time_window::TimeWindow;
use serde_json::Value;
use std::future::Future;

/// Source of raw endpoint documents for a time window.
///
/// [`crate::HttpFetcher`] talks to the live API; anything else that can produce the same JSON
/// documents (recorded responses, test fixtures) can be plugged into
/// [`crate::CarbonIntensity::with_fetcher`].
pub trait EndpointFetcher: Send + Sync {
    /// Returns the parsed JSON body for `endpoint` over `window`.
    fn fetch(
        &self,
        endpoint: Endpoint,
        window: &TimeWindow,
    ) -> impl Future<Output = Result<Value, FetchError>> + Send;
}
