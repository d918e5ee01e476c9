use crate::grid_data::error::FetchError;
use crate::grid_data::fetcher::EndpointFetcher;
use crate::types::endpoint::Endpoint;
use crate::types::time_window::TimeWindow;
use bon::Builder;
use log::{info, warn};
use reqwest::header::ACCEPT;
use reqwest::Client;
use serde_json::Value;

pub const DEFAULT_BASE_URL: &str = "https://api.carbonintensity.org.uk";

/// Fetches endpoint documents over HTTP from the Carbon Intensity API.
///
/// # Examples
///
/// ```
/// use carbon_intensity::HttpFetcher;
///
/// let default = HttpFetcher::new();
/// assert_eq!(default.base_url(), "https://api.carbonintensity.org.uk");
///
/// let mirror = HttpFetcher::builder().base_url("http://localhost:8080/").build();
/// assert_eq!(mirror.base_url(), "http://localhost:8080/");
/// ```
#[derive(Debug, Clone, Builder)]
pub struct HttpFetcher {
    #[builder(into, default = DEFAULT_BASE_URL.to_string())]
    base_url: String,
    #[builder(default)]
    client: Client,
}

impl Default for HttpFetcher {
    fn default() -> Self {
        Self::new()
    }
}

impl HttpFetcher {
    pub fn new() -> Self {
        Self::builder().build()
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// `{base}/{segment}/{from}/{to}`
    pub(crate) fn url(&self, endpoint: Endpoint, window: &TimeWindow) -> String {
        format!(
            "{}/{}/{}/{}",
            self.base_url.trim_end_matches('/'),
            endpoint.path_segment(),
            window.from_param(),
            window.to_param()
        )
    }

    async fn download(&self, url: String) -> Result<Value, FetchError> {
        info!("Downloading data from {}", url);

        let response = self
            .client
            .get(&url)
            .header(ACCEPT, "application/json")
            .send()
            .await
            .map_err(|e| FetchError::NetworkRequest(url.clone(), e))?;

        let response = match response.error_for_status() {
            Ok(resp) => resp,
            Err(e) => {
                warn!("HTTP error for {}: {:?}", url, e);
                return Err(if let Some(status) = e.status() {
                    FetchError::HttpStatus {
                        url,
                        status,
                        source: e,
                    }
                } else {
                    FetchError::NetworkRequest(url, e)
                });
            }
        };

        response
            .json::<Value>()
            .await
            .map_err(|e| FetchError::Decode { url, source: e })
    }
}

impl EndpointFetcher for HttpFetcher {
    async fn fetch(&self, endpoint: Endpoint, window: &TimeWindow) -> Result<Value, FetchError> {
        self.download(self.url(endpoint, window)).await
    }
}
