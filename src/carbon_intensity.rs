//! This module provides the main entry point for retrieving carbon intensity data.
//! It resolves a [`RequestMode`] into a [`Plan`], fetches the needed endpoints, normalizes and
//! joins their responses, and derives the calendar features of the result.

use crate::assembly::assembler::{assemble, WideInputs};
use crate::assembly::features::derive_features;
use crate::assembly::output::{package, Output};
use crate::assembly::plan::{resolve, Plan, WideSource};
use crate::assembly::widen::widen;
use crate::error::CarbonIntensityError;
use crate::grid_data::data_loader::HttpFetcher;
use crate::grid_data::fetcher::EndpointFetcher;
use crate::normalize::normalize;
use crate::types::calendar::{Month, Year};
use crate::types::endpoint::Endpoint;
use crate::types::request_mode::RequestMode;
use crate::types::time_window::TimeWindow;
use bon::bon;
use log::{debug, info};
use polars::prelude::DataFrame;

/// The main client for retrieving carbon intensity datasets.
///
/// Generic over the [`EndpointFetcher`] that supplies raw documents; [`CarbonIntensity::new`]
/// uses [`HttpFetcher`] against the public API.
///
/// # Examples
///
/// ```no_run
/// # use carbon_intensity::{CarbonIntensity, CarbonIntensityError, RequestMode, TimeWindow};
/// # #[tokio::main]
/// # async fn main() -> Result<(), CarbonIntensityError> {
/// let client = CarbonIntensity::new();
/// let window = TimeWindow::parse("2024-03-01T00:00Z", "2024-03-02T00:00Z")?;
/// let mode = RequestMode::builder().intensity(true).generation(true).build();
///
/// let output = client.run(&window, mode).await?;
/// let wide = output.wide().expect("wide output for national flags");
/// println!("{}", wide.frame);
/// # Ok(())
/// # }
/// ```
pub struct CarbonIntensity<F = HttpFetcher> {
    fetcher: F,
}

impl CarbonIntensity<HttpFetcher> {
    /// Creates a client that reads from the public Carbon Intensity API.
    pub fn new() -> Self {
        Self::with_fetcher(HttpFetcher::new())
    }
}

impl Default for CarbonIntensity<HttpFetcher> {
    fn default() -> Self {
        Self::new()
    }
}

#[bon]
impl<F: EndpointFetcher> CarbonIntensity<F> {
    /// Creates a client over any source of endpoint documents.
    pub fn with_fetcher(fetcher: F) -> Self {
        Self { fetcher }
    }

    pub fn fetcher(&self) -> &F {
        &self.fetcher
    }

    /// Retrieves and assembles the datasets selected by `mode` for one time window.
    ///
    /// The endpoints the mode needs are fetched concurrently; the regional endpoint is fetched
    /// once even when both regional flags are set. The wide dataset is the full outer join of
    /// the selected national and regional-wide frames on `(from, to)`; the long dataset is the
    /// regional records as fetched. Both get the derived calendar, season and rank columns.
    ///
    /// # Errors
    ///
    /// * [`CarbonIntensityError::DegenerateMode`] if no flag is set; nothing is fetched.
    /// * [`CarbonIntensityError::Fetch`] naming the endpoint whose request failed.
    /// * [`CarbonIntensityError::MalformedResponse`] if a response lacks an expected field.
    ///
    /// Any error aborts the whole run; no partial output is returned.
    pub async fn run(
        &self,
        window: &TimeWindow,
        mode: RequestMode,
    ) -> Result<Output, CarbonIntensityError> {
        let plan = resolve(mode).ok_or(CarbonIntensityError::DegenerateMode)?;
        info!(
            "Fetching {:?} for {} (wide sources {:?}, long {})",
            plan.fetch, window, plan.wide_sources, plan.long
        );

        let (intensity, generation, regional) = tokio::try_join!(
            self.fetch_normalized(&plan, Endpoint::Intensity, window),
            self.fetch_normalized(&plan, Endpoint::Generation, window),
            self.fetch_normalized(&plan, Endpoint::Regional, window),
        )?;

        let regional_wide = match (&regional, plan.joins(WideSource::RegionalWide)) {
            (Some(long), true) => Some(widen(long)?),
            _ => None,
        };

        let wide = assemble(WideInputs {
            intensity,
            generation,
            regional_wide,
        })?
        .map(derive_features)
        .transpose()?;

        let long = match regional {
            Some(long) if plan.long => Some(derive_features(long)?),
            _ => None,
        };

        package(wide, long)
    }

    async fn fetch_normalized(
        &self,
        plan: &Plan,
        endpoint: Endpoint,
        window: &TimeWindow,
    ) -> Result<Option<DataFrame>, CarbonIntensityError> {
        if !plan.fetches(endpoint) {
            return Ok(None);
        }
        let document = self
            .fetcher
            .fetch(endpoint, window)
            .await
            .map_err(|source| CarbonIntensityError::Fetch { endpoint, source })?;
        let frame = normalize(endpoint, &document)?;
        debug!("{} {} -> {} rows", endpoint, window, frame.height());
        Ok(Some(frame))
    }

    /// Runs [`CarbonIntensity::run`] once per window, in order, and stacks the results: wide
    /// with wide and long with long. Rows are concatenated, not joined, so overlapping windows
    /// produce repeated periods.
    ///
    /// # Errors
    ///
    /// [`CarbonIntensityError::EmptyBatch`] for an empty window list, or
    /// [`CarbonIntensityError::BatchWindow`] wrapping the first failing window's error.
    pub async fn run_batch(
        &self,
        windows: &[TimeWindow],
        mode: RequestMode,
    ) -> Result<Output, CarbonIntensityError> {
        if windows.is_empty() {
            return Err(CarbonIntensityError::EmptyBatch);
        }
        if mode.is_degenerate() {
            return Err(CarbonIntensityError::DegenerateMode);
        }

        let mut outputs = Vec::with_capacity(windows.len());
        for window in windows {
            let output = self
                .run(window, mode)
                .await
                .map_err(|e| CarbonIntensityError::BatchWindow {
                    window: *window,
                    source: Box::new(e),
                })?;
            outputs.push(output);
        }
        info!("Stacking {} window outputs", outputs.len());
        Output::concat(outputs)
    }

    /// Builds a series spanning whole calendar months, one request per month.
    ///
    /// # Arguments
    ///
    /// * `.start(Month)`: **Required.** First month, inclusive.
    /// * `.end(Month)`: **Required.** Last month, inclusive.
    /// * `.mode(RequestMode)`: **Required.** Datasets to produce for every month.
    ///
    /// # Examples
    ///
    /// ```no_run
    /// # use carbon_intensity::{CarbonIntensity, CarbonIntensityError, Month, RequestMode};
    /// # #[tokio::main]
    /// # async fn main() -> Result<(), CarbonIntensityError> {
    /// let client = CarbonIntensity::new();
    /// let output = client
    ///     .monthly()
    ///     .start(Month(2022, 1))
    ///     .end(Month(2022, 12))
    ///     .mode(RequestMode::builder().intensity(true).build())
    ///     .call()
    ///     .await?;
    /// println!("{} half hours", output.wide().map_or(0, |w| w.height()));
    /// # Ok(())
    /// # }
    /// ```
    #[builder]
    pub async fn monthly(
        &self,
        start: Month,
        end: Month,
        mode: RequestMode,
    ) -> Result<Output, CarbonIntensityError> {
        let windows = TimeWindow::monthly(start, end)?;
        self.run_batch(&windows, mode).await
    }

    /// Builds a series over whole calendar years, one request per month.
    ///
    /// # Arguments
    ///
    /// * `.start(Year)`: **Required.** First year, inclusive.
    /// * `.end(Year)`: **Required.** Last year, inclusive.
    /// * `.mode(RequestMode)`: **Required.** Datasets to produce for every month.
    #[builder]
    pub async fn yearly(
        &self,
        start: Year,
        end: Year,
        mode: RequestMode,
    ) -> Result<Output, CarbonIntensityError> {
        let windows = TimeWindow::yearly(start, end)?;
        self.run_batch(&windows, mode).await
    }
}
