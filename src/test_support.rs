//! Synthetic API documents and an in-memory fetcher shared by the unit tests.

use crate::grid_data::error::FetchError;
use crate::grid_data::fetcher::EndpointFetcher;
use crate::types::endpoint::Endpoint;
use crate::types::time_window::TimeWindow;
use polars::prelude::DataFrame;
use serde_json::{json, Value};
use std::collections::HashMap;
use std::sync::Mutex;

pub(crate) const FUELS: [&str; 9] = [
    "biomass", "coal", "imports", "gas", "nuclear", "other", "hydro", "solar", "wind",
];

/// National mix used by [`generation_document`]; sums to exactly 100.
pub(crate) const NATIONAL_MIX: [f64; 9] = [5.0, 1.5, 8.5, 30.0, 15.0, 0.5, 2.0, 7.5, 30.0];

pub(crate) const INDEX_LABELS: [&str; 5] = ["very high", "high", "moderate", "low", "very low"];

pub(crate) fn column_names(frame: &DataFrame) -> Vec<String> {
    frame
        .get_column_names()
        .iter()
        .map(|name| name.to_string())
        .collect()
}

pub(crate) fn intensity_document(rows: &[(&str, &str, f64, Option<f64>, &str)]) -> Value {
    let data: Vec<Value> = rows
        .iter()
        .map(|(from, to, forecast, actual, index)| {
            json!({
                "from": from,
                "to": to,
                "intensity": {"forecast": forecast, "actual": actual, "index": index}
            })
        })
        .collect();
    json!({ "data": data })
}

pub(crate) fn generation_document(periods: &[(&str, &str)]) -> Value {
    let mix: Vec<Value> = FUELS
        .iter()
        .zip(NATIONAL_MIX)
        .map(|(fuel, percentage)| json!({"fuel": fuel, "percentage": percentage}))
        .collect();
    let data: Vec<Value> = periods
        .iter()
        .map(|(from, to)| json!({"from": from, "to": to, "generationmix": mix}))
        .collect();
    json!({ "data": data })
}

/// Forecast reported for a region in the `period`-th entry of [`regional_document_with`].
pub(crate) fn regional_forecast(period: usize, region: i64) -> f64 {
    100.0 + region as f64 * 10.0 + period as f64
}

pub(crate) fn regional_index(region: i64) -> &'static str {
    INDEX_LABELS[region as usize % INDEX_LABELS.len()]
}

/// Percentage reported for the `fuel`-th fuel of a region in the `period`-th entry.
pub(crate) fn regional_share(period: usize, region: i64, fuel: usize) -> f64 {
    fuel as f64 + region as f64 / 4.0 + period as f64 / 8.0
}

pub(crate) fn regional_document(periods: &[(&str, &str)], regions: &[(i64, &str)]) -> Value {
    regional_document_with(periods, regions, &FUELS)
}

pub(crate) fn regional_document_with(
    periods: &[(&str, &str)],
    regions: &[(i64, &str)],
    fuels: &[&str],
) -> Value {
    let data: Vec<Value> = periods
        .iter()
        .enumerate()
        .map(|(period, (from, to))| {
            let regions: Vec<Value> = regions
                .iter()
                .map(|(id, name)| {
                    let mix: Vec<Value> = fuels
                        .iter()
                        .enumerate()
                        .map(|(fuel, fuel_name)| {
                            json!({
                                "fuel": fuel_name,
                                "percentage": regional_share(period, *id, fuel)
                            })
                        })
                        .collect();
                    json!({
                        "regionid": id,
                        "dnoregion": format!("DNO {}", id),
                        "shortname": name,
                        "intensity": {
                            "forecast": regional_forecast(period, *id),
                            "index": regional_index(*id)
                        },
                        "generationmix": mix
                    })
                })
                .collect();
            json!({"from": from, "to": to, "regions": regions})
        })
        .collect();
    json!({ "data": data })
}

/// Serves fixed documents per endpoint and records which endpoints were asked for.
pub(crate) struct FixtureFetcher {
    documents: HashMap<Endpoint, Value>,
    calls: Mutex<Vec<(Endpoint, String)>>,
}

impl FixtureFetcher {
    pub(crate) fn new(documents: impl IntoIterator<Item = (Endpoint, Value)>) -> Self {
        Self {
            documents: documents.into_iter().collect(),
            calls: Mutex::new(Vec::new()),
        }
    }

    /// Endpoints requested so far, in sorted order.
    pub(crate) fn requested(&self) -> Vec<Endpoint> {
        let mut endpoints: Vec<Endpoint> = self
            .calls
            .lock()
            .map(|calls| calls.iter().map(|(endpoint, _)| *endpoint).collect())
            .unwrap_or_default();
        endpoints.sort_by_key(|e| Endpoint::ALL.iter().position(|x| x == e));
        endpoints
    }

    pub(crate) fn windows(&self) -> Vec<String> {
        self.calls
            .lock()
            .map(|calls| calls.iter().map(|(_, window)| window.clone()).collect())
            .unwrap_or_default()
    }
}

impl EndpointFetcher for FixtureFetcher {
    async fn fetch(&self, endpoint: Endpoint, window: &TimeWindow) -> Result<Value, FetchError> {
        if let Ok(mut calls) = self.calls.lock() {
            calls.push((endpoint, window.to_string()));
        }
        self.documents
            .get(&endpoint)
            .cloned()
            .ok_or_else(|| FetchError::Unavailable {
                endpoint,
                message: format!("no fixture for {}", window),
            })
    }
}

/// Two half-hour periods on 2024-01-01.
pub(crate) const TWO_PERIODS: [(&str, &str); 2] = [
    ("2024-01-01T00:00Z", "2024-01-01T00:30Z"),
    ("2024-01-01T00:30Z", "2024-01-01T01:00Z"),
];

/// A fetcher with consistent documents for all three endpoints over [`TWO_PERIODS`].
pub(crate) fn full_fixture_fetcher() -> FixtureFetcher {
    FixtureFetcher::new([
        (
            Endpoint::Intensity,
            intensity_document(&[
                (TWO_PERIODS[0].0, TWO_PERIODS[0].1, 210.0, Some(205.0), "high"),
                (TWO_PERIODS[1].0, TWO_PERIODS[1].1, 180.0, None, "moderate"),
            ]),
        ),
        (Endpoint::Generation, generation_document(&TWO_PERIODS)),
        (
            Endpoint::Regional,
            regional_document(&TWO_PERIODS, &[(1, "North Scotland"), (13, "London")]),
        ),
    ])
}
