//! Response normalizer: turns one raw endpoint document into a flat `DataFrame` with one row
//! per half-hour reading (national endpoints) or per half-hour and region (regional endpoint).

pub mod error;
pub(crate) mod frame_builder;
pub(crate) mod steps;

use crate::error::CarbonIntensityError;
use crate::normalize::error::MalformedResponseError;
use crate::normalize::frame_builder::{Cell, FrameBuilder};
use crate::normalize::steps::{
    child, element, entries, explode_list, flatten_object, label, number, pivot_fuel_mix,
    required_int, required_str,
};
use crate::types::endpoint::Endpoint;
use log::{debug, warn};
use polars::prelude::DataFrame;
use serde_json::Value;
use std::collections::HashSet;

/// Normalizes a raw document returned by `endpoint`.
///
/// Column layout per endpoint:
/// * [`Endpoint::Intensity`]: `from, to, forecast, actual, index`
/// * [`Endpoint::Generation`]: `from, to` followed by one percentage column per fuel
/// * [`Endpoint::Regional`]: `from, to, regionid, shortname, forecast, index` followed by one
///   percentage column per fuel
///
/// Fuel columns appear in the order fuels are first seen. When a key repeats (same `from`/`to`,
/// plus `regionid` for the regional endpoint) the first row is kept and later ones are dropped
/// with a warning.
///
/// # Errors
///
/// Returns [`CarbonIntensityError::MalformedResponse`] if an expected nested field is absent or
/// of the wrong type, or if a fuel appears twice in one generation mix.
///
/// # Examples
///
/// ```
/// use carbon_intensity::{normalize, Endpoint};
/// use serde_json::json;
///
/// let document = json!({"data": [{
///     "from": "2024-01-01T00:00Z",
///     "to": "2024-01-01T00:30Z",
///     "intensity": {"forecast": 140, "actual": 135, "index": "moderate"}
/// }]});
/// let frame = normalize(Endpoint::Intensity, &document).unwrap();
/// assert_eq!(frame.shape(), (1, 5));
/// ```
pub fn normalize(endpoint: Endpoint, document: &Value) -> Result<DataFrame, CarbonIntensityError> {
    let builder = match endpoint {
        Endpoint::Intensity => normalize_intensity(document)?,
        Endpoint::Generation => normalize_generation(document)?,
        Endpoint::Regional => normalize_regional(document)?,
    };
    let frame = builder.finish()?;
    debug!("Normalized {} response into {:?} frame", endpoint, frame.shape());
    Ok(frame)
}

/// Tracks row keys, dropping repeats on a first-wins basis.
struct KeyGuard {
    endpoint: Endpoint,
    seen: HashSet<(String, String, Option<i64>)>,
}

impl KeyGuard {
    fn new(endpoint: Endpoint) -> Self {
        Self {
            endpoint,
            seen: HashSet::new(),
        }
    }

    fn admit(&mut self, from: &str, to: &str, region: Option<i64>) -> bool {
        let fresh = self
            .seen
            .insert((from.to_string(), to.to_string(), region));
        if !fresh {
            warn!(
                "Duplicate {} key from={} to={}{} dropped, keeping the first occurrence",
                self.endpoint,
                from,
                to,
                region.map(|r| format!(" regionid={}", r)).unwrap_or_default()
            );
        }
        fresh
    }
}

fn time_key(
    endpoint: Endpoint,
    entry: &Value,
    path: &str,
) -> Result<(String, String), MalformedResponseError> {
    Ok((
        required_str(endpoint, entry, "from", path)?,
        required_str(endpoint, entry, "to", path)?,
    ))
}

fn key_cells(from: &str, to: &str) -> Vec<(String, Cell)> {
    vec![
        ("from".to_string(), Cell::Str(Some(from.to_string()))),
        ("to".to_string(), Cell::Str(Some(to.to_string()))),
    ]
}

fn normalize_intensity(document: &Value) -> Result<FrameBuilder, MalformedResponseError> {
    let endpoint = Endpoint::Intensity;
    let mut builder = FrameBuilder::with_columns(&[
        ("from", Cell::Str(None)),
        ("to", Cell::Str(None)),
        ("forecast", Cell::Float(None)),
        ("actual", Cell::Float(None)),
        ("index", Cell::Str(None)),
    ]);
    let mut keys = KeyGuard::new(endpoint);

    for (position, entry) in entries(endpoint, document)?.iter().enumerate() {
        let path = element("data", position);
        let (from, to) = time_key(endpoint, entry, &path)?;
        let intensity = flatten_object(endpoint, entry, "intensity", &path)?;
        let intensity_path = child(&path, "intensity");

        let mut row = key_cells(&from, &to);
        row.push((
            "forecast".to_string(),
            number(endpoint, intensity, "forecast", &intensity_path, true)?,
        ));
        // Future periods carry no actual reading yet.
        row.push((
            "actual".to_string(),
            number(endpoint, intensity, "actual", &intensity_path, false)?,
        ));
        row.push((
            "index".to_string(),
            label(endpoint, intensity, "index", &intensity_path)?,
        ));

        if keys.admit(&from, &to, None) {
            builder.push_row(row);
        }
    }
    Ok(builder)
}

fn normalize_generation(document: &Value) -> Result<FrameBuilder, MalformedResponseError> {
    let endpoint = Endpoint::Generation;
    let mut builder =
        FrameBuilder::with_columns(&[("from", Cell::Str(None)), ("to", Cell::Str(None))]);
    let mut keys = KeyGuard::new(endpoint);

    for (position, entry) in entries(endpoint, document)?.iter().enumerate() {
        let path = element("data", position);
        let (from, to) = time_key(endpoint, entry, &path)?;
        let mix = explode_list(endpoint, entry, "generationmix", &path)?;

        let mut row = key_cells(&from, &to);
        row.extend(pivot_fuel_mix(
            endpoint,
            mix,
            &child(&path, "generationmix"),
        )?);

        if keys.admit(&from, &to, None) {
            builder.push_row(row);
        }
    }
    Ok(builder)
}

fn normalize_regional(document: &Value) -> Result<FrameBuilder, MalformedResponseError> {
    let endpoint = Endpoint::Regional;
    let mut builder = FrameBuilder::with_columns(&[
        ("from", Cell::Str(None)),
        ("to", Cell::Str(None)),
        ("regionid", Cell::Int(None)),
        ("shortname", Cell::Str(None)),
        ("forecast", Cell::Float(None)),
        ("index", Cell::Str(None)),
    ]);
    let mut keys = KeyGuard::new(endpoint);

    for (position, entry) in entries(endpoint, document)?.iter().enumerate() {
        let path = element("data", position);
        let (from, to) = time_key(endpoint, entry, &path)?;
        let regions = explode_list(endpoint, entry, "regions", &path)?;

        for (region_position, region) in regions.iter().enumerate() {
            let region_path = element(&child(&path, "regions"), region_position);
            let region_id = required_int(endpoint, region, "regionid", &region_path)?;
            let shortname = required_str(endpoint, region, "shortname", &region_path)?;
            let intensity = flatten_object(endpoint, region, "intensity", &region_path)?;
            let intensity_path = child(&region_path, "intensity");
            let mix = explode_list(endpoint, region, "generationmix", &region_path)?;

            let mut row = key_cells(&from, &to);
            row.push(("regionid".to_string(), Cell::Int(Some(region_id))));
            row.push(("shortname".to_string(), Cell::Str(Some(shortname))));
            row.push((
                "forecast".to_string(),
                number(endpoint, intensity, "forecast", &intensity_path, true)?,
            ));
            row.push((
                "index".to_string(),
                label(endpoint, intensity, "index", &intensity_path)?,
            ));
            row.extend(pivot_fuel_mix(
                endpoint,
                mix,
                &child(&region_path, "generationmix"),
            )?);

            if keys.admit(&from, &to, Some(region_id)) {
                builder.push_row(row);
            }
        }
    }
    Ok(builder)
}
