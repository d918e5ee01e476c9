//! The individual flatten and pivot steps the endpoint normalizers are assembled from.
//!
//! Every step takes the endpoint and a `path` describing where in the document it is looking,
//! so a failure points at the exact nested value that was missing or malformed.

use crate::normalize::error::MalformedResponseError;
use crate::normalize::frame_builder::Cell;
use crate::types::endpoint::Endpoint;
use serde_json::{Map, Value};
use std::collections::HashSet;

/// Columns the normalizers and the feature deriver claim. A fuel with one of these names, or
/// any `index_` name, would overwrite or be mistaken for them.
const RESERVED_COLUMNS: [&str; 13] = [
    "from",
    "to",
    "regionid",
    "shortname",
    "forecast",
    "actual",
    "index",
    "year",
    "month",
    "yearMonth",
    "date",
    "season",
    "season_rank",
];

fn is_reserved(name: &str) -> bool {
    RESERVED_COLUMNS.contains(&name) || name.starts_with("index_")
}

/// Top-level entries of a response, from either the `{"data": [...]}` envelope or a bare array.
pub(crate) fn entries(endpoint: Endpoint, document: &Value) -> Result<&[Value], MalformedResponseError> {
    match document {
        Value::Array(items) => Ok(items),
        Value::Object(_) => explode_list(endpoint, document, "data", ""),
        _ => Err(MalformedResponseError::UnexpectedType {
            endpoint,
            path: "data".to_string(),
            expected: "an object or an array",
        }),
    }
}

/// Child path of `field` under `parent`.
pub(crate) fn child(parent: &str, field: &str) -> String {
    if parent.is_empty() {
        field.to_string()
    } else {
        format!("{}.{}", parent, field)
    }
}

pub(crate) fn element(parent: &str, position: usize) -> String {
    format!("{}[{}]", parent, position)
}

fn get<'a>(
    endpoint: Endpoint,
    parent: &'a Value,
    field: &str,
    path: &str,
) -> Result<&'a Value, MalformedResponseError> {
    match parent.get(field) {
        Some(value) => Ok(value),
        None => Err(MalformedResponseError::MissingField {
            endpoint,
            path: child(path, field),
        }),
    }
}

/// Explode step: the array stored in `parent[field]`, one element per output row.
pub(crate) fn explode_list<'a>(
    endpoint: Endpoint,
    parent: &'a Value,
    field: &str,
    path: &str,
) -> Result<&'a [Value], MalformedResponseError> {
    get(endpoint, parent, field, path)?
        .as_array()
        .map(Vec::as_slice)
        .ok_or_else(|| MalformedResponseError::UnexpectedType {
            endpoint,
            path: child(path, field),
            expected: "an array",
        })
}

/// Flatten step: the object stored in `parent[field]`, whose members become sibling columns of
/// the parent record.
pub(crate) fn flatten_object<'a>(
    endpoint: Endpoint,
    parent: &'a Value,
    field: &str,
    path: &str,
) -> Result<&'a Map<String, Value>, MalformedResponseError> {
    get(endpoint, parent, field, path)?
        .as_object()
        .ok_or_else(|| MalformedResponseError::UnexpectedType {
            endpoint,
            path: child(path, field),
            expected: "an object",
        })
}

pub(crate) fn required_str(
    endpoint: Endpoint,
    parent: &Value,
    field: &str,
    path: &str,
) -> Result<String, MalformedResponseError> {
    get(endpoint, parent, field, path)?
        .as_str()
        .map(str::to_string)
        .ok_or_else(|| MalformedResponseError::UnexpectedType {
            endpoint,
            path: child(path, field),
            expected: "a string",
        })
}

pub(crate) fn required_int(
    endpoint: Endpoint,
    parent: &Value,
    field: &str,
    path: &str,
) -> Result<i64, MalformedResponseError> {
    get(endpoint, parent, field, path)?
        .as_i64()
        .ok_or_else(|| MalformedResponseError::UnexpectedType {
            endpoint,
            path: child(path, field),
            expected: "an integer",
        })
}

/// Numeric member of a flattened object. `null` is always accepted as missing; an absent key
/// only when `required` is false.
pub(crate) fn number(
    endpoint: Endpoint,
    object: &Map<String, Value>,
    field: &str,
    path: &str,
    required: bool,
) -> Result<Cell, MalformedResponseError> {
    match object.get(field) {
        None if required => Err(MalformedResponseError::MissingField {
            endpoint,
            path: child(path, field),
        }),
        None | Some(Value::Null) => Ok(Cell::Float(None)),
        Some(value) => value
            .as_f64()
            .map(|n| Cell::Float(Some(n)))
            .ok_or_else(|| MalformedResponseError::UnexpectedType {
                endpoint,
                path: child(path, field),
                expected: "a number",
            }),
    }
}

pub(crate) fn label(
    endpoint: Endpoint,
    object: &Map<String, Value>,
    field: &str,
    path: &str,
) -> Result<Cell, MalformedResponseError> {
    match object.get(field) {
        None => Err(MalformedResponseError::MissingField {
            endpoint,
            path: child(path, field),
        }),
        Some(Value::Null) => Ok(Cell::Str(None)),
        Some(Value::String(s)) => Ok(Cell::Str(Some(s.clone()))),
        Some(_) => Err(MalformedResponseError::UnexpectedType {
            endpoint,
            path: child(path, field),
            expected: "a string",
        }),
    }
}

/// Explode-and-pivot step for a generation mix: turns `[{fuel, percentage}, ...]` into one
/// `(fuel, percentage)` column per pair, in list order.
///
/// Fails when a pair has no fuel name, its percentage is not numeric, a fuel appears twice, or a
/// fuel is named like one of the record's own columns.
pub(crate) fn pivot_fuel_mix(
    endpoint: Endpoint,
    mix: &[Value],
    path: &str,
) -> Result<Vec<(String, Cell)>, MalformedResponseError> {
    let mut seen = HashSet::with_capacity(mix.len());
    let mut columns = Vec::with_capacity(mix.len());
    for (position, pair) in mix.iter().enumerate() {
        let pair_path = element(path, position);
        let fuel = required_str(endpoint, pair, "fuel", &pair_path)?;
        if is_reserved(&fuel) {
            return Err(MalformedResponseError::ReservedFuelName {
                endpoint,
                path: child(&pair_path, "fuel"),
                fuel,
            });
        }
        let percentage = match get(endpoint, pair, "percentage", &pair_path)? {
            Value::Null => Cell::Float(None),
            value => Cell::Float(Some(value.as_f64().ok_or_else(|| {
                MalformedResponseError::UnexpectedType {
                    endpoint,
                    path: child(&pair_path, "percentage"),
                    expected: "a number",
                }
            })?)),
        };
        if !seen.insert(fuel.clone()) {
            return Err(MalformedResponseError::DuplicateFuel {
                endpoint,
                path: path.to_string(),
                fuel,
            });
        }
        columns.push((fuel, percentage));
    }
    Ok(columns)
}
