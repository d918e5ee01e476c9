//! The half-hour aligned `[from, to)` window every request is made for.

use crate::error::CarbonIntensityError;
use crate::types::calendar::{Month, Year};
use chrono::{DateTime, NaiveDate, NaiveDateTime, TimeZone, Timelike, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Timestamp form used in API paths and in the `from`/`to` columns of every frame.
pub(crate) const TIMESTAMP_FORMAT: &str = "%Y-%m-%dT%H:%MZ";

/// A pair of half-hour aligned UTC timestamps with `from < to`.
///
/// The span length is not checked; the upstream API limits how wide a single request may be,
/// and keeping requests inside that limit is up to the caller (see [`TimeWindow::monthly`]).
///
/// # Examples
///
/// ```
/// use carbon_intensity::TimeWindow;
///
/// let window = TimeWindow::parse("2024-03-01T00:00Z", "2024-03-01T01:00Z").unwrap();
/// assert_eq!(window.from_param(), "2024-03-01T00:00Z");
/// assert_eq!(window.to_string(), "2024-03-01T00:00Z/2024-03-01T01:00Z");
///
/// // Windows must move forward in time.
/// assert!(TimeWindow::parse("2024-03-01T01:00Z", "2024-03-01T00:00Z").is_err());
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct TimeWindow {
    from: DateTime<Utc>,
    to: DateTime<Utc>,
}

impl TimeWindow {
    /// Creates a window, rejecting reversed or empty windows and timestamps that do not fall on
    /// a half-hour boundary.
    pub fn new(from: DateTime<Utc>, to: DateTime<Utc>) -> Result<Self, CarbonIntensityError> {
        for ts in [from, to] {
            if ts.minute() % 30 != 0 || ts.second() != 0 || ts.nanosecond() != 0 {
                return Err(CarbonIntensityError::InvalidWindow(format!(
                    "{} is not aligned to a half hour",
                    ts.format(TIMESTAMP_FORMAT)
                )));
            }
        }
        if from >= to {
            return Err(CarbonIntensityError::InvalidWindow(format!(
                "from ({}) must be before to ({})",
                from.format(TIMESTAMP_FORMAT),
                to.format(TIMESTAMP_FORMAT)
            )));
        }
        Ok(Self { from, to })
    }

    /// Parses both ends from the `YYYY-MM-DDTHH:MMZ` form used by the API.
    pub fn parse(from: &str, to: &str) -> Result<Self, CarbonIntensityError> {
        Self::new(parse_timestamp(from)?, parse_timestamp(to)?)
    }

    /// The window covering one calendar month, from its first instant to the first instant of
    /// the following month.
    pub fn for_month(month: Month) -> Result<Self, CarbonIntensityError> {
        Self::new(month_start(month)?, month_start(month.next())?)
    }

    /// One window per calendar month from `start` to `end`, both inclusive.
    ///
    /// Returns an empty list when `start` is after `end`.
    ///
    /// # Examples
    ///
    /// ```
    /// use carbon_intensity::{Month, TimeWindow};
    ///
    /// let windows = TimeWindow::monthly(Month(2023, 11), Month(2024, 2)).unwrap();
    /// assert_eq!(windows.len(), 4);
    /// assert_eq!(windows[1].to_string(), "2023-12-01T00:00Z/2024-01-01T00:00Z");
    /// ```
    pub fn monthly(start: Month, end: Month) -> Result<Vec<Self>, CarbonIntensityError> {
        let mut windows = Vec::new();
        let mut current = start;
        while current <= end {
            windows.push(Self::for_month(current)?);
            current = current.next();
        }
        Ok(windows)
    }

    /// One window per calendar month of the years `start` through `end`, both inclusive.
    pub fn yearly(start: Year, end: Year) -> Result<Vec<Self>, CarbonIntensityError> {
        (start.get()..=end.get())
            .flat_map(|year| Year(year).months())
            .map(Self::for_month)
            .collect()
    }

    pub fn from(&self) -> DateTime<Utc> {
        self.from
    }

    pub fn to(&self) -> DateTime<Utc> {
        self.to
    }

    pub fn from_param(&self) -> String {
        self.from.format(TIMESTAMP_FORMAT).to_string()
    }

    pub fn to_param(&self) -> String {
        self.to.format(TIMESTAMP_FORMAT).to_string()
    }
}

impl fmt::Display for TimeWindow {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}", self.from_param(), self.to_param())
    }
}

fn parse_timestamp(value: &str) -> Result<DateTime<Utc>, CarbonIntensityError> {
    NaiveDateTime::parse_from_str(value, TIMESTAMP_FORMAT)
        .map(|naive| Utc.from_utc_datetime(&naive))
        .map_err(|e| CarbonIntensityError::TimestampParse(value.to_string(), e))
}

fn month_start(month: Month) -> Result<DateTime<Utc>, CarbonIntensityError> {
    NaiveDate::from_ymd_opt(month.year(), month.month(), 1)
        .and_then(|date| date.and_hms_opt(0, 0, 0))
        .map(|naive| Utc.from_utc_datetime(&naive))
        .ok_or_else(|| CarbonIntensityError::InvalidWindow(format!("{} is not a valid month", month)))
}
