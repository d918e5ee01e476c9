//! Contains the `LongFrame` wrapper for the per-region dataset.

use crate::types::time_window::TimeWindow;
use crate::filtering::CarbonFrameFilterExt;
use polars::prelude::{col, lit, DataFrame, IntoLazy, LazyFrame};

/// The long dataset of a run: one row per half-hour period and region, with the region's
/// forecast, index and generation mix, followed by the derived calendar and season fields.
#[derive(Debug, Clone)]
pub struct LongFrame {
    /// The underlying materialised Polars frame.
    pub frame: DataFrame,
}

impl LongFrame {
    pub fn new(frame: DataFrame) -> Self {
        Self { frame }
    }

    pub fn lazy(&self) -> LazyFrame {
        self.frame.clone().lazy()
    }

    /// Lazily keeps one region's rows.
    pub fn region(&self, region_id: i64) -> LazyFrame {
        self.lazy().filter(col("regionid").eq(lit(region_id)))
    }

    pub fn get_range(&self, window: &TimeWindow) -> LazyFrame {
        self.lazy().filter_period(window)
    }

    pub fn height(&self) -> usize {
        self.frame.height()
    }
}
