//! Contains the `WideFrame` wrapper for the assembled one-row-per-period dataset.

use crate::filtering::CarbonFrameFilterExt;
use crate::types::time_window::TimeWindow;
use polars::prelude::{DataFrame, Expr, IntoLazy, LazyFrame};

/// The wide dataset of a run: one row per half-hour period, with the selected national
/// measures and per-region `measure_regionId` columns side by side, followed by the derived
/// calendar and season fields.
///
/// Periods reported by only some of the joined sources have nulls in the other sources'
/// columns.
#[derive(Debug, Clone)]
pub struct WideFrame {
    /// The underlying materialised Polars frame.
    pub frame: DataFrame,
}

impl WideFrame {
    pub fn new(frame: DataFrame) -> Self {
        Self { frame }
    }

    /// A lazy view over the frame, for further Polars processing.
    pub fn lazy(&self) -> LazyFrame {
        self.frame.clone().lazy()
    }

    /// Lazily filters the rows with a Polars predicate.
    pub fn filter(&self, predicate: Expr) -> LazyFrame {
        self.lazy().filter(predicate)
    }

    /// Lazily keeps only periods starting inside `window`.
    pub fn get_range(&self, window: &TimeWindow) -> LazyFrame {
        self.lazy().filter_period(window)
    }

    pub fn height(&self) -> usize {
        self.frame.height()
    }
}
